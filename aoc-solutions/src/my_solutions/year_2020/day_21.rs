use std::collections::BTreeMap;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use rustc_hash::FxHashSet;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 21, tags = ["2020", "medium", "constraint"])]
pub struct Solver;

#[derive(Debug, Clone)]
pub struct Food<'a> {
    ingredients: FxHashSet<&'a str>,
    allergens: Vec<&'a str>,
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Food<'a>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                let line = line.trim();
                let (ingredients, allergens) = match line.split_once(" (contains ") {
                    Some((ingredients, rest)) => {
                        let list = rest
                            .strip_suffix(')')
                            .ok_or_else(|| ParseError::at_line(idx + 1, "unclosed allergen list"))?;
                        (ingredients, list.split(", ").collect())
                    }
                    None => (line, Vec::new()),
                };
                Ok(Food {
                    ingredients: ingredients.split_whitespace().collect(),
                    allergens,
                })
            })
            .collect()
    }
}

/// For each allergen, the ingredients found in every food listing it
fn suspects<'a>(foods: &[Food<'a>]) -> BTreeMap<&'a str, FxHashSet<&'a str>> {
    let mut suspects: BTreeMap<&str, FxHashSet<&str>> = BTreeMap::new();
    for food in foods {
        for &allergen in &food.allergens {
            suspects
                .entry(allergen)
                .and_modify(|set| set.retain(|i| food.ingredients.contains(i)))
                .or_insert_with(|| food.ingredients.clone());
        }
    }
    suspects
}

/// Settle allergens one at a time, each time picking one with a single
/// remaining suspect
fn dangerous<'a>(foods: &[Food<'a>]) -> Option<BTreeMap<&'a str, &'a str>> {
    let mut open = suspects(foods);
    let mut settled = BTreeMap::new();
    while !open.is_empty() {
        let (&allergen, ingredient) = open
            .iter()
            .find_map(|(allergen, set)| (set.len() == 1).then(|| (allergen, set.iter().next())))?;
        let ingredient = *ingredient?;
        open.remove(allergen);
        for set in open.values_mut() {
            set.remove(ingredient);
        }
        settled.insert(allergen, ingredient);
    }
    Some(settled)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let suspicious: FxHashSet<&str> = suspects(shared).into_values().flatten().collect();
        let safe = shared
            .iter()
            .flat_map(|food| &food.ingredients)
            .filter(|i| !suspicious.contains(*i))
            .count();
        Ok(safe.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let settled = dangerous(shared)
            .ok_or_else(|| SolveError::failed("allergens cannot be pinned to one ingredient each"))?;
        Ok(settled.values().join(","))
    }
}
