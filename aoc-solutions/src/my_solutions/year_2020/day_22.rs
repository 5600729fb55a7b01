use std::collections::VecDeque;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rustc_hash::{FxHashMap, FxHashSet};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 22, tags = ["2020", "medium", "simulation", "recursion"])]
pub struct Solver;

type Deck = VecDeque<u32>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Player {
    One,
    Two,
}

impl AocParser for Solver {
    type SharedData<'a> = [Deck; 2];

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut decks: Vec<Deck> = Vec::new();
        for (idx, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with("Player") {
                decks.push(Deck::new());
                continue;
            }
            let card = line.parse().map_err(|e| ParseError::at_line(idx + 1, e))?;
            decks
                .last_mut()
                .ok_or_else(|| ParseError::at_line(idx + 1, "card before any player header"))?
                .push_back(card);
        }
        <[Deck; 2]>::try_from(decks)
            .map_err(|decks| ParseError::InvalidFormat(format!("expected 2 players, found {}", decks.len())))
    }
}

fn score(deck: &Deck) -> u64 {
    deck.iter()
        .rev()
        .zip(1..)
        .map(|(&card, position)| u64::from(card) * position)
        .sum()
}

/// Plain combat: the higher card takes both
pub fn combat([mut one, mut two]: [Deck; 2]) -> (Player, Deck) {
    while let (Some(&a), Some(&b)) = (one.front(), two.front()) {
        one.pop_front();
        two.pop_front();
        if a > b {
            one.extend([a, b]);
        } else {
            two.extend([b, a]);
        }
    }
    if two.is_empty() { (Player::One, one) } else { (Player::Two, two) }
}

/// Recursive combat. Sub-game winners are cached by their starting decks,
/// since the same sub-game recurs often.
struct RecursiveCombat {
    results: FxHashMap<(Deck, Deck), Player>,
}

impl RecursiveCombat {
    fn play(&mut self, mut one: Deck, mut two: Deck) -> (Player, Deck) {
        let start = (one.clone(), two.clone());
        let mut seen: FxHashSet<(Deck, Deck)> = FxHashSet::default();
        let outcome = loop {
            if !seen.insert((one.clone(), two.clone())) {
                break (Player::One, one);
            }
            let (Some(&a), Some(&b)) = (one.front(), two.front()) else {
                break if one.is_empty() { (Player::Two, two) } else { (Player::One, one) };
            };
            one.pop_front();
            two.pop_front();
            let winner = if one.len() >= a as usize && two.len() >= b as usize {
                let sub: (Deck, Deck) = (
                    one.iter().take(a as usize).copied().collect(),
                    two.iter().take(b as usize).copied().collect(),
                );
                match self.results.get(&sub) {
                    Some(&winner) => winner,
                    None => self.play(sub.0, sub.1).0,
                }
            } else if a > b {
                Player::One
            } else {
                Player::Two
            };
            match winner {
                Player::One => one.extend([a, b]),
                Player::Two => two.extend([b, a]),
            }
        };
        self.results.insert(start, outcome.0);
        outcome
    }
}

pub fn recursive_combat([one, two]: [Deck; 2]) -> (Player, Deck) {
    let mut game = RecursiveCombat {
        results: FxHashMap::default(),
    };
    let outcome = game.play(one, two);
    log::debug!("{} distinct games played", game.results.len());
    outcome
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (_, deck) = combat(shared.clone());
        Ok(score(&deck).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (_, deck) = recursive_combat(shared.clone());
        Ok(score(&deck).to_string())
    }
}
