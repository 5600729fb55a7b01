use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rustc_hash::{FxHashMap, FxHashSet};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 7, tags = ["2020", "easy", "graph"])]
pub struct Solver;

const MY_BAG: &str = "shiny gold";

/// Bag colour to `(count, colour)` of the bags it must directly hold
pub type Rules<'a> = FxHashMap<&'a str, Vec<(u64, &'a str)>>;

fn parse_rule(line: &str) -> anyhow::Result<(&str, Vec<(u64, &str)>)> {
    let (outer, contents) = line
        .split_once(" bags contain ")
        .ok_or_else(|| anyhow!("expected `<colour> bags contain ...`"))?;
    let contents = contents.trim_end_matches('.');
    if contents == "no other bags" {
        return Ok((outer, Vec::new()));
    }
    let inner = contents
        .split(", ")
        .map(|item| {
            let item = item
                .trim_end_matches(" bags")
                .trim_end_matches(" bag");
            let (count, colour) = item
                .split_once(' ')
                .ok_or_else(|| anyhow!("expected `<count> <colour>`, got {item:?}"))?;
            let count = count.parse::<u64>().with_context(|| format!("bad count in {item:?}"))?;
            Ok::<_, anyhow::Error>((count, colour))
        })
        .collect::<anyhow::Result<_>>()?;
    Ok((outer, inner))
}

impl AocParser for Solver {
    type SharedData<'a> = Rules<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| parse_rule(line.trim()).map_err(|e| ParseError::at_line(idx + 1, e)))
            .collect()
    }
}

/// Colours that eventually hold `target`
fn holders<'a>(rules: &Rules<'a>, target: &str) -> FxHashSet<&'a str> {
    let mut held_by: FxHashMap<&str, Vec<&str>> = FxHashMap::default();
    for (&outer, inner) in rules {
        for &(_, colour) in inner {
            held_by.entry(colour).or_default().push(outer);
        }
    }
    let mut seen = FxHashSet::default();
    let mut stack = vec![target];
    while let Some(colour) = stack.pop() {
        for &outer in held_by.get(colour).into_iter().flatten() {
            if seen.insert(outer) {
                stack.push(outer);
            }
        }
    }
    seen
}

/// Bags inside one `colour` bag, memoised per colour
fn contents<'a>(
    rules: &Rules<'a>,
    colour: &'a str,
    memo: &mut FxHashMap<&'a str, u64>,
    path: &mut Vec<&'a str>,
) -> Result<u64, SolveError> {
    if let Some(&count) = memo.get(colour) {
        return Ok(count);
    }
    if path.contains(&colour) {
        return Err(SolveError::failed(format!("{colour} bags contain themselves")));
    }
    path.push(colour);
    let mut total = 0;
    for &(count, inner) in rules.get(colour).into_iter().flatten() {
        total += count * (1 + contents(rules, inner, memo, path)?);
    }
    path.pop();
    memo.insert(colour, total);
    Ok(total)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(holders(shared, MY_BAG).len().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut memo = FxHashMap::default();
        Ok(contents(shared, MY_BAG, &mut memo, &mut Vec::new())?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "\
light red bags contain 1 bright white bag, 2 muted yellow bags.
dark orange bags contain 3 bright white bags, 4 muted yellow bags.
bright white bags contain 1 shiny gold bag.
muted yellow bags contain 2 shiny gold bags, 9 faded blue bags.
shiny gold bags contain 1 dark olive bag, 2 vibrant plum bags.
dark olive bags contain 3 faded blue bags, 4 dotted black bags.
vibrant plum bags contain 5 faded blue bags, 6 dotted black bags.
faded blue bags contain no other bags.
dotted black bags contain no other bags.
";

    const NESTED: &str = "\
shiny gold bags contain 2 dark red bags.
dark red bags contain 2 dark orange bags.
dark orange bags contain 2 dark yellow bags.
dark yellow bags contain 2 dark green bags.
dark green bags contain 2 dark blue bags.
dark blue bags contain 2 dark violet bags.
dark violet bags contain no other bags.
";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(shared["muted yellow"], [(2, "shiny gold"), (9, "faded blue")]);
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "4");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "32");
    }

    #[test]
    fn test_nested() {
        let mut shared = Solver::parse(NESTED).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "0");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "126");
    }

    #[test]
    fn test_cycle_is_an_error() {
        let mut shared = Solver::parse(
            "shiny gold bags contain 1 pale red bag.\npale red bags contain 2 shiny gold bags.\n",
        )
        .unwrap();
        assert!(Solver::solve_part(&mut shared, 2).is_err());
    }

    #[test]
    fn test_rejects_bad_count() {
        assert!(Solver::parse("shiny gold bags contain many red bags.\n").is_err());
    }
}
