use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rustc_hash::FxHashSet;

const TARGET: i64 = 2020;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 1, tags = ["2020", "easy"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<i64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                line.trim()
                    .parse()
                    .map_err(|e| ParseError::at_line(idx + 1, e))
            })
            .collect()
    }
}

fn find_pair(entries: &[i64], seen: &FxHashSet<i64>, target: i64) -> Option<(i64, i64)> {
    entries
        .iter()
        .find(|&&e| target - e != e && seen.contains(&(target - e)))
        .map(|&e| (e, target - e))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let seen: FxHashSet<i64> = shared.iter().copied().collect();
        let (a, b) = find_pair(shared, &seen, TARGET)
            .ok_or_else(|| SolveError::failed("no two entries sum to 2020"))?;
        Ok((a * b).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let seen: FxHashSet<i64> = shared.iter().copied().collect();
        shared
            .iter()
            .find_map(|&first| {
                find_pair(shared, &seen, TARGET - first)
                    .filter(|&(a, b)| a != first && b != first)
                    .map(|(a, b)| first * a * b)
            })
            .map(|product| product.to_string())
            .ok_or_else(|| SolveError::failed("no three entries sum to 2020"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "1721\n979\n366\n299\n675\n1456\n";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "514579");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "241861950");
    }

    #[test]
    fn test_bad_line() {
        let err = Solver::parse("1721\nabc\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
