use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 5, tags = ["2020", "easy"])]
pub struct Solver;

/// A boarding pass is a 10-bit binary number: `B`/`R` are ones, `F`/`L` zeros
pub fn seat_id(pass: &str) -> Option<u16> {
    if pass.len() != 10 {
        return None;
    }
    pass.bytes().try_fold(0u16, |id, b| match b {
        b'B' | b'R' => Some(id << 1 | 1),
        b'F' | b'L' => Some(id << 1),
        _ => None,
    })
}

impl AocParser for Solver {
    /// Sorted seat IDs
    type SharedData<'a> = Vec<u16>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut ids = input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.is_empty())
            .map(|(idx, line)| {
                seat_id(line.trim())
                    .ok_or_else(|| ParseError::at_line(idx + 1, format!("bad pass {line:?}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        ids.sort_unstable();
        Ok(ids)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .last()
            .map(|id| id.to_string())
            .ok_or_else(|| SolveError::failed("no boarding passes"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .windows(2)
            .find(|w| w[1] == w[0] + 2)
            .map(|w| (w[0] + 1).to_string())
            .ok_or_else(|| SolveError::failed("no gap between seat IDs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    #[test]
    fn test_seat_ids() {
        assert_eq!(seat_id("FBFBBFFRLR"), Some(357));
        assert_eq!(seat_id("BFFFBBFRRR"), Some(567));
        assert_eq!(seat_id("FFFBBBFRRR"), Some(119));
        assert_eq!(seat_id("BBFFBBFRLL"), Some(820));
        assert_eq!(seat_id("BBFFBBFRLX"), None);
    }

    #[test]
    fn test_max_and_missing() {
        let mut shared = Solver::parse("BFFFBBFRRR\nFFFBBBFRRR\nBBFFBBFRLL\n").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "820");

        // 5, 6, 8, 9 -> 7 is missing
        let mut shared = Solver::parse("FFFFFFFRLR\nFFFFFFFRRL\nFFFFFFBLLL\nFFFFFFBLLR\n").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "7");
    }
}
