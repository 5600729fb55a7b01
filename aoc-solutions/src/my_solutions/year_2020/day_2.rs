use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 2, tags = ["2020", "easy"])]
pub struct Solver;

/// `lo-hi c: password`
#[derive(Debug)]
pub struct Entry<'a> {
    lo: usize,
    hi: usize,
    letter: u8,
    password: &'a [u8],
}

fn parse_entry(line: &str) -> Option<Entry<'_>> {
    let (policy, password) = line.split_once(": ")?;
    let (range, letter) = policy.split_once(' ')?;
    let (lo, hi) = range.split_once('-')?;
    let &[letter] = letter.as_bytes() else {
        return None;
    };
    Some(Entry {
        lo: lo.parse().ok()?,
        hi: hi.parse().ok()?,
        letter,
        password: password.as_bytes(),
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Entry<'a>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.is_empty())
            .map(|(idx, line)| {
                parse_entry(line)
                    .ok_or_else(|| ParseError::at_line(idx + 1, format!("bad policy {line:?}")))
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let valid = shared
            .iter()
            .filter(|e| {
                let count = e.password.iter().filter(|&&c| c == e.letter).count();
                (e.lo..=e.hi).contains(&count)
            })
            .count();
        Ok(valid.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // Positions are 1-based
        fn has_letter_at(e: &Entry<'_>, pos: usize) -> bool {
            pos >= 1 && e.password.get(pos - 1) == Some(&e.letter)
        }

        let valid = shared
            .iter()
            .filter(|e| has_letter_at(e, e.lo) ^ has_letter_at(e, e.hi))
            .count();
        Ok(valid.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "1-3 a: abcde\n1-3 b: cdefg\n2-9 c: ccccccccc\n";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "2");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "1");
    }

    #[test]
    fn test_malformed_policy() {
        assert!(Solver::parse("1-3 ab: abcde").is_err());
        assert!(Solver::parse("1:3 a: abcde").is_err());
    }
}
