use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 6, tags = ["2023", "easy", "math"])]
pub struct Solver;

#[derive(Debug)]
pub struct Races<'a> {
    times: Vec<&'a str>,
    records: Vec<&'a str>,
}

fn numbers_after<'a>(line: &'a str, label: &str) -> Option<Vec<&'a str>> {
    let rest = line.trim().strip_prefix(label)?;
    Some(rest.split_whitespace().collect())
}

impl AocParser for Solver {
    /// Digit groups kept as text; part 2 reads them with the spaces removed
    type SharedData<'a> = Races<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut times = None;
        let mut records = None;
        for (idx, line) in input.lines().enumerate() {
            if let Some(values) = numbers_after(line, "Time:") {
                times = Some(values);
            } else if let Some(values) = numbers_after(line, "Distance:") {
                records = Some(values);
            } else if !line.trim().is_empty() {
                return Err(ParseError::at_line(idx + 1, "expected Time: or Distance:"));
            }
        }
        let times = times.ok_or_else(|| ParseError::MissingData("Time: line".into()))?;
        let records = records.ok_or_else(|| ParseError::MissingData("Distance: line".into()))?;
        if times.len() != records.len() {
            return Err(ParseError::InvalidFormat(format!(
                "{} times but {} distances",
                times.len(),
                records.len()
            )));
        }
        if let Some(bad) = times.iter().chain(&records).find(|v| !v.bytes().all(|b| b.is_ascii_digit())) {
            return Err(ParseError::InvalidFormat(format!("not a number: {bad:?}")));
        }
        Ok(Races { times, records })
    }
}

/// Hold times `h` in `0..=time` with `h * (time - h) > record`
pub fn ways_to_win(time: u64, record: u64) -> u64 {
    let disc = (time as f64).powi(2) - 4.0 * record as f64;
    if disc < 0.0 {
        return 0;
    }
    let beats = |h: u64| h * (time - h) > record;
    let half = time / 2;
    // The float root is close; fix it up exactly
    let mut lo = (((time as f64 - disc.sqrt()) / 2.0).floor().max(0.0) as u64).min(half);
    while lo > 0 && beats(lo - 1) {
        lo -= 1;
    }
    while lo <= half && !beats(lo) {
        lo += 1;
    }
    if lo > half {
        return 0;
    }
    time - 2 * lo + 1
}

fn parse_number(text: &str) -> Result<u64, SolveError> {
    text.parse()
        .map_err(|e| SolveError::failed(format!("{text:?}: {e}")))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut product = 1;
        for (time, record) in shared.times.iter().zip(&shared.records) {
            product *= ways_to_win(parse_number(time)?, parse_number(record)?);
        }
        Ok(product.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let time = parse_number(&shared.times.concat())?;
        let record = parse_number(&shared.records.concat())?;
        Ok(ways_to_win(time, record).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "Time:      7  15   30\nDistance:  9  40  200\n";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "288");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "71503");
    }

    #[test]
    fn test_ways_to_win_edges() {
        assert_eq!(ways_to_win(7, 9), 4);
        assert_eq!(ways_to_win(30, 200), 9);
        // 2 * 2 == 4 only ties the record
        assert_eq!(ways_to_win(4, 4), 0);
        assert_eq!(ways_to_win(3, 100), 0);
        assert_eq!(ways_to_win(0, 0), 0);
    }

    #[test]
    fn test_mismatched_lines() {
        assert!(Solver::parse("Time: 7 15\nDistance: 9\n").is_err());
        assert!(Solver::parse("Time: 7\n").is_err());
    }
}
