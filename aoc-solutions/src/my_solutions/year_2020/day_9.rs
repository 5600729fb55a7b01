use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::cmp::Ordering;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 9, tags = ["2020", "easy"])]
pub struct Solver;

const PREAMBLE: usize = 25;

#[derive(Debug)]
pub struct SharedData {
    numbers: Vec<u64>,
    invalid: Option<u64>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let numbers = input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                line.trim()
                    .parse()
                    .map_err(|e| ParseError::at_line(idx + 1, e))
            })
            .collect::<Result<_, _>>()?;
        Ok(SharedData {
            numbers,
            invalid: None,
        })
    }
}

/// First number that is not the sum of two distinct numbers among the
/// `preamble` before it
pub fn first_invalid(numbers: &[u64], preamble: usize) -> Option<u64> {
    numbers.windows(preamble + 1).find_map(|window| {
        let (previous, &[target]) = window.split_at(preamble) else {
            return None;
        };
        let valid = previous.iter().enumerate().any(|(i, &a)| {
            previous[i + 1..]
                .iter()
                .any(|&b| a != b && a.checked_add(b) == Some(target))
        });
        (!valid).then_some(target)
    })
}

/// Sum of smallest and largest in the contiguous run (2+ numbers) adding up
/// to `target`
pub fn encryption_weakness(numbers: &[u64], target: u64) -> Option<u64> {
    let (mut start, mut end, mut sum) = (0, 0, 0u128);
    while end <= numbers.len() {
        match sum.cmp(&u128::from(target)) {
            Ordering::Equal if end - start >= 2 => {
                let run = &numbers[start..end];
                let min = run.iter().min()?;
                let max = run.iter().max()?;
                return min.checked_add(*max);
            }
            Ordering::Less | Ordering::Equal if end < numbers.len() => {
                sum += u128::from(numbers[end]);
                end += 1;
            }
            Ordering::Greater if start < end => {
                sum -= u128::from(numbers[start]);
                start += 1;
            }
            _ => return None,
        }
    }
    None
}

fn invalid_number(shared: &mut SharedData) -> Result<u64, SolveError> {
    if let Some(invalid) = shared.invalid {
        return Ok(invalid);
    }
    let invalid = first_invalid(&shared.numbers, PREAMBLE)
        .ok_or_else(|| SolveError::failed("every number follows the rule"))?;
    shared.invalid = Some(invalid);
    Ok(invalid)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(invalid_number(shared)?.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let target = invalid_number(shared)?;
        encryption_weakness(&shared.numbers, target)
            .map(|w| w.to_string())
            .ok_or_else(|| SolveError::failed(format!("no contiguous run sums to {target}")))
    }
}
