use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2020, day = 25, tags = ["2020", "easy", "math"])]
pub struct Solver;

const MODULUS: u64 = 20_201_227;
const SUBJECT: u64 = 7;

impl AocParser for Solver {
    /// Card and door public keys
    type SharedData<'a> = (u64, u64);

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let keys: Vec<u64> = input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| line.trim().parse().map_err(|e| ParseError::at_line(idx + 1, e)))
            .collect::<Result<_, _>>()?;
        match keys[..] {
            [card, door] if card < MODULUS && door < MODULUS => Ok((card, door)),
            [_, _] => Err(ParseError::InvalidFormat(format!("keys must be below {MODULUS}"))),
            _ => Err(ParseError::InvalidFormat(format!("expected 2 public keys, found {}", keys.len()))),
        }
    }
}

/// `subject^loop_size mod MODULUS`
fn transform(subject: u64, loop_size: u64) -> u64 {
    let (mut base, mut exp, mut result) = (subject % MODULUS, loop_size, 1);
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * base % MODULUS;
        }
        base = base * base % MODULUS;
        exp >>= 1;
    }
    result
}

/// Smallest loop size that turns `SUBJECT` into `public_key`
fn loop_size(public_key: u64) -> Option<u64> {
    let mut value = 1;
    for size in 0..MODULUS {
        if value == public_key {
            return Some(size);
        }
        value = value * SUBJECT % MODULUS;
    }
    None
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (card, door) = *shared;
        let card_loop = loop_size(card)
            .ok_or_else(|| SolveError::failed(format!("{card} is not a power of {SUBJECT}")))?;
        log::debug!("card loop size {card_loop}");
        Ok(transform(door, card_loop).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    #[test]
    fn test_example() {
        let mut shared = Solver::parse("5764801\n17807724\n").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "14897079");
    }

    #[test]
    fn test_loop_sizes() {
        assert_eq!(loop_size(5764801), Some(8));
        assert_eq!(loop_size(17807724), Some(11));
        assert_eq!(transform(5764801, 11), transform(17807724, 8));
        assert_eq!(loop_size(0), None);
    }

    #[test]
    fn test_rejects_key_count() {
        assert!(Solver::parse("1\n").is_err());
        assert!(Solver::parse("1\n2\n3\n").is_err());
        assert!(Solver::parse("1\n30000000\n").is_err());
    }
}
