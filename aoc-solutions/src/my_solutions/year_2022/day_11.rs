use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::math::lcm;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 11, tags = ["2022", "medium", "simulation", "math"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add(u64),
    Mul(u64),
    Square,
}

impl Operation {
    fn apply(self, old: u64) -> u64 {
        match self {
            Operation::Add(n) => old + n,
            Operation::Mul(n) => old * n,
            Operation::Square => old * old,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Monkey {
    items: Vec<u64>,
    operation: Operation,
    divisor: u64,
    if_true: usize,
    if_false: usize,
}

/// Text after `prefix` on the next line
fn field<'a>(lines: &mut impl Iterator<Item = &'a str>, prefix: &str) -> anyhow::Result<&'a str> {
    let line = lines.next().ok_or_else(|| anyhow!("missing `{prefix}` line"))?;
    line.trim()
        .strip_prefix(prefix)
        .map(str::trim)
        .ok_or_else(|| anyhow!("expected `{prefix}`, got {line:?}"))
}

fn parse_monkey(block: &str, expected: usize) -> anyhow::Result<Monkey> {
    let mut lines = block.lines().map(str::trim).filter(|l| !l.is_empty());
    let id: usize = field(&mut lines, "Monkey")?
        .trim_end_matches(':')
        .parse()
        .context("bad monkey id")?;
    if id != expected {
        bail!("expected monkey {expected}, found {id}");
    }
    let items = field(&mut lines, "Starting items:")?
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.trim().parse().with_context(|| format!("bad item {s:?}")))
        .collect::<anyhow::Result<_>>()?;
    let operation = match field(&mut lines, "Operation: new = old")?.split_once(' ') {
        Some(("*", "old")) => Operation::Square,
        Some(("*", n)) => Operation::Mul(n.parse()?),
        Some(("+", n)) => Operation::Add(n.parse()?),
        other => bail!("unsupported operation {other:?}"),
    };
    let divisor = field(&mut lines, "Test: divisible by")?.parse()?;
    if divisor == 0 {
        bail!("monkey {id} divides by zero");
    }
    let if_true = field(&mut lines, "If true: throw to monkey")?.parse()?;
    let if_false = field(&mut lines, "If false: throw to monkey")?.parse()?;
    Ok(Monkey {
        items,
        operation,
        divisor,
        if_true,
        if_false,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Monkey>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let input = input.replace("\r\n", "\n");
        let monkeys: Vec<Monkey> = input
            .split("\n\n")
            .filter(|b| !b.trim().is_empty())
            .enumerate()
            .map(|(i, block)| parse_monkey(block, i).map_err(|e| ParseError::InvalidFormat(format!("monkey {i}: {e}"))))
            .collect::<Result<_, _>>()?;
        if let Some(m) = monkeys.iter().find(|m| m.if_true.max(m.if_false) >= monkeys.len()) {
            return Err(ParseError::InvalidFormat(format!(
                "throw target {} does not exist",
                m.if_true.max(m.if_false)
            )));
        }
        Ok(monkeys)
    }
}

/// Product of the two largest inspection counts after `rounds`. With relief
/// worry is divided by three after each inspection; without it worry is
/// kept modulo the lcm of all divisors, which preserves every test.
pub fn monkey_business(monkeys: &[Monkey], rounds: usize, relief: bool) -> u64 {
    let mut monkeys = monkeys.to_vec();
    let modulus = monkeys.iter().map(|m| m.divisor).fold(1, lcm);
    let mut inspected = vec![0u64; monkeys.len()];

    for _ in 0..rounds {
        for i in 0..monkeys.len() {
            let items = std::mem::take(&mut monkeys[i].items);
            inspected[i] += items.len() as u64;
            let Monkey { operation, divisor, if_true, if_false, .. } = monkeys[i];
            for item in items {
                let worry = if relief {
                    operation.apply(item) / 3
                } else {
                    operation.apply(item % modulus) % modulus
                };
                let target = if worry % divisor == 0 { if_true } else { if_false };
                monkeys[target].items.push(worry);
            }
        }
    }

    inspected.sort_unstable_by(|a, b| b.cmp(a));
    inspected.iter().take(2).product()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(monkey_business(shared, 20, true).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(monkey_business(shared, 10_000, false).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "\
Monkey 0:
  Starting items: 79, 98
  Operation: new = old * 19
  Test: divisible by 23
    If true: throw to monkey 2
    If false: throw to monkey 3

Monkey 1:
  Starting items: 54, 65, 75, 74
  Operation: new = old + 6
  Test: divisible by 19
    If true: throw to monkey 2
    If false: throw to monkey 0

Monkey 2:
  Starting items: 79, 60, 97
  Operation: new = old * old
  Test: divisible by 13
    If true: throw to monkey 1
    If false: throw to monkey 3

Monkey 3:
  Starting items: 74
  Operation: new = old + 3
  Test: divisible by 17
    If true: throw to monkey 0
    If false: throw to monkey 1
";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(shared[2].operation, Operation::Square);
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "10605");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "2713310158");
    }

    #[test]
    fn test_short_run_without_relief() {
        let shared = Solver::parse(EXAMPLE).unwrap();
        // after one round the counts are 2, 4, 3, 6
        assert_eq!(monkey_business(&shared, 1, false), 24);
        // after twenty rounds they are 99, 97, 8, 103
        assert_eq!(monkey_business(&shared, 20, false), 103 * 99);
    }

    #[test]
    fn test_rejects_missing_target() {
        let broken = EXAMPLE.replace("throw to monkey 3", "throw to monkey 7");
        assert!(Solver::parse(&broken).is_err());
        let broken = EXAMPLE.replace("old + 6", "old - 6");
        assert!(Solver::parse(&broken).is_err());
    }
}
