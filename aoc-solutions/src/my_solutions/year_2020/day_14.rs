use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rustc_hash::FxHashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 14, tags = ["2020", "medium", "bits"])]
pub struct Solver;

const WORD_BITS: usize = 36;
/// Floating bits beyond this would write more addresses than is sensible
const MAX_FLOATING: u32 = 16;

/// A 36-bit mask split by character
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mask {
    ones: u64,
    zeros: u64,
    floating: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SetMask(Mask),
    Write { address: u64, value: u64 },
}

impl Mask {
    fn parse(text: &str) -> anyhow::Result<Self> {
        if text.len() != WORD_BITS {
            bail!("mask must be {WORD_BITS} characters, got {}", text.len());
        }
        let mut mask = Mask::default();
        for (i, b) in text.bytes().rev().enumerate() {
            let bit = 1 << i;
            match b {
                b'1' => mask.ones |= bit,
                b'0' => mask.zeros |= bit,
                b'X' => mask.floating |= bit,
                other => bail!("unexpected {:?} in mask", other as char),
            }
        }
        Ok(mask)
    }

    fn apply_to_value(self, value: u64) -> u64 {
        (value | self.ones) & !self.zeros
    }

    /// Every address the floating bits expand `address` into
    fn addresses(self, address: u64) -> impl Iterator<Item = u64> {
        let base = (address | self.ones) & !self.floating;
        let floating = self.floating;
        // walk the subsets of `floating` in increasing order
        let mut next = Some(0u64);
        std::iter::from_fn(move || {
            let subset = next?;
            next = (subset != floating).then(|| (subset | !floating).wrapping_add(1) & floating);
            Some(base | subset)
        })
    }
}

fn parse_command(line: &str) -> anyhow::Result<Command> {
    let (target, value) = line
        .split_once(" = ")
        .ok_or_else(|| anyhow!("expected `target = value`"))?;
    if target == "mask" {
        return Ok(Command::SetMask(Mask::parse(value)?));
    }
    let address = target
        .strip_prefix("mem[")
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| anyhow!("unknown target {target:?}"))?
        .parse()?;
    Ok(Command::Write {
        address,
        value: value.parse()?,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Command>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| parse_command(line.trim()).map_err(|e| ParseError::at_line(idx + 1, e)))
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut memory = FxHashMap::default();
        let mut mask = Mask::default();
        for &command in shared.iter() {
            match command {
                Command::SetMask(m) => mask = m,
                Command::Write { address, value } => {
                    memory.insert(address, mask.apply_to_value(value));
                }
            }
        }
        Ok(memory.values().sum::<u64>().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut memory = FxHashMap::default();
        let mut mask = Mask::default();
        for &command in shared.iter() {
            match command {
                Command::SetMask(m) => {
                    if m.floating.count_ones() > MAX_FLOATING {
                        return Err(SolveError::failed(format!(
                            "mask has {} floating bits",
                            m.floating.count_ones()
                        )));
                    }
                    mask = m;
                }
                Command::Write { address, value } => {
                    for target in mask.addresses(address) {
                        memory.insert(target, value);
                    }
                }
            }
        }
        Ok(memory.values().sum::<u64>().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const VALUE_MASKS: &str = "\
mask = XXXXXXXXXXXXXXXXXXXXXXXXXXXXX1XXXX0X
mem[8] = 11
mem[7] = 101
mem[8] = 0
";

    const ADDRESS_MASKS: &str = "\
mask = 000000000000000000000000000000X1001X
mem[42] = 100
mask = 00000000000000000000000000000000X0XX
mem[26] = 1
";

    #[test]
    fn test_value_masks() {
        let mut shared = Solver::parse(VALUE_MASKS).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "165");
    }

    #[test]
    fn test_address_masks() {
        let mut shared = Solver::parse(ADDRESS_MASKS).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "208");
    }

    #[test]
    fn test_floating_addresses() {
        let mask = Mask::parse("000000000000000000000000000000X1001X").unwrap();
        let addresses: Vec<u64> = mask.addresses(42).collect();
        assert_eq!(addresses, [26, 27, 58, 59]);
        assert_eq!(Mask::default().addresses(5).collect::<Vec<_>>(), [5]);
    }

    #[test]
    fn test_too_many_floating_bits() {
        let input = format!("mask = {}\nmem[0] = 1\n", "X".repeat(36));
        let mut shared = Solver::parse(&input).unwrap();
        assert!(Solver::solve_part(&mut shared, 2).is_err());
    }

    #[test]
    fn test_rejects_bad_lines() {
        assert!(Solver::parse("mask = 1X0\n").is_err());
        assert!(Solver::parse("mem[x] = 4\n").is_err());
        assert!(Solver::parse("reg[1] = 4\n").is_err());
    }
}
