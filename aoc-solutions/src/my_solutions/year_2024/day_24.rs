use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use rustc_hash::FxHashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 24, tags = ["2024", "hard", "circuit"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    And,
    Or,
    Xor,
}

impl Op {
    fn apply(self, a: bool, b: bool) -> bool {
        match self {
            Op::And => a & b,
            Op::Or => a | b,
            Op::Xor => a ^ b,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Gate<'a> {
    lhs: &'a str,
    op: Op,
    rhs: &'a str,
    out: &'a str,
}

impl Gate<'_> {
    fn reads_input_bits(&self) -> bool {
        let is_input = |w: &str| w.starts_with('x') || w.starts_with('y');
        is_input(self.lhs) && is_input(self.rhs)
    }

    fn reads_first_bit(&self) -> bool {
        self.lhs == "x00" || self.rhs == "x00"
    }
}

#[derive(Debug)]
pub struct Device<'a> {
    initial: Vec<(&'a str, bool)>,
    gates: Vec<Gate<'a>>,
}

impl AocParser for Solver {
    type SharedData<'a> = Device<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut initial = Vec::new();
        let mut gates = Vec::new();

        for (idx, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some((wire, value)) = line.split_once(": ") {
                let value = match value {
                    "0" => false,
                    "1" => true,
                    other => {
                        return Err(ParseError::at_line(idx + 1, format!("bad wire value {other:?}")));
                    }
                };
                initial.push((wire, value));
                continue;
            }
            let Some((lhs, op, rhs, "->", out)) = line.split_whitespace().collect_tuple() else {
                return Err(ParseError::at_line(idx + 1, format!("unrecognised line {line:?}")));
            };
            let op = match op {
                "AND" => Op::And,
                "OR" => Op::Or,
                "XOR" => Op::Xor,
                other => return Err(ParseError::at_line(idx + 1, format!("unknown gate {other}"))),
            };
            gates.push(Gate { lhs, op, rhs, out });
        }

        if gates.is_empty() {
            return Err(ParseError::MissingData("no gates".into()));
        }
        Ok(Device { initial, gates })
    }
}

/// Settle every wire, repeatedly firing gates whose inputs are known
fn simulate<'a>(device: &Device<'a>) -> Result<FxHashMap<&'a str, bool>, SolveError> {
    let mut wires: FxHashMap<&str, bool> = device.initial.iter().copied().collect();
    let mut pending = device.gates.clone();
    while !pending.is_empty() {
        let before = pending.len();
        pending.retain(|gate| match (wires.get(gate.lhs), wires.get(gate.rhs)) {
            (Some(&a), Some(&b)) => {
                wires.insert(gate.out, gate.op.apply(a, b));
                false
            }
            _ => true,
        });
        if pending.len() == before {
            return Err(SolveError::failed(format!(
                "{} gates never receive both inputs, first drives {}",
                pending.len(),
                pending[0].out
            )));
        }
    }
    Ok(wires)
}

/// Read the `z` wires as a little-endian number
fn output_value(wires: &FxHashMap<&str, bool>) -> Result<u64, SolveError> {
    let mut value = 0u64;
    for (&wire, &bit) in wires {
        let Some(index) = wire.strip_prefix('z') else {
            continue;
        };
        let index: u32 = index
            .parse()
            .map_err(|_| SolveError::failed(format!("malformed output wire {wire}")))?;
        if index >= u64::BITS {
            return Err(SolveError::failed(format!("output wire {wire} exceeds 64 bits")));
        }
        value |= u64::from(bit) << index;
    }
    Ok(value)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let wires = simulate(shared)?;
        Ok(output_value(&wires)?.to_string())
    }
}

/// Gate outputs that break the ripple-carry adder structure
///
/// In a correct adder every `z` but the last is an XOR, the last `z` is the
/// final carry OR, XORs of intermediate wires drive a `z`, `x ^ y` feeds an
/// XOR and `x & y` feeds an OR. Bit 0 is a half adder and is exempt.
fn miswired<'a>(device: &Device<'a>) -> Vec<&'a str> {
    let mut consumers: FxHashMap<&str, Vec<Op>> = FxHashMap::default();
    for gate in &device.gates {
        consumers.entry(gate.lhs).or_default().push(gate.op);
        consumers.entry(gate.rhs).or_default().push(gate.op);
    }
    let feeds = |wire: &str, op: Op| consumers.get(wire).is_some_and(|ops| ops.contains(&op));
    let last_z = device
        .gates
        .iter()
        .map(|gate| gate.out)
        .filter(|out| out.starts_with('z'))
        .max();

    device
        .gates
        .iter()
        .filter(|gate| {
            let is_z = gate.out.starts_with('z');
            let is_last_z = Some(gate.out) == last_z;
            match gate.op {
                _ if is_last_z => gate.op != Op::Or,
                Op::Xor if gate.reads_input_bits() => {
                    !gate.reads_first_bit() && !feeds(gate.out, Op::Xor)
                }
                Op::Xor => !is_z,
                _ if is_z => true,
                Op::And => !gate.reads_first_bit() && !feeds(gate.out, Op::Or),
                Op::Or => false,
            }
        })
        .map(|gate| gate.out)
        .sorted_unstable()
        .dedup()
        .collect()
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let wires = miswired(shared);
        log::debug!("{} miswired outputs", wires.len());
        Ok(wires.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SMALL: &str = "\
x00: 1
x01: 1
x02: 1
y00: 0
y01: 1
y02: 0

x00 AND y00 -> z00
x01 XOR y01 -> z01
x02 OR y02 -> z02
";

    const BITS: usize = 8;

    /// An 8-bit ripple-carry adder, with the given pairs of gate outputs exchanged
    fn ripple_adder(x: u64, y: u64, swaps: &[(&str, &str)]) -> String {
        let mut text = String::new();
        for (name, value) in [("x", x), ("y", y)] {
            for i in 0..BITS {
                text += &format!("{name}{i:02}: {}\n", (value >> i) & 1);
            }
        }
        text.push('\n');

        let mut gates = vec![
            ("x00".to_string(), "XOR", "y00".to_string(), "z00".to_string()),
            ("x00".to_string(), "AND", "y00".to_string(), "c00".to_string()),
        ];
        for i in 1..BITS {
            let carry_in = format!("c{:02}", i - 1);
            let carry_out = if i == BITS - 1 {
                format!("z{BITS:02}")
            } else {
                format!("c{i:02}")
            };
            gates.extend([
                (format!("x{i:02}"), "XOR", format!("y{i:02}"), format!("s{i:02}")),
                (format!("x{i:02}"), "AND", format!("y{i:02}"), format!("a{i:02}")),
                (format!("s{i:02}"), "XOR", carry_in.clone(), format!("z{i:02}")),
                (format!("s{i:02}"), "AND", carry_in, format!("b{i:02}")),
                (format!("a{i:02}"), "OR", format!("b{i:02}"), carry_out),
            ]);
        }

        for (lhs, op, rhs, out) in gates {
            let out = swaps
                .iter()
                .find_map(|&(a, b)| {
                    if out == a {
                        Some(b.to_string())
                    } else if out == b {
                        Some(a.to_string())
                    } else {
                        None
                    }
                })
                .unwrap_or(out);
            text += &format!("{lhs} {op} {rhs} -> {out}\n");
        }
        text
    }

    #[test]
    fn test_small_example() {
        let mut shared = Solver::parse(SMALL).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "4");
    }

    #[test]
    fn test_adder_adds() {
        let input = ripple_adder(181, 110, &[]);
        let mut shared = Solver::parse(&input).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "291");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "");
    }

    #[test]
    fn test_finds_swapped_outputs() {
        let input = ripple_adder(0, 0, &[("z05", "c06"), ("s03", "a03")]);
        let mut shared = Solver::parse(&input).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "a03,c06,s03,z05");
    }

    #[test]
    fn test_undriven_wire_fails() {
        let mut shared = Solver::parse("x00: 1\n\nx00 AND q00 -> z00\n").unwrap();
        assert!(Solver::solve_part(&mut shared, 1).is_err());
    }

    #[test]
    fn test_rejects_unknown_gate() {
        assert!(Solver::parse("x00: 1\n\nx00 NAND y00 -> z00\n").is_err());
    }
}
