use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 24, tags = ["2021", "hard", "reverse-engineering"])]
pub struct Solver;

const DIGITS: usize = 14;
const BLOCK_LEN: usize = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Reg(usize),
    Imm(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Inp(usize),
    Add(usize, Operand),
    Mul(usize, Operand),
    Div(usize, Operand),
    Mod(usize, Operand),
    Eql(usize, Operand),
}

fn register(name: &str) -> Option<usize> {
    match name {
        "w" => Some(0),
        "x" => Some(1),
        "y" => Some(2),
        "z" => Some(3),
        _ => None,
    }
}

fn parse_instruction(line: &str) -> Option<Instruction> {
    let mut parts = line.split_whitespace();
    let op = parts.next()?;
    let a = register(parts.next()?)?;
    let b = parts
        .next()
        .map(|b| register(b).map(Operand::Reg).or_else(|| b.parse().ok().map(Operand::Imm)));
    if parts.next().is_some() {
        return None;
    }
    Some(match (op, b) {
        ("inp", None) => Instruction::Inp(a),
        ("add", Some(b)) => Instruction::Add(a, b?),
        ("mul", Some(b)) => Instruction::Mul(a, b?),
        ("div", Some(b)) => Instruction::Div(a, b?),
        ("mod", Some(b)) => Instruction::Mod(a, b?),
        ("eql", Some(b)) => Instruction::Eql(a, b?),
        _ => return None,
    })
}

/// Run `program` reading `input` digits; `None` on a division by zero, an
/// invalid modulo, or running out of input
pub fn execute(program: &[Instruction], input: &[i64]) -> Option<[i64; 4]> {
    let mut regs = [0i64; 4];
    let mut input = input.iter();
    for &instruction in program {
        let value = |regs: &[i64; 4], b: Operand| match b {
            Operand::Reg(r) => regs[r],
            Operand::Imm(v) => v,
        };
        match instruction {
            Instruction::Inp(a) => regs[a] = *input.next()?,
            Instruction::Add(a, b) => regs[a] += value(&regs, b),
            Instruction::Mul(a, b) => regs[a] *= value(&regs, b),
            Instruction::Div(a, b) => regs[a] = regs[a].checked_div(value(&regs, b))?,
            Instruction::Mod(a, b) => {
                let divisor = value(&regs, b);
                if regs[a] < 0 || divisor <= 0 {
                    return None;
                }
                regs[a] %= divisor;
            }
            Instruction::Eql(a, b) => regs[a] = i64::from(regs[a] == value(&regs, b)),
        }
    }
    Some(regs)
}

/// The three constants that vary between the 14 MONAD blocks
#[derive(Debug, Clone, Copy)]
struct BlockParams {
    /// `div z a`: 1 pushes a base-26 digit, 26 may pop one
    divisor: i64,
    /// `add x b`
    check: i64,
    /// `add y c`
    offset: i64,
}

fn block_params(program: &[Instruction]) -> Result<Vec<BlockParams>, SolveError> {
    if program.len() != DIGITS * BLOCK_LEN {
        return Err(SolveError::failed(format!(
            "expected {} instructions, found {}",
            DIGITS * BLOCK_LEN,
            program.len()
        )));
    }
    program
        .chunks(BLOCK_LEN)
        .enumerate()
        .map(|(i, block)| match (block[0], block[4], block[5], block[15]) {
            (
                Instruction::Inp(0),
                Instruction::Div(3, Operand::Imm(divisor @ (1 | 26))),
                Instruction::Add(1, Operand::Imm(check)),
                Instruction::Add(2, Operand::Imm(offset)),
            ) => Ok(BlockParams {
                divisor,
                check,
                offset,
            }),
            _ => Err(SolveError::failed(format!(
                "block {i} does not follow the MONAD pattern"
            ))),
        })
        .collect()
}

/// Pair each popping block with the pushing block whose digit it tests:
/// `digit[pop] == digit[push] + diff`
fn digit_constraints(params: &[BlockParams]) -> Result<Vec<(usize, usize, i64)>, SolveError> {
    let mut stack = Vec::new();
    let mut constraints = Vec::new();
    for (i, p) in params.iter().enumerate() {
        if p.divisor == 1 {
            stack.push((i, p.offset));
        } else {
            let (j, offset) = stack
                .pop()
                .ok_or_else(|| SolveError::failed(format!("block {i} pops an empty stack")))?;
            constraints.push((j, i, offset + p.check));
        }
    }
    if !stack.is_empty() {
        return Err(SolveError::failed("unbalanced push/pop blocks"));
    }
    Ok(constraints)
}

/// Largest (or smallest) 14-digit model number MONAD accepts
fn model_number(program: &[Instruction], largest: bool) -> Result<String, SolveError> {
    let params = block_params(program)?;
    let mut digits = [0i64; DIGITS];
    for (push, pop, diff) in digit_constraints(&params)? {
        if diff.abs() > 8 {
            return Err(SolveError::failed(format!(
                "digits {push} and {pop} cannot differ by {diff}"
            )));
        }
        let base = if largest { 9 - diff.max(0) } else { 1 - diff.min(0) };
        digits[push] = base;
        digits[pop] = base + diff;
    }
    log::debug!("candidate model number {}", digits.iter().join(""));

    match execute(program, &digits) {
        Some([.., 0]) => Ok(digits.iter().join("")),
        other => Err(SolveError::failed(format!(
            "MONAD rejected the derived model number (registers {other:?})"
        ))),
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Instruction>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                parse_instruction(line)
                    .ok_or_else(|| ParseError::at_line(idx + 1, format!("bad instruction {line:?}")))
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        model_number(shared, true)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        model_number(shared, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    fn block(divisor: i64, check: i64, offset: i64) -> String {
        format!(
            "inp w\nmul x 0\nadd x z\nmod x 26\ndiv z {divisor}\nadd x {check}\neql x w\neql x 0\n\
             mul y 0\nadd y 25\nmul y x\nadd y 1\nmul z y\nmul y 0\nadd y w\nadd y {offset}\n\
             mul y x\nadd z y\n"
        )
    }

    /// Seven push/pop pairs where `digit[pop] = digit[push] + diff`
    fn synthetic_monad() -> String {
        [3, -2, 0, 5, -8, 1, -1]
            .into_iter()
            .map(|diff| block(1, 12, 4) + &block(26, diff - 4, 7))
            .collect()
    }

    #[test]
    fn test_interpreter_binary_example() {
        let program = Solver::parse(
            "inp w\nadd z w\nmod z 2\ndiv w 2\nadd y w\nmod y 2\ndiv w 2\nadd x w\nmod x 2\ndiv w 2\nmod w 2\n",
        )
        .unwrap();
        assert_eq!(execute(&program, &[11]), Some([1, 0, 1, 1]));
        assert_eq!(execute(&program, &[]), None);
    }

    #[test]
    fn test_negate_example() {
        let program = Solver::parse("inp x\nmul x -1\n").unwrap();
        assert_eq!(execute(&program, &[7]), Some([0, -7, 0, 0]));
    }

    #[test]
    fn test_synthetic_monad() {
        let mut shared = Solver::parse(&synthetic_monad()).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "69979949918998");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "14311116911221");
    }

    #[test]
    fn test_rejects_other_programs() {
        let mut shared = Solver::parse("inp w\nadd z w\n").unwrap();
        assert!(Solver::solve_part(&mut shared, 1).is_err());
        assert!(Solver::parse("inp q").is_err());
        assert!(Solver::parse("add x").is_err());
    }
}
