use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 8, tags = ["2020", "easy", "interpreter"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Acc,
    Jmp,
    Nop,
}

#[derive(Debug, Clone, Copy)]
pub struct Instruction {
    op: Op,
    arg: i64,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Execution reached an instruction a second time
    Looped(i64),
    /// The program counter moved just past the last instruction
    Terminated(i64),
}

/// Run until an instruction repeats or the program ends
pub fn run(program: &[Instruction]) -> Outcome {
    let mut visited = vec![false; program.len()];
    let mut acc = 0;
    let mut pc: i64 = 0;

    loop {
        let Some(index) = usize::try_from(pc).ok().filter(|&i| i < program.len()) else {
            return Outcome::Terminated(acc);
        };
        if std::mem::replace(&mut visited[index], true) {
            return Outcome::Looped(acc);
        }
        let Instruction { op, arg } = program[index];
        match op {
            Op::Acc => {
                acc += arg;
                pc += 1;
            }
            Op::Jmp => pc += arg,
            Op::Nop => pc += 1,
        }
    }
}

fn parse_instruction(line: &str) -> anyhow::Result<Instruction> {
    let (op, arg) = line
        .split_once(' ')
        .ok_or_else(|| anyhow!("expected `op arg`, got {line:?}"))?;
    let op = match op {
        "acc" => Op::Acc,
        "jmp" => Op::Jmp,
        "nop" => Op::Nop,
        other => bail!("unknown op {other:?}"),
    };
    Ok(Instruction {
        op,
        arg: arg.parse()?,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Instruction>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                parse_instruction(line.trim())
                    .map_err(|e| ParseError::at_line(idx + 1, e))
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        match run(shared) {
            Outcome::Looped(acc) => Ok(acc.to_string()),
            Outcome::Terminated(_) => Err(SolveError::failed("program terminated without looping")),
        }
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut program = shared.clone();
        for index in 0..program.len() {
            let original = program[index].op;
            program[index].op = match original {
                Op::Jmp => Op::Nop,
                Op::Nop => Op::Jmp,
                Op::Acc => continue,
            };
            if let Outcome::Terminated(acc) = run(&program) {
                log::debug!("flipping instruction {index} terminates the program");
                return Ok(acc.to_string());
            }
            program[index].op = original;
        }
        Err(SolveError::failed("no single jmp/nop swap terminates"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "\
nop +0
acc +1
jmp +4
acc +3
jmp -3
acc -99
acc +1
jmp -4
acc +6
";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "5");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "8");
    }

    #[test]
    fn test_unknown_op() {
        let err = Solver::parse("nop +0\nmul +2\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
