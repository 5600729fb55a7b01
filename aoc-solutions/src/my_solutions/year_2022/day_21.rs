use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rustc_hash::FxHashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 21, tags = ["2022", "medium", "expression-tree"])]
pub struct Solver;

const ROOT: &str = "root";
const HUMAN: &str = "humn";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Job<'a> {
    Number(i64),
    Math(&'a str, Op, &'a str),
}

pub type Monkeys<'a> = FxHashMap<&'a str, Job<'a>>;

fn parse_job(text: &str) -> Option<Job<'_>> {
    if let Ok(n) = text.parse() {
        return Some(Job::Number(n));
    }
    let mut parts = text.split_whitespace();
    let (left, op, right) = (parts.next()?, parts.next()?, parts.next()?);
    let op = match op {
        "+" => Op::Add,
        "-" => Op::Sub,
        "*" => Op::Mul,
        "/" => Op::Div,
        _ => return None,
    };
    parts.next().is_none().then_some(Job::Math(left, op, right))
}

impl AocParser for Solver {
    type SharedData<'a> = Monkeys<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut monkeys = Monkeys::default();
        for (idx, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (name, job) = line
                .split_once(':')
                .and_then(|(name, job)| Some((name.trim(), parse_job(job.trim())?)))
                .ok_or_else(|| ParseError::at_line(idx + 1, "expected `name: number` or `name: a op b`"))?;
            monkeys.insert(name, job);
        }
        if !monkeys.contains_key(ROOT) {
            return Err(ParseError::MissingData("root monkey".into()));
        }
        Ok(monkeys)
    }
}

struct Riddle<'m, 'a> {
    monkeys: &'m Monkeys<'a>,
}

impl<'a> Riddle<'_, 'a> {
    fn job(&self, name: &str) -> Result<Job<'a>, String> {
        self.monkeys
            .get(name)
            .copied()
            .ok_or_else(|| format!("no monkey named {name}"))
    }

    fn yell(&self, name: &str) -> Result<i64, String> {
        match self.job(name)? {
            Job::Number(n) => Ok(n),
            Job::Math(left, op, right) => {
                let (a, b) = (self.yell(left)?, self.yell(right)?);
                let value = match op {
                    Op::Add => a.checked_add(b),
                    Op::Sub => a.checked_sub(b),
                    Op::Mul => a.checked_mul(b),
                    Op::Div => a.checked_div(b),
                };
                value.ok_or_else(|| format!("{name}: {a} {op:?} {b} is out of range"))
            }
        }
    }

    fn depends_on_human(&self, name: &str) -> Result<bool, String> {
        if name == HUMAN {
            return Ok(true);
        }
        match self.job(name)? {
            Job::Number(_) => Ok(false),
            Job::Math(left, _, right) => Ok(self.depends_on_human(left)? || self.depends_on_human(right)?),
        }
    }

    /// Follow the branch holding the human down from `name`, undoing each
    /// operation so the branch has to equal `target`
    fn solve_for_human(&self, mut name: &'a str, mut target: i64) -> Result<i64, String> {
        let exact = |n: i64, d: i64| {
            (d != 0 && n % d == 0)
                .then(|| n / d)
                .ok_or_else(|| format!("{n} is not a multiple of {d}"))
        };
        while name != HUMAN {
            let Job::Math(left, op, right) = self.job(name)? else {
                return Err(format!("{name} yells a fixed number"));
            };
            if self.depends_on_human(left)? {
                let b = self.yell(right)?;
                target = match op {
                    Op::Add => target - b,
                    Op::Sub => target + b,
                    Op::Mul => exact(target, b)?,
                    Op::Div => target * b,
                };
                name = left;
            } else {
                let a = self.yell(left)?;
                target = match op {
                    Op::Add => target - a,
                    Op::Sub => a - target,
                    Op::Mul => exact(target, a)?,
                    Op::Div => exact(a, target)?,
                };
                name = right;
            }
        }
        Ok(target)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let riddle = Riddle { monkeys: shared };
        riddle.yell(ROOT).map(|n| n.to_string()).map_err(SolveError::failed)
    }
}

impl PartSolver<2> for Solver {
    /// `root` compares its two operands; the human picks their number
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let riddle = Riddle { monkeys: shared };
        let solve = || {
            let Job::Math(left, _, right) = riddle.job(ROOT)? else {
                return Err("root must compare two monkeys".to_string());
            };
            match (riddle.depends_on_human(left)?, riddle.depends_on_human(right)?) {
                (true, false) => riddle.solve_for_human(left, riddle.yell(right)?),
                (false, true) => riddle.solve_for_human(right, riddle.yell(left)?),
                _ => Err("exactly one side of root must depend on humn".to_string()),
            }
        };
        solve().map(|n| n.to_string()).map_err(SolveError::failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "\
root: pppw + sjmn
dbpl: 5
cczh: sllz + lgvd
zczc: 2
ptdq: humn - dvpt
dvpt: 3
lfqf: 4
humn: 5
ljgn: 2
sjmn: drzm * dbpl
sllz: 4
pppw: cczh / lfqf
lgvd: ljgn * ptdq
drzm: hmdt - zczc
hmdt: 32
";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "152");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "301");
    }

    #[test]
    fn test_human_on_right_of_subtraction_and_division() {
        // root: a = 10 - (100 / humn), other side 6: humn must be 25
        let input = "root: lhs + six\nlhs: ten - quot\nten: 10\nquot: hund / humn\nhund: 100\nhumn: 1\nsix: 6\n";
        let mut shared = Solver::parse(input).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "25");
    }

    #[test]
    fn test_unsolvable_and_malformed() {
        let both_sides = "root: humn + humn\nhumn: 1\n";
        let mut shared = Solver::parse(both_sides).unwrap();
        assert!(Solver::solve_part(&mut shared, 2).is_err());
        let missing = "root: a + b\na: 1\n";
        let mut shared = Solver::parse(missing).unwrap();
        assert!(Solver::solve_part(&mut shared, 1).is_err());
        assert!(Solver::parse("root: a % b\n").is_err());
    }
}
