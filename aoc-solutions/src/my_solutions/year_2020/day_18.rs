use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 18, tags = ["2020", "medium", "parser"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Num(u64),
    Add,
    Mul,
    Open,
    Close,
}

fn tokenize(line: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        let token = match c {
            ' ' => continue,
            '+' => Token::Add,
            '*' => Token::Mul,
            '(' => Token::Open,
            ')' => Token::Close,
            '0'..='9' => {
                let mut value = u64::from(c as u8 - b'0');
                while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
                    value = value * 10 + u64::from(digit);
                    chars.next();
                }
                Token::Num(value)
            }
            other => return Err(format!("unexpected {other:?}")),
        };
        tokens.push(token);
    }
    Ok(tokens)
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Vec<Token>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| tokenize(line).map_err(|e| ParseError::at_line(idx + 1, e)))
            .collect()
    }
}

/// Binding strength of each operator; higher binds first
#[derive(Debug, Clone, Copy)]
pub struct Precedence {
    add: u8,
    mul: u8,
}

const LEFT_TO_RIGHT: Precedence = Precedence { add: 1, mul: 1 };
const ADDITION_FIRST: Precedence = Precedence { add: 2, mul: 1 };

struct Evaluator<'t> {
    tokens: &'t [Token],
    pos: usize,
    precedence: Precedence,
}

impl Evaluator<'_> {
    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).copied();
        self.pos += 1;
        token
    }

    fn operand(&mut self) -> Result<u64, String> {
        match self.next() {
            Some(Token::Num(n)) => Ok(n),
            Some(Token::Open) => {
                let value = self.expression(0)?;
                match self.next() {
                    Some(Token::Close) => Ok(value),
                    _ => Err("unclosed parenthesis".into()),
                }
            }
            other => Err(format!("expected a number or `(`, found {other:?}")),
        }
    }

    /// Precedence climbing: fold in operators that bind tighter than `min`
    fn expression(&mut self, min: u8) -> Result<u64, String> {
        let mut value = self.operand()?;
        loop {
            let (strength, op): (u8, fn(u64, u64) -> Option<u64>) = match self.tokens.get(self.pos) {
                Some(Token::Add) => (self.precedence.add, u64::checked_add),
                Some(Token::Mul) => (self.precedence.mul, u64::checked_mul),
                _ => return Ok(value),
            };
            if strength <= min {
                return Ok(value);
            }
            self.pos += 1;
            let rhs = self.expression(strength)?;
            value = op(value, rhs).ok_or_else(|| "overflow".to_string())?;
        }
    }
}

pub fn evaluate(tokens: &[Token], precedence: Precedence) -> Result<u64, String> {
    let mut evaluator = Evaluator {
        tokens,
        pos: 0,
        precedence,
    };
    let value = evaluator.expression(0)?;
    match evaluator.tokens.get(evaluator.pos) {
        None => Ok(value),
        Some(token) => Err(format!("unexpected {token:?} after expression")),
    }
}

fn homework(lines: &[Vec<Token>], precedence: Precedence) -> Result<String, SolveError> {
    lines
        .iter()
        .enumerate()
        .try_fold(0u64, |sum, (i, line)| {
            let value = evaluate(line, precedence).map_err(|e| format!("line {}: {e}", i + 1))?;
            sum.checked_add(value).ok_or_else(|| "sum overflows".to_string())
        })
        .map(|sum| sum.to_string())
        .map_err(SolveError::failed)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        homework(shared, LEFT_TO_RIGHT)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        homework(shared, ADDITION_FIRST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    fn both(expr: &str) -> (u64, u64) {
        let tokens = tokenize(expr).unwrap();
        (
            evaluate(&tokens, LEFT_TO_RIGHT).unwrap(),
            evaluate(&tokens, ADDITION_FIRST).unwrap(),
        )
    }

    #[test]
    fn test_examples() {
        assert_eq!(both("1 + 2 * 3 + 4 * 5 + 6"), (71, 231));
        assert_eq!(both("1 + (2 * 3) + (4 * (5 + 6))"), (51, 51));
        assert_eq!(both("2 * 3 + (4 * 5)"), (26, 46));
        assert_eq!(both("5 + (8 * 3 + 9 + 3 * 4 * 3)"), (437, 1445));
        assert_eq!(both("5 * 9 * (7 * 3 * 3 + 9 * 3 + (8 + 6 * 4))"), (12240, 669060));
        assert_eq!(both("((2 + 4 * 9) * (6 + 9 * 8 + 6) + 6) + 2 + 4 * 2"), (13632, 23340));
    }

    #[test]
    fn test_sums_lines() {
        let mut shared = Solver::parse("2 * 3 + (4 * 5)\n1 + 2 * 3 + 4 * 5 + 6\n").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "97");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "277");
    }

    #[test]
    fn test_malformed_expressions() {
        assert!(Solver::parse("1 - 2\n").is_err());
        let mut shared = Solver::parse("(1 + 2\n").unwrap();
        assert!(Solver::solve_part(&mut shared, 1).is_err());
        let mut shared = Solver::parse("1 + 2)\n").unwrap();
        assert!(Solver::solve_part(&mut shared, 2).is_err());
        let mut shared = Solver::parse("1 + * 2\n").unwrap();
        assert!(Solver::solve_part(&mut shared, 1).is_err());
    }
}
