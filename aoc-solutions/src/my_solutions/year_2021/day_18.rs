use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 18, tags = ["2021", "medium", "tree"])]
pub struct Solver;

/// Pairs nested this deep explode
const EXPLODE_DEPTH: u8 = 5;
/// Regular numbers this large split
const SPLIT_AT: u32 = 10;

/// A snailfish number flattened to its regular numbers in reading order, each
/// with the number of pairs enclosing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snailfish(Vec<(u32, u8)>);

impl Snailfish {
    fn parse(line: &str) -> Option<Self> {
        let mut values = Vec::new();
        let mut depth = 0u8;
        let mut chars = line.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '[' => depth = depth.checked_add(1)?,
                ']' => depth = depth.checked_sub(1)?,
                ',' => {}
                '0'..='9' => {
                    let mut value = c.to_digit(10)?;
                    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
                        value = value * 10 + digit;
                        chars.next();
                    }
                    values.push((value, depth));
                }
                _ => return None,
            }
        }
        (depth == 0 && !values.is_empty()).then_some(Self(values))
    }

    /// `[self, other]`, reduced
    fn add(&self, other: &Snailfish) -> Snailfish {
        let mut sum = Snailfish(
            self.0
                .iter()
                .chain(&other.0)
                .map(|&(value, depth)| (value, depth + 1))
                .collect(),
        );
        sum.reduce();
        sum
    }

    fn reduce(&mut self) {
        while self.explode() || self.split() {}
    }

    /// Explode the leftmost pair nested too deep. Its two regular numbers are
    /// always adjacent in the flattened form.
    fn explode(&mut self) -> bool {
        let Some(i) = self.0.iter().position(|&(_, depth)| depth >= EXPLODE_DEPTH) else {
            return false;
        };
        let (left, depth) = self.0[i];
        let (right, _) = self.0[i + 1];
        if i > 0 {
            self.0[i - 1].0 += left;
        }
        if let Some(next) = self.0.get_mut(i + 2) {
            next.0 += right;
        }
        self.0.splice(i..i + 2, [(0, depth - 1)]);
        true
    }

    fn split(&mut self) -> bool {
        let Some(i) = self.0.iter().position(|&(value, _)| value >= SPLIT_AT) else {
            return false;
        };
        let (value, depth) = self.0[i];
        self.0
            .splice(i..=i, [(value / 2, depth + 1), (value.div_ceil(2), depth + 1)]);
        true
    }

    /// Collapse sibling pairs from the deepest level up. The leftmost two
    /// numbers at the deepest level are always siblings.
    fn magnitude(&self) -> u32 {
        let mut values = self.0.clone();
        while values.len() > 1 {
            let deepest = values.iter().map(|&(_, depth)| depth).max().unwrap_or(0);
            let Some(i) = values.iter().position(|&(_, depth)| depth == deepest) else {
                break;
            };
            let Some(&(right, _)) = values.get(i + 1) else {
                break;
            };
            let left = values[i].0;
            values.splice(i..i + 2, [(3 * left + 2 * right, deepest.saturating_sub(1))]);
        }
        values.first().map_or(0, |&(value, _)| value)
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Snailfish>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                Snailfish::parse(line.trim())
                    .ok_or_else(|| ParseError::at_line(idx + 1, "malformed snailfish number"))
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (first, rest) = shared
            .split_first()
            .ok_or_else(|| SolveError::failed("no numbers to add"))?;
        let total = rest.iter().fold(first.clone(), |sum, n| sum.add(n));
        Ok(total.magnitude().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .permutations(2)
            .map(|pair| pair[0].add(pair[1]).magnitude())
            .max()
            .map(|m| m.to_string())
            .ok_or_else(|| SolveError::failed("need at least two numbers"))
    }
}
