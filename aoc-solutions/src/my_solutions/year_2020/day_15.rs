use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 15, tags = ["2020", "medium"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<u32>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let numbers = input
            .trim()
            .split(',')
            .map(|n| n.trim().parse().map_err(|e| ParseError::at_line(1, e)))
            .collect::<Result<Vec<u32>, _>>()?;
        if numbers.is_empty() {
            return Err(ParseError::MissingData("starting numbers".into()));
        }
        Ok(numbers)
    }
}

/// The `turn`-th number spoken (1-based) in the memory game
pub fn nth_spoken(start: &[u32], turn: usize) -> u32 {
    if turn <= start.len() {
        return start[turn - 1];
    }
    // last_seen[n] = turn on which n was last spoken, 0 if never
    let table_len = turn.max(start.iter().map(|&n| n as usize + 1).max().unwrap_or(0));
    let mut last_seen = vec![0u32; table_len];
    for (i, &n) in start[..start.len() - 1].iter().enumerate() {
        last_seen[n as usize] = i as u32 + 1;
    }

    let mut current = start[start.len() - 1];
    for t in start.len() as u32..turn as u32 {
        let previous = std::mem::replace(&mut last_seen[current as usize], t);
        current = if previous == 0 { 0 } else { t - previous };
    }
    current
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(nth_spoken(shared, 2020).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(nth_spoken(shared, 30_000_000).to_string())
    }
}
