use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 6, tags = ["2021", "easy"])]
pub struct Solver;

/// Fish count per timer value 0..=8
type Buckets = [u64; 9];

impl AocParser for Solver {
    type SharedData<'a> = Buckets;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut buckets = [0; 9];
        for timer in input.trim().split(',') {
            let timer: usize = timer
                .trim()
                .parse()
                .map_err(|e| ParseError::at_line(1, e))?;
            *buckets
                .get_mut(timer)
                .ok_or_else(|| ParseError::at_line(1, format!("timer {timer} above 8")))? += 1;
        }
        Ok(buckets)
    }
}

pub fn population_after(mut buckets: Buckets, days: usize) -> u64 {
    for _ in 0..days {
        buckets.rotate_left(1);
        // parents reset to 6, their young start at 8 (already rotated there)
        buckets[6] += buckets[8];
    }
    buckets.iter().sum()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(population_after(*shared, 80).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(population_after(*shared, 256).to_string())
    }
}
