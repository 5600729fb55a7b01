use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 6, tags = ["2020", "easy"])]
pub struct Solver;

impl AocParser for Solver {
    /// One answer bitmask (bit 0 = `a`) per person, grouped
    type SharedData<'a> = Vec<Vec<u32>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut groups = vec![Vec::new()];
        for (idx, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                groups.push(Vec::new());
                continue;
            }
            let mask = line.bytes().try_fold(0u32, |mask, b| {
                b.is_ascii_lowercase()
                    .then(|| mask | 1 << (b - b'a'))
                    .ok_or_else(|| ParseError::at_line(idx + 1, format!("unexpected {:?}", b as char)))
            })?;
            if let Some(group) = groups.last_mut() {
                group.push(mask);
            }
        }
        groups.retain(|g| !g.is_empty());
        Ok(groups)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u32 = shared
            .iter()
            .map(|group| group.iter().fold(0, |acc, m| acc | m).count_ones())
            .sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u32 = shared
            .iter()
            .map(|group| group.iter().fold(u32::MAX, |acc, m| acc & m).count_ones())
            .sum();
        Ok(total.to_string())
    }
}
