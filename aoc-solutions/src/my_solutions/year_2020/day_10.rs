use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::dp_cache::{DpCache, VecBackend};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 10, tags = ["2020", "medium", "dp"])]
pub struct Solver;

impl AocParser for Solver {
    /// Sorted joltages including the outlet (0) and the device (max + 3)
    type SharedData<'a> = Vec<u64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut jolts = input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                line.trim()
                    .parse()
                    .map_err(|e| ParseError::at_line(idx + 1, e))
            })
            .collect::<Result<Vec<u64>, _>>()?;
        jolts.push(0);
        jolts.sort_unstable();
        let device = jolts.last().copied().unwrap_or_default() + 3;
        jolts.push(device);
        Ok(jolts)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut counts = [0usize; 4];
        for pair in shared.windows(2) {
            let diff = pair[1] - pair[0];
            if !(1..=3).contains(&diff) {
                return Err(SolveError::failed(format!(
                    "cannot chain {} to {}",
                    pair[0], pair[1]
                )));
            }
            counts[diff as usize] += 1;
        }
        Ok((counts[1] * counts[3]).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let jolts: &[u64] = shared;
        // ways(i): arrangements ending at adapter i
        let ways = DpCache::new(
            VecBackend::with_capacity(jolts.len()),
            |&i: &usize| {
                (i.saturating_sub(3)..i)
                    .filter(|&j| jolts[i] - jolts[j] <= 3)
                    .collect()
            },
            |&i: &usize, deps: Vec<u64>| if i == 0 { 1 } else { deps.iter().sum() },
        );
        Ok(ways.get(&(jolts.len() - 1)).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SMALL: &str = "16\n10\n15\n5\n1\n11\n7\n19\n6\n12\n4\n";
    const LARGER: &str = "28\n33\n18\n42\n31\n14\n46\n20\n48\n47\n24\n23\n49\n45\n19\n38\n39\n11\n1\n32\n25\n35\n8\n17\n7\n9\n4\n2\n34\n10\n3\n";

    #[test]
    fn test_small_example() {
        let mut shared = Solver::parse(SMALL).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "35");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "8");
    }

    #[test]
    fn test_larger_example() {
        let mut shared = Solver::parse(LARGER).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "220");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "19208");
    }
}
