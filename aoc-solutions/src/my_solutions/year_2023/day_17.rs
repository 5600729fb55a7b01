use std::cmp::Reverse;
use std::collections::BinaryHeap;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rustc_hash::FxHashMap;

use crate::utils::grid::{Direction, Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 17, tags = ["2023", "medium", "grid", "dijkstra"])]
pub struct Solver;

impl AocParser for Solver {
    /// Heat loss per block
    type SharedData<'a> = Grid<u32>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse_with(input, |b| (b as char).to_digit(10))
    }
}

/// Least heat loss from the top-left to the bottom-right block when the
/// crucible must move between `min_run` and `max_run` blocks before turning
pub fn least_heat_loss(grid: &Grid<u32>, min_run: i64, max_run: i64) -> Option<u32> {
    let start = Pos::new(0, 0);
    let goal = Pos::new(grid.height() as i64 - 1, grid.width() as i64 - 1);

    // A state is where a straight run ended and the direction it went
    let mut best: FxHashMap<(Pos, Direction), u32> = FxHashMap::default();
    let mut queue = BinaryHeap::new();
    for dir in [Direction::East, Direction::South] {
        // Seed as if we had just arrived moving perpendicular
        let seed = dir.turn_left();
        best.insert((start, seed), 0);
        queue.push(Reverse((0, start, seed)));
    }

    while let Some(Reverse((loss, pos, dir))) = queue.pop() {
        if pos == goal {
            return Some(loss);
        }
        if best.get(&(pos, dir)).is_some_and(|&l| l < loss) {
            continue;
        }
        for turn in [dir.turn_left(), dir.turn_right()] {
            let mut next = pos;
            let mut next_loss = loss;
            for run in 1..=max_run {
                next = next.step(turn);
                let Some(&cost) = grid.get(next) else {
                    break;
                };
                next_loss += cost;
                if run < min_run {
                    continue;
                }
                if best.get(&(next, turn)).is_none_or(|&l| next_loss < l) {
                    best.insert((next, turn), next_loss);
                    queue.push(Reverse((next_loss, next, turn)));
                }
            }
        }
    }
    None
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        least_heat_loss(shared, 1, 3)
            .map(|l| l.to_string())
            .ok_or_else(|| SolveError::failed("no path to the factory"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        least_heat_loss(shared, 4, 10)
            .map(|l| l.to_string())
            .ok_or_else(|| SolveError::failed("no ultra crucible path to the factory"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "\
2413432311323
3215453535623
3255245654254
3446585845452
4546657867536
1438598798454
4457876987766
3637877979653
4654967986887
4564679986453
1224686865563
2546548887735
4322674655533
";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "102");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "94");
    }

    #[test]
    fn test_ultra_crucible_must_run_four() {
        let grid = Solver::parse("111111111111\n999999999991\n999999999991\n999999999991\n999999999991\n")
            .unwrap();
        assert_eq!(least_heat_loss(&grid, 4, 10), Some(71));
    }
}
