use std::cmp::Reverse;
use std::collections::BinaryHeap;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 15, tags = ["2021", "medium", "grid", "dijkstra"])]
pub struct Solver;

const TILES: usize = 5;

impl AocParser for Solver {
    /// Risk level 1-9 per cell
    type SharedData<'a> = Grid<u8>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse_with(input, |b| matches!(b, b'1'..=b'9').then(|| b - b'0'))
    }
}

/// Risk of the cheapest path from the top-left to the bottom-right corner.
/// The starting cell is never entered, so its risk does not count.
fn lowest_risk(risk: &Grid<u8>) -> Option<u64> {
    let goal = Pos::new(risk.height() as i64 - 1, risk.width() as i64 - 1);
    let mut best = Grid::from_fn(risk.width(), risk.height(), |_| u64::MAX);
    let mut queue = BinaryHeap::from([Reverse((0u64, Pos::new(0, 0)))]);
    best[Pos::new(0, 0)] = 0;

    while let Some(Reverse((cost, pos))) = queue.pop() {
        if pos == goal {
            return Some(cost);
        }
        if cost > best[pos] {
            continue;
        }
        for next in risk.neighbors(pos) {
            let next_cost = cost + u64::from(risk[next]);
            if next_cost < best[next] {
                best[next] = next_cost;
                queue.push(Reverse((next_cost, next)));
            }
        }
    }
    None
}

/// The full cave: the map repeated `TILES` times each way, each tile one
/// risk higher than the tile above or to its left, wrapping 9 back to 1
fn full_cave(risk: &Grid<u8>) -> Grid<u8> {
    let (width, height) = (risk.width(), risk.height());
    Grid::from_fn(width * TILES, height * TILES, |p| {
        let (row, col) = (p.row as usize, p.col as usize);
        let base = risk[Pos::new((row % height) as i64, (col % width) as i64)];
        let bump = (row / height + col / width) as u8;
        (base + bump - 1) % 9 + 1
    })
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        lowest_risk(shared)
            .map(|risk| risk.to_string())
            .ok_or_else(|| SolveError::failed("no path to the bottom-right corner"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        lowest_risk(&full_cave(shared))
            .map(|risk| risk.to_string())
            .ok_or_else(|| SolveError::failed("no path to the bottom-right corner"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "\
1163751742
1381373672
2136511328
3694931569
7463417111
1319128137
1359912421
3125421639
1293138521
2311944581
";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "40");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "315");
    }

    #[test]
    fn test_full_cave_wraps_risk() {
        let cave = full_cave(&Solver::parse("8\n").unwrap());
        assert_eq!(cave.width(), 5);
        let row: Vec<u8> = (0..5).map(|col| cave[Pos::new(0, col)]).collect();
        assert_eq!(row, [8, 9, 1, 2, 3]);
        assert_eq!(cave[Pos::new(4, 4)], 7);
    }

    #[test]
    fn test_single_cell_costs_nothing() {
        let mut shared = Solver::parse("5\n").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "0");
    }

    #[test]
    fn test_rejects_zero_risk() {
        assert!(Solver::parse("10\n11\n").is_err());
    }
}
