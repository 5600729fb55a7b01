use std::iter;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rustc_hash::FxHashSet;

use crate::utils::grid::{Direction, Grid, Pos};
use crate::utils::math::lcm;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 24, tags = ["2022", "medium", "bfs", "grid"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Wall,
    Open,
    Blizzard(Direction),
}

/// The valley inside the walls; `start` and `goal` are the gaps in the top
/// and bottom walls, in whole-map coordinates
#[derive(Debug, Clone)]
pub struct Valley {
    blizzards: Grid<Option<Direction>>,
    start: Pos,
    goal: Pos,
}

impl AocParser for Solver {
    type SharedData<'a> = Valley;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let map = Grid::parse_with(input, |b| match b {
            b'#' => Some(Cell::Wall),
            b'.' => Some(Cell::Open),
            b'^' | b'>' | b'v' | b'<' => Direction::from_byte(b).map(Cell::Blizzard),
            _ => None,
        })?;
        if map.width() < 3 || map.height() < 3 {
            return Err(ParseError::InvalidFormat("valley is too small".into()));
        }
        let bottom = map.height() as i64 - 1;
        let gap = |row: i64| {
            (0..map.width() as i64)
                .map(|col| Pos::new(row, col))
                .find(|&p| map[p] == Cell::Open)
                .ok_or_else(|| ParseError::MissingData(format!("gap in wall row {}", row + 1)))
        };
        let (start, goal) = (gap(0)?, gap(bottom)?);
        let blizzards = Grid::from_fn(map.width() - 2, map.height() - 2, |p| match map[p + Pos::new(1, 1)] {
            Cell::Blizzard(dir) => Some(dir),
            _ => None,
        });
        Ok(Valley { blizzards, start, goal })
    }
}

impl Valley {
    /// Whether nothing blows through `pos` at minute `t`
    pub fn free(&self, pos: Pos, t: usize) -> bool {
        if pos == self.start || pos == self.goal {
            return true;
        }
        let inner = pos - Pos::new(1, 1);
        if !self.blizzards.contains(inner) {
            return false;
        }
        let (h, w) = (self.blizzards.height() as i64, self.blizzards.width() as i64);
        let t = t as i64;
        let came_from = |dir: Direction| {
            let back = dir.delta() * -t;
            let origin = Pos::new(
                (inner.row + back.row).rem_euclid(h),
                (inner.col + back.col).rem_euclid(w),
            );
            self.blizzards[origin] == Some(dir)
        };
        !Direction::ALL.into_iter().any(came_from)
    }

    /// Minute of arrival at `to` when leaving `from` at minute `depart`
    pub fn crossing(&self, from: Pos, to: Pos, depart: usize) -> Result<usize, String> {
        let (h, w) = (self.blizzards.height(), self.blizzards.width());
        // after this many minutes every (cell, blizzard phase) pair has been seen
        let limit = depart + (h * w + 2) * lcm(h, w);
        let mut reachable = FxHashSet::from_iter([from]);
        let mut t = depart;
        while !reachable.contains(&to) {
            if reachable.is_empty() || t > limit {
                return Err(format!("no way from {from} to {to} after minute {depart}"));
            }
            t += 1;
            reachable = reachable
                .iter()
                .flat_map(|&p| iter::once(p).chain(p.neighbors()))
                .filter(|&p| self.free(p, t))
                .collect();
        }
        log::debug!("{from} -> {to}: minute {depart} to {t}");
        Ok(t)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .crossing(shared.start, shared.goal, 0)
            .map(|t| t.to_string())
            .map_err(SolveError::failed)
    }
}

impl PartSolver<2> for Solver {
    /// There, back for the snacks, and there again
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (start, goal) = (shared.start, shared.goal);
        let there = shared.crossing(start, goal, 0).map_err(SolveError::failed)?;
        let back = shared.crossing(goal, start, there).map_err(SolveError::failed)?;
        let again = shared.crossing(start, goal, back).map_err(SolveError::failed)?;
        Ok(again.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "\
#.######
#>>.<^<#
#.<..<<#
#>v.><>#
#<^v^^>#
######.#
";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!((shared.start, shared.goal), (Pos::new(0, 1), Pos::new(5, 6)));
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "18");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "54");
    }

    #[test]
    fn test_single_blizzard_wraps() {
        let valley = Solver::parse("#.###\n#>..#\n#...#\n###.#\n").unwrap();
        assert!(!valley.free(Pos::new(1, 1), 0));
        assert!(valley.free(Pos::new(1, 1), 1));
        assert!(!valley.free(Pos::new(1, 2), 1));
        assert!(!valley.free(Pos::new(1, 1), 3));
        assert!(!valley.free(Pos::new(0, 2), 5));
        assert!(valley.free(Pos::new(3, 3), 0));
    }

    #[test]
    fn test_waits_for_blizzard_to_pass() {
        let mut shared = Solver::parse("#.###\n#>..#\n#...#\n###.#\n").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "5");
        // back at minute 11 after waiting out the blizzard, then in at 13
        assert_eq!(shared.crossing(shared.goal, shared.start, 5), Ok(11));
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "17");
    }

    #[test]
    fn test_rejects_closed_valley() {
        assert!(Solver::parse("#####\n#...#\n###.#\n").is_err());
        assert!(Solver::parse("#.#\n#x#\n#.#\n").is_err());
    }
}
