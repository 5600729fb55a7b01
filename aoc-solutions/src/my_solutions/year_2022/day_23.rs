use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::{Itertools, MinMaxResult};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::utils::grid::{Direction, Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 23, tags = ["2022", "medium", "simulation", "cellular-automaton"])]
pub struct Solver;

/// Order the elves consider moves in on the first round
const LOOK: [Direction; 4] = [Direction::North, Direction::South, Direction::West, Direction::East];
/// Give up on a grove that keeps spreading
const MAX_ROUNDS: usize = 100_000;

impl AocParser for Solver {
    type SharedData<'a> = FxHashSet<Pos>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = Grid::parse_with(input, |b| match b {
            b'#' => Some(true),
            b'.' => Some(false),
            _ => None,
        })?;
        let elves: FxHashSet<Pos> = grid.iter().filter(|&(_, &elf)| elf).map(|(p, _)| p).collect();
        if elves.is_empty() {
            return Err(ParseError::MissingData("elves".into()));
        }
        Ok(elves)
    }
}

/// The three cells an elf checks before stepping toward `dir`
fn side(dir: Direction) -> [Pos; 3] {
    let ahead = dir.delta();
    let across = dir.turn_right().delta();
    [ahead - across, ahead, ahead + across]
}

#[derive(Debug, Clone)]
pub struct Grove {
    elves: FxHashSet<Pos>,
    rounds: usize,
}

impl Grove {
    pub fn new(elves: &FxHashSet<Pos>) -> Self {
        Self {
            elves: elves.clone(),
            rounds: 0,
        }
    }

    /// Play one round, returning whether any elf moved
    pub fn spread(&mut self) -> bool {
        let occupied = |p: Pos| self.elves.contains(&p);
        let mut proposals: FxHashMap<Pos, Vec<Pos>> = FxHashMap::default();
        for &elf in &self.elves {
            let crowded = Direction::ALL
                .into_iter()
                .flat_map(side)
                .any(|offset| occupied(elf + offset));
            if !crowded {
                continue;
            }
            let choice = (0..LOOK.len())
                .map(|k| LOOK[(self.rounds + k) % LOOK.len()])
                .find(|&dir| side(dir).iter().all(|&offset| !occupied(elf + offset)));
            if let Some(dir) = choice {
                proposals.entry(elf.step(dir)).or_default().push(elf);
            }
        }

        let mut moved = false;
        for (target, from) in proposals {
            if let [elf] = from[..] {
                self.elves.remove(&elf);
                self.elves.insert(target);
                moved = true;
            }
        }
        self.rounds += 1;
        moved
    }

    /// Ground tiles in the smallest rectangle holding every elf
    pub fn empty_ground(&self) -> usize {
        let span = |coords: MinMaxResult<i64>| match coords {
            MinMaxResult::NoElements => 0,
            MinMaxResult::OneElement(_) => 1,
            MinMaxResult::MinMax(lo, hi) => (hi - lo + 1) as usize,
        };
        let height = span(self.elves.iter().map(|p| p.row).minmax());
        let width = span(self.elves.iter().map(|p| p.col).minmax());
        height * width - self.elves.len()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut grove = Grove::new(shared);
        for _ in 0..10 {
            grove.spread();
        }
        Ok(grove.empty_ground().to_string())
    }
}

impl PartSolver<2> for Solver {
    /// First round in which nobody moves
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut grove = Grove::new(shared);
        while grove.spread() {
            if grove.rounds >= MAX_ROUNDS {
                return Err(SolveError::failed(format!("elves still moving after {MAX_ROUNDS} rounds")));
            }
        }
        Ok(grove.rounds.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "\
....#..
..###.#
#...#.#
.#...##
#.###..
##.#.##
.#..#..
";

    const SMALL: &str = "\
.....
..##.
..#..
.....
..##.
.....
";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(shared.len(), 22);
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "110");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "20");
    }

    #[test]
    fn test_small_grove_settles() {
        let shared = Solver::parse(SMALL).unwrap();
        let mut grove = Grove::new(&shared);
        for _ in 0..3 {
            assert!(grove.spread());
        }
        let expected: FxHashSet<Pos> = [(0, 2), (1, 4), (2, 0), (3, 4), (5, 2)]
            .into_iter()
            .map(|(r, c)| Pos::new(r, c))
            .collect();
        assert_eq!(grove.elves, expected);
        assert!(!grove.spread());
        assert_eq!(grove.empty_ground(), 25);
    }

    #[test]
    fn test_lone_elf_stays() {
        let mut shared = Solver::parse("...\n.#.\n...\n").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "0");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "1");
    }

    #[test]
    fn test_rejects_bad_grid() {
        assert!(Solver::parse("..\n..\n").is_err());
        assert!(Solver::parse(".#\n.x\n").is_err());
    }
}
