use std::collections::VecDeque;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rustc_hash::FxHashSet;

use crate::utils::grid::{Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 21, tags = ["2023", "hard", "grid", "extrapolation"])]
pub struct Solver;

const PART_ONE_STEPS: u64 = 64;
const PART_TWO_STEPS: u64 = 26_501_365;

#[derive(Debug)]
pub struct Garden {
    /// `true` for rocks
    rocks: Grid<bool>,
    start: Pos,
}

impl AocParser for Solver {
    type SharedData<'a> = Garden;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let bytes = Grid::parse_with(input, |b| matches!(b, b'.' | b'#' | b'S').then_some(b))?;
        let start = bytes
            .find(&b'S')
            .ok_or_else(|| ParseError::MissingData("start tile S".into()))?;
        Ok(Garden {
            rocks: bytes.map(|&b| b == b'#'),
            start,
        })
    }
}

/// Garden plots reachable in exactly `steps` steps.
///
/// A plot at BFS distance `d <= steps` with the same parity as `steps` can
/// be reached by stepping back and forth. With `tiled` the map repeats
/// forever in every direction.
pub fn reachable_plots(garden: &Garden, steps: u64, tiled: bool) -> u64 {
    let open = |p: Pos| {
        if tiled {
            !*garden.rocks.get_wrapping(p)
        } else {
            garden.rocks.get(p).is_some_and(|rock| !rock)
        }
    };

    let mut seen = FxHashSet::default();
    let mut queue = VecDeque::new();
    seen.insert(garden.start);
    queue.push_back((garden.start, 0u64));
    let mut count = 0;

    while let Some((pos, dist)) = queue.pop_front() {
        if dist % 2 == steps % 2 {
            count += 1;
        }
        if dist == steps {
            continue;
        }
        for next in pos.neighbors() {
            if open(next) && seen.insert(next) {
                queue.push_back((next, dist + 1));
            }
        }
    }
    count
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(reachable_plots(shared, PART_ONE_STEPS, false).to_string())
    }
}

/// Plots reachable in `steps` steps on the infinitely tiled map, without
/// walking all of them.
///
/// Needs a square map whose middle row and column through `S` are open. The
/// count is then quadratic in the number of whole map widths walked, so three
/// samples at `steps % size + k * size` for `k = 1, 2, 3` fix it.
pub fn extrapolated_plots(garden: &Garden, steps: u64) -> Result<u64, SolveError> {
    let size = garden.rocks.width() as u64;
    if garden.rocks.height() as u64 != size {
        return Err(SolveError::failed("garden map must be square"));
    }
    let (n, rem) = (steps / size, steps % size);
    if n <= 3 {
        return Ok(reachable_plots(garden, steps, true));
    }
    let samples: Vec<i128> = (1..=3)
        .map(|k| i128::from(reachable_plots(garden, rem + k * size, true)))
        .collect();
    log::debug!("samples at {rem} + k*{size} for k = 1..=3: {samples:?}");

    let n = i128::from(n) - 1;
    let first = samples[1] - samples[0];
    let second = samples[2] - 2 * samples[1] + samples[0];
    let total = samples[0] + n * first + n * (n - 1) / 2 * second;
    u64::try_from(total).map_err(|_| SolveError::failed(format!("extrapolated {total} plots")))
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(extrapolated_plots(shared, PART_TWO_STEPS)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
...........
.....###.#.
.###.##..#.
..#.#...#..
....#.#....
.##..S####.
.##..#...#.
.......##..
.##.#.####.
.##..##.##.
...........
";

    #[test]
    fn test_bounded_walk() {
        let garden = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(reachable_plots(&garden, 6, false), 16);
    }

    #[test]
    fn test_tiled_walk() {
        let garden = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(reachable_plots(&garden, 6, true), 16);
        assert_eq!(reachable_plots(&garden, 10, true), 50);
        assert_eq!(reachable_plots(&garden, 50, true), 1594);
    }

    const OPEN_CROSS: &str = "\
...........
.#.........
.......#...
.........#.
...........
.....S.....
...........
..#........
........#..
...........
...........
";

    #[test]
    fn test_extrapolation_matches_walk() {
        let garden = Solver::parse(OPEN_CROSS).unwrap();
        for steps in [5 + 4 * 11, 5 + 5 * 11, 8 + 4 * 11] {
            assert_eq!(
                extrapolated_plots(&garden, steps).unwrap(),
                reachable_plots(&garden, steps, true),
                "{steps} steps"
            );
        }
    }

    #[test]
    fn test_extrapolation_on_open_field() {
        let garden = Solver::parse(&OPEN_CROSS.replace('#', ".")).unwrap();
        // every cell within `s` with matching parity: (s + 1)^2
        assert_eq!(extrapolated_plots(&garden, 5 + 6 * 11).unwrap(), 72 * 72);
        assert_eq!(extrapolated_plots(&garden, 5 + 202_300 * 11).unwrap(), 2_225_306u64.pow(2));
    }

    #[test]
    fn test_extrapolation_short_walk_and_shape() {
        let garden = Solver::parse(OPEN_CROSS).unwrap();
        assert_eq!(extrapolated_plots(&garden, 6).unwrap(), reachable_plots(&garden, 6, true));
        let wide = Solver::parse("...\n.S.\n").unwrap();
        assert!(extrapolated_plots(&wide, 100).is_err());
    }

    #[test]
    fn test_missing_start() {
        assert!(Solver::parse("...\n.#.\n").is_err());
    }
}
