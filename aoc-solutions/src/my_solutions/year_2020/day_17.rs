use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::utils::grid::Grid;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 17, tags = ["2020", "medium", "cellular-automaton"])]
pub struct Solver;

const BOOT_CYCLES: usize = 6;

impl AocParser for Solver {
    /// The starting slice, `true` where a cube is active
    type SharedData<'a> = Grid<bool>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse_with(input, |b| match b {
            b'#' => Some(true),
            b'.' => Some(false),
            _ => None,
        })
    }
}

/// Offsets to the `3^N - 1` surrounding cells
fn neighbour_offsets<const N: usize>() -> Vec<[i32; N]> {
    let mut offsets = vec![[0; N]];
    for axis in 0..N {
        offsets = offsets
            .into_iter()
            .flat_map(|o| {
                [-1, 0, 1].map(|d| {
                    let mut next = o;
                    next[axis] = d;
                    next
                })
            })
            .collect();
    }
    offsets.retain(|o| o.iter().any(|&d| d != 0));
    offsets
}

/// Active cubes after `cycles` rounds in `N` dimensions, starting from the
/// slice at zero on every axis past the first two
pub fn boot<const N: usize>(slice: &Grid<bool>, cycles: usize) -> usize {
    let offsets = neighbour_offsets::<N>();
    let mut active: FxHashSet<[i32; N]> = slice
        .iter()
        .filter(|&(_, &on)| on)
        .map(|(p, _)| {
            let mut cube = [0; N];
            cube[0] = p.col as i32;
            cube[1] = p.row as i32;
            cube
        })
        .collect();

    for _ in 0..cycles {
        let mut counts: FxHashMap<[i32; N], u8> = FxHashMap::default();
        for cube in &active {
            for offset in &offsets {
                let mut near = *cube;
                for (c, d) in near.iter_mut().zip(offset) {
                    *c += d;
                }
                *counts.entry(near).or_default() += 1;
            }
        }
        active = counts
            .into_iter()
            .filter(|(cube, n)| *n == 3 || (*n == 2 && active.contains(cube)))
            .map(|(cube, _)| cube)
            .collect();
    }
    active.len()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(boot::<3>(shared, BOOT_CYCLES).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(boot::<4>(shared, BOOT_CYCLES).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = ".#.\n..#\n###\n";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "112");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "848");
    }

    #[test]
    fn test_first_cycle() {
        let shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(boot::<3>(&shared, 1), 11);
        assert_eq!(boot::<4>(&shared, 1), 29);
    }

    #[test]
    fn test_offsets() {
        assert_eq!(neighbour_offsets::<2>().len(), 8);
        assert_eq!(neighbour_offsets::<3>().len(), 26);
        assert_eq!(neighbour_offsets::<4>().len(), 80);
    }
}
