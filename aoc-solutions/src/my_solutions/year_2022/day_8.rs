use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Direction, Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 8, tags = ["2022", "easy", "grid"])]
pub struct Solver;

impl AocParser for Solver {
    /// Tree heights 0-9
    type SharedData<'a> = Grid<u8>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse_with(input, |b| b.is_ascii_digit().then(|| b - b'0'))
    }
}

/// Trees from `pos` outward in `dir`, nearest first
fn line_of_sight(trees: &Grid<u8>, pos: Pos, dir: Direction) -> impl Iterator<Item = u8> + '_ {
    std::iter::successors(Some(pos.step(dir)), move |p| Some(p.step(dir)))
        .map_while(|p| trees.get(p).copied())
}

fn visible(trees: &Grid<u8>, pos: Pos) -> bool {
    let height = trees[pos];
    Direction::ALL
        .into_iter()
        .any(|dir| line_of_sight(trees, pos, dir).all(|other| other < height))
}

/// Product over the four directions of how many trees are seen before the
/// first one at least as tall
fn scenic_score(trees: &Grid<u8>, pos: Pos) -> usize {
    let height = trees[pos];
    Direction::ALL
        .into_iter()
        .map(|dir| {
            let mut seen = 0;
            for other in line_of_sight(trees, pos, dir) {
                seen += 1;
                if other >= height {
                    break;
                }
            }
            seen
        })
        .product()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let count = shared.iter().filter(|&(pos, _)| visible(shared, pos)).count();
        Ok(count.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let best = shared
            .iter()
            .map(|(pos, _)| scenic_score(shared, pos))
            .max()
            .unwrap_or(0);
        Ok(best.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "30373\n25512\n65332\n33549\n35390\n";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "21");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "8");
    }

    #[test]
    fn test_scores() {
        let trees = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(scenic_score(&trees, Pos::new(1, 2)), 4);
        assert_eq!(scenic_score(&trees, Pos::new(3, 2)), 8);
        assert_eq!(scenic_score(&trees, Pos::new(0, 0)), 0);
        assert!(!visible(&trees, Pos::new(1, 3)));
        assert!(visible(&trees, Pos::new(1, 1)));
    }
}
