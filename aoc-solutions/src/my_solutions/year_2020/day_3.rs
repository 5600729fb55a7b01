use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 3, tags = ["2020", "easy", "grid"])]
pub struct Solver;

impl AocParser for Solver {
    /// `true` where a tree stands
    type SharedData<'a> = Grid<bool>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse_with(input, |b| match b {
            b'#' => Some(true),
            b'.' => Some(false),
            _ => None,
        })
    }
}

/// Trees hit going `right` columns per `down` rows, wrapping horizontally
fn trees_on_slope(grid: &Grid<bool>, right: i64, down: i64) -> usize {
    (0..)
        .map(|step| Pos::new(step * down, step * right))
        .take_while(|p| (p.row as usize) < grid.height())
        .filter(|&p| *grid.get_wrapping(p))
        .count()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(trees_on_slope(shared, 3, 1).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let product: usize = [(1, 1), (3, 1), (5, 1), (7, 1), (1, 2)]
            .into_iter()
            .map(|(right, down)| trees_on_slope(shared, right, down))
            .product();
        Ok(product.to_string())
    }
}
