use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 11, tags = ["2020", "medium", "grid", "cellular-automaton"])]
pub struct Solver;

const EIGHT_WAYS: [Pos; 8] = [
    Pos::new(-1, -1),
    Pos::new(-1, 0),
    Pos::new(-1, 1),
    Pos::new(0, -1),
    Pos::new(0, 1),
    Pos::new(1, -1),
    Pos::new(1, 0),
    Pos::new(1, 1),
];

impl AocParser for Solver {
    /// `true` where a seat is, `false` on floor
    type SharedData<'a> = Grid<bool>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse_with(input, |b| match b {
            b'L' => Some(true),
            b'.' => Some(false),
            _ => None,
        })
    }
}

/// For every seat, the seats whose occupants it sees. Adjacent only, or the
/// first seat along each of the eight lines of sight.
fn visible_seats(seats: &Grid<bool>, far_sight: bool) -> Vec<(usize, Vec<usize>)> {
    let index = |p: Pos| p.row as usize * seats.width() + p.col as usize;
    seats
        .iter()
        .filter(|&(_, &seat)| seat)
        .map(|(pos, _)| {
            let seen = EIGHT_WAYS
                .iter()
                .filter_map(|&dir| {
                    let mut p = pos + dir;
                    while far_sight && seats.get(p) == Some(&false) {
                        p = p + dir;
                    }
                    seats.get(p).copied().filter(|&seat| seat).map(|_| index(p))
                })
                .collect();
            (index(pos), seen)
        })
        .collect()
}

/// Occupied seats once the room stops changing
pub fn settle(seats: &Grid<bool>, far_sight: bool, crowded: usize) -> usize {
    let watchers = visible_seats(seats, far_sight);
    let mut occupied = vec![false; seats.width() * seats.height()];
    let mut rounds = 0;
    loop {
        let flips: Vec<usize> = watchers
            .iter()
            .filter(|(seat, seen)| {
                let neighbours = seen.iter().filter(|&&s| occupied[s]).count();
                if occupied[*seat] { neighbours >= crowded } else { neighbours == 0 }
            })
            .map(|&(seat, _)| seat)
            .collect();
        if flips.is_empty() {
            log::debug!("seating settled after {rounds} rounds");
            return occupied.iter().filter(|&&o| o).count();
        }
        for seat in flips {
            occupied[seat] = !occupied[seat];
        }
        rounds += 1;
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(settle(shared, false, 4).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(settle(shared, true, 5).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "\
L.LL.LL.LL
LLLLLLL.LL
L.L.L..L..
LLLL.LL.LL
L.LL.LL.LL
L.LLLLL.LL
..L.L.....
LLLLLLLLLL
L.LLLLLL.L
L.LLLLL.LL
";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "37");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "26");
    }

    #[test]
    fn test_line_of_sight_skips_floor_only() {
        let seats = Solver::parse("L...L.L\n").unwrap();
        let near = visible_seats(&seats, false);
        let far = visible_seats(&seats, true);
        assert_eq!(near[0], (0, vec![]));
        assert_eq!(far[0], (0, vec![4]));
        assert_eq!(far[1], (4, vec![0, 6]));
    }

    #[test]
    fn test_rejects_occupied_marker() {
        assert!(Solver::parse("L#L\n").is_err());
    }
}
