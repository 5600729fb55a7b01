use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Direction, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 12, tags = ["2020", "easy", "simulation"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move(Direction, i64),
    /// Clockwise quarter turns, 0 to 3
    Turn(u8),
    Forward(i64),
}

fn parse_action(line: &str) -> Result<Action, String> {
    let mut chars = line.chars();
    let kind = chars.next().ok_or_else(|| "empty instruction".to_string())?;
    let rest = chars.as_str();
    let value: i64 = rest.parse().map_err(|e| format!("bad value {rest:?}: {e}"))?;
    let quarter_turns = |degrees: i64| {
        if degrees % 90 == 0 {
            Ok((degrees / 90).rem_euclid(4) as u8)
        } else {
            Err(format!("cannot turn {degrees} degrees"))
        }
    };
    match kind {
        'F' => Ok(Action::Forward(value)),
        'R' => quarter_turns(value).map(Action::Turn),
        'L' => quarter_turns(-value).map(Action::Turn),
        'N' | 'E' | 'S' | 'W' => Direction::from_byte(kind as u8)
            .map(|dir| Action::Move(dir, value))
            .ok_or_else(|| format!("unknown action {kind:?}")),
        other => Err(format!("unknown action {other:?}")),
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Action>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| parse_action(line.trim()).map_err(|e| ParseError::at_line(idx + 1, e)))
            .collect()
    }
}

/// Quarter turn clockwise about the ship, with rows growing southward
fn rotate_clockwise(p: Pos) -> Pos {
    Pos::new(p.col, -p.row)
}

fn distance_from_start(p: Pos) -> i64 {
    p.row.abs() + p.col.abs()
}

/// Moves shift the ship itself and `F` follows the heading
pub fn sail(actions: &[Action]) -> Pos {
    let mut ship = Pos::default();
    let mut heading = Direction::East;
    for &action in actions {
        match action {
            Action::Move(dir, n) => ship = ship + dir.delta() * n,
            Action::Turn(quarters) => {
                for _ in 0..quarters {
                    heading = heading.turn_right();
                }
            }
            Action::Forward(n) => ship = ship + heading.delta() * n,
        }
    }
    ship
}

/// Moves and turns act on the waypoint and `F` heads toward it
pub fn sail_by_waypoint(actions: &[Action]) -> Pos {
    let mut ship = Pos::default();
    let mut waypoint = Pos::new(-1, 10);
    for &action in actions {
        match action {
            Action::Move(dir, n) => waypoint = waypoint + dir.delta() * n,
            Action::Turn(quarters) => {
                for _ in 0..quarters {
                    waypoint = rotate_clockwise(waypoint);
                }
            }
            Action::Forward(n) => ship = ship + waypoint * n,
        }
    }
    ship
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(distance_from_start(sail(shared)).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(distance_from_start(sail_by_waypoint(shared)).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "F10\nN3\nF7\nR90\nF11\n";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "25");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "286");
        assert_eq!(sail_by_waypoint(&shared), Pos::new(72, 214));
    }

    #[test]
    fn test_turns() {
        let actions = Solver::parse("L90\nR270\nL450\n").unwrap();
        assert_eq!(actions, [Action::Turn(3), Action::Turn(3), Action::Turn(3)]);
        assert_eq!(sail(&Solver::parse("L90\nF5\n").unwrap()), Pos::new(-5, 0));
        assert_eq!(rotate_clockwise(Pos::new(-4, 10)), Pos::new(10, 4));
    }

    #[test]
    fn test_rejects_bad_actions() {
        assert!(Solver::parse("R45\n").is_err());
        assert!(Solver::parse("X3\n").is_err());
        assert!(Solver::parse("F\n").is_err());
    }
}
