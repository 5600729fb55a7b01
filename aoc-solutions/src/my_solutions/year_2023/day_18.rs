use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Direction, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 18, tags = ["2023", "medium", "geometry"])]
pub struct Solver;

#[derive(Debug, Clone, Copy)]
pub struct DigStep {
    dir: Direction,
    len: i64,
    /// The step hidden in the colour code
    hex_dir: Direction,
    hex_len: i64,
}

fn parse_step(line: &str) -> Option<DigStep> {
    let mut parts = line.split_whitespace();
    let dir = match parts.next()?.as_bytes() {
        [b] => Direction::from_byte(*b)?,
        _ => return None,
    };
    let len = parts.next()?.parse().ok()?;
    let colour = parts.next()?.strip_prefix("(#")?.strip_suffix(')')?;
    if colour.len() != 6 || parts.next().is_some() {
        return None;
    }
    let hex_len = i64::from_str_radix(&colour[..5], 16).ok()?;
    let hex_dir = match &colour[5..] {
        "0" => Direction::East,
        "1" => Direction::South,
        "2" => Direction::West,
        "3" => Direction::North,
        _ => return None,
    };
    Some(DigStep {
        dir,
        len,
        hex_dir,
        hex_len,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<DigStep>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                parse_step(line)
                    .ok_or_else(|| ParseError::at_line(idx + 1, format!("bad dig step {line:?}")))
            })
            .collect()
    }
}

/// Cubic metres dug out, trench included.
///
/// Shoelace gives the area enclosed by the trench centre line; Pick's
/// theorem turns that into interior points, then the boundary is added back.
pub fn lagoon_volume(steps: impl IntoIterator<Item = (Direction, i64)>) -> i64 {
    let mut pos = Pos::default();
    let mut twice_area = 0;
    let mut boundary = 0;
    for (dir, len) in steps {
        let next = pos + dir.delta() * len;
        twice_area += pos.col * next.row - next.col * pos.row;
        boundary += len;
        pos = next;
    }
    twice_area.abs() / 2 + boundary / 2 + 1
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(lagoon_volume(shared.iter().map(|s| (s.dir, s.len))).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(lagoon_volume(shared.iter().map(|s| (s.hex_dir, s.hex_len))).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "\
R 6 (#70c710)
D 5 (#0dc571)
L 2 (#5713f0)
D 2 (#d2c081)
R 2 (#59c680)
D 2 (#411b91)
L 5 (#8ceee2)
U 2 (#caa173)
L 1 (#1b58a2)
U 2 (#caa171)
R 2 (#7807d2)
U 3 (#a77fa3)
L 2 (#015232)
U 2 (#7a21e3)
";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "62");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "952408144115");
    }

    #[test]
    fn test_unit_square_trench() {
        let square = [
            (Direction::East, 1),
            (Direction::South, 1),
            (Direction::West, 1),
            (Direction::North, 1),
        ];
        assert_eq!(lagoon_volume(square), 4);
    }

    #[test]
    fn test_bad_colour() {
        assert!(Solver::parse("R 6 (#70c71)").is_err());
        assert!(Solver::parse("R 6 (#70c714)").is_err());
    }
}
