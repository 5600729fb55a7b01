use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use rustc_hash::FxHashSet;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 14, tags = ["2022", "medium", "simulation"])]
pub struct Solver;

const SOURCE: (i32, i32) = (500, 0);

#[derive(Debug, Clone)]
pub struct Cave {
    rock: FxHashSet<(i32, i32)>,
    lowest: i32,
}

fn parse_point(text: &str) -> Option<(i32, i32)> {
    let (x, y) = text.trim().split_once(',')?;
    Some((x.trim().parse().ok()?, y.trim().parse().ok()?))
}

impl AocParser for Solver {
    type SharedData<'a> = Cave;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut rock = FxHashSet::default();
        for (idx, line) in input.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let points: Vec<(i32, i32)> = line
                .split("->")
                .map(|p| parse_point(p).ok_or_else(|| ParseError::at_line(idx + 1, format!("bad point {p:?}"))))
                .collect::<Result<_, _>>()?;
            for ((x1, y1), (x2, y2)) in points.iter().copied().tuple_windows() {
                if x1 != x2 && y1 != y2 {
                    return Err(ParseError::at_line(idx + 1, "rock paths must be straight"));
                }
                for x in x1.min(x2)..=x1.max(x2) {
                    for y in y1.min(y2)..=y1.max(y2) {
                        rock.insert((x, y));
                    }
                }
            }
            if let [(x, y)] = points[..] {
                rock.insert((x, y));
            }
        }
        let lowest = rock
            .iter()
            .map(|&(_, y)| y)
            .max()
            .ok_or_else(|| ParseError::MissingData("rock paths".into()))?;
        Ok(Cave { rock, lowest })
    }
}

/// Grains of sand that come to rest. Without a floor, pouring stops when a
/// grain falls past the lowest rock; with one, when the source is covered.
pub fn pour(cave: &Cave, floor: bool) -> usize {
    let floor_y = cave.lowest + 2;
    let mut blocked = cave.rock.clone();
    let mut rested = 0;
    // every grain retraces the previous grain's path, so resume from it
    let mut path = vec![SOURCE];

    while let Some(&(x, y)) = path.last() {
        if !floor && y > cave.lowest {
            break;
        }
        let next = [(x, y + 1), (x - 1, y + 1), (x + 1, y + 1)]
            .into_iter()
            .find(|&(nx, ny)| !blocked.contains(&(nx, ny)) && !(floor && ny >= floor_y));
        match next {
            Some(p) => path.push(p),
            None => {
                blocked.insert((x, y));
                rested += 1;
                path.pop();
            }
        }
    }
    rested
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(pour(shared, false).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(pour(shared, true).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "\
498,4 -> 498,6 -> 496,6
503,4 -> 502,4 -> 502,9 -> 494,9
";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(shared.lowest, 9);
        assert_eq!(shared.rock.len(), 20);
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "24");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "93");
    }

    #[test]
    fn test_floor_fills_triangle() {
        // a single rock far to the side: the floor at y=2 holds a 2-row pyramid
        let shared = Solver::parse("600,0\n").unwrap();
        assert_eq!(pour(&shared, false), 0);
        assert_eq!(pour(&shared, true), 1 + 3);
    }

    #[test]
    fn test_rejects_diagonal() {
        assert!(Solver::parse("1,1 -> 3,3\n").is_err());
        assert!(Solver::parse("1,x -> 3,1\n").is_err());
    }
}
