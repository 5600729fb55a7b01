use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rustc_hash::{FxHashMap, FxHashSet};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 24, tags = ["2020", "medium", "hex", "cellular-automaton"])]
pub struct Solver;

const EXHIBIT_DAYS: usize = 100;

/// Axial hex coordinates `(q, r)`; east is `+q`, south-east is `+r`
type Hex = (i32, i32);

const NEIGHBOURS: [Hex; 6] = [(1, 0), (-1, 0), (1, -1), (0, -1), (0, 1), (-1, 1)];

fn walk(line: &str) -> Result<Hex, String> {
    let mut bytes = line.bytes();
    let (mut q, mut r) = (0, 0);
    while let Some(b) = bytes.next() {
        let (dq, dr) = match b {
            b'e' => (1, 0),
            b'w' => (-1, 0),
            b'n' | b's' => {
                let north = b == b'n';
                match (north, bytes.next()) {
                    (true, Some(b'e')) => (1, -1),
                    (true, Some(b'w')) => (0, -1),
                    (false, Some(b'e')) => (0, 1),
                    (false, Some(b'w')) => (-1, 1),
                    (_, other) => return Err(format!("bad direction after {:?}: {other:?}", b as char)),
                }
            }
            other => return Err(format!("unexpected {:?}", other as char)),
        };
        q += dq;
        r += dr;
    }
    Ok((q, r))
}

impl AocParser for Solver {
    /// Tiles flipped an odd number of times
    type SharedData<'a> = FxHashSet<Hex>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut black = FxHashSet::default();
        for (idx, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let tile = walk(line).map_err(|e| ParseError::at_line(idx + 1, e))?;
            if !black.insert(tile) {
                black.remove(&tile);
            }
        }
        Ok(black)
    }
}

/// One day of the exhibit: black tiles with zero or more than two black
/// neighbours turn white, white tiles with exactly two turn black
fn next_day(black: &FxHashSet<Hex>) -> FxHashSet<Hex> {
    let mut counts: FxHashMap<Hex, u8> = FxHashMap::default();
    for &(q, r) in black {
        for (dq, dr) in NEIGHBOURS {
            *counts.entry((q + dq, r + dr)).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .filter(|(tile, n)| *n == 2 || (*n == 1 && black.contains(tile)))
        .map(|(tile, _)| tile)
        .collect()
}

pub fn live(black: &FxHashSet<Hex>, days: usize) -> usize {
    (0..days).fold(black.clone(), |tiles, _| next_day(&tiles)).len()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.len().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(live(shared, EXHIBIT_DAYS).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    #[test]
    fn test_walks() {
        assert_eq!(walk("esew"), Ok((0, 1)));
        assert_eq!(walk("nwwswee"), Ok((0, 0)));
        assert_eq!(walk("neswnwse"), Ok((0, 0)));
        assert!(walk("nn").is_err());
        assert!(walk("n").is_err());
    }

    #[test]
    fn test_double_flip_turns_back_white() {
        let mut shared = Solver::parse("esew\nnwwswee\nesew\ne\n").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "2");
        assert!(shared.contains(&(0, 0)) && shared.contains(&(1, 0)));
    }

    #[test]
    fn test_pair_grows_then_splits() {
        let pair = Solver::parse("nwwswee\ne\n").unwrap();
        assert_eq!(live(&pair, 1), 4);
        assert_eq!(live(&pair, 2), 6);
    }

    #[test]
    fn test_lonely_tile_dies() {
        let mut shared = Solver::parse("e\n").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "0");
    }

    #[test]
    fn test_rejects_bad_direction() {
        assert!(Solver::parse("enx\n").is_err());
    }
}
