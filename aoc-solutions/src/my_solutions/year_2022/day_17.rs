use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rustc_hash::FxHashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 17, tags = ["2022", "hard", "simulation", "cycle-detection"])]
pub struct Solver;

/// Rock rows from the bottom up. Bit 6 is the leftmost column and every
/// rock starts two columns in from the left wall.
const ROCKS: [&[u8]; 5] = [
    &[0b0011110],
    &[0b0001000, 0b0011100, 0b0001000],
    &[0b0011100, 0b0000100, 0b0000100],
    &[0b0010000, 0b0010000, 0b0010000, 0b0010000],
    &[0b0011000, 0b0011000],
];
const LEFT_WALL: u8 = 0b1000000;
const RIGHT_WALL: u8 = 0b0000001;
/// Rows of the surface compared when looking for a repeat
const SURFACE_ROWS: usize = 32;

impl AocParser for Solver {
    /// `true` for a push to the right
    type SharedData<'a> = Vec<bool>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let jets: Vec<bool> = input
            .trim()
            .bytes()
            .map(|b| match b {
                b'>' => Ok(true),
                b'<' => Ok(false),
                other => Err(ParseError::InvalidFormat(format!("unexpected {:?} in jet pattern", other as char))),
            })
            .collect::<Result<_, _>>()?;
        if jets.is_empty() {
            return Err(ParseError::MissingData("jet pattern".into()));
        }
        Ok(jets)
    }
}

struct Chamber<'j> {
    rows: Vec<u8>,
    jets: &'j [bool],
    next_jet: usize,
    dropped: u64,
}

impl<'j> Chamber<'j> {
    fn new(jets: &'j [bool]) -> Self {
        Self {
            rows: Vec::new(),
            jets,
            next_jet: 0,
            dropped: 0,
        }
    }

    fn height(&self) -> u64 {
        self.rows.len() as u64
    }

    fn collides(&self, rock: &[u8], bottom: usize) -> bool {
        rock.iter()
            .enumerate()
            .any(|(i, &row)| self.rows.get(bottom + i).is_some_and(|&filled| filled & row != 0))
    }

    fn drop_rock(&mut self) {
        let mut rock = ROCKS[(self.dropped % ROCKS.len() as u64) as usize].to_vec();
        let mut bottom = self.rows.len() + 3;
        loop {
            let right = self.jets[self.next_jet];
            self.next_jet = (self.next_jet + 1) % self.jets.len();
            let pushed: Option<Vec<u8>> = if right {
                rock.iter().all(|&r| r & RIGHT_WALL == 0).then(|| rock.iter().map(|&r| r >> 1).collect())
            } else {
                rock.iter().all(|&r| r & LEFT_WALL == 0).then(|| rock.iter().map(|&r| r << 1).collect())
            };
            if let Some(pushed) = pushed.filter(|p| !self.collides(p, bottom)) {
                rock = pushed;
            }
            if bottom == 0 || self.collides(&rock, bottom - 1) {
                break;
            }
            bottom -= 1;
        }
        for (i, row) in rock.into_iter().enumerate() {
            if bottom + i >= self.rows.len() {
                self.rows.resize(bottom + i + 1, 0);
            }
            self.rows[bottom + i] |= row;
        }
        self.dropped += 1;
    }

    /// What decides every future move: the next rock and jet plus the top
    /// of the tower
    fn state(&self) -> (usize, usize, Vec<u8>) {
        let surface = self.rows[self.rows.len().saturating_sub(SURFACE_ROWS)..].to_vec();
        (
            (self.dropped % ROCKS.len() as u64) as usize,
            self.next_jet,
            surface,
        )
    }
}

/// Tower height after `rocks` rocks, skipping ahead once the chamber
/// repeats a state
pub fn tower_height(jets: &[bool], rocks: u64) -> u64 {
    let mut chamber = Chamber::new(jets);
    let mut seen: FxHashMap<(usize, usize, Vec<u8>), (u64, u64)> = FxHashMap::default();
    let mut skipped = 0;

    while chamber.dropped < rocks {
        chamber.drop_rock();
        if skipped == 0 && chamber.rows.len() >= SURFACE_ROWS {
            let key = chamber.state();
            if let Some(&(then_dropped, then_height)) = seen.get(&key) {
                let period = chamber.dropped - then_dropped;
                let growth = chamber.height() - then_height;
                let cycles = (rocks - chamber.dropped) / period;
                log::debug!("tower repeats every {period} rocks, growing {growth}");
                skipped = cycles * growth;
                chamber.dropped += cycles * period;
            } else {
                seen.insert(key, (chamber.dropped, chamber.height()));
            }
        }
    }
    chamber.height() + skipped
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(tower_height(shared, 2022).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(tower_height(shared, 1_000_000_000_000).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = ">>><<><>><<<>><>>><<<>>><<<><<<>><>><<>>\n";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "3068");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "1514285714288");
    }

    #[test]
    fn test_first_rocks() {
        let jets = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(tower_height(&jets, 1), 1);
        assert_eq!(tower_height(&jets, 2), 4);
        let mut chamber = Chamber::new(&jets);
        chamber.drop_rock();
        // the first bar goes right once, is blocked twice, then comes back left
        assert_eq!(chamber.rows, [0b0011110]);
    }

    #[test]
    fn test_skipping_matches_plain_simulation() {
        let jets = Solver::parse(EXAMPLE).unwrap();
        let mut chamber = Chamber::new(&jets);
        for _ in 0..500 {
            chamber.drop_rock();
        }
        assert_eq!(tower_height(&jets, 500), chamber.height());
    }

    #[test]
    fn test_rejects_other_characters() {
        assert!(Solver::parse("<>v\n").is_err());
        assert!(Solver::parse("\n").is_err());
    }
}
