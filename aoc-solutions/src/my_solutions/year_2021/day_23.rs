use std::cmp::Reverse;
use std::collections::BinaryHeap;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rustc_hash::FxHashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 23, tags = ["2021", "hard", "search"])]
pub struct Solver;

const HALL: usize = 11;
const MAX_DEPTH: usize = 4;
/// Hallway squares directly above rooms A..D
const ENTRANCES: [usize; 4] = [2, 4, 6, 8];
const ENERGY: [u32; 4] = [1, 10, 100, 1000];

/// Rows unfolded from the folded part of the diagram
const UNFOLDED: [[u8; 4]; 2] = [[4, 3, 2, 1], [4, 2, 1, 3]];

/// Amphipods as 1..=4 (A..D), 0 for an empty square
type Row = [u8; 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct Burrow {
    hall: [u8; HALL],
    /// `rooms[r][0]` is the square next to the hallway
    rooms: [[u8; MAX_DEPTH]; 4],
}

impl Burrow {
    fn from_rows(rows: &[Row]) -> Self {
        let mut rooms = [[0; MAX_DEPTH]; 4];
        for (depth, row) in rows.iter().enumerate() {
            for (room, &kind) in row.iter().enumerate() {
                rooms[room][depth] = kind;
            }
        }
        Self {
            hall: [0; HALL],
            rooms,
        }
    }

    fn organized(depth: usize) -> Self {
        let rows = vec![[1, 2, 3, 4]; depth];
        Self::from_rows(&rows)
    }

    /// Hallway squares strictly after `from` up to and including `to` are empty
    fn hall_clear(&self, from: usize, to: usize) -> bool {
        let (lo, hi) = if from < to { (from + 1, to) } else { (to, from - 1) };
        self.hall[lo..=hi].iter().all(|&c| c == 0)
    }

    fn moves(&self, depth: usize) -> Vec<(u32, Burrow)> {
        let mut next = Vec::new();

        // Into a room: only when it holds no strangers
        for h in 0..HALL {
            let kind = self.hall[h];
            if kind == 0 {
                continue;
            }
            let room = usize::from(kind - 1);
            let slots = &self.rooms[room][..depth];
            if slots.iter().any(|&c| c != 0 && c != kind) {
                continue;
            }
            let entrance = ENTRANCES[room];
            let Some(slot) = slots.iter().rposition(|&c| c == 0) else {
                continue;
            };
            if !self.hall_clear(h, entrance) {
                continue;
            }
            let mut state = *self;
            state.hall[h] = 0;
            state.rooms[room][slot] = kind;
            let steps = h.abs_diff(entrance) + slot + 1;
            next.push((steps as u32 * ENERGY[room], state));
        }

        // Out of a room into the hallway, unless everyone below is home
        for room in 0..4 {
            let slots = &self.rooms[room][..depth];
            let Some(slot) = slots.iter().position(|&c| c != 0) else {
                continue;
            };
            if slots[slot..].iter().all(|&c| usize::from(c) == room + 1) {
                continue;
            }
            let kind = slots[slot];
            let entrance = ENTRANCES[room];
            for h in (0..HALL).filter(|h| !ENTRANCES.contains(h)) {
                if !self.hall_clear(entrance, h) {
                    continue;
                }
                let mut state = *self;
                state.rooms[room][slot] = 0;
                state.hall[h] = kind;
                let steps = slot + 1 + entrance.abs_diff(h);
                next.push((steps as u32 * ENERGY[usize::from(kind - 1)], state));
            }
        }
        next
    }
}

/// Least energy to organize the burrow with rooms `rows.len()` deep
fn least_energy(rows: &[Row]) -> Option<u32> {
    let depth = rows.len();
    let start = Burrow::from_rows(rows);
    let goal = Burrow::organized(depth);

    let mut best: FxHashMap<Burrow, u32> = FxHashMap::default();
    let mut queue = BinaryHeap::new();
    best.insert(start, 0);
    queue.push(Reverse((0, start)));

    while let Some(Reverse((energy, state))) = queue.pop() {
        if state == goal {
            log::debug!("organized depth {depth} after visiting {} states", best.len());
            return Some(energy);
        }
        if best.get(&state).is_some_and(|&e| e < energy) {
            continue;
        }
        for (cost, next) in state.moves(depth) {
            let candidate = energy + cost;
            if best.get(&next).is_none_or(|&e| candidate < e) {
                best.insert(next, candidate);
                queue.push(Reverse((candidate, next)));
            }
        }
    }
    None
}

impl AocParser for Solver {
    /// Room rows from the top, as drawn in the diagram
    type SharedData<'a> = Vec<Row>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut rows = Vec::new();
        for (idx, line) in input.lines().enumerate() {
            let mut row = Vec::with_capacity(4);
            for b in line.bytes() {
                match b {
                    b'A'..=b'D' => row.push(b - b'A' + 1),
                    b'#' | b'.' | b' ' => {}
                    _ => {
                        return Err(ParseError::at_line(
                            idx + 1,
                            format!("unexpected {:?}", b as char),
                        ));
                    }
                }
            }
            match <Row>::try_from(row.as_slice()) {
                Ok(row) => rows.push(row),
                Err(_) if row.is_empty() => {}
                Err(_) => {
                    return Err(ParseError::at_line(idx + 1, "expected four amphipods"));
                }
            }
        }
        if rows.is_empty() || rows.len() > 2 {
            return Err(ParseError::InvalidFormat(format!(
                "expected 1 or 2 room rows, found {}",
                rows.len()
            )));
        }
        for kind in 1..=4u8 {
            let count = rows.iter().flatten().filter(|&&c| c == kind).count();
            if count != rows.len() {
                return Err(ParseError::InvalidFormat(format!(
                    "expected {} amphipods of type {}, found {count}",
                    rows.len(),
                    (b'A' + kind - 1) as char
                )));
            }
        }
        Ok(rows)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        least_energy(shared)
            .map(|e| e.to_string())
            .ok_or_else(|| SolveError::failed("burrow cannot be organized"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (first, rest) = shared
            .split_first()
            .ok_or_else(|| SolveError::failed("no room rows"))?;
        let rows: Vec<Row> = std::iter::once(*first)
            .chain(UNFOLDED)
            .chain(rest.iter().copied())
            .collect();
        least_energy(&rows)
            .map(|e| e.to_string())
            .ok_or_else(|| SolveError::failed("unfolded burrow cannot be organized"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "\
#############
#...........#
###B#C#B#D###
  #A#D#C#A#
  #########
";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(shared, vec![[2, 3, 2, 4], [1, 4, 3, 1]]);
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "12521");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "44169");
    }

    #[test]
    fn test_already_organized() {
        assert_eq!(least_energy(&[[1, 2, 3, 4], [1, 2, 3, 4]]), Some(0));
    }

    #[test]
    fn test_wrong_population() {
        let err = Solver::parse("###B#C#B#D###\n  #A#D#C#C#\n").unwrap_err();
        assert!(err.to_string().contains("type A"), "{err}");
    }
}
