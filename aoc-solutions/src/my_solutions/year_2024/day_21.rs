use std::iter;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};
use crate::utils::grid::Pos;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 21, tags = ["2024", "hard", "dp"])]
pub struct Solver;

/// Key layout, row by row; a space marks the gap the arm must never cross.
struct Keypad(&'static [[u8; 3]]);

const NUMERIC: Keypad = Keypad(&[*b"789", *b"456", *b"123", *b" 0A"]);
const DIRECTIONAL: Keypad = Keypad(&[*b" ^A", *b"<v>"]);

impl Keypad {
    fn locate(&self, key: u8) -> Option<Pos> {
        self.0.iter().enumerate().find_map(|(row, keys)| {
            keys.iter()
                .position(|&k| k == key)
                .map(|col| Pos::new(row as i64, col as i64))
        })
    }

    /// Shortest candidate key sequences moving the arm from `from` to `to`
    /// and pressing it, each ending in `A`.
    ///
    /// Only the two L-shaped routes are worth trying; zig-zags always cost more
    /// upstream. Keys absent from the pad have no paths.
    fn paths(&self, from: u8, to: u8) -> Vec<Vec<u8>> {
        let (Some(start), Some(end), Some(gap)) =
            (self.locate(from), self.locate(to), self.locate(b' '))
        else {
            return Vec::new();
        };
        let delta = end - start;
        let vertical = iter::repeat_n(
            if delta.row > 0 { b'v' } else { b'^' },
            delta.row.unsigned_abs() as usize,
        );
        let horizontal = iter::repeat_n(
            if delta.col > 0 { b'>' } else { b'<' },
            delta.col.unsigned_abs() as usize,
        );

        let mut paths = Vec::with_capacity(2);
        if Pos::new(start.row, end.col) != gap {
            paths.push(
                horizontal
                    .clone()
                    .chain(vertical.clone())
                    .chain(iter::once(b'A'))
                    .collect(),
            );
        }
        if Pos::new(end.row, start.col) != gap {
            let path: Vec<u8> = vertical.chain(horizontal).chain(iter::once(b'A')).collect();
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
        paths
    }
}

/// Consecutive key pairs of a sequence, starting from the arm resting on `A`
fn press_pairs(keys: &[u8]) -> impl Iterator<Item = (u8, u8)> + '_ {
    iter::once(b'A').chain(keys.iter().copied()).tuple_windows()
}

/// `(from, to, layers)`: pressing `to` on a directional keypad whose arm
/// rests on `from`, with `layers` robot-operated keypads above the human.
type Index = (u8, u8, u8);

/// Human presses needed for an [`Index`]
struct PressCost;

impl DpProblem<Index, u64> for PressCost {
    fn deps(&self, &(from, to, layers): &Index) -> Vec<Index> {
        if layers == 0 {
            return Vec::new();
        }
        DIRECTIONAL
            .paths(from, to)
            .iter()
            .flat_map(|path| press_pairs(path).map(move |(a, b)| (a, b, layers - 1)))
            .collect()
    }

    fn compute(&self, &(from, to, layers): &Index, deps: Vec<u64>) -> u64 {
        if layers == 0 {
            return 1;
        }
        // deps are laid out path by path, one value per key of each path
        let mut rest = deps.as_slice();
        DIRECTIONAL
            .paths(from, to)
            .iter()
            .map(|path| {
                let (head, tail) = rest.split_at(path.len());
                rest = tail;
                head.iter().fold(0, |acc: u64, &c| acc.saturating_add(c))
            })
            .min()
            .unwrap_or(u64::MAX)
    }
}

type PressCache = DpCache<Index, u64, HashMapBackend<Index, u64>, PressCost>;

pub struct Door<'a> {
    /// Door codes with their numeric part
    codes: Vec<(&'a str, u64)>,
    /// Shared between parts; part 2 reuses the shallow layers part 1 filled
    presses: PressCache,
}

impl AocParser for Solver {
    type SharedData<'a> = Door<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let codes = input
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx, line.trim()))
            .filter(|(_, line)| !line.is_empty())
            .map(|(idx, line)| {
                let digits = line
                    .strip_suffix('A')
                    .filter(|d| !d.is_empty() && d.bytes().all(|b| b.is_ascii_digit()))
                    .ok_or_else(|| {
                        ParseError::at_line(idx + 1, format!("expected digits then 'A', got {line:?}"))
                    })?;
                let value: u64 = digits.parse().map_err(|e| ParseError::at_line(idx + 1, e))?;
                Ok((line, value))
            })
            .collect::<Result<Vec<_>, ParseError>>()?;
        if codes.is_empty() {
            return Err(ParseError::MissingData("no door codes".into()));
        }
        Ok(Door {
            codes,
            presses: DpCache::with_problem(HashMapBackend::new(), PressCost),
        })
    }
}

/// Fewest human presses to type `code` on the numeric keypad through
/// `layers` directional robots
fn code_presses(presses: &PressCache, code: &str, layers: u8) -> u64 {
    press_pairs(code.as_bytes())
        .map(|(from, to)| {
            NUMERIC
                .paths(from, to)
                .iter()
                .map(|path| {
                    press_pairs(path)
                        .map(|(a, b)| presses.get(&(a, b, layers)))
                        .fold(0, u64::saturating_add)
                })
                .min()
                .unwrap_or(u64::MAX)
        })
        .fold(0, u64::saturating_add)
}

fn complexity_sum(door: &Door<'_>, layers: u8) -> String {
    let total: u64 = door
        .codes
        .iter()
        .map(|&(code, value)| {
            let presses = code_presses(&door.presses, code, layers);
            log::debug!("{code}: {presses} presses through {layers} robots");
            presses * value
        })
        .sum();
    log::debug!("press cache holds {} entries", door.presses.cached_len());
    total.to_string()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(complexity_sum(shared, 2))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(complexity_sum(shared, 25))
    }
}
