use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use rustc_hash::FxHashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 22, tags = ["2023", "medium", "simulation"])]
pub struct Solver;

#[derive(Debug, Clone, Copy)]
pub struct Brick {
    min: [i64; 3],
    max: [i64; 3],
}

#[derive(Debug)]
pub struct SharedData {
    bricks: Vec<Brick>,
    /// For each settled brick (bottom-up order), the bricks it rests on
    supporters: Option<Vec<Vec<usize>>>,
}

fn parse_brick(line: &str) -> Option<Brick> {
    let (a, b) = line.split_once('~')?;
    let corner = |text: &str| -> Option<[i64; 3]> {
        let (x, y, z) = text.split(',').map(|v| v.trim().parse().ok()).collect_tuple()?;
        Some([x?, y?, z?])
    };
    let (a, b) = (corner(a)?, corner(b)?);
    let brick = Brick {
        min: [a[0].min(b[0]), a[1].min(b[1]), a[2].min(b[2])],
        max: [a[0].max(b[0]), a[1].max(b[1]), a[2].max(b[2])],
    };
    (brick.min[2] >= 1).then_some(brick)
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let bricks = input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                parse_brick(line.trim())
                    .ok_or_else(|| ParseError::at_line(idx + 1, format!("bad brick {line:?}")))
            })
            .collect::<Result<_, _>>()?;
        Ok(SharedData {
            bricks,
            supporters: None,
        })
    }
}

/// Drop every brick as far as it goes and record who rests on whom
fn settle(bricks: &[Brick]) -> Vec<Vec<usize>> {
    let mut order: Vec<Brick> = bricks.to_vec();
    order.sort_by_key(|b| b.min[2]);

    // (x, y) -> (top z, brick index)
    let mut tops: FxHashMap<(i64, i64), (i64, usize)> = FxHashMap::default();
    let mut supporters = Vec::with_capacity(order.len());
    for (i, brick) in order.iter().enumerate() {
        let footprint: Vec<(i64, i64)> = (brick.min[0]..=brick.max[0])
            .cartesian_product(brick.min[1]..=brick.max[1])
            .collect();
        let floor = footprint
            .iter()
            .filter_map(|cell| tops.get(cell).map(|&(z, _)| z))
            .max()
            .unwrap_or(0);
        let below: Vec<usize> = footprint
            .iter()
            .filter_map(|cell| tops.get(cell))
            .filter(|&&(z, _)| z == floor)
            .map(|&(_, id)| id)
            .unique()
            .collect();
        let top = floor + 1 + (brick.max[2] - brick.min[2]);
        for cell in footprint {
            tops.insert(cell, (top, i));
        }
        supporters.push(below);
    }
    supporters
}

fn supporters(shared: &mut SharedData) -> &[Vec<usize>] {
    let bricks = &shared.bricks;
    shared.supporters.get_or_insert_with(|| settle(bricks))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let supporters = supporters(shared);
        let load_bearing = supporters
            .iter()
            .filter_map(|below| match below.as_slice() {
                &[only] => Some(only),
                _ => None,
            })
            .unique()
            .count();
        Ok((supporters.len() - load_bearing).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let supporters = supporters(shared);
        let n = supporters.len();
        let mut total = 0;
        let mut falling = vec![false; n];
        for removed in 0..n {
            falling.fill(false);
            falling[removed] = true;
            // Supporters always come earlier in settled order
            for above in removed + 1..n {
                let below = &supporters[above];
                if !below.is_empty() && below.iter().all(|&b| falling[b]) {
                    falling[above] = true;
                    total += 1;
                }
            }
        }
        Ok(total.to_string())
    }
}
