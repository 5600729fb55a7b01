use std::cmp::Reverse;
use std::collections::BinaryHeap;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::utils::grid::{Direction, Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 16, tags = ["2024", "medium", "grid", "dijkstra"])]
pub struct Solver;

const STEP_COST: u64 = 1;
const TURN_COST: u64 = 1000;

type State = (Pos, Direction);

#[derive(Debug)]
pub struct Maze {
    walls: Grid<bool>,
    start: Pos,
    end: Pos,
    /// Forward and reverse distance tables, filled on first use
    distances: Option<(FxHashMap<State, u64>, FxHashMap<State, u64>)>,
}

impl AocParser for Solver {
    type SharedData<'a> = Maze;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let tiles = Grid::parse_with(input, |b| matches!(b, b'#' | b'.' | b'S' | b'E').then_some(b))?;
        let start = tiles
            .find(&b'S')
            .ok_or_else(|| ParseError::MissingData("start tile S".into()))?;
        let end = tiles
            .find(&b'E')
            .ok_or_else(|| ParseError::MissingData("end tile E".into()))?;
        Ok(Maze {
            walls: tiles.map(|&b| b == b'#'),
            start,
            end,
            distances: None,
        })
    }
}

/// Cheapest cost to every reachable `(position, facing)` from `starts`
fn dijkstra(walls: &Grid<bool>, starts: &[State]) -> FxHashMap<State, u64> {
    let mut dist: FxHashMap<State, u64> = FxHashMap::default();
    let mut queue = BinaryHeap::new();
    for &state in starts {
        dist.insert(state, 0);
        queue.push(Reverse((0, state)));
    }

    while let Some(Reverse((cost, (pos, dir)))) = queue.pop() {
        if dist.get(&(pos, dir)).is_some_and(|&c| c < cost) {
            continue;
        }
        let ahead = pos.step(dir);
        let mut candidates = vec![
            (cost + TURN_COST, (pos, dir.turn_left())),
            (cost + TURN_COST, (pos, dir.turn_right())),
        ];
        if walls.get(ahead).is_some_and(|wall| !wall) {
            candidates.push((cost + STEP_COST, (ahead, dir)));
        }
        for (next_cost, next) in candidates {
            if dist.get(&next).is_none_or(|&c| next_cost < c) {
                dist.insert(next, next_cost);
                queue.push(Reverse((next_cost, next)));
            }
        }
    }
    dist
}

impl Maze {
    fn distances(&mut self) -> &(FxHashMap<State, u64>, FxHashMap<State, u64>) {
        let (walls, start, end) = (&self.walls, self.start, self.end);
        self.distances.get_or_insert_with(|| {
            let forward = dijkstra(walls, &[(start, Direction::East)]);
            // Walking back from the end: arriving facing d is leaving facing -d
            let ends: Vec<State> = Direction::ALL.into_iter().map(|d| (end, d)).collect();
            let reverse = dijkstra(walls, &ends);
            (forward, reverse)
        })
    }

    fn best_score(&mut self) -> Option<u64> {
        let end = self.end;
        let (forward, _) = self.distances();
        Direction::ALL
            .into_iter()
            .filter_map(|d| forward.get(&(end, d)).copied())
            .min()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .best_score()
            .map(|s| s.to_string())
            .ok_or_else(|| SolveError::failed("the end tile is unreachable"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let best = shared
            .best_score()
            .ok_or_else(|| SolveError::failed("the end tile is unreachable"))?;
        let (forward, reverse) = shared.distances();
        let tiles: FxHashSet<Pos> = forward
            .iter()
            .filter(|&(&(pos, dir), &cost)| {
                reverse
                    .get(&(pos, dir.opposite()))
                    .is_some_and(|&rest| cost + rest == best)
            })
            .map(|(&(pos, _), _)| pos)
            .collect();
        Ok(tiles.len().to_string())
    }
}
