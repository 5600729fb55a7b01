use std::collections::VecDeque;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rustc_hash::FxHashSet;

use crate::utils::grid::{Direction, Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 15, tags = ["2024", "medium", "grid", "simulation"])]
pub struct Solver;

#[derive(Debug, Clone)]
pub struct Warehouse {
    /// `#`, `.`, `O`, `[` or `]`; the robot's square is stored as `.`
    map: Grid<u8>,
    robot: Pos,
    moves: Vec<Direction>,
}

impl AocParser for Solver {
    type SharedData<'a> = Warehouse;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let input = input.replace("\r\n", "\n");
        let (map, moves) = input
            .split_once("\n\n")
            .ok_or_else(|| ParseError::MissingData("blank line before the moves".into()))?;
        let mut map = Grid::parse_with(map, |b| matches!(b, b'#' | b'.' | b'O' | b'@').then_some(b))?;
        let robot = map
            .find(&b'@')
            .ok_or_else(|| ParseError::MissingData("robot @".into()))?;
        map[robot] = b'.';
        let moves = moves
            .bytes()
            .filter(|b| !b.is_ascii_whitespace())
            .map(|b| {
                Direction::from_byte(b)
                    .filter(|_| matches!(b, b'^' | b'v' | b'<' | b'>'))
                    .ok_or_else(|| ParseError::InvalidFormat(format!("bad move {:?}", b as char)))
            })
            .collect::<Result<_, _>>()?;
        Ok(Warehouse { map, robot, moves })
    }
}

impl Warehouse {
    /// Every box tile is doubled in width, walls too; the robot stays narrow
    fn widened(&self) -> Warehouse {
        let map = Grid::from_fn(self.map.width() * 2, self.map.height(), |p| {
            let source = self.map[Pos::new(p.row, p.col / 2)];
            match (source, p.col % 2) {
                (b'O', 0) => b'[',
                (b'O', _) => b']',
                (other, _) => other,
            }
        });
        Warehouse {
            map,
            robot: Pos::new(self.robot.row, self.robot.col * 2),
            moves: self.moves.clone(),
        }
    }

    /// Move the robot one step, pushing whatever boxes are in the way
    fn step(&mut self, dir: Direction) {
        let mut pushed = Vec::new();
        let mut seen = FxHashSet::default();
        let mut queue = VecDeque::from([self.robot]);
        while let Some(pos) = queue.pop_front() {
            let next = pos.step(dir);
            let mut push = |p: Pos, queue: &mut VecDeque<Pos>| {
                if seen.insert(p) {
                    pushed.push(p);
                    queue.push_back(p);
                }
            };
            // Off the map counts as wall
            match self.map.get(next).copied().unwrap_or(b'#') {
                b'#' => return,
                b'O' => push(next, &mut queue),
                b'[' => {
                    push(next, &mut queue);
                    if dir.is_vertical() {
                        push(next.step(Direction::East), &mut queue);
                    }
                }
                b']' => {
                    push(next, &mut queue);
                    if dir.is_vertical() {
                        push(next.step(Direction::West), &mut queue);
                    }
                }
                _ => {}
            }
        }

        // Farthest first so nothing is overwritten before it moves
        let delta = dir.delta();
        pushed.sort_by_key(|p| -(p.row * delta.row + p.col * delta.col));
        for pos in pushed {
            self.map[pos.step(dir)] = self.map[pos];
            self.map[pos] = b'.';
        }
        self.robot = self.robot.step(dir);
    }

    fn gps_sum(&self) -> i64 {
        self.map
            .iter()
            .filter(|&(_, &tile)| tile == b'O' || tile == b'[')
            .map(|(p, _)| 100 * p.row + p.col)
            .sum()
    }

    fn run(mut self) -> i64 {
        let moves = std::mem::take(&mut self.moves);
        for dir in moves {
            self.step(dir);
        }
        self.gps_sum()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.clone().run().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.widened().run().to_string())
    }
}
