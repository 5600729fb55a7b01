use std::collections::VecDeque;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Direction, Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 22, tags = ["2022", "hard", "grid", "geometry"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Void,
    Open,
    Wall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Walk(u32),
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct Notes {
    tiles: Grid<Tile>,
    path: Vec<Step>,
}

impl Notes {
    fn on_map(&self, pos: Pos) -> bool {
        self.tiles.get(pos).is_some_and(|&t| t != Tile::Void)
    }
}

fn parse_path(text: &str) -> Result<Vec<Step>, ParseError> {
    let mut path = Vec::new();
    let mut number: Option<u32> = None;
    for c in text.chars() {
        if let Some(d) = c.to_digit(10) {
            let n = number.unwrap_or(0).checked_mul(10).and_then(|n| n.checked_add(d));
            number = Some(n.ok_or_else(|| ParseError::InvalidFormat("step count too large".into()))?);
            continue;
        }
        if let Some(n) = number.take() {
            path.push(Step::Walk(n));
        }
        match c {
            'L' => path.push(Step::Left),
            'R' => path.push(Step::Right),
            other => return Err(ParseError::InvalidFormat(format!("unexpected {other:?} in path"))),
        }
    }
    path.extend(number.map(Step::Walk));
    if path.is_empty() {
        return Err(ParseError::MissingData("path".into()));
    }
    Ok(path)
}

impl AocParser for Solver {
    type SharedData<'a> = Notes;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut lines = input.lines().skip_while(|l| l.trim().is_empty());
        let rows: Vec<&str> = lines
            .by_ref()
            .take_while(|l| !l.trim().is_empty())
            .map(str::trim_end)
            .collect();
        let path: String = lines.map(str::trim).collect();

        for (idx, row) in rows.iter().enumerate() {
            if let Some(bad) = row.chars().find(|c| !matches!(c, ' ' | '.' | '#')) {
                return Err(ParseError::at_line(idx + 1, format!("unexpected {bad:?} on the map")));
            }
        }
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        if width == 0 {
            return Err(ParseError::MissingData("map".into()));
        }
        let tiles = Grid::from_fn(width, rows.len(), |p| {
            match rows[p.row as usize].as_bytes().get(p.col as usize) {
                Some(b'.') => Tile::Open,
                Some(b'#') => Tile::Wall,
                _ => Tile::Void,
            }
        });
        Ok(Notes {
            tiles,
            path: parse_path(&path)?,
        })
    }
}

/// Follow the path; `wrap` says where a step off the map edge lands
fn follow(notes: &Notes, wrap: impl Fn(Pos, Direction) -> Option<(Pos, Direction)>) -> Result<i64, String> {
    let mut pos = (0..notes.tiles.width() as i64)
        .map(|col| Pos::new(0, col))
        .find(|&p| notes.tiles[p] == Tile::Open)
        .ok_or("no open tile on the top row")?;
    let mut dir = Direction::East;

    for &step in &notes.path {
        let n = match step {
            Step::Left => {
                dir = dir.turn_left();
                continue;
            }
            Step::Right => {
                dir = dir.turn_right();
                continue;
            }
            Step::Walk(n) => n,
        };
        for _ in 0..n {
            let ahead = pos.step(dir);
            let (next, next_dir) = if notes.on_map(ahead) {
                (ahead, dir)
            } else {
                wrap(pos, dir).ok_or_else(|| format!("cannot leave the map at {pos} facing {dir:?}"))?
            };
            match notes.tiles.get(next) {
                Some(Tile::Wall) => break,
                Some(Tile::Open) => (pos, dir) = (next, next_dir),
                _ => return Err(format!("wrapped off the map to {next}")),
            }
        }
    }
    // facing counts clockwise from east
    let facing = (dir.index() + 3) % 4;
    Ok(1000 * (pos.row + 1) + 4 * (pos.col + 1) + facing as i64)
}

/// Come back in from the far side of the same row or column
fn wrap_flat(notes: &Notes, pos: Pos, dir: Direction) -> Option<(Pos, Direction)> {
    let mut back = pos;
    while notes.on_map(back.step(dir.opposite())) {
        back = back.step(dir.opposite());
    }
    Some((back, dir))
}

type Vec3 = [i64; 3];

fn neg(v: Vec3) -> Vec3 {
    v.map(|x| -x)
}

fn dot(a: Vec3, b: Vec3) -> i64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// A face of the net placed on the cube. `right` and `down` are the cube
/// directions of east and south on the net.
#[derive(Debug, Clone, Copy)]
struct Face {
    corner: Pos,
    normal: Vec3,
    right: Vec3,
    down: Vec3,
}

impl Face {
    fn toward(&self, dir: Direction) -> Vec3 {
        match dir {
            Direction::East => self.right,
            Direction::South => self.down,
            Direction::West => neg(self.right),
            Direction::North => neg(self.down),
        }
    }

    /// The face reached by folding over the edge facing `dir`
    fn rolled(&self, dir: Direction, corner: Pos) -> Face {
        let Face { normal, right, down, .. } = *self;
        let (normal, right, down) = match dir {
            Direction::East => (right, neg(normal), down),
            Direction::South => (down, right, neg(normal)),
            Direction::West => (neg(right), normal, down),
            Direction::North => (neg(down), right, normal),
        };
        Face {
            corner,
            normal,
            right,
            down,
        }
    }
}

/// The map folded into a cube
#[derive(Debug, Clone)]
pub struct Cube {
    side: i64,
    faces: Vec<Face>,
}

impl Cube {
    pub fn fold(notes: &Notes) -> Result<Self, String> {
        let area = notes.tiles.iter().filter(|&(p, _)| notes.on_map(p)).count();
        let side = (1..=area)
            .find(|s| 6 * s * s >= area)
            .filter(|s| 6 * s * s == area)
            .ok_or_else(|| format!("{area} tiles do not make six square faces"))?;

        let mut corners = Vec::new();
        for block_row in 0..notes.tiles.height().div_ceil(side) {
            for block_col in 0..notes.tiles.width().div_ceil(side) {
                let corner = Pos::new((block_row * side) as i64, (block_col * side) as i64);
                let filled = (0..side * side)
                    .map(|i| corner + Pos::new((i / side) as i64, (i % side) as i64))
                    .filter(|&p| notes.on_map(p))
                    .count();
                match filled {
                    0 => {}
                    f if f == side * side => corners.push(corner),
                    _ => return Err(format!("face at {corner} is not a full {side}x{side} square")),
                }
            }
        }
        if corners.len() != 6 {
            return Err(format!("expected 6 faces, found {}", corners.len()));
        }

        let side = side as i64;
        let mut placed: Vec<Option<Face>> = vec![None; corners.len()];
        placed[0] = Some(Face {
            corner: corners[0],
            normal: [0, 0, 1],
            right: [1, 0, 0],
            down: [0, 1, 0],
        });
        let mut queue = VecDeque::from([0]);
        while let Some(i) = queue.pop_front() {
            let Some(face) = placed[i] else { continue };
            for dir in Direction::ALL {
                let corner = face.corner + dir.delta() * side;
                let unplaced = corners.iter().position(|&c| c == corner).filter(|&j| placed[j].is_none());
                if let Some(j) = unplaced {
                    placed[j] = Some(face.rolled(dir, corner));
                    queue.push_back(j);
                }
            }
        }
        let faces: Vec<Face> = placed
            .into_iter()
            .collect::<Option<_>>()
            .ok_or("the faces are not connected")?;
        for (i, a) in faces.iter().enumerate() {
            if faces[i + 1..].iter().any(|b| b.normal == a.normal) {
                return Err(format!("two faces overlap when folding at {}", a.corner));
            }
        }
        Ok(Self { side, faces })
    }

    fn face_of(&self, pos: Pos) -> Option<&Face> {
        self.faces.iter().find(|f| {
            (f.corner.row..f.corner.row + self.side).contains(&pos.row)
                && (f.corner.col..f.corner.col + self.side).contains(&pos.col)
        })
    }

    /// Step over a cube edge. Tile centres use doubled coordinates so the
    /// cube spans `-side..=side` on every axis.
    pub fn wrap(&self, pos: Pos, dir: Direction) -> Option<(Pos, Direction)> {
        let from = self.face_of(pos)?;
        let s = self.side;
        let (i, j) = (pos.row - from.corner.row, pos.col - from.corner.col);
        let centre: Vec3 = std::array::from_fn(|k| {
            s * from.normal[k] + (2 * j - s + 1) * from.right[k] + (2 * i - s + 1) * from.down[k]
        });
        let out = from.toward(dir);
        let landed: Vec3 = std::array::from_fn(|k| centre[k] + out[k] - from.normal[k]);

        let to = self.faces.iter().find(|f| f.normal == out)?;
        let row = (dot(landed, to.down) + s - 1) / 2;
        let col = (dot(landed, to.right) + s - 1) / 2;
        let heading = neg(from.normal);
        let new_dir = Direction::ALL.into_iter().find(|&d| to.toward(d) == heading)?;
        Some((to.corner + Pos::new(row, col), new_dir))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        follow(shared, |pos, dir| wrap_flat(shared, pos, dir))
            .map(|n| n.to_string())
            .map_err(SolveError::failed)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let cube = Cube::fold(shared).map_err(SolveError::failed)?;
        log::debug!("folded a cube with side {}", cube.side);
        follow(shared, |pos, dir| cube.wrap(pos, dir))
            .map(|n| n.to_string())
            .map_err(SolveError::failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "        ...#
        .#..
        #...
        ....
...#.......#
........#...
..#....#....
..........#.
        ...#....
        .....#..
        .#......
        ......#.

10R5L5R10L4R5L5
";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(shared.path.len(), 13);
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "6032");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "5031");
    }

    #[test]
    fn test_flat_wrap() {
        let notes = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(
            wrap_flat(&notes, Pos::new(0, 8), Direction::North),
            Some((Pos::new(11, 8), Direction::North))
        );
        assert_eq!(
            wrap_flat(&notes, Pos::new(4, 0), Direction::West),
            Some((Pos::new(4, 11), Direction::West))
        );
    }

    #[test]
    fn test_cube_edges() {
        let notes = Solver::parse(EXAMPLE).unwrap();
        let cube = Cube::fold(&notes).unwrap();
        assert_eq!(cube.side, 4);
        // right off the middle band comes down into the rightmost face
        assert_eq!(
            cube.wrap(Pos::new(5, 11), Direction::East),
            Some((Pos::new(8, 14), Direction::South))
        );
        // down off the bottom comes up through the leftmost face
        assert_eq!(
            cube.wrap(Pos::new(11, 10), Direction::South),
            Some((Pos::new(7, 1), Direction::North))
        );
    }

    #[test]
    fn test_every_edge_leads_back() {
        let notes = Solver::parse(EXAMPLE).unwrap();
        let cube = Cube::fold(&notes).unwrap();
        for (pos, _) in notes.tiles.iter().filter(|&(p, _)| notes.on_map(p)) {
            for dir in Direction::ALL {
                if notes.on_map(pos.step(dir)) {
                    continue;
                }
                let (there, facing) = cube.wrap(pos, dir).unwrap();
                assert!(notes.on_map(there), "{pos} {dir:?} -> {there}");
                assert_eq!(cube.wrap(there, facing.opposite()), Some((pos, dir.opposite())));
            }
        }
    }

    #[test]
    fn test_small_map_without_cube() {
        let mut shared = Solver::parse("..\n..\n\n1\n").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "1008");
        assert!(Solver::solve_part(&mut shared, 2).is_err());
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(Solver::parse("..x.\n\n1\n").is_err());
        assert!(Solver::parse("....\n\n1X2\n").is_err());
        assert!(Solver::parse("....\n").is_err());
    }
}
