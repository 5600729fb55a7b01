//! Rectangular character grids addressed by signed positions

use std::fmt;
use std::ops::{Add, Index, IndexMut, Mul, Sub};

use aoc_solver::ParseError;

/// Position in a grid. Signed so that stepping off an edge is representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Pos {
    pub row: i64,
    pub col: i64,
}

impl Pos {
    pub const fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }

    pub fn step(self, dir: Direction) -> Self {
        self + dir.delta()
    }

    /// The four orthogonal neighbours, in N/E/S/W order
    pub fn neighbors(self) -> impl Iterator<Item = Pos> {
        Direction::ALL.into_iter().map(move |d| self.step(d))
    }
}

impl Add for Pos {
    type Output = Pos;

    fn add(self, rhs: Pos) -> Pos {
        Pos::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Pos {
    type Output = Pos;

    fn sub(self, rhs: Pos) -> Pos {
        Pos::new(self.row - rhs.row, self.col - rhs.col)
    }
}

impl Mul<i64> for Pos {
    type Output = Pos;

    fn mul(self, rhs: i64) -> Pos {
        Pos::new(self.row * rhs, self.col * rhs)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Clockwise from north
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn delta(self) -> Pos {
        match self {
            Direction::North => Pos::new(-1, 0),
            Direction::East => Pos::new(0, 1),
            Direction::South => Pos::new(1, 0),
            Direction::West => Pos::new(0, -1),
        }
    }

    pub fn turn_right(self) -> Self {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    pub fn turn_left(self) -> Self {
        match self {
            Direction::North => Direction::West,
            Direction::West => Direction::South,
            Direction::South => Direction::East,
            Direction::East => Direction::North,
        }
    }

    pub fn opposite(self) -> Self {
        self.turn_right().turn_right()
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::North | Direction::South)
    }

    /// Index into [`Direction::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Parse `^>v<`, `UDLR` or `NESW`
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'^' | b'U' | b'N' => Some(Direction::North),
            b'>' | b'R' | b'E' => Some(Direction::East),
            b'v' | b'D' | b'S' => Some(Direction::South),
            b'<' | b'L' | b'W' => Some(Direction::West),
            _ => None,
        }
    }
}

/// Row-major grid of cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Build a grid from text, mapping each byte through `cell`.
    ///
    /// Blank lines are skipped; all remaining lines must have the same length.
    pub fn parse_with<F>(input: &str, mut cell: F) -> Result<Self, ParseError>
    where
        F: FnMut(u8) -> Option<T>,
    {
        let mut width = None;
        let mut height = 0;
        let mut cells = Vec::with_capacity(input.len());

        for (line_idx, line) in input.lines().enumerate() {
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            match width {
                None => width = Some(line.len()),
                Some(w) if w != line.len() => {
                    return Err(ParseError::at_line(
                        line_idx + 1,
                        format!("expected {w} columns, found {}", line.len()),
                    ));
                }
                Some(_) => {}
            }
            for (col, b) in line.bytes().enumerate() {
                let value = cell(b).ok_or_else(|| {
                    ParseError::at_line(
                        line_idx + 1,
                        format!("unexpected {:?} at column {}", b as char, col + 1),
                    )
                })?;
                cells.push(value);
            }
            height += 1;
        }

        let width = width.ok_or_else(|| ParseError::MissingData("empty grid".into()))?;
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(Pos) -> T) -> Self {
        let cells = (0..height)
            .flat_map(|row| (0..width).map(move |col| (row, col)))
            .map(|(row, col)| f(Pos::new(row as i64, col as i64)))
            .collect();
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.row >= 0
            && pos.col >= 0
            && (pos.row as usize) < self.height
            && (pos.col as usize) < self.width
    }

    fn offset(&self, pos: Pos) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.row as usize * self.width + pos.col as usize)
    }

    pub fn get(&self, pos: Pos) -> Option<&T> {
        self.offset(pos).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, pos: Pos) -> Option<&mut T> {
        self.offset(pos).map(|i| &mut self.cells[i])
    }

    /// Read with the grid tiled infinitely in every direction
    pub fn get_wrapping(&self, pos: Pos) -> &T {
        let row = pos.row.rem_euclid(self.height as i64) as usize;
        let col = pos.col.rem_euclid(self.width as i64) as usize;
        &self.cells[row * self.width + col]
    }

    /// Every position with its cell, row by row
    pub fn iter(&self) -> impl Iterator<Item = (Pos, &T)> {
        let width = self.width;
        self.cells.iter().enumerate().map(move |(i, v)| {
            (Pos::new((i / width) as i64, (i % width) as i64), v)
        })
    }

    /// In-bounds orthogonal neighbours of `pos`
    pub fn neighbors(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        pos.neighbors().filter(|p| self.contains(*p))
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(f).collect(),
        }
    }
}

impl<T: PartialEq> Grid<T> {
    /// First position holding `value`, scanning row by row
    pub fn find(&self, value: &T) -> Option<Pos> {
        self.iter().find(|(_, v)| *v == value).map(|(p, _)| p)
    }
}

impl<T> Index<Pos> for Grid<T> {
    type Output = T;

    fn index(&self, pos: Pos) -> &T {
        match self.get(pos) {
            Some(v) => v,
            None => panic!("{pos} outside {}x{} grid", self.height, self.width),
        }
    }
}

impl<T> IndexMut<Pos> for Grid<T> {
    fn index_mut(&mut self, pos: Pos) -> &mut T {
        let (height, width) = (self.height, self.width);
        match self.get_mut(pos) {
            Some(v) => v,
            None => panic!("{pos} outside {height}x{width} grid"),
        }
    }
}

impl fmt::Display for Grid<u8> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            writeln!(f, "{}", String::from_utf8_lossy(row))?;
        }
        Ok(())
    }
}
