use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rustc_hash::FxHashMap;

use crate::utils::grid::{Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 20, tags = ["2020", "hard", "grid", "jigsaw"])]
pub struct Solver;

const SEA_MONSTER: [&str; 3] = [
    "                  # ",
    "#    ##    ##    ###",
    " #  #  #  #  #  #   ",
];

#[derive(Debug, Clone)]
pub struct Tile {
    id: u64,
    pixels: Grid<bool>,
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Tile>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let input = input.replace("\r\n", "\n");
        let mut tiles = Vec::new();
        for block in input.split("\n\n").filter(|b| !b.trim().is_empty()) {
            let (header, body) = block
                .trim()
                .split_once('\n')
                .ok_or_else(|| ParseError::MissingData("tile pixels".into()))?;
            let id = header
                .trim()
                .strip_prefix("Tile ")
                .and_then(|rest| rest.strip_suffix(':'))
                .and_then(|id| id.parse().ok())
                .ok_or_else(|| ParseError::InvalidFormat(format!("bad tile header {header:?}")))?;
            let pixels = Grid::parse_with(body, |b| match b {
                b'#' => Some(true),
                b'.' => Some(false),
                _ => None,
            })?;
            let size = tiles.first().map_or(pixels.width(), |t: &Tile| t.pixels.width());
            if pixels.width() != pixels.height() || pixels.width() != size || !(3..=32).contains(&size) {
                return Err(ParseError::InvalidFormat(format!(
                    "tile {id} is {}x{}, expected a square of side {size} (3 to 32)",
                    pixels.width(),
                    pixels.height()
                )));
            }
            tiles.push(Tile { id, pixels });
        }
        if tiles.is_empty() {
            return Err(ParseError::MissingData("tiles".into()));
        }
        Ok(tiles)
    }
}

fn rotate_clockwise(grid: &Grid<bool>) -> Grid<bool> {
    let n = grid.height() as i64;
    Grid::from_fn(grid.height(), grid.width(), |p| grid[Pos::new(n - 1 - p.col, p.row)])
}

fn flip(grid: &Grid<bool>) -> Grid<bool> {
    let n = grid.width() as i64;
    Grid::from_fn(grid.width(), grid.height(), |p| grid[Pos::new(p.row, n - 1 - p.col)])
}

/// The eight rotations and reflections of a square grid
fn orientations(grid: &Grid<bool>) -> Vec<Grid<bool>> {
    let mut all = Vec::with_capacity(8);
    for start in [grid.clone(), flip(grid)] {
        let mut current = start;
        for _ in 0..4 {
            let next = rotate_clockwise(&current);
            all.push(current);
            current = next;
        }
    }
    all
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

/// Pixels along one side as bits, read left to right or top to bottom
fn edge(grid: &Grid<bool>, side: Side) -> u32 {
    let n = grid.width() as i64;
    (0..n)
        .map(|i| match side {
            Side::Top => Pos::new(0, i),
            Side::Bottom => Pos::new(n - 1, i),
            Side::Left => Pos::new(i, 0),
            Side::Right => Pos::new(i, n - 1),
        })
        .fold(0, |bits, p| bits << 1 | u32::from(grid[p]))
}

/// The same edge whichever way it is read
fn canonical(bits: u32, len: usize) -> u32 {
    let reversed = bits.reverse_bits() >> (32 - len);
    bits.min(reversed)
}

/// How many tiles carry each edge, in either direction
fn edge_counts(tiles: &[Tile]) -> FxHashMap<u32, usize> {
    let mut counts = FxHashMap::default();
    for tile in tiles {
        let len = tile.pixels.width();
        for side in [Side::Top, Side::Right, Side::Bottom, Side::Left] {
            *counts.entry(canonical(edge(&tile.pixels, side), len)).or_default() += 1;
        }
    }
    counts
}

/// Tiles with exactly two edges no other tile shares
fn corners(tiles: &[Tile]) -> Vec<&Tile> {
    let counts = edge_counts(tiles);
    tiles
        .iter()
        .filter(|tile| {
            let len = tile.pixels.width();
            [Side::Top, Side::Right, Side::Bottom, Side::Left]
                .into_iter()
                .filter(|&side| counts[&canonical(edge(&tile.pixels, side), len)] == 1)
                .count()
                == 2
        })
        .collect()
}

/// Lay out every tile, then join their interiors with borders removed
fn assemble(tiles: &[Tile]) -> Option<Grid<bool>> {
    let side = (1..=tiles.len()).find(|s| s * s >= tiles.len())?;
    if side * side != tiles.len() {
        return None;
    }
    let counts = edge_counts(tiles);
    let len = tiles[0].pixels.width();
    let unmatched = |bits: u32| counts.get(&canonical(bits, len)) == Some(&1);

    let first = corners(tiles).into_iter().next()?;
    let start = orientations(&first.pixels)
        .into_iter()
        .find(|g| unmatched(edge(g, Side::Top)) && unmatched(edge(g, Side::Left)))?;

    let mut used = vec![false; tiles.len()];
    used[tiles.iter().position(|t| t.id == first.id)?] = true;
    let mut placed: Vec<Grid<bool>> = vec![start];

    for slot in 1..side * side {
        let (row, col) = (slot / side, slot % side);
        let fits = |g: &Grid<bool>| {
            if col > 0 {
                edge(g, Side::Left) == edge(&placed[slot - 1], Side::Right)
            } else {
                edge(g, Side::Top) == edge(&placed[slot - side], Side::Bottom)
            }
        };
        let (index, grid) = tiles.iter().enumerate().filter(|&(i, _)| !used[i]).find_map(|(i, tile)| {
            orientations(&tile.pixels)
                .into_iter()
                .find(|g| fits(g))
                .map(|g| (i, g))
        })?;
        log::trace!("tile {} at ({row}, {col})", tiles[index].id);
        used[index] = true;
        placed.push(grid);
    }

    let inner = len - 2;
    Some(Grid::from_fn(side * inner, side * inner, |p| {
        let (row, col) = (p.row as usize, p.col as usize);
        let tile = &placed[(row / inner) * side + col / inner];
        tile[Pos::new((row % inner + 1) as i64, (col % inner + 1) as i64)]
    }))
}

/// Offsets of the monster's `#` cells
fn monster_cells() -> Vec<Pos> {
    SEA_MONSTER
        .iter()
        .enumerate()
        .flat_map(|(row, line)| {
            line.bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'#')
                .map(move |(col, _)| Pos::new(row as i64, col as i64))
        })
        .collect()
}

/// Lit pixels not part of any sea monster, in the first orientation that
/// shows monsters
pub fn roughness(image: &Grid<bool>) -> Option<usize> {
    let monster = monster_cells();
    let lit = image.iter().filter(|&(_, &on)| on).count();
    orientations(image).into_iter().find_map(|picture| {
        let mut covered = Grid::from_fn(picture.width(), picture.height(), |_| false);
        let mut found = 0;
        for (origin, _) in picture.iter() {
            let fits = monster
                .iter()
                .all(|&cell| picture.get(origin + cell).is_some_and(|&on| on));
            if fits {
                found += 1;
                for &cell in &monster {
                    covered[origin + cell] = true;
                }
            }
        }
        (found > 0).then(|| {
            log::debug!("{found} sea monsters");
            lit - covered.iter().filter(|&(_, &c)| c).count()
        })
    })
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let corners = corners(shared);
        if corners.len() != 4 {
            return Err(SolveError::failed(format!("found {} corner tiles", corners.len())));
        }
        Ok(corners.iter().map(|t| t.id).product::<u64>().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let image = assemble(shared).ok_or_else(|| SolveError::failed("tiles do not fit together"))?;
        roughness(&image)
            .map(|r| r.to_string())
            .ok_or_else(|| SolveError::failed("no sea monsters in any orientation"))
    }
}
