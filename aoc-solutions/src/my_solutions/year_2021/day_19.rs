use std::collections::VecDeque;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use rustc_hash::{FxHashMap, FxHashSet};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 19, tags = ["2021", "hard", "geometry"])]
pub struct Solver;

/// Beacons two scanners must share before their alignment is trusted
const MIN_OVERLAP: usize = 12;

type Point = [i32; 3];

/// An axis permutation with signs, always a proper rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rotation {
    axes: [usize; 3],
    signs: [i32; 3],
}

impl Rotation {
    fn apply(self, p: Point) -> Point {
        [0, 1, 2].map(|i| p[self.axes[i]] * self.signs[i])
    }

    /// The 24 orientations: signed axis permutations with determinant +1
    fn all() -> Vec<Rotation> {
        let mut rotations = Vec::with_capacity(24);
        for axes in (0..3).permutations(3) {
            let axes = [axes[0], axes[1], axes[2]];
            let inversions = (0..3)
                .tuple_combinations()
                .filter(|&(i, j)| axes[i] > axes[j])
                .count();
            let parity = if inversions % 2 == 0 { 1 } else { -1 };
            for bits in 0..8 {
                let signs = [0, 1, 2].map(|i| if bits >> i & 1 == 0 { 1 } else { -1 });
                if parity * signs.iter().product::<i32>() == 1 {
                    rotations.push(Rotation { axes, signs });
                }
            }
        }
        rotations
    }
}

fn add(a: Point, b: Point) -> Point {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

fn sub(a: Point, b: Point) -> Point {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn manhattan(a: Point, b: Point) -> i32 {
    sub(a, b).iter().map(|v| v.abs()).sum()
}

/// Every scanner placed in scanner 0's frame
#[derive(Debug)]
pub struct Map {
    beacons: FxHashSet<Point>,
    scanners: Vec<Point>,
}

#[derive(Debug)]
pub struct Report {
    readings: Vec<Vec<Point>>,
    map: Option<Map>,
}

impl AocParser for Solver {
    type SharedData<'a> = Report;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut readings: Vec<Vec<Point>> = Vec::new();
        for (idx, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with("---") {
                readings.push(Vec::new());
                continue;
            }
            let scanner = readings
                .last_mut()
                .ok_or_else(|| ParseError::at_line(idx + 1, "beacon before any scanner header"))?;
            let coords: Vec<i32> = line
                .split(',')
                .map(|v| v.trim().parse())
                .collect::<Result<_, _>>()
                .map_err(|e| ParseError::at_line(idx + 1, e))?;
            let point = <[i32; 3]>::try_from(coords)
                .map_err(|_| ParseError::at_line(idx + 1, "expected x,y,z"))?;
            scanner.push(point);
        }
        if readings.is_empty() {
            return Err(ParseError::MissingData("scanner reports".into()));
        }
        Ok(Report {
            readings,
            map: None,
        })
    }
}

/// Find the rotation and position of `readings` relative to `known`
/// (already in the shared frame), if at least `MIN_OVERLAP` beacons agree
fn align(known: &[Point], readings: &[Point], rotations: &[Rotation]) -> Option<(Rotation, Point)> {
    rotations.iter().find_map(|&rotation| {
        let rotated: Vec<Point> = readings.iter().map(|&p| rotation.apply(p)).collect();
        let mut offsets: FxHashMap<Point, usize> = FxHashMap::default();
        for &a in known {
            for &b in &rotated {
                let count = offsets.entry(sub(a, b)).or_default();
                *count += 1;
                if *count >= MIN_OVERLAP {
                    return Some((rotation, sub(a, b)));
                }
            }
        }
        None
    })
}

/// Place scanners breadth-first from scanner 0, matching each unplaced one
/// against every newly placed neighbour
fn assemble(readings: &[Vec<Point>]) -> Option<Map> {
    let rotations = Rotation::all();
    let mut placed: Vec<Option<(Point, Vec<Point>)>> = vec![None; readings.len()];
    placed[0] = Some(([0, 0, 0], readings[0].clone()));
    let mut queue = VecDeque::from([0]);

    while let Some(anchor) = queue.pop_front() {
        let Some((_, known)) = placed[anchor].clone() else {
            continue;
        };
        for (i, scanner) in readings.iter().enumerate() {
            if placed[i].is_some() {
                continue;
            }
            if let Some((rotation, position)) = align(&known, scanner, &rotations) {
                log::debug!("scanner {i} at {position:?} via scanner {anchor}");
                let absolute = scanner.iter().map(|&p| add(rotation.apply(p), position)).collect();
                placed[i] = Some((position, absolute));
                queue.push_back(i);
            }
        }
    }

    let placed: Vec<(Point, Vec<Point>)> = placed.into_iter().collect::<Option<_>>()?;
    Some(Map {
        beacons: placed.iter().flat_map(|(_, beacons)| beacons.iter().copied()).collect(),
        scanners: placed.into_iter().map(|(position, _)| position).collect(),
    })
}

fn map(report: &mut Report) -> Result<&Map, SolveError> {
    if report.map.is_none() {
        let map = assemble(&report.readings)
            .ok_or_else(|| SolveError::failed("some scanners share too few beacons"))?;
        report.map = Some(map);
    }
    report
        .map
        .as_ref()
        .ok_or_else(|| SolveError::failed("scanner map missing"))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(map(shared)?.beacons.len().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let map = map(shared)?;
        let widest = map
            .scanners
            .iter()
            .tuple_combinations()
            .map(|(&a, &b)| manhattan(a, b))
            .max()
            .unwrap_or(0);
        Ok(widest.to_string())
    }
}
