use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use num_bigint::BigInt;
use num_traits::Zero;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 24, tags = ["2023", "hard", "math"])]
pub struct Solver;

const TEST_AREA: (i64, i64) = (200_000_000_000_000, 400_000_000_000_000);
/// Hailstones used to build the linear system for the rock
const SYSTEM_STONES: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hailstone {
    pos: [i64; 3],
    vel: [i64; 3],
}

fn parse_triple(text: &str) -> Option<[i64; 3]> {
    let (x, y, z) = text
        .split(',')
        .map(|v| v.trim().parse().ok())
        .collect_tuple()?;
    Some([x?, y?, z?])
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Hailstone>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                line.split_once('@')
                    .and_then(|(p, v)| {
                        Some(Hailstone {
                            pos: parse_triple(p)?,
                            vel: parse_triple(v)?,
                        })
                    })
                    .ok_or_else(|| ParseError::at_line(idx + 1, format!("bad hailstone {line:?}")))
            })
            .collect()
    }
}

/// Pairs whose future XY paths cross inside `lo..=hi` on both axes
pub fn future_crossings(stones: &[Hailstone], lo: i64, hi: i64) -> usize {
    let (lo, hi) = (i128::from(lo), i128::from(hi));
    stones
        .iter()
        .tuple_combinations()
        .filter(|(a, b)| {
            let [ax, ay, _] = a.pos.map(i128::from);
            let [avx, avy, _] = a.vel.map(i128::from);
            let [bx, by, _] = b.pos.map(i128::from);
            let [bvx, bvy, _] = b.vel.map(i128::from);

            // a.pos + t * a.vel == b.pos + s * b.vel, by Cramer's rule
            let mut det = bvx * avy - avx * bvy;
            if det == 0 {
                return false;
            }
            let (dx, dy) = (bx - ax, by - ay);
            let mut t = bvx * dy - dx * bvy;
            let mut s = avx * dy - dx * avy;
            if det < 0 {
                det = -det;
                t = -t;
                s = -s;
            }
            if t < 0 || s < 0 {
                return false;
            }
            // Crossing point scaled by det
            let x = ax * det + avx * t;
            let y = ay * det + avy * t;
            (lo * det..=hi * det).contains(&x) && (lo * det..=hi * det).contains(&y)
        })
        .count()
}

fn determinant(m: &[Vec<BigInt>]) -> BigInt {
    match m.len() {
        0 => BigInt::from(1),
        1 => m[0][0].clone(),
        n => (0..n)
            .map(|col| {
                if m[0][col].is_zero() {
                    return BigInt::zero();
                }
                let minor: Vec<Vec<BigInt>> = m[1..]
                    .iter()
                    .map(|row| {
                        row.iter()
                            .enumerate()
                            .filter(|&(c, _)| c != col)
                            .map(|(_, v)| v.clone())
                            .collect()
                    })
                    .collect();
                let term = &m[0][col] * determinant(&minor);
                if col % 2 == 0 { term } else { -term }
            })
            .sum(),
    }
}

/// Solve 4 unknowns exactly from any 4 independent equations `row · u = rhs`
fn solve_exact(equations: &[([BigInt; 4], BigInt)]) -> Option<[BigInt; 4]> {
    equations.iter().combinations(4).find_map(|chosen| {
        let matrix: Vec<Vec<BigInt>> = chosen.iter().map(|(row, _)| row.to_vec()).collect();
        let det = determinant(&matrix);
        if det.is_zero() {
            return None;
        }
        let mut solution: [BigInt; 4] = Default::default();
        for (k, value) in solution.iter_mut().enumerate() {
            let mut replaced = matrix.clone();
            for (row, (_, rhs)) in replaced.iter_mut().zip(&chosen) {
                row[k] = rhs.clone();
            }
            let numerator = determinant(&replaced);
            if !(&numerator % &det).is_zero() {
                return None;
            }
            *value = numerator / &det;
        }
        Some(solution)
    })
}

/// Equations in `(P_a, P_b, V_a, V_b)` for the rock on the plane of axes
/// `a` and `b`, one per pair of hailstones.
///
/// Eliminating collision times from `P + t V == p_i + t v_i` leaves
/// `P_b V_a - P_a V_b` common to every hailstone, so subtracting the
/// relations of two hailstones gives a linear equation.
fn plane_equations(stones: &[Hailstone], a: usize, b: usize) -> Vec<([BigInt; 4], BigInt)> {
    stones
        .iter()
        .tuple_combinations()
        .map(|(i, j)| {
            let big = |v: i64| BigInt::from(v);
            let row = [
                big(i.vel[b]) - big(j.vel[b]),
                big(j.vel[a]) - big(i.vel[a]),
                big(j.pos[b]) - big(i.pos[b]),
                big(i.pos[a]) - big(j.pos[a]),
            ];
            let rhs = big(i.pos[a]) * big(i.vel[b]) - big(i.pos[b]) * big(i.vel[a])
                - (big(j.pos[a]) * big(j.vel[b]) - big(j.pos[b]) * big(j.vel[a]));
            (row, rhs)
        })
        .collect()
}

/// Starting position of a rock that hits every hailstone
pub fn rock_position(stones: &[Hailstone]) -> Option<[BigInt; 3]> {
    let sample = &stones[..stones.len().min(SYSTEM_STONES)];
    let [x, y, vx, _] = solve_exact(&plane_equations(sample, 0, 1))?;
    let [x2, z, vx2, _] = solve_exact(&plane_equations(sample, 0, 2))?;
    if x != x2 || vx != vx2 {
        return None;
    }
    log::debug!("rock starts at {x}, {y}, {z} with vx {vx}");
    Some([x, y, z])
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (lo, hi) = TEST_AREA;
        Ok(future_crossings(shared, lo, hi).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let [x, y, z] = rock_position(shared)
            .ok_or_else(|| SolveError::failed("no integer rock trajectory hits every hailstone"))?;
        Ok((x + y + z).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
19, 13, 30 @ -2,  1, -2
18, 19, 22 @ -1, -1, -2
20, 25, 34 @ -2, -2, -4
12, 31, 28 @ -1, -2, -1
20, 19, 15 @  1, -5, -3
";

    #[test]
    fn test_example_crossings() {
        let stones = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(future_crossings(&stones, 7, 27), 2);
    }

    #[test]
    fn test_example_rock() {
        let stones = Solver::parse(EXAMPLE).unwrap();
        let position = rock_position(&stones).unwrap();
        assert_eq!(position, [24, 13, 10].map(BigInt::from));
        let sum: BigInt = position.into_iter().sum();
        assert_eq!(sum.to_string(), "47");
    }

    #[test]
    fn test_determinant() {
        let m: Vec<Vec<BigInt>> = [[2, 0, 1], [1, 3, 2], [1, 1, 1]]
            .iter()
            .map(|row| row.iter().map(|&v| BigInt::from(v)).collect())
            .collect();
        assert_eq!(determinant(&m), BigInt::from(0));
        let m: Vec<Vec<BigInt>> = [[2, 0], [1, 3]]
            .iter()
            .map(|row| row.iter().map(|&v| BigInt::from(v)).collect())
            .collect();
        assert_eq!(determinant(&m), BigInt::from(6));
    }
}
