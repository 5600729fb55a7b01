use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 17, tags = ["2021", "medium", "simulation"])]
pub struct Solver;

#[derive(Debug, Clone, Copy)]
pub struct Target {
    x_min: i64,
    x_max: i64,
    y_min: i64,
    y_max: i64,
}

#[derive(Debug)]
pub struct SharedData {
    target: Target,
    /// Peak height of every initial velocity that lands in the target
    hits: Option<Vec<i64>>,
}

fn parse_range(text: &str, axis: char) -> Option<(i64, i64)> {
    let (lo, hi) = text.trim().strip_prefix(axis)?.strip_prefix('=')?.split_once("..")?;
    let (lo, hi): (i64, i64) = (lo.parse().ok()?, hi.parse().ok()?);
    Some((lo.min(hi), lo.max(hi)))
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let bad = || {
            ParseError::InvalidFormat(format!(
                "expected `target area: x=A..B, y=C..D`, got {:?}",
                input.trim()
            ))
        };
        let ranges = input.trim().strip_prefix("target area:").ok_or_else(bad)?;
        let (x, y) = ranges.split_once(',').ok_or_else(bad)?;
        let (x_min, x_max) = parse_range(x, 'x').ok_or_else(bad)?;
        let (y_min, y_max) = parse_range(y, 'y').ok_or_else(bad)?;
        if x_min <= 0 || y_max >= 0 {
            return Err(ParseError::Other(
                "target must lie right of and below the launcher".into(),
            ));
        }
        Ok(SharedData {
            target: Target {
                x_min,
                x_max,
                y_min,
                y_max,
            },
            hits: None,
        })
    }
}

/// Highest y reached if the probe launched at `(vx, vy)` lands in `target`
fn peak_if_hit(target: &Target, mut vx: i64, mut vy: i64) -> Option<i64> {
    let (mut x, mut y, mut peak) = (0, 0, 0);
    while x <= target.x_max && y >= target.y_min {
        x += vx;
        y += vy;
        peak = peak.max(y);
        vx -= vx.signum();
        vy -= 1;
        if (target.x_min..=target.x_max).contains(&x) && (target.y_min..=target.y_max).contains(&y) {
            return Some(peak);
        }
    }
    None
}

fn hits(shared: &mut SharedData) -> &[i64] {
    let target = shared.target;
    let hits = shared.hits.get_or_insert_with(|| {
        // vx beyond x_max overshoots in one step; |vy| beyond |y_min| skips the target
        (1..=target.x_max)
            .flat_map(|vx| (target.y_min..=-target.y_min).map(move |vy| (vx, vy)))
            .filter_map(|(vx, vy)| peak_if_hit(&target, vx, vy))
            .collect()
    });
    log::debug!("{} launch velocities hit the target", hits.len());
    hits
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        hits(shared)
            .iter()
            .max()
            .map(|peak| peak.to_string())
            .ok_or_else(|| SolveError::failed("no velocity reaches the target"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(hits(shared).len().to_string())
    }
}
