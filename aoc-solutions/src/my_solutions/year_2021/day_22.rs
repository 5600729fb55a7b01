use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 22, tags = ["2021", "hard", "geometry"])]
pub struct Solver;

/// Inclusive axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cuboid {
    min: [i64; 3],
    max: [i64; 3],
}

impl Cuboid {
    fn intersect(&self, other: &Cuboid) -> Option<Cuboid> {
        let mut min = [0; 3];
        let mut max = [0; 3];
        for axis in 0..3 {
            min[axis] = self.min[axis].max(other.min[axis]);
            max[axis] = self.max[axis].min(other.max[axis]);
            if min[axis] > max[axis] {
                return None;
            }
        }
        Some(Cuboid { min, max })
    }

    fn volume(&self) -> i64 {
        (0..3).map(|a| self.max[a] - self.min[a] + 1).product()
    }

    fn within(&self, limit: i64) -> bool {
        self.min.iter().all(|&v| v >= -limit) && self.max.iter().all(|&v| v <= limit)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Step {
    on: bool,
    cuboid: Cuboid,
}

fn parse_step(line: &str) -> Option<Step> {
    let (state, ranges) = line.split_once(' ')?;
    let on = match state {
        "on" => true,
        "off" => false,
        _ => return None,
    };
    let mut min = [0; 3];
    let mut max = [0; 3];
    let mut axes = ranges.split(',');
    for (axis, name) in ["x=", "y=", "z="].into_iter().enumerate() {
        let (lo, hi) = axes.next()?.strip_prefix(name)?.split_once("..")?;
        let (lo, hi): (i64, i64) = (lo.parse().ok()?, hi.parse().ok()?);
        min[axis] = lo.min(hi);
        max[axis] = lo.max(hi);
    }
    axes.next().is_none().then_some(Step {
        on,
        cuboid: Cuboid { min, max },
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Step>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                parse_step(line.trim())
                    .ok_or_else(|| ParseError::at_line(idx + 1, format!("bad step {line:?}")))
            })
            .collect()
    }
}

/// Number of lit cubes after every step.
///
/// Keeps a list of signed cuboids whose weighted volumes sum to the lit
/// count: each new cuboid cancels its overlap with everything so far, and
/// `on` cuboids are then added themselves.
pub fn lit_after(steps: impl IntoIterator<Item = Step>) -> i64 {
    let mut signed: Vec<(Cuboid, i64)> = Vec::new();
    for step in steps {
        let overlaps: Vec<(Cuboid, i64)> = signed
            .iter()
            .filter_map(|(c, sign)| c.intersect(&step.cuboid).map(|i| (i, -sign)))
            .collect();
        signed.extend(overlaps);
        if step.on {
            signed.push((step.cuboid, 1));
        }
    }
    log::trace!("{} signed cuboids", signed.len());
    signed.iter().map(|(c, sign)| c.volume() * sign).sum()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let steps = shared.iter().copied().filter(|s| s.cuboid.within(50));
        Ok(lit_after(steps).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(lit_after(shared.iter().copied()).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SMALL: &str = "\
on x=10..12,y=10..12,z=10..12
on x=11..13,y=11..13,z=11..13
off x=9..11,y=9..11,z=9..11
on x=10..10,y=10..10,z=10..10
";

    #[test]
    fn test_small_example() {
        let mut shared = Solver::parse(SMALL).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "39");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "39");
    }

    #[test]
    fn test_outside_init_region_is_ignored_in_part_one() {
        let mut shared =
            Solver::parse("on x=-5..5,y=0..0,z=0..0\non x=40..60,y=0..0,z=0..0\n").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "11");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "32");
    }

    #[test]
    fn test_bad_step() {
        assert!(Solver::parse("toggle x=1..2,y=1..2,z=1..2").is_err());
        assert!(Solver::parse("on x=1..2,y=1..2").is_err());
    }
}
