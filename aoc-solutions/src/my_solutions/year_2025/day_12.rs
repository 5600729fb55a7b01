use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2025, day = 12, tags = ["2025", "easy", "packing"])]
pub struct Solver;

/// Presents fit inside a box of this side
const PRESENT_SIDE: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fit {
    /// Every present gets its own 3x3 block
    Always,
    /// The presents cover more cells than the region has
    Never,
    Undecided,
}

#[derive(Debug)]
pub struct Region {
    width: u64,
    length: u64,
    /// Count wanted of each present shape, by shape index
    wanted: Vec<u64>,
}

#[derive(Debug)]
pub struct Farm {
    /// Filled cells of each present shape
    areas: Vec<u64>,
    regions: Vec<Region>,
}

impl AocParser for Solver {
    type SharedData<'a> = Farm;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut areas: Vec<u64> = Vec::new();
        let mut regions = Vec::new();
        let mut in_shape = false;

        for (idx, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                in_shape = false;
            } else if let Some((size, wanted)) = line.split_once(':').filter(|(size, _)| size.contains('x')) {
                let (width, length) = size
                    .split_once('x')
                    .and_then(|(w, l)| Some((w.trim().parse().ok()?, l.trim().parse().ok()?)))
                    .ok_or_else(|| ParseError::at_line(idx + 1, format!("bad region size {size:?}")))?;
                let wanted = wanted
                    .split_whitespace()
                    .map(str::parse)
                    .collect::<Result<_, _>>()
                    .map_err(|e| ParseError::at_line(idx + 1, e))?;
                regions.push(Region { width, length, wanted });
            } else if let Some(id) = line.strip_suffix(':') {
                let id: usize = id.parse().map_err(|e| ParseError::at_line(idx + 1, e))?;
                if id != areas.len() {
                    return Err(ParseError::at_line(idx + 1, format!("expected shape {}", areas.len())));
                }
                areas.push(0);
                in_shape = true;
            } else if in_shape {
                let filled = line
                    .bytes()
                    .map(|b| match b {
                        b'#' => Ok(1),
                        b'.' => Ok(0),
                        other => Err(ParseError::at_line(idx + 1, format!("unexpected {:?}", other as char))),
                    })
                    .sum::<Result<u64, _>>()?;
                if let Some(area) = areas.last_mut() {
                    *area += filled;
                }
            } else {
                return Err(ParseError::at_line(idx + 1, "expected a shape header or a region"));
            }
        }

        if let Some(region) = regions.iter().find(|r| r.wanted.len() > areas.len()) {
            return Err(ParseError::InvalidFormat(format!(
                "region {}x{} wants {} shapes, only {} defined",
                region.width,
                region.length,
                region.wanted.len(),
                areas.len()
            )));
        }
        if regions.is_empty() {
            return Err(ParseError::MissingData("regions".into()));
        }
        Ok(Farm { areas, regions })
    }
}

/// Decide a region without searching placements, when the counts alone settle it
pub fn classify(region: &Region, areas: &[u64]) -> Fit {
    let presents: u64 = region.wanted.iter().sum();
    let blocks = (region.width / PRESENT_SIDE) * (region.length / PRESENT_SIDE);
    let covered: u64 = region.wanted.iter().zip(areas).map(|(n, area)| n * area).sum();
    if presents <= blocks {
        Fit::Always
    } else if covered > region.width * region.length {
        Fit::Never
    } else {
        Fit::Undecided
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut fitting = 0;
        for region in &shared.regions {
            match classify(region, &shared.areas) {
                Fit::Always => fitting += 1,
                Fit::Never => {}
                Fit::Undecided => {
                    return Err(SolveError::failed(format!(
                        "region {}x{} needs a placement search",
                        region.width, region.length
                    )));
                }
            }
        }
        log::debug!("{fitting} of {} regions fit", shared.regions.len());
        Ok(fitting.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SHAPES: &str = "\
0:
###
##.
##.

1:
###
.#.
###
";

    fn farm(regions: &str) -> Farm {
        Solver::parse(&format!("{SHAPES}\n{regions}")).unwrap()
    }

    #[test]
    fn test_counts_regions_with_room() {
        let mut shared = farm("6x3: 1 1\n9x9: 4 5\n4x4: 3 0\n2x3: 0 1\n");
        assert_eq!(shared.areas, [7, 7]);
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "2");
    }

    #[test]
    fn test_classify() {
        let shared = farm("5x5: 1 1\n5x5: 2 2\n4x4: 0 2\n");
        let fits: Vec<Fit> = shared.regions.iter().map(|r| classify(r, &shared.areas)).collect();
        assert_eq!(fits, [Fit::Undecided, Fit::Never, Fit::Undecided]);
    }

    #[test]
    fn test_undecided_region_is_an_error() {
        let mut shared = farm("4x4: 2 0\n");
        assert!(Solver::solve_part(&mut shared, 1).is_err());
    }

    #[test]
    fn test_rejects_unknown_shape_counts() {
        assert!(Solver::parse(&format!("{SHAPES}\n6x6: 1 1 1\n")).is_err());
        assert!(Solver::parse("0:\n#x#\n\n3x3: 1\n").is_err());
    }
}
