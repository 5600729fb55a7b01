use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::math::chinese_remainder;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 13, tags = ["2020", "medium", "math"])]
pub struct Solver;

#[derive(Debug)]
pub struct Schedule {
    earliest: u64,
    /// `(offset in the list, bus id)`; `x` entries are skipped
    buses: Vec<(u64, u64)>,
}

impl AocParser for Solver {
    type SharedData<'a> = Schedule;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut lines = input.lines().map(str::trim).filter(|l| !l.is_empty());
        let earliest = lines
            .next()
            .ok_or_else(|| ParseError::MissingData("earliest timestamp".into()))?
            .parse()
            .map_err(|e| ParseError::at_line(1, e))?;
        let buses = lines
            .next()
            .ok_or_else(|| ParseError::MissingData("bus list".into()))?
            .split(',')
            .enumerate()
            .filter(|(_, id)| *id != "x")
            .map(|(offset, id)| match id.parse::<u64>() {
                Ok(0) => Err(ParseError::at_line(2, "bus id 0")),
                Ok(id) => Ok((offset as u64, id)),
                Err(e) => Err(ParseError::at_line(2, e)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Schedule { earliest, buses })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let earliest = shared.earliest;
        shared
            .buses
            .iter()
            .map(|&(_, id)| ((id - earliest % id) % id, id))
            .min()
            .map(|(wait, id)| (wait * id).to_string())
            .ok_or_else(|| SolveError::failed("no buses in service"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // Bus at offset k departs at t + k, so t ≡ -k (mod id)
        let congruences: Vec<(i128, i128)> = shared
            .buses
            .iter()
            .map(|&(offset, id)| (-(offset as i128), id as i128))
            .collect();
        chinese_remainder(&congruences)
            .map(|(t, _)| t.to_string())
            .ok_or_else(|| SolveError::failed("bus ids are not pairwise coprime"))
    }
}
