use std::ops::RangeInclusive;

use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 16, tags = ["2020", "medium", "constraint"])]
pub struct Solver;

const DEPARTURE: &str = "departure";

#[derive(Debug, Clone)]
pub struct Field<'a> {
    name: &'a str,
    ranges: Vec<RangeInclusive<u64>>,
}

impl Field<'_> {
    fn allows(&self, value: u64) -> bool {
        self.ranges.iter().any(|r| r.contains(&value))
    }
}

#[derive(Debug)]
pub struct Notes<'a> {
    fields: Vec<Field<'a>>,
    mine: Vec<u64>,
    nearby: Vec<Vec<u64>>,
}

fn parse_field(line: &str) -> anyhow::Result<Field<'_>> {
    let (name, ranges) = line
        .split_once(": ")
        .ok_or_else(|| anyhow!("expected `name: a-b or c-d`"))?;
    let ranges = ranges
        .split(" or ")
        .map(|range| {
            let (lo, hi) = range
                .split_once('-')
                .ok_or_else(|| anyhow!("bad range {range:?}"))?;
            Ok::<_, anyhow::Error>(lo.parse::<u64>()?..=hi.parse()?)
        })
        .collect::<anyhow::Result<_>>()?;
    Ok(Field { name, ranges })
}

fn parse_ticket(line: &str) -> anyhow::Result<Vec<u64>> {
    line.split(',')
        .map(|v| v.trim().parse().with_context(|| format!("bad ticket value {v:?}")))
        .collect()
}

impl AocParser for Solver {
    type SharedData<'a> = Notes<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut fields = Vec::new();
        let mut mine = None;
        let mut nearby = Vec::new();
        let mut section = 0;

        for (idx, line) in input.lines().enumerate() {
            let line = line.trim();
            let at = |e: anyhow::Error| ParseError::at_line(idx + 1, e);
            match line {
                "" => continue,
                "your ticket:" => section = 1,
                "nearby tickets:" => section = 2,
                _ => match section {
                    0 => fields.push(parse_field(line).map_err(at)?),
                    1 => mine = Some(parse_ticket(line).map_err(at)?),
                    _ => nearby.push(parse_ticket(line).map_err(at)?),
                },
            }
        }

        let mine = mine.ok_or_else(|| ParseError::MissingData("your ticket".into()))?;
        if let Some(ticket) = nearby.iter().chain([&mine]).find(|t| t.len() != fields.len()) {
            return Err(ParseError::InvalidFormat(format!(
                "ticket has {} values for {} fields",
                ticket.len(),
                fields.len()
            )));
        }
        Ok(Notes { fields, mine, nearby })
    }
}

impl Notes<'_> {
    fn invalid_value(&self, ticket: &[u64]) -> Option<u64> {
        ticket
            .iter()
            .copied()
            .find(|&v| !self.fields.iter().any(|f| f.allows(v)))
    }

    /// Column of each field, found by repeatedly settling a field that only
    /// one column still fits
    fn columns(&self) -> Option<Vec<usize>> {
        let valid: Vec<&Vec<u64>> = self
            .nearby
            .iter()
            .filter(|t| self.invalid_value(t).is_none())
            .collect();
        let n = self.fields.len();
        let mut candidates: Vec<Vec<usize>> = self
            .fields
            .iter()
            .map(|field| {
                (0..n)
                    .filter(|&col| valid.iter().all(|t| field.allows(t[col])))
                    .collect()
            })
            .collect();

        let mut column = vec![None; n];
        for _ in 0..n {
            let field = candidates.iter().position(|c| c.len() == 1)?;
            let col = candidates[field][0];
            column[field] = Some(col);
            for c in &mut candidates {
                c.retain(|&other| other != col);
            }
        }
        column.into_iter().collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let error_rate: u64 = shared.nearby.iter().filter_map(|t| shared.invalid_value(t)).sum();
        Ok(error_rate.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let columns = shared
            .columns()
            .ok_or_else(|| SolveError::failed("fields cannot be matched to columns uniquely"))?;
        let departures: Vec<u64> = shared
            .fields
            .iter()
            .zip(&columns)
            .filter(|(field, _)| field.name.starts_with(DEPARTURE))
            .map(|(_, &col)| shared.mine[col])
            .collect();
        if departures.is_empty() {
            return Err(SolveError::failed("no departure fields"));
        }
        Ok(departures.iter().product::<u64>().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "\
class: 1-3 or 5-7
row: 6-11 or 33-44
seat: 13-40 or 45-50

your ticket:
7,1,14

nearby tickets:
7,3,47
40,4,50
55,2,20
38,6,12
";

    const COLUMNS: &str = "\
departure class: 0-1 or 4-19
row: 0-5 or 8-19
departure seat: 0-13 or 16-19

your ticket:
11,12,13

nearby tickets:
3,9,18
15,1,5
5,14,9
";

    #[test]
    fn test_error_rate() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "71");
    }

    #[test]
    fn test_columns() {
        let mut shared = Solver::parse(COLUMNS).unwrap();
        assert_eq!(shared.columns(), Some(vec![1, 0, 2]));
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), (12 * 13).to_string());
    }

    #[test]
    fn test_missing_departures_is_an_error() {
        let input = COLUMNS.replace("departure ", "");
        let mut shared = Solver::parse(&input).unwrap();
        assert!(Solver::solve_part(&mut shared, 2).is_err());
    }

    #[test]
    fn test_rejects_short_ticket() {
        assert!(Solver::parse("a: 1-2 or 3-4\n\nyour ticket:\n1,2\n").is_err());
        assert!(Solver::parse("a: 1-2 or 3-4\n").is_err());
    }
}
