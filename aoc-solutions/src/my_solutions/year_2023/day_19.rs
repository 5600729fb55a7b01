use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rustc_hash::FxHashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 19, tags = ["2023", "medium", "ranges"])]
pub struct Solver;

const START: &str = "in";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    Accept,
    Reject,
    Workflow(&'a str),
}

impl<'a> Target<'a> {
    fn parse(name: &'a str) -> Self {
        match name {
            "A" => Target::Accept,
            "R" => Target::Reject,
            other => Target::Workflow(other),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Condition {
    /// Index into `xmas`
    category: usize,
    less_than: bool,
    value: u32,
}

#[derive(Debug)]
pub struct Workflow<'a> {
    rules: Vec<(Condition, Target<'a>)>,
    fallback: Target<'a>,
}

#[derive(Debug)]
pub struct System<'a> {
    workflows: FxHashMap<&'a str, Workflow<'a>>,
    parts: Vec<[u32; 4]>,
}

fn category(name: &str) -> Option<usize> {
    "xmas".find(name).filter(|_| name.len() == 1)
}

fn parse_workflow(line: &str) -> Option<(&str, Workflow<'_>)> {
    let (name, body) = line.strip_suffix('}')?.split_once('{')?;
    let mut rules = Vec::new();
    let mut fallback = None;
    for rule in body.split(',') {
        if fallback.is_some() {
            return None;
        }
        match rule.split_once(':') {
            Some((cond, target)) => {
                let split = cond.find(['<', '>'])?;
                let condition = Condition {
                    category: category(&cond[..split])?,
                    less_than: cond.as_bytes()[split] == b'<',
                    value: cond[split + 1..].parse().ok()?,
                };
                rules.push((condition, Target::parse(target)));
            }
            None => fallback = Some(Target::parse(rule)),
        }
    }
    Some((
        name,
        Workflow {
            rules,
            fallback: fallback?,
        },
    ))
}

fn parse_part(line: &str) -> Option<[u32; 4]> {
    let body = line.strip_prefix('{')?.strip_suffix('}')?;
    let mut ratings = [None; 4];
    for field in body.split(',') {
        let (name, value) = field.split_once('=')?;
        ratings[category(name)?] = Some(value.parse().ok()?);
    }
    Some([ratings[0]?, ratings[1]?, ratings[2]?, ratings[3]?])
}

impl AocParser for Solver {
    type SharedData<'a> = System<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut workflows = FxHashMap::default();
        let mut parts = Vec::new();
        for (idx, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('{') {
                let part = parse_part(line)
                    .ok_or_else(|| ParseError::at_line(idx + 1, format!("bad part {line:?}")))?;
                parts.push(part);
            } else {
                let (name, workflow) = parse_workflow(line)
                    .ok_or_else(|| ParseError::at_line(idx + 1, format!("bad workflow {line:?}")))?;
                workflows.insert(name, workflow);
            }
        }
        if !workflows.contains_key(START) {
            return Err(ParseError::MissingData(format!("workflow {START:?}")));
        }
        Ok(System { workflows, parts })
    }
}

impl System<'_> {
    fn workflow(&self, name: &str) -> Result<&Workflow<'_>, SolveError> {
        self.workflows
            .get(name)
            .ok_or_else(|| SolveError::failed(format!("unknown workflow {name:?}")))
    }

    fn accepts(&self, part: &[u32; 4]) -> Result<bool, SolveError> {
        let mut current = START;
        // Each workflow can be visited at most once on an acyclic system
        for _ in 0..=self.workflows.len() {
            let workflow = self.workflow(current)?;
            let target = workflow
                .rules
                .iter()
                .find(|(c, _)| {
                    let rating = part[c.category];
                    if c.less_than { rating < c.value } else { rating > c.value }
                })
                .map_or(workflow.fallback, |&(_, t)| t);
            match target {
                Target::Accept => return Ok(true),
                Target::Reject => return Ok(false),
                Target::Workflow(next) => current = next,
            }
        }
        Err(SolveError::failed("workflows loop"))
    }

    /// Number of rating combinations inside `ranges` (half-open per category)
    /// that end up accepted starting from `target`
    fn count_accepted(
        &self,
        target: Target<'_>,
        mut ranges: [(u32, u32); 4],
        depth: usize,
    ) -> Result<u64, SolveError> {
        if depth > self.workflows.len() {
            return Err(SolveError::failed("workflows loop"));
        }
        let name = match target {
            Target::Accept => {
                return Ok(ranges.iter().map(|&(lo, hi)| u64::from(hi - lo)).product());
            }
            Target::Reject => return Ok(0),
            Target::Workflow(name) => name,
        };

        let workflow = self.workflow(name)?;
        let mut total = 0;
        for &(cond, next) in &workflow.rules {
            let (lo, hi) = ranges[cond.category];
            // Split into the part matching the condition and the rest
            let (matched, rest) = if cond.less_than {
                ((lo, hi.min(cond.value)), (lo.max(cond.value), hi))
            } else {
                ((lo.max(cond.value + 1), hi), (lo, hi.min(cond.value + 1)))
            };
            if matched.0 < matched.1 {
                let mut sub = ranges;
                sub[cond.category] = matched;
                total += self.count_accepted(next, sub, depth + 1)?;
            }
            if rest.0 >= rest.1 {
                return Ok(total);
            }
            ranges[cond.category] = rest;
        }
        Ok(total + self.count_accepted(workflow.fallback, ranges, depth + 1)?)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut total = 0u64;
        for part in &shared.parts {
            if shared.accepts(part)? {
                total += part.iter().map(|&r| u64::from(r)).sum::<u64>();
            }
        }
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let combinations = shared.count_accepted(Target::Workflow(START), [(1, 4001); 4], 0)?;
        Ok(combinations.to_string())
    }
}
