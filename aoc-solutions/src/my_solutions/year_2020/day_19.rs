use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rustc_hash::FxHashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 19, tags = ["2020", "hard", "grammar"])]
pub struct Solver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Literal(u8),
    /// Any one of the sequences of sub-rules
    Either(Vec<Vec<usize>>),
}

pub type Rules = FxHashMap<usize, Rule>;

#[derive(Debug)]
pub struct Satellite<'a> {
    rules: Rules,
    messages: Vec<&'a str>,
}

fn parse_rule(line: &str) -> anyhow::Result<(usize, Rule)> {
    let (id, body) = line.split_once(':').ok_or_else(|| anyhow!("expected `id: body`"))?;
    let id = id.trim().parse().context("bad rule id")?;
    let body = body.trim();
    if let Some(literal) = body.strip_prefix('"').and_then(|b| b.strip_suffix('"')) {
        let &[byte] = literal.as_bytes() else {
            return Err(anyhow!("literal must be one character, got {literal:?}"));
        };
        return Ok((id, Rule::Literal(byte)));
    }
    let options = body
        .split('|')
        .map(|seq| {
            seq.split_whitespace()
                .map(|n| n.parse().with_context(|| format!("bad sub-rule {n:?}")))
                .collect::<anyhow::Result<Vec<usize>>>()
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok((id, Rule::Either(options)))
}

impl AocParser for Solver {
    type SharedData<'a> = Satellite<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut rules = Rules::default();
        let mut messages = Vec::new();
        for (idx, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line.contains(':') {
                let (id, rule) = parse_rule(line).map_err(|e| ParseError::at_line(idx + 1, e))?;
                rules.insert(id, rule);
            } else {
                messages.push(line);
            }
        }
        if !rules.contains_key(&0) {
            return Err(ParseError::MissingData("rule 0".into()));
        }
        Ok(Satellite { rules, messages })
    }
}

/// Every position a match of `rule` starting at `start` could end at.
/// Rules may recurse as long as each recursion consumes input first.
fn match_ends(rules: &Rules, rule: usize, text: &[u8], start: usize) -> Result<Vec<usize>, String> {
    match rules.get(&rule).ok_or_else(|| format!("rule {rule} is not defined"))? {
        Rule::Literal(byte) => Ok(if text.get(start) == Some(byte) { vec![start + 1] } else { vec![] }),
        Rule::Either(options) => {
            let mut ends = Vec::new();
            for sequence in options {
                let mut positions = vec![start];
                for &sub in sequence {
                    let mut next = Vec::new();
                    for pos in positions {
                        if pos < text.len() {
                            next.extend(match_ends(rules, sub, text, pos)?);
                        }
                    }
                    positions = next;
                }
                ends.extend(positions);
            }
            ends.sort_unstable();
            ends.dedup();
            Ok(ends)
        }
    }
}

fn count_matching(rules: &Rules, messages: &[&str]) -> Result<usize, SolveError> {
    let mut count = 0;
    for message in messages {
        let ends = match_ends(rules, 0, message.as_bytes(), 0).map_err(SolveError::failed)?;
        if ends.contains(&message.len()) {
            count += 1;
        }
    }
    Ok(count)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_matching(&shared.rules, &shared.messages)?.to_string())
    }
}

impl PartSolver<2> for Solver {
    /// Rules 8 and 11 become self-referential loops
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if let Some(missing) = [42, 31].into_iter().find(|id| !shared.rules.contains_key(id)) {
            return Err(SolveError::failed(format!("looping rules need rule {missing}")));
        }
        let mut rules = shared.rules.clone();
        rules.insert(8, Rule::Either(vec![vec![42], vec![42, 8]]));
        rules.insert(11, Rule::Either(vec![vec![42, 31], vec![42, 11, 31]]));
        Ok(count_matching(&rules, &shared.messages)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SIMPLE: &str = r#"
0: 4 1 5
1: 2 3 | 3 2
2: 4 4 | 5 5
3: 4 5 | 5 4
4: "a"
5: "b"

ababbb
bababa
abbbab
aaabbb
aaaabbb
"#;

    const LOOPING: &str = r#"
42: 9 14 | 10 1
9: 14 27 | 1 26
10: 23 14 | 28 1
1: "a"
11: 42 31
5: 1 14 | 15 1
19: 14 1 | 14 14
12: 24 14 | 19 1
16: 15 1 | 14 14
31: 14 17 | 1 13
6: 14 14 | 1 14
2: 1 24 | 14 4
0: 8 11
13: 14 3 | 1 12
15: 1 | 14
17: 14 2 | 1 7
23: 25 1 | 22 14
28: 16 1
4: 1 1
20: 14 14 | 1 15
3: 5 14 | 16 1
27: 1 6 | 14 18
14: "b"
21: 14 1 | 1 14
25: 1 1 | 1 14
22: 14 14
8: 42
26: 14 22 | 1 20
18: 15 15
7: 14 5 | 1 21
24: 14 1

abbbbbabbbaaaababbaabbbbabababbbabbbbbbabaaaa
bbabbbbaabaabba
babbbbaabbbbbabbbbbbaabaaabaaa
aaabbbbbbaaaabaababaabababbabaaabbababababaaa
bbbbbbbaaaabbbbaaabbabaaa
bbbababbbbaaaaaaaabbababaaababaabab
ababaaaaaabaaab
ababaaaaabbbaba
baabbaaaabbaaaababbaababb
abbbbabbbbaaaababbbbbbaaaababb
aaaaabbaabaaaaababaa
aaaabbaaaabbaaa
aaaabbaabbaaaaaaabbbabbbaaabbaabaaa
babaaabbbaaabaababbaabababaaab
aabbbbbaabbbaaaaaabbbbbababaaaaabbaaabba
"#;

    #[test]
    fn test_simple_rules() {
        let mut shared = Solver::parse(SIMPLE).unwrap();
        assert_eq!(shared.messages.len(), 5);
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "2");
    }

    #[test]
    fn test_looping_rules() {
        let mut shared = Solver::parse(LOOPING).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "3");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "12");
    }

    #[test]
    fn test_undefined_rule_is_an_error() {
        let mut shared = Solver::parse(SIMPLE).unwrap();
        assert!(Solver::solve_part(&mut shared, 2).is_err());
    }

    #[test]
    fn test_rejects_bad_rules() {
        assert!(Solver::parse("0: \"ab\"\n").is_err());
        assert!(Solver::parse("0: 1 x\n").is_err());
        assert!(Solver::parse("1: \"a\"\n\na\n").is_err());
    }
}
