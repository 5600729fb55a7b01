use std::collections::VecDeque;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rustc_hash::FxHashMap;

use crate::utils::math::lcm;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 20, tags = ["2023", "hard", "simulation", "cycles"])]
pub struct Solver;

const MAX_PRESSES: u64 = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Broadcaster,
    FlipFlop,
    Conjunction,
    /// Named only as a destination
    Sink,
}

#[derive(Debug, Clone)]
struct Module {
    kind: Kind,
    /// `(destination, slot in the destination's input list)`
    outputs: Vec<(usize, usize)>,
    inputs: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct Network<'a> {
    names: Vec<&'a str>,
    modules: Vec<Module>,
    broadcaster: usize,
}

/// Mutable state of every module between button presses
struct State {
    flip_on: Vec<bool>,
    /// Most recent pulse from each input, for conjunctions
    memory: Vec<Vec<bool>>,
}

impl Network<'_> {
    fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|&n| n == name)
    }

    fn initial_state(&self) -> State {
        State {
            flip_on: vec![false; self.modules.len()],
            memory: self
                .modules
                .iter()
                .map(|m| vec![false; m.inputs.len()])
                .collect(),
        }
    }

    /// Push the button once, reporting every pulse `(from, to, high)`
    fn press(&self, state: &mut State, mut on_pulse: impl FnMut(usize, usize, bool)) {
        let mut queue = VecDeque::new();
        // The button itself sends a low pulse to the broadcaster
        on_pulse(usize::MAX, self.broadcaster, false);
        queue.push_back((self.broadcaster, usize::MAX, false));

        while let Some((to, slot, high)) = queue.pop_front() {
            let module = &self.modules[to];
            let send = match module.kind {
                Kind::Broadcaster => Some(high),
                Kind::FlipFlop if high => None,
                Kind::FlipFlop => {
                    state.flip_on[to] = !state.flip_on[to];
                    Some(state.flip_on[to])
                }
                Kind::Conjunction => {
                    state.memory[to][slot] = high;
                    Some(!state.memory[to].iter().all(|&h| h))
                }
                Kind::Sink => None,
            };
            if let Some(pulse) = send {
                for &(dest, dest_slot) in &module.outputs {
                    on_pulse(to, dest, pulse);
                    queue.push_back((dest, dest_slot, pulse));
                }
            }
        }
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Network<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut names: Vec<&str> = Vec::new();
        let mut index: FxHashMap<&str, usize> = FxHashMap::default();
        let mut intern = |name: &'a str, names: &mut Vec<&'a str>| {
            *index.entry(name).or_insert_with(|| {
                names.push(name);
                names.len() - 1
            })
        };

        let mut declared: Vec<(usize, Kind, Vec<usize>)> = Vec::new();
        for (idx, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (source, dests) = line
                .split_once(" -> ")
                .ok_or_else(|| ParseError::at_line(idx + 1, "expected `name -> a, b`"))?;
            let (kind, name) = match source.as_bytes().first() {
                Some(b'%') => (Kind::FlipFlop, &source[1..]),
                Some(b'&') => (Kind::Conjunction, &source[1..]),
                _ if source == "broadcaster" => (Kind::Broadcaster, source),
                _ => {
                    return Err(ParseError::at_line(
                        idx + 1,
                        format!("unknown module type {source:?}"),
                    ));
                }
            };
            let id = intern(name, &mut names);
            let outputs = dests
                .split(',')
                .map(|d| intern(d.trim(), &mut names))
                .collect();
            declared.push((id, kind, outputs));
        }

        let mut modules = vec![
            Module {
                kind: Kind::Sink,
                outputs: Vec::new(),
                inputs: Vec::new(),
            };
            names.len()
        ];
        for (id, kind, outputs) in declared {
            if modules[id].kind != Kind::Sink {
                return Err(ParseError::InvalidFormat(format!(
                    "module {:?} declared twice",
                    names[id]
                )));
            }
            modules[id].kind = kind;
            for dest in outputs {
                let slot = modules[dest].inputs.len();
                modules[dest].inputs.push(id);
                modules[id].outputs.push((dest, slot));
            }
        }

        let broadcaster = modules
            .iter()
            .position(|m| m.kind == Kind::Broadcaster)
            .ok_or_else(|| ParseError::MissingData("broadcaster".into()))?;
        Ok(Network {
            names,
            modules,
            broadcaster,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut state = shared.initial_state();
        let (mut low, mut high) = (0u64, 0u64);
        for _ in 0..1000 {
            shared.press(&mut state, |_, _, pulse| {
                if pulse {
                    high += 1;
                } else {
                    low += 1;
                }
            });
        }
        Ok((low * high).to_string())
    }
}

impl PartSolver<2> for Solver {
    /// `rx` hangs off a single conjunction whose inputs each fire high on a
    /// fixed cycle; `rx` gets its low pulse when all cycles line up.
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let rx = shared
            .index_of("rx")
            .ok_or_else(|| SolveError::failed("no rx module"))?;
        let &[feeder] = shared.modules[rx].inputs.as_slice() else {
            return Err(SolveError::failed("rx must have exactly one input"));
        };
        if shared.modules[feeder].kind != Kind::Conjunction {
            return Err(SolveError::failed("rx is not fed by a conjunction"));
        }

        let sources = &shared.modules[feeder].inputs;
        let mut first_high: Vec<Option<u64>> = vec![None; sources.len()];
        let mut state = shared.initial_state();
        for presses in 1..=MAX_PRESSES {
            shared.press(&mut state, |from, to, pulse| {
                if to == feeder && pulse {
                    if let Some(i) = sources.iter().position(|&s| s == from) {
                        first_high[i].get_or_insert(presses);
                    }
                }
            });
            if first_high.iter().all(Option::is_some) {
                let cycles: Vec<u64> = first_high.iter().flatten().copied().collect();
                log::debug!("rx feeder cycles: {cycles:?}");
                return Ok(cycles.into_iter().fold(1, lcm).to_string());
            }
        }
        Err(SolveError::failed(format!(
            "no cycle found within {MAX_PRESSES} presses"
        )))
    }
}
