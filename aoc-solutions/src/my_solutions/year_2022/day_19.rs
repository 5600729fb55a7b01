use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 19, tags = ["2022", "hard", "search"])]
pub struct Solver;

const ORE: usize = 0;
const CLAY: usize = 1;
const OBSIDIAN: usize = 2;
const GEODE: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blueprint {
    id: u32,
    /// `costs[robot][resource]` over ore, clay and obsidian
    costs: [[u32; 3]; 4],
}

impl Blueprint {
    fn parse(text: &str) -> Option<Self> {
        let numbers: Vec<u32> = text
            .split(|c: char| !c.is_ascii_digit())
            .filter(|s| !s.is_empty())
            .map(|s| s.parse().ok())
            .collect::<Option<_>>()?;
        let &[id, ore_ore, clay_ore, obsidian_ore, obsidian_clay, geode_ore, geode_obsidian] = &numbers[..] else {
            return None;
        };
        Some(Self {
            id,
            costs: [
                [ore_ore, 0, 0],
                [clay_ore, 0, 0],
                [obsidian_ore, obsidian_clay, 0],
                [geode_ore, 0, geode_obsidian],
            ],
        })
    }

    /// Building more of a robot than any recipe can spend per minute is useless
    fn robot_caps(&self) -> [u32; 3] {
        let mut caps = [0; 3];
        for cost in &self.costs {
            for (cap, &c) in caps.iter_mut().zip(cost) {
                *cap = (*cap).max(c);
            }
        }
        caps
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Blueprint>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let blueprints: Vec<Blueprint> = input
            .split("Blueprint")
            .filter(|chunk| !chunk.trim().is_empty())
            .map(|chunk| {
                Blueprint::parse(chunk)
                    .ok_or_else(|| ParseError::InvalidFormat(format!("bad blueprint {:?}", chunk.trim())))
            })
            .collect::<Result<_, _>>()?;
        if blueprints.is_empty() {
            return Err(ParseError::MissingData("blueprints".into()));
        }
        Ok(blueprints)
    }
}

#[derive(Debug, Clone, Copy)]
struct State {
    time_left: u32,
    robots: [u32; 3],
    stock: [u32; 3],
    geodes: u32,
}

struct Search<'b> {
    blueprint: &'b Blueprint,
    caps: [u32; 3],
    best: u32,
}

impl Search<'_> {
    /// Branch on which robot to build next, waiting as long as needed for it.
    /// Geode robots are credited with everything they will ever crack.
    fn explore(&mut self, state: State) {
        self.best = self.best.max(state.geodes);
        // one more geode robot every remaining minute
        let t = state.time_left;
        if state.geodes + t * t.saturating_sub(1) / 2 <= self.best {
            return;
        }
        for robot in [GEODE, OBSIDIAN, CLAY, ORE] {
            if robot != GEODE && state.robots[robot] >= self.caps[robot] {
                continue;
            }
            let cost = self.blueprint.costs[robot];
            let Some(wait) = (0..3)
                .map(|r| {
                    if cost[r] <= state.stock[r] {
                        Some(0)
                    } else if state.robots[r] == 0 {
                        None
                    } else {
                        Some((cost[r] - state.stock[r]).div_ceil(state.robots[r]))
                    }
                })
                .try_fold(0, |most, w| w.map(|w| most.max(w)))
            else {
                continue;
            };
            if wait + 1 >= state.time_left {
                continue;
            }
            let elapsed = wait + 1;
            let mut next = State {
                time_left: state.time_left - elapsed,
                robots: state.robots,
                stock: [0, 1, 2].map(|r| state.stock[r] + state.robots[r] * elapsed - cost[r]),
                geodes: state.geodes,
            };
            if robot == GEODE {
                next.geodes += next.time_left;
            } else {
                next.robots[robot] += 1;
            }
            self.explore(next);
        }
    }
}

pub fn max_geodes(blueprint: &Blueprint, minutes: u32) -> u32 {
    let mut search = Search {
        blueprint,
        caps: blueprint.robot_caps(),
        best: 0,
    };
    search.explore(State {
        time_left: minutes,
        robots: [1, 0, 0],
        stock: [0; 3],
        geodes: 0,
    });
    log::debug!("blueprint {}: {} geodes in {minutes} minutes", blueprint.id, search.best);
    search.best
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let quality: u32 = shared.iter().map(|b| b.id * max_geodes(b, 24)).sum();
        Ok(quality.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let product: u64 = shared
            .iter()
            .take(3)
            .map(|b| u64::from(max_geodes(b, 32)))
            .product();
        Ok(product.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "\
Blueprint 1:
  Each ore robot costs 4 ore.
  Each clay robot costs 2 ore.
  Each obsidian robot costs 3 ore and 14 clay.
  Each geode robot costs 2 ore and 7 obsidian.

Blueprint 2:
  Each ore robot costs 2 ore.
  Each clay robot costs 3 ore.
  Each obsidian robot costs 3 ore and 8 clay.
  Each geode robot costs 3 ore and 12 obsidian.
";

    #[test]
    fn test_quality_levels() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(max_geodes(&shared[0], 24), 9);
        assert_eq!(max_geodes(&shared[1], 24), 12);
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "33");
    }

    #[test]
    fn test_longer_search() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(max_geodes(&shared[0], 32), 56);
        assert_eq!(max_geodes(&shared[1], 32), 62);
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), (56 * 62).to_string());
    }

    #[test]
    fn test_parses_one_line_form() {
        let line = "Blueprint 7: Each ore robot costs 4 ore. Each clay robot costs 2 ore. \
                    Each obsidian robot costs 3 ore and 14 clay. Each geode robot costs 2 ore and 7 obsidian.";
        let shared = Solver::parse(line).unwrap();
        assert_eq!(shared[0].id, 7);
        assert_eq!(shared[0].costs[OBSIDIAN], [3, 14, 0]);
        assert_eq!(shared[0].robot_caps(), [4, 14, 7]);
    }

    #[test]
    fn test_rejects_incomplete_blueprint() {
        assert!(Solver::parse("Blueprint 1: Each ore robot costs 4 ore.").is_err());
    }
}
