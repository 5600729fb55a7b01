use std::collections::VecDeque;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rustc_hash::FxHashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2023, day = 25, tags = ["2023", "hard", "graph"])]
pub struct Solver;

const CUT_SIZE: usize = 3;

#[derive(Debug)]
pub struct Wiring<'a> {
    names: Vec<&'a str>,
    edges: Vec<(usize, usize)>,
    /// Per node: `(neighbour, edge index)`
    adjacency: Vec<Vec<(usize, usize)>>,
}

impl AocParser for Solver {
    type SharedData<'a> = Wiring<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut ids: FxHashMap<&str, usize> = FxHashMap::default();
        let mut names = Vec::new();
        let mut edges = Vec::new();
        let mut id_of = |name: &'a str| {
            *ids.entry(name).or_insert_with(|| {
                names.push(name);
                names.len() - 1
            })
        };

        for (idx, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (from, rest) = line
                .split_once(':')
                .ok_or_else(|| ParseError::at_line(idx + 1, "expected `name: a b c`"))?;
            let from = id_of(from.trim());
            for to in rest.split_whitespace() {
                edges.push((from, id_of(to)));
            }
        }

        let mut adjacency = vec![Vec::new(); names.len()];
        for (e, &(a, b)) in edges.iter().enumerate() {
            adjacency[a].push((b, e));
            adjacency[b].push((a, e));
        }
        Ok(Wiring {
            names,
            edges,
            adjacency,
        })
    }
}

impl Wiring<'_> {
    /// Unit-capacity max flow from `source` to `sink`, stopping once it
    /// exceeds `CUT_SIZE`. When the flow is exactly `CUT_SIZE`, also returns
    /// the nodes still reachable from `source` in the residual graph.
    fn bounded_flow(&self, source: usize, sink: usize) -> (usize, Vec<bool>) {
        // flow[e] along edges[e].0 -> edges[e].1; negative means reversed
        let mut flow = vec![0i8; self.edges.len()];
        let mut paths = 0;
        loop {
            let mut via: Vec<Option<usize>> = vec![None; self.names.len()];
            let mut reached = vec![false; self.names.len()];
            reached[source] = true;
            let mut queue = VecDeque::from([source]);
            while let Some(node) = queue.pop_front() {
                if node == sink {
                    break;
                }
                for &(next, e) in &self.adjacency[node] {
                    let forward = self.edges[e].0 == node;
                    let residual = if forward { 1 - flow[e] } else { 1 + flow[e] };
                    if residual > 0 && !reached[next] {
                        reached[next] = true;
                        via[next] = Some(e);
                        queue.push_back(next);
                    }
                }
            }
            if !reached[sink] {
                return (paths, reached);
            }
            paths += 1;
            if paths > CUT_SIZE {
                return (paths, reached);
            }
            let mut node = sink;
            while let Some(e) = via[node] {
                let (a, b) = self.edges[e];
                if b == node {
                    flow[e] += 1;
                    node = a;
                } else {
                    flow[e] -= 1;
                    node = b;
                }
            }
        }
    }

    /// The two component sizes left after cutting exactly three wires.
    ///
    /// Cuts that isolate a single node are skipped, so the source must have
    /// more than three wires for its own cut not to be the minimum.
    fn split(&self) -> Option<(usize, usize)> {
        let total = self.names.len();
        let source = (0..total).find(|&node| self.adjacency[node].len() > CUT_SIZE)?;
        (0..total).filter(|&sink| sink != source).find_map(|sink| {
            let (flow, side) = self.bounded_flow(source, sink);
            if flow != CUT_SIZE {
                return None;
            }
            let size = side.iter().filter(|&&s| s).count();
            if size < 2 || total - size < 2 {
                return None;
            }
            let cut: Vec<(&str, &str)> = self
                .edges
                .iter()
                .filter(|&&(a, b)| side[a] != side[b])
                .map(|&(a, b)| (self.names[a], self.names[b]))
                .collect();
            log::debug!("cutting {cut:?}");
            Some((size, total - size))
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (a, b) = shared
            .split()
            .ok_or_else(|| SolveError::failed("no three-wire cut splits the graph"))?;
        Ok((a * b).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "\
jqt: rhn xhk nvd
rsh: frs pzl lsr
xhk: hfx
cmg: qnr nvd lhk bvb
rhn: xhk bvb hfx
bvb: xhk hfx
pzl: lsr hfx nvd
qnr: nvd
ntq: jqt hfx bvb xhk
nvd: lhk
lsr: lhk
rzs: qnr cmg lsr rsh
frs: qnr lhk lsr
";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "54");
        assert!(Solver::solve_part(&mut shared, 2).is_err());
    }

    #[test]
    fn test_no_cut_in_a_triangle() {
        let mut shared = Solver::parse("a: b c\nb: c\n").unwrap();
        assert!(Solver::solve_part(&mut shared, 1).is_err());
    }

    #[test]
    fn test_skips_cut_around_a_three_wire_node() {
        let input = "\
z: a1 a2 a3
a1: a2 a3 a4 a5 b1
a2: a3 a4 a5 b2
a3: a4 a5 b3
a4: a5
b1: b2 b3 b4 b5
b2: b3 b4 b5
b3: b4 b5
b4: b5
";
        let mut shared = Solver::parse(input).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "30");
    }
}
