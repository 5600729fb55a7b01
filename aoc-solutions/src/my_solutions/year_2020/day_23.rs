use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 23, tags = ["2020", "medium", "linked-list", "simulation"])]
pub struct Solver;

const MILLION: u32 = 1_000_000;

impl AocParser for Solver {
    /// Starting cup labels in clockwise order
    type SharedData<'a> = Vec<u32>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let cups: Vec<u32> = input
            .trim()
            .chars()
            .map(|c| {
                c.to_digit(10)
                    .filter(|&d| d > 0)
                    .ok_or_else(|| ParseError::InvalidFormat(format!("bad cup label {c:?}")))
            })
            .collect::<Result<_, _>>()?;
        let mut seen = vec![false; cups.len() + 1];
        for &cup in &cups {
            let slot = seen
                .get_mut(cup as usize)
                .ok_or_else(|| ParseError::InvalidFormat(format!("labels must be 1..={}", cups.len())))?;
            if std::mem::replace(slot, true) {
                return Err(ParseError::InvalidFormat(format!("cup {cup} appears twice")));
            }
        }
        if cups.len() < 5 {
            return Err(ParseError::MissingData("at least five cups".into()));
        }
        Ok(cups)
    }
}

/// The circle as a successor table: `next[label]` is the cup clockwise of
/// `label`. Index 0 is unused.
struct Circle {
    next: Vec<u32>,
    current: u32,
}

impl Circle {
    /// The given cups followed by every label up to `total`
    fn new(cups: &[u32], total: u32) -> Self {
        let given = cups.len() as u32;
        let order: Vec<u32> = cups.iter().copied().chain(given + 1..=total).collect();
        let mut next = vec![0; order.len() + 1];
        for (i, &cup) in order.iter().enumerate() {
            next[cup as usize] = order[(i + 1) % order.len()];
        }
        Self {
            next,
            current: order[0],
        }
    }

    fn max_label(&self) -> u32 {
        self.next.len() as u32 - 1
    }

    fn after(&self, cup: u32) -> u32 {
        self.next[cup as usize]
    }

    fn play(&mut self, moves: usize) {
        for _ in 0..moves {
            let first = self.after(self.current);
            let second = self.after(first);
            let third = self.after(second);

            let mut destination = self.current;
            loop {
                destination = if destination == 1 { self.max_label() } else { destination - 1 };
                if destination != first && destination != second && destination != third {
                    break;
                }
            }

            self.next[self.current as usize] = self.after(third);
            self.next[third as usize] = self.after(destination);
            self.next[destination as usize] = first;
            self.current = self.after(self.current);
        }
    }
}

/// Labels clockwise after cup 1, once `moves` moves are done
pub fn labels_after_one(cups: &[u32], moves: usize) -> String {
    let mut circle = Circle::new(cups, cups.len() as u32);
    circle.play(moves);
    std::iter::successors(Some(circle.after(1)), |&cup| Some(circle.after(cup)))
        .take_while(|&cup| cup != 1)
        .map(|cup| cup.to_string())
        .collect()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(labels_after_one(shared, 100))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut circle = Circle::new(shared, MILLION);
        circle.play(10 * MILLION as usize);
        let first = circle.after(1);
        let second = circle.after(first);
        log::debug!("stars under cups {first} and {second}");
        Ok((u64::from(first) * u64::from(second)).to_string())
    }
}
