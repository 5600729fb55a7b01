use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 20, tags = ["2021", "easy", "grid", "cellular-automaton"])]
pub struct Solver;

const ALGORITHM_LEN: usize = 512;

/// A finite window onto an infinite image; everything outside it has the
/// `background` value
#[derive(Debug, Clone)]
pub struct Image {
    pixels: Grid<bool>,
    background: bool,
}

#[derive(Debug)]
pub struct Scanner {
    algorithm: Vec<bool>,
    image: Image,
}

impl AocParser for Solver {
    type SharedData<'a> = Scanner;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let input = input.replace("\r\n", "\n");
        let (algorithm, image) = input
            .trim_start()
            .split_once("\n\n")
            .ok_or_else(|| ParseError::MissingData("blank line before the image".into()))?;
        let algorithm: Vec<bool> = algorithm
            .bytes()
            .filter(|b| !b.is_ascii_whitespace())
            .map(|b| match b {
                b'#' => Ok(true),
                b'.' => Ok(false),
                other => Err(ParseError::InvalidFormat(format!(
                    "unexpected {:?} in enhancement algorithm",
                    other as char
                ))),
            })
            .collect::<Result<_, _>>()?;
        if algorithm.len() != ALGORITHM_LEN {
            return Err(ParseError::InvalidFormat(format!(
                "enhancement algorithm has {} entries, expected {ALGORITHM_LEN}",
                algorithm.len()
            )));
        }
        let pixels = Grid::parse_with(image, |b| match b {
            b'#' => Some(true),
            b'.' => Some(false),
            _ => None,
        })?;
        Ok(Scanner {
            algorithm,
            image: Image {
                pixels,
                background: false,
            },
        })
    }
}

impl Image {
    fn pixel(&self, pos: Pos) -> bool {
        self.pixels.get(pos).copied().unwrap_or(self.background)
    }

    /// One enhancement step; the window grows by one pixel on every side
    fn enhance(&self, algorithm: &[bool]) -> Image {
        let pixels = Grid::from_fn(self.pixels.width() + 2, self.pixels.height() + 2, |p| {
            let centre = Pos::new(p.row - 1, p.col - 1);
            let index = (-1..=1)
                .flat_map(|dr| (-1..=1).map(move |dc| Pos::new(dr, dc)))
                .fold(0, |index, delta| index << 1 | usize::from(self.pixel(centre + delta)));
            algorithm[index]
        });
        let background = if self.background {
            algorithm[ALGORITHM_LEN - 1]
        } else {
            algorithm[0]
        };
        Image { pixels, background }
    }

    /// Number of lit pixels, or `None` when infinitely many are lit
    fn lit(&self) -> Option<usize> {
        (!self.background).then(|| self.pixels.iter().filter(|&(_, &lit)| lit).count())
    }
}

pub fn lit_after(scanner: &Scanner, steps: usize) -> Result<usize, SolveError> {
    let image = (0..steps).fold(scanner.image.clone(), |image, _| image.enhance(&scanner.algorithm));
    image
        .lit()
        .ok_or_else(|| SolveError::failed(format!("infinitely many pixels lit after {steps} steps")))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(lit_after(shared, 2)?.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(lit_after(shared, 50)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    /// Algorithm text where `rule(index)` decides each entry
    fn algorithm(rule: impl Fn(usize) -> bool) -> String {
        (0..ALGORITHM_LEN).map(|i| if rule(i) { '#' } else { '.' }).collect()
    }

    #[test]
    fn test_dilation_grows_a_square() {
        let input = format!("{}\n\n...\n.#.\n...\n", algorithm(|i| i != 0));
        let mut shared = Solver::parse(&input).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "25");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), (101 * 101).to_string());
    }

    #[test]
    fn test_flashing_background_settles_on_even_steps() {
        // invert the centre pixel: the infinite background flips every step
        let input = format!("{}\n\n#..#.\n#....\n##..#\n..#..\n..###\n", algorithm(|i| i & 16 == 0));
        let mut shared = Solver::parse(&input).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "10");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "10");
        assert!(lit_after(&shared, 1).is_err());
    }

    #[test]
    fn test_identity_keeps_image() {
        let input = format!("{}\n\n##\n.#\n", algorithm(|i| i & 16 != 0));
        let shared = Solver::parse(&input).unwrap();
        assert_eq!(lit_after(&shared, 7).unwrap(), 3);
    }

    #[test]
    fn test_rejects_short_algorithm() {
        assert!(Solver::parse("#.#\n\n#.\n").is_err());
    }
}
