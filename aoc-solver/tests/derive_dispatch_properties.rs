//! Property tests for the `AocSolver` derive macro

use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver};
use proptest::prelude::*;

#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct SumProduct;

impl AocParser for SumProduct {
    type SharedData<'a> = Vec<i64>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .lines()
            .filter(|l| !l.is_empty())
            .map(|l| {
                l.parse()
                    .map_err(|_| ParseError::InvalidFormat(format!("bad int {l:?}")))
            })
            .collect()
    }
}

impl PartSolver<1> for SumProduct {
    fn solve(shared: &mut Vec<i64>) -> Result<String, SolveError> {
        Ok(shared.iter().sum::<i64>().to_string())
    }
}

impl PartSolver<2> for SumProduct {
    fn solve(shared: &mut Vec<i64>) -> Result<String, SolveError> {
        Ok(shared.iter().product::<i64>().to_string())
    }
}

fn to_input(numbers: &[i64]) -> String {
    numbers.iter().map(|n| n.to_string()).collect::<Vec<_>>().join("\n")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// `Solver::solve_part(k)` matches `<Self as PartSolver<k>>::solve`
    #[test]
    fn solve_part_dispatches_to_part_solver(
        numbers in prop::collection::vec(1i64..10, 1..5),
        part in 1u8..=2
    ) {
        let input = to_input(&numbers);
        let mut shared1 = SumProduct::parse(&input).unwrap();
        let mut shared2 = SumProduct::parse(&input).unwrap();

        let via_solver = <SumProduct as Solver>::solve_part(&mut shared1, part).unwrap();
        let direct = match part {
            1 => <SumProduct as PartSolver<1>>::solve(&mut shared2),
            _ => <SumProduct as PartSolver<2>>::solve(&mut shared2),
        }
        .unwrap();

        prop_assert_eq!(via_solver, direct);
    }

    /// Parts outside `1..=max_parts` are reported as not implemented
    #[test]
    fn invalid_part_returns_not_implemented(invalid_part in prop_oneof![Just(0u8), 3u8..=255]) {
        let mut shared = SumProduct::parse("1\n2\n3").unwrap();

        match <SumProduct as Solver>::solve_part(&mut shared, invalid_part) {
            Err(SolveError::PartNotImplemented(p)) => prop_assert_eq!(p, invalid_part),
            other => prop_assert!(false, "Expected PartNotImplemented, got {:?}", other),
        }
    }
}

mod cached_between_parts {
    use super::*;

    #[derive(Debug)]
    struct Totals {
        numbers: Vec<i64>,
        cached_sum: Option<i64>,
    }

    #[derive(AocSolver)]
    #[aoc_solver(max_parts = 2)]
    struct Doubler;

    impl AocParser for Doubler {
        type SharedData<'a> = Totals;

        fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
            let numbers = SumProduct::parse(input)?;
            Ok(Totals {
                numbers,
                cached_sum: None,
            })
        }
    }

    fn sum(shared: &mut Totals) -> i64 {
        if let Some(total) = shared.cached_sum {
            return total;
        }
        let total = shared.numbers.iter().sum();
        shared.cached_sum = Some(total);
        total
    }

    impl PartSolver<1> for Doubler {
        fn solve(shared: &mut Totals) -> Result<String, SolveError> {
            Ok(sum(shared).to_string())
        }
    }

    impl PartSolver<2> for Doubler {
        fn solve(shared: &mut Totals) -> Result<String, SolveError> {
            Ok((sum(shared) * 2).to_string())
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn part_one_cache_is_visible_to_part_two(numbers in prop::collection::vec(1i64..100, 1..6)) {
            let expected: i64 = numbers.iter().sum();
            let mut shared = Doubler::parse(&to_input(&numbers)).unwrap();

            prop_assert_eq!(<Doubler as Solver>::solve_part(&mut shared, 1).unwrap(), expected.to_string());
            prop_assert_eq!(shared.cached_sum, Some(expected));
            prop_assert_eq!(<Doubler as Solver>::solve_part(&mut shared, 2).unwrap(), (expected * 2).to_string());
        }

        #[test]
        fn part_two_alone_matches(numbers in prop::collection::vec(1i64..100, 1..6)) {
            let expected: i64 = numbers.iter().sum::<i64>() * 2;
            let mut shared = Doubler::parse(&to_input(&numbers)).unwrap();

            prop_assert_eq!(<Doubler as Solver>::solve_part(&mut shared, 2).unwrap(), expected.to_string());
        }
    }
}
