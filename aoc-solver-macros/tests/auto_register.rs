use aoc_solver::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError, SolverPlugin,
    SolverRegistryBuilder,
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2031, day = 4, tags = ["macro-test", "sum"])]
struct TaggedSolver;

impl AocParser for TaggedSolver {
    type SharedData<'a> = Vec<i32>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .lines()
            .map(|line| {
                line.trim()
                    .parse::<i32>()
                    .map_err(|_| ParseError::InvalidFormat("Expected integer".into()))
            })
            .collect()
    }
}

impl PartSolver<1> for TaggedSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().sum::<i32>().to_string())
    }
}

impl PartSolver<2> for TaggedSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().product::<i32>().to_string())
    }
}

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2031, day = 5)]
struct UntaggedSolver;

impl AocParser for UntaggedSolver {
    type SharedData<'a> = &'a str;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input.trim())
    }
}

impl PartSolver<1> for UntaggedSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.chars().rev().collect())
    }
}

fn find_plugin(year: u16, day: u8) -> Option<&'static SolverPlugin> {
    inventory::iter::<SolverPlugin>().find(|p| p.year == year && p.day == day)
}

#[test]
fn test_plugins_are_submitted_with_tags() {
    let tagged = find_plugin(2031, 4).expect("tagged plugin submitted");
    assert_eq!(tagged.tags, &["macro-test", "sum"]);
    assert_eq!(tagged.solver.parts(), 2);

    let untagged = find_plugin(2031, 5).expect("untagged plugin submitted");
    assert!(untagged.tags.is_empty());
    assert_eq!(untagged.solver.parts(), 1);
}

#[test]
fn test_register_all_plugins() {
    let registry = SolverRegistryBuilder::new()
        .register_all_plugins()
        .unwrap()
        .build();

    let mut solver = registry.create_solver(2031, 4, "2\n3\n4").unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "9");
    assert_eq!(solver.solve(2).unwrap().answer, "24");

    let mut solver = registry.create_solver(2031, 5, " abc \n").unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "cba");
}

#[test]
fn test_register_plugins_filtered_by_tag() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"macro-test"))
        .unwrap()
        .build();

    assert!(registry.storage().contains(2031, 4));
    assert!(!registry.storage().contains(2031, 5));
}
