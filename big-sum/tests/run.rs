use std::io::Cursor;

use big_sum::{Args, BigSumError, run};
use clap::Parser;

fn run_with(argv: &[&str], stdin: Option<&str>) -> Result<String, BigSumError> {
    let args = Args::try_parse_from(std::iter::once("big-sum").chain(argv.iter().copied())).unwrap();
    let mut input = stdin.map(|text| Cursor::new(text.as_bytes().to_vec()));
    let mut out = Vec::new();
    run(
        args,
        input.as_mut().map(|c| c as &mut dyn std::io::BufRead),
        &mut out,
    )?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn sums_positional_arguments() {
    assert_eq!(run_with(&["1", "2", "3.5"], None).unwrap(), "6.5\n");
}

#[test]
fn splits_arguments_on_whitespace() {
    assert_eq!(run_with(&["1 2\t3", "-4"], None).unwrap(), "2\n");
}

#[test]
fn pretty_adds_separators() {
    assert_eq!(
        run_with(&["--pretty", "999999", "1.25"], None).unwrap(),
        "1,000,000.25\n"
    );
}

#[test]
fn reads_stdin_when_no_values_given() {
    let out = run_with(&[], Some("10 20\n30\n\n 0.5 ")).unwrap();
    assert_eq!(out, "60.5\n");
}

#[test]
fn dash_combines_arguments_and_stdin() {
    let out = run_with(&["100", "-", "-1"], Some("1,000\n")).unwrap();
    assert_eq!(out, "1099\n");
}

#[test]
fn ignores_stdin_when_values_given_without_pipe() {
    let out = run_with(&["7"], Some("1000\n")).unwrap();
    assert_eq!(out, "7\n");
}

#[test]
fn pipe_without_stdin_fails() {
    let err = run_with(&["--pipe", "1"], None).unwrap_err();
    assert!(matches!(err, BigSumError::NoStdin));
}

#[test]
fn no_values_and_no_stdin_prints_usage() {
    let out = run_with(&[], None).unwrap();
    assert!(out.contains("Usage"), "{out}");
}

#[test]
fn bad_token_reports_original_text() {
    let err = run_with(&["1", "4,2x"], None).unwrap_err();
    assert_eq!(err.to_string(), r#"could not parse "4,2x" as integer"#);
}

#[test]
fn accepts_any_negative_token_as_value() {
    assert_eq!(run_with(&["2,000", "-1,000"], None).unwrap(), "1000\n");
    assert_eq!(run_with(&["1", "-.5"], None).unwrap(), "0.5\n");
    assert_eq!(run_with(&["-0x10", "-1_000", "1016"], None).unwrap(), "0\n");
}

#[test]
fn flags_after_values_still_apply() {
    assert_eq!(
        run_with(&["-1,000", "-2,500", "-p"], None).unwrap(),
        "-3,500\n"
    );
}
