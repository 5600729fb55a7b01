//! Output formatting for solver results

use crate::executor::SolverResult;
use chrono::TimeDelta;
use std::time::{Duration, Instant};

/// Prints results as they are released, then a timing summary
pub struct OutputFormatter {
    quiet: bool,
    start_time: Instant,
}

impl OutputFormatter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: Instant::now(),
        }
    }

    /// Answers go to stdout, errors to stderr
    pub fn print_result(&self, result: &SolverResult) {
        match self.render(result) {
            Ok(line) => println!("{line}"),
            Err(line) => eprintln!("{line}"),
        }
    }

    fn render(&self, result: &SolverResult) -> Result<String, String> {
        let prefix = format!("{}/{:02} Part {}", result.year, result.day, result.part);
        match (&result.answer, self.quiet) {
            (Ok(answer), true) => Ok(answer.clone()),
            (Ok(answer), false) => {
                let parse_timing = result
                    .parse_duration
                    .map(|d| format!("parse: {}, ", format_duration(d)))
                    .unwrap_or_default();
                Ok(format!(
                    "{prefix}: {answer} ({parse_timing}solve: {})",
                    format_duration(result.solve_duration)
                ))
            }
            (Err(e), true) => Err(format!("Error: {prefix}: {e}")),
            (Err(e), false) => Err(format!("{prefix}: Error - {e}")),
        }
    }

    /// Print a summary after all results
    /// Shows both total solve time (sum of durations) and actual elapsed wall-clock time
    pub fn print_summary(&self, results: &[SolverResult]) {
        if self.quiet {
            return;
        }
        println!();
        for line in summary_lines(results, self.start_time.elapsed()) {
            println!("{line}");
        }
    }
}

fn summary_lines(results: &[SolverResult], elapsed: Duration) -> Vec<String> {
    let solved: Vec<&SolverResult> = results.iter().filter(|r| r.answer.is_ok()).collect();
    let failures = results.len() - solved.len();

    let total_parse_time: TimeDelta = solved.iter().filter_map(|r| r.parse_duration).sum();
    let total_solve_time: TimeDelta = solved.iter().map(|r| r.solve_duration).sum();

    let mut lines = vec![
        "--- Summary ---".to_string(),
        format!("Solvers: {} solved, {failures} failed", solved.len()),
        format!("Total parse time: {}", format_duration(total_parse_time)),
        format!("Total solve time: {}", format_duration(total_solve_time)),
        format!("Elapsed wall-clock time: {}", format_std_duration(elapsed)),
    ];
    if !elapsed.is_zero() {
        let compute_secs = (total_parse_time + total_solve_time)
            .num_microseconds()
            .unwrap_or(0) as f64
            / 1_000_000.0;
        lines.push(format!(
            "Speedup factor: {:.2}x",
            compute_secs / elapsed.as_secs_f64()
        ));
    }
    lines
}

fn format_micros(micros: u128) -> String {
    if micros < 1000 {
        format!("{micros}µs")
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

/// Format a TimeDelta for display
fn format_duration(d: TimeDelta) -> String {
    match d.num_microseconds() {
        None => "N/A".to_string(),
        Some(micros) if micros < 0 => format!("-{}", format_micros(micros.unsigned_abs().into())),
        Some(micros) => format_micros(micros.unsigned_abs().into()),
    }
}

/// Format a std::time::Duration for display (used for wall-clock time)
fn format_std_duration(d: Duration) -> String {
    format_micros(d.as_micros())
}
