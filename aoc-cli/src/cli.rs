//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Parallelization level for solver execution
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ParallelizeBy {
    /// Run every solver one after another on the calling thread
    Sequential,
    /// One task per year; days and parts of a year run in order
    Year,
    /// One task per puzzle; its parts share one parse (default)
    #[default]
    Day,
    /// One task per part; every part parses its own input
    Part,
}

/// Run Advent of Code solvers against local puzzle inputs
#[derive(Parser, Debug)]
#[command(name = "aoc", about = "Run Advent of Code solvers", version)]
pub struct Args {
    /// Year to run (runs all years if omitted)
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Day to run (runs all days if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: Option<u8>,

    /// Part to run (runs all parts if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub part: Option<u8>,

    /// Only run solvers carrying all of these tags (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Directory holding `{year}/day{DD}.input` files
    #[arg(long, default_value = "inputs")]
    pub input_dir: PathBuf,

    /// Read this file instead of the input store (needs --year and --day)
    #[arg(long, requires_all = ["year", "day"])]
    pub input: Option<PathBuf>,

    /// Use the `.example` input files instead of the real ones
    #[arg(long)]
    pub example: bool,

    /// Number of worker threads (defaults to available parallelism)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Parallelization level: sequential, year, day, or part
    #[arg(long, value_enum, default_value = "day")]
    pub parallelize_by: ParallelizeBy,

    /// Quiet mode - only output answers
    #[arg(short, long)]
    pub quiet: bool,

    /// Log progress at info level
    #[arg(short, long)]
    pub verbose: bool,

    /// Log solver internals at debug level (also enabled by DEBUG=1)
    #[arg(long)]
    pub debug: bool,
}
