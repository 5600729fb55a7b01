//! Configuration resolution from CLI args

use crate::cli::{Args, ParallelizeBy};
use crate::error::CliError;
use crate::inputs::{InputKind, InputStore};
use log::LevelFilter;
use std::path::{Path, PathBuf};

/// Resolved runtime configuration
#[derive(Debug)]
pub struct Config {
    /// Year filter (None = all years)
    pub year_filter: Option<u16>,
    /// Day filter (None = all days)
    pub day_filter: Option<u8>,
    /// Part filter (None = all parts)
    pub part_filter: Option<u8>,
    /// Tags a solver must all carry
    pub tags: Vec<String>,
    /// Input directory with `~` expanded
    pub input_dir: PathBuf,
    /// Explicit input file for the single selected puzzle
    pub input_file: Option<PathBuf>,
    pub input_kind: InputKind,
    pub thread_count: usize,
    pub parallelize_by: ParallelizeBy,
    pub quiet: bool,
    /// Default log filter; `RUST_LOG` still wins
    pub log_level: LevelFilter,
}

impl Config {
    /// Build config from CLI args and the `DEBUG` environment variable
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        let env_debug = std::env::var("DEBUG").ok();
        Self::resolve(args, env_debug.as_deref())
    }

    fn resolve(args: Args, env_debug: Option<&str>) -> Result<Self, CliError> {
        let thread_count = match args.threads {
            Some(0) => {
                return Err(CliError::Config("--threads must be at least 1".to_string()));
            }
            Some(n) => n,
            None => num_cpus(),
        };

        let debug = args.debug || env_debug.is_some_and(is_truthy);
        let log_level = if debug {
            LevelFilter::Debug
        } else if args.verbose {
            LevelFilter::Info
        } else {
            LevelFilter::Warn
        };

        Ok(Config {
            year_filter: args.year,
            day_filter: args.day,
            part_filter: args.part,
            tags: args.tags,
            input_dir: expand_tilde(&args.input_dir),
            input_file: args.input.map(|path| expand_tilde(&path)),
            input_kind: if args.example {
                InputKind::Example
            } else {
                InputKind::Real
            },
            thread_count,
            parallelize_by: args.parallelize_by,
            quiet: args.quiet,
            log_level,
        })
    }

    /// The input store this configuration reads from
    pub fn input_store(&self) -> InputStore {
        let store = InputStore::new(self.input_dir.clone(), self.input_kind);
        match (&self.input_file, self.year_filter, self.day_filter) {
            (Some(path), Some(year), Some(day)) => store.with_override(year, day, path.clone()),
            _ => store,
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "t" | "true" | "y" | "yes" | "on"
    )
}

/// Expand ~ to home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str()
        && let Some(rest) = path_str.strip_prefix('~')
        && (rest.is_empty() || rest.starts_with('/'))
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest.trim_start_matches('/'));
    }
    path.to_path_buf()
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn config(argv: &[&str], env_debug: Option<&str>) -> Result<Config, CliError> {
        let args = Args::try_parse_from(std::iter::once("aoc").chain(argv.iter().copied())).unwrap();
        Config::resolve(args, env_debug)
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(config(&[], None).unwrap().log_level, LevelFilter::Warn);
        assert_eq!(config(&["-v"], None).unwrap().log_level, LevelFilter::Info);
        assert_eq!(config(&["--debug"], None).unwrap().log_level, LevelFilter::Debug);
        assert_eq!(config(&["-v"], Some("1")).unwrap().log_level, LevelFilter::Debug);
        assert_eq!(config(&[], Some("false")).unwrap().log_level, LevelFilter::Warn);
    }

    #[test]
    fn test_threads() {
        assert_eq!(config(&["--threads", "3"], None).unwrap().thread_count, 3);
        assert!(config(&[], None).unwrap().thread_count >= 1);
        assert!(matches!(
            config(&["--threads", "0"], None),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn test_input_store_selection() {
        let cfg = config(&["--input-dir", "puzzles", "--example"], None).unwrap();
        assert_eq!(
            cfg.input_store().path(2021, 4),
            PathBuf::from("puzzles/2021/day04.example")
        );

        let cfg = config(&["--input", "mine.txt", "-y", "2021", "-d", "4"], None).unwrap();
        let store = cfg.input_store();
        assert_eq!(store.path(2021, 4), PathBuf::from("mine.txt"));
        assert_eq!(store.path(2021, 5), PathBuf::from("inputs/2021/day05.input"));
    }

    #[test]
    fn test_expand_tilde() {
        assert_eq!(expand_tilde(Path::new("inputs")), PathBuf::from("inputs"));
        assert_eq!(expand_tilde(Path::new("~user/x")), PathBuf::from("~user/x"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde(Path::new("~/aoc")), home.join("aoc"));
            assert_eq!(expand_tilde(Path::new("~")), home);
        }
    }
}
