//! Error types for the CLI

use std::path::PathBuf;

use thiserror::Error;
use thiserror_ext::Arc as ArcDerive;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid combination of arguments
    #[error("Configuration error: {0}")]
    Config(String),

    /// Registration error
    #[error("Registration error: {0}")]
    Registration(#[from] aoc_solver::RegistrationError),

    /// The executor thread panicked before finishing
    #[error("Executor thread panicked")]
    ExecutorPanicked,

    /// Executor error (wraps Arc for cheap cloning)
    #[error("{0}")]
    Executor(#[from] ArcExecutorError),
}

/// Failure to load a puzzle input from disk
#[derive(Error, Debug)]
pub enum InputError {
    #[error("input file {} does not exist", .0.display())]
    Missing(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Executor-specific errors
#[derive(Error, Debug, ArcDerive)]
#[thiserror_ext(newtype(name = ArcExecutorError))]
pub enum ExecutorError {
    /// Input could not be loaded
    #[error("Input unavailable for {year}/{day:02}: {source}")]
    Input {
        year: u16,
        day: u8,
        #[source]
        source: InputError,
    },

    /// Solver creation or solving failed
    #[error("{0}")]
    Solver(#[from] aoc_solver::SolverError),

    /// Result receiver hung up
    #[error("Channel send error")]
    ChannelSend,

    /// Thread pool creation failed
    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    /// Multiple errors collected during parallel execution
    #[error("Multiple errors occurred ({} total)", .0.len())]
    Multiple(Vec<ArcExecutorError>),
}

impl ArcExecutorError {
    /// Merge two errors into one `Multiple`, flattening either side that is
    /// already a `Multiple` and keeping `first`'s errors in front
    pub fn combine(first: ArcExecutorError, second: ArcExecutorError) -> ArcExecutorError {
        let mut errors = Vec::new();
        for error in [first, second] {
            match error.inner() {
                ExecutorError::Multiple(inner) => errors.extend(inner.iter().cloned()),
                _ => errors.push(error),
            }
        }
        ExecutorError::Multiple(errors).into()
    }

    /// Fold `new` into an optional accumulated error
    pub fn combine_opt(
        existing: Option<ArcExecutorError>,
        new: ArcExecutorError,
    ) -> ArcExecutorError {
        match existing {
            Some(e) => Self::combine(e, new),
            None => new,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool_error(name: &str) -> ArcExecutorError {
        ExecutorError::ThreadPool(name.to_string()).into()
    }

    fn names(error: &ArcExecutorError) -> Vec<String> {
        match error.inner() {
            ExecutorError::Multiple(inner) => inner.iter().flat_map(names).collect(),
            ExecutorError::ThreadPool(name) => vec![name.clone()],
            other => vec![other.to_string()],
        }
    }

    #[test]
    fn test_combine_singles() {
        let combined = ArcExecutorError::combine(pool_error("a"), pool_error("b"));
        assert_eq!(names(&combined), ["a", "b"]);
        assert_eq!(combined.to_string(), "Multiple errors occurred (2 total)");
    }

    #[test]
    fn test_combine_flattens_multiples() {
        let left = ArcExecutorError::combine(pool_error("a"), pool_error("b"));
        let right = ArcExecutorError::combine(pool_error("c"), pool_error("d"));
        let combined = ArcExecutorError::combine(left, right);
        match combined.inner() {
            ExecutorError::Multiple(inner) => assert_eq!(inner.len(), 4),
            other => panic!("expected Multiple, got {other:?}"),
        }
        assert_eq!(names(&combined), ["a", "b", "c", "d"]);

        let appended = ArcExecutorError::combine(combined, pool_error("e"));
        assert_eq!(names(&appended), ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_combine_opt() {
        let single = ArcExecutorError::combine_opt(None, pool_error("a"));
        assert_eq!(names(&single), ["a"]);
        assert!(matches!(single.inner(), ExecutorError::ThreadPool(_)));

        let both = ArcExecutorError::combine_opt(Some(single), pool_error("b"));
        assert_eq!(names(&both), ["a", "b"]);
    }

    #[test]
    fn test_input_error_messages() {
        let missing = ExecutorError::Input {
            year: 2023,
            day: 5,
            source: InputError::Missing(PathBuf::from("inputs/2023/day05.input")),
        };
        assert_eq!(
            missing.to_string(),
            "Input unavailable for 2023/05: input file inputs/2023/day05.input does not exist"
        );
    }
}
