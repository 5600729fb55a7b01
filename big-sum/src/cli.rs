//! Command-line front end: argument parsing, stdin tokens, output

use std::io::{self, BufRead, Write};

use clap::{CommandFactory, Parser};
use thiserror::Error;

use crate::{SumError, make_pretty, sum};

/// Add a bunch of numbers together with nearly infinite precision
#[derive(Parser, Debug, Default)]
#[command(
    name = "big-sum",
    version,
    after_help = "Reads whitespace-separated numbers from stdin when it is piped and no numbers are given."
)]
pub struct Args {
    /// Numbers to add; each argument is split on whitespace. `-` reads stdin
    #[arg(allow_hyphen_values = true, num_args = 0..)]
    pub values: Vec<String>,

    /// Also read whitespace-separated numbers from stdin
    #[arg(long)]
    pub pipe: bool,

    /// Add thousands separators to the result
    #[arg(short, long)]
    pub pretty: bool,

    /// Trace every accumulation step on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Move flags that clap took as values (`1 -p -.5`) back onto their fields.
    ///
    /// Values accept any leading hyphen so that `-1,000` or `-0x10` reach the
    /// summation, which means flags after the first value land in `values`.
    pub fn normalized(mut self) -> Self {
        let mut values = Vec::with_capacity(self.values.len());
        for value in std::mem::take(&mut self.values) {
            match value.trim().to_ascii_lowercase().as_str() {
                "-p" | "--pretty" => self.pretty = true,
                "-v" | "--verbose" => self.verbose = true,
                "-" | "--pipe" => self.pipe = true,
                _ => values.push(value),
            }
        }
        self.values = values;
        self
    }
}

#[derive(Debug, Error)]
pub enum BigSumError {
    #[error(transparent)]
    Sum(#[from] SumError),

    #[error("no stdin available")]
    NoStdin,

    #[error("error reading from stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("error writing output: {0}")]
    Output(#[from] io::Error),
}

fn read_tokens(stdin: &mut dyn BufRead) -> Result<Vec<String>, BigSumError> {
    let mut tokens = Vec::new();
    for line in stdin.lines() {
        let line = line.map_err(BigSumError::Stdin)?;
        tokens.extend(line.split_whitespace().map(str::to_string));
    }
    log::debug!("read {} tokens from stdin", tokens.len());
    Ok(tokens)
}

/// Sum the numbers named by `args` and write the result to `stdout`.
///
/// `stdin` is `None` when nothing is piped in. Without any numbers and
/// without stdin the usage text is written instead.
pub fn run(
    args: Args,
    stdin: Option<&mut dyn BufRead>,
    stdout: &mut dyn Write,
) -> Result<(), BigSumError> {
    let args = args.normalized();
    let pipe = args.pipe;
    let mut values = Vec::new();
    for arg in &args.values {
        if matches!(arg.trim(), "-h" | "--help") {
            writeln!(stdout, "{}", Args::command().render_help())?;
            return Ok(());
        }
        values.extend(arg.split_whitespace().map(str::to_string));
    }

    if pipe || values.is_empty() {
        match stdin {
            Some(stdin) => values.extend(read_tokens(stdin)?),
            None if pipe => return Err(BigSumError::NoStdin),
            None => {
                log::debug!("no numbers given and nothing piped in");
                writeln!(stdout, "{}", Args::command().render_help())?;
                return Ok(());
            }
        }
    }

    let mut total = sum(&values)?;
    if args.pretty {
        total = make_pretty(&total);
    }
    writeln!(stdout, "{total}")?;
    Ok(())
}

/// Truthiness of an environment flag such as `VERBOSE=1`
pub fn env_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "t" | "true" | "y" | "yes" | "on"
    )
}
