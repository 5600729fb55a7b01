//! big-sum - add numbers of any size from arguments or stdin

use std::io::{self, BufRead, IsTerminal};

use big_sum::cli::env_flag;
use big_sum::{Args, run};
use clap::Parser;

fn main() {
    let args = Args::parse().normalized();

    let verbose = args.verbose || std::env::var("VERBOSE").is_ok_and(|v| env_flag(&v));
    env_logger::builder()
        .filter_module(
            "big_sum",
            if verbose {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Warn
            },
        )
        .init();

    let stdin = io::stdin();
    let piped = !stdin.is_terminal();
    let mut locked = stdin.lock();
    let stdin: Option<&mut dyn BufRead> = if piped { Some(&mut locked) } else { None };

    if let Err(e) = run(args, stdin, &mut io::stdout().lock()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
