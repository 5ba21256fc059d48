//! NDVIPRO CLI entrypoint.
//!
//! Provides a thin wrapper over the `cli` module: parse args, run the
//! pipeline, and exit with a status that distinguishes configuration
//! errors, empty results, and data-source failures.
//! For programmatic use, prefer the library API (`ndvipro::api`).

use std::process::ExitCode;

use clap::Parser;

mod cli;

fn main() -> ExitCode {
    let args = cli::CliArgs::parse();
    match cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(cli::errors::exit_code(&err))
        }
    }
}
