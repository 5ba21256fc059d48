//! Command Line Interface (CLI) layer for NDVIPRO.
//!
//! This module defines argument parsing (`args`), error types and exit-code
//! mapping (`errors`), and the orchestration logic (`runner`) that wires
//! user-provided options to the library functionality exposed via
//! `ndvipro::api`.
//!
//! If you are embedding NDVIPRO into another application, prefer using
//! the high-level `ndvipro::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
