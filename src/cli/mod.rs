//! Command Line Interface (CLI) layer for iconprep.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for the crop, export and pipeline
//! subcommands. It wires user-provided options to the underlying library
//! functionality exposed via `iconprep::api`.
//!
//! If you are embedding iconprep into another tool, prefer the high-level
//! `iconprep::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
