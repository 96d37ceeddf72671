//! deskcalc CLI library
//!
//! Argument parsing, configuration, logging and one handler per
//! subcommand. The binary in `main.rs` only wires them together.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;
mod output;

pub use commands::{Cli, ClockArgs, ColorArg, Commands, KeysArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{clock_lines, readout_line, Printer};
