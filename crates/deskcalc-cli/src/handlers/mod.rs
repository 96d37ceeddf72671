//! Command handlers - one module per subcommand
//!
//! Each handler module contains:
//! - The execution logic for a CLI command
//! - Pure helper functions
//! - Tests

pub mod clock;
pub mod config;
pub mod keys;
pub mod tui;

pub use clock::{build_clock, execute_clock};
pub use config::execute_config;
pub use keys::{execute_keys, replay, KeysReport, Step};
pub use tui::{execute_tui, run_app};
