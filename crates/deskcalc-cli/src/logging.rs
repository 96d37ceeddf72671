//! Log subscriber setup
//!
//! Logs always go to stderr so stdout stays clean for readouts and JSON.
//! While the TUI owns the terminal only errors get through.

use tracing_subscriber::EnvFilter;

use crate::config::{CliConfig, Verbosity};

/// Filter directive for a session
#[must_use]
pub fn filter_directive(verbosity: Verbosity, interactive: bool) -> &'static str {
    if interactive {
        Verbosity::Quiet.log_filter()
    } else {
        verbosity.log_filter()
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the verbosity
/// flags outside the TUI.
pub fn init(config: &CliConfig, interactive: bool) {
    let directive = filter_directive(config.verbosity, interactive);
    let filter = if interactive {
        EnvFilter::new(directive)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive))
    };

    // A second init (tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(config.color.should_color())
        .with_target(false)
        .try_init();
}
