//! Keys command handler: replay a key sequence through the engine

use deskcalc::command::parse_key_sequence;
use deskcalc::core::CalculatorState;
use deskcalc::driver::{CalculatorDriver, EngineDriver};
use serde::Serialize;
use tracing::debug;

use crate::commands::KeysArgs;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::Printer;

/// Readout after one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Key label, e.g. `7` or `M+`
    pub key: String,
    /// Readout after the key
    pub display: String,
    /// Memory indicator after the key
    pub memory_active: bool,
    /// Notices raised by this key
    pub notices: Vec<String>,
}

/// Final state of a replay
#[derive(Debug, Clone, Serialize)]
pub struct KeysReport {
    /// Final readout
    pub display: String,
    /// Whether memory holds a nonzero value
    pub memory_active: bool,
    /// Number of keys pressed
    pub keys: usize,
    /// Every notice, oldest first
    pub notifications: Vec<String>,
    /// Engine state
    pub state: CalculatorState,
}

/// Presses every key of `sequence` on a fresh calculator. The sequence is
/// parsed up front; nothing runs if any key is unknown.
pub fn replay(sequence: &str) -> CliResult<(Vec<Step>, KeysReport)> {
    let commands = parse_key_sequence(sequence)?;
    debug!(keys = commands.len(), "replaying key sequence");

    let mut driver = EngineDriver::new();
    let mut steps = Vec::with_capacity(commands.len());
    let mut seen = 0;

    for command in &commands {
        driver.press(*command);
        let notifications = driver.notifications();
        steps.push(Step {
            key: command.label(),
            display: driver.display(),
            memory_active: driver.memory_indicator(),
            notices: notifications[seen..].to_vec(),
        });
        seen = notifications.len();
    }

    let report = KeysReport {
        display: driver.display(),
        memory_active: driver.memory_indicator(),
        keys: commands.len(),
        notifications: driver.notifications(),
        state: driver.calculator().state().clone(),
    };
    Ok((steps, report))
}

/// Execute the keys command
pub fn execute_keys(config: &CliConfig, args: &KeysArgs) -> CliResult<()> {
    let (steps, report) = replay(&args.sequence)?;
    let printer = Printer::new(config.color.should_color(), config.verbosity.is_quiet());

    if args.json {
        printer.raw(&serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if args.trace {
        for step in &steps {
            printer.step(&step.key, &step.display, step.memory_active);
            for notice in &step.notices {
                printer.notice(notice);
            }
        }
        return Ok(());
    }

    printer.readout(&report.display, report.memory_active);
    for notice in &report.notifications {
        printer.notice(notice);
    }
    Ok(())
}
