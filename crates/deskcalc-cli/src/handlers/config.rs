//! Config command handler

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::Printer;

/// Execute the config command: print the effective configuration as JSON
pub fn execute_config(config: &CliConfig) -> CliResult<()> {
    let printer = Printer::new(false, config.verbosity.is_quiet());
    printer.raw(&config.to_json()?);
    Ok(())
}
