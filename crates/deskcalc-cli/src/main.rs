//! deskcalc: pocket calculator and world clock
//!
//! ## Usage
//!
//! ```bash
//! deskcalc                          # Interactive calculator
//! deskcalc keys "5+3*2="            # Replay keys, print the readout
//! deskcalc keys "42<MS><Esc><MR>"   # Named keys in angle brackets
//! deskcalc clock -z UTC --ticks 1   # Print the world clock once
//! deskcalc config                   # Effective configuration as JSON
//! ```

use clap::Parser;
use deskcalc_cli::{
    handlers::{execute_clock, execute_config, execute_keys, execute_tui},
    logging, Cli, CliConfig, CliResult, ColorChoice, Commands, Verbosity,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    // Build configuration from CLI args
    let config = build_config(&cli);
    let command = cli.command.unwrap_or(Commands::Tui);

    logging::init(&config, matches!(command, Commands::Tui));
    console::set_colors_enabled(config.color.should_color());
    console::set_colors_enabled_stderr(config.color.should_color());

    match command {
        Commands::Tui => execute_tui(&config),
        Commands::Keys(args) => execute_keys(&config, &args),
        Commands::Clock(args) => execute_clock(&config, &args),
        Commands::Config => execute_config(&config),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let color: ColorChoice = cli.color.into();

    CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(color)
        .with_24_hour(cli.hour24)
        .with_local_zone(cli.local_zone.clone())
}
