//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};

/// deskcalc: pocket calculator with a memory register, and a world clock
#[derive(Parser, Debug)]
#[command(name = "deskcalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Zone marked as local on the world clock
    #[arg(long, env = "TZ", global = true, value_name = "ZONE")]
    pub local_zone: Option<String>,

    /// Read clock times in 24-hour format
    #[arg(long = "24h", global = true)]
    pub hour24: bool,

    /// Subcommand to run (defaults to `tui`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive terminal calculator
    Tui,

    /// Replay a key sequence and print the readout
    ///
    /// Each character is one key. Named keys go in angle brackets:
    /// <Enter> <Esc> <BS> <CE> <C> <MS> <MR> <M+> <M-> <MC>
    Keys(KeysArgs),

    /// Show the world clock
    Clock(ClockArgs),

    /// Show effective configuration
    Config,
}

/// Arguments for the keys command
#[derive(Parser, Debug)]
pub struct KeysArgs {
    /// Key sequence, e.g. "12+3=" or "42<MS><Esc><MR>"
    #[arg(allow_hyphen_values = true)]
    pub sequence: String,

    /// Print the readout after every key
    #[arg(long)]
    pub trace: bool,

    /// Print the final state as JSON
    #[arg(long, conflicts_with = "trace")]
    pub json: bool,
}

/// Arguments for the clock command
#[derive(Parser, Debug)]
pub struct ClockArgs {
    /// Zones to show, in order (repeatable; defaults to a built-in set)
    #[arg(short, long = "zone", value_name = "ZONE")]
    pub zones: Vec<String>,

    /// Stop after this many refreshes (runs until Ctrl-C otherwise)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub ticks: Option<u64>,

    /// Print each refresh as a JSON array
    #[arg(long)]
    pub json: bool,
}

/// Color output argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
