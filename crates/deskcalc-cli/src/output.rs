//! Terminal output for readouts, notices and clock tables

use console::{style, Term};
use deskcalc::clock::ClockReading;

/// Writes styled lines to stdout and notices to stderr
#[derive(Debug)]
pub struct Printer {
    out: Term,
    err: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Printer {
    /// Create a new printer
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Print a calculator readout. Always printed: it is the command's
    /// result.
    pub fn readout(&self, display: &str, memory_active: bool) {
        let _ = self
            .out
            .write_line(&readout_line(display, memory_active, self.use_color));
    }

    /// Print one step of a traced replay
    pub fn step(&self, key: &str, display: &str, memory_active: bool) {
        let key = format!("{key:>4}");
        let key = if self.use_color {
            style(key).dim().to_string()
        } else {
            key
        };
        let line = readout_line(display, memory_active, self.use_color);
        let _ = self.out.write_line(&format!("{key}  {line}"));
    }

    /// Print a user-facing notice to stderr, even in quiet mode
    pub fn notice(&self, message: &str) {
        let prefix = if self.use_color {
            style("!").red().bold().to_string()
        } else {
            "!".to_string()
        };
        let _ = self.err.write_line(&format!("{prefix} {message}"));
    }

    /// Print raw text (JSON) to stdout
    pub fn raw(&self, text: &str) {
        let _ = self.out.write_line(text);
    }

    /// Print a section header
    pub fn header(&self, title: &str) {
        if self.quiet {
            return;
        }

        let styled = if self.use_color {
            style(title).bold().underlined().to_string()
        } else {
            format!("=== {title} ===")
        };

        let _ = self.out.write_line(&styled);
    }

    /// Print one clock refresh as an aligned table
    pub fn clock_table(&self, readings: &[ClockReading]) {
        for line in clock_lines(readings, self.use_color) {
            let _ = self.out.write_line(&line);
        }
        if !self.quiet {
            let _ = self.out.write_line("");
        }
    }
}

/// `16` or `42  M`
#[must_use]
pub fn readout_line(display: &str, memory_active: bool, use_color: bool) -> String {
    let marker = if memory_active { "  M" } else { "" };
    if use_color {
        format!("{}{}", style(display).green().bold(), style(marker).magenta())
    } else {
        format!("{display}{marker}")
    }
}

/// One line per zone: city, time, date, and a `(local)` tag
#[must_use]
pub fn clock_lines(readings: &[ClockReading], use_color: bool) -> Vec<String> {
    let width = readings.iter().map(|r| r.city.len()).max().unwrap_or(0);
    readings
        .iter()
        .map(|r| {
            let city = format!("{:<width$}", r.city);
            let tag = if r.is_local { "  (local)" } else { "" };
            if use_color {
                format!(
                    "{}  {}  {}{}",
                    style(city).cyan().bold(),
                    style(&r.time).bold(),
                    style(&r.date).dim(),
                    style(tag).yellow()
                )
            } else {
                format!("{city}  {}  {}{tag}", r.time, r.date)
            }
        })
        .collect()
}
