//! deskcalc - pocket calculator engine and world clock
//!
//! The centre of the crate is [`Calculator`](core::Calculator), a small
//! input/accumulator state machine: digits and a decimal point build the
//! current entry, operators chain strictly left to right, `=` commits, and a
//! single memory register sits beside the calculation.
//!
//! Frontends stay thin. They translate their events into
//! [`Command`](command::Command)s and receive output through a
//! [`DisplaySink`](sink::DisplaySink):
//!
//! - [`tui`]: ratatui/crossterm terminal calculator (feature `tui`)
//! - [`web`]: browser-style page adapter over a mock DOM
//! - [`driver`]: one driver trait so the same checks run against every
//!   frontend
//!
//! The [`clock`] module (feature `clock`) renders a set of IANA timezones
//! once per second.
//!
//! # Example
//!
//! ```rust
//! use deskcalc::prelude::*;
//!
//! let mut calc = Calculator::with_sink(RecordingSink::new());
//! for command in parse_key_sequence("5+3*2=").unwrap() {
//!     calc.apply(command);
//! }
//!
//! // Left to right, no precedence: (5 + 3) * 2
//! assert_eq!(calc.state().current_input(), "16");
//! assert_eq!(calc.sink().last().unwrap().display, "16");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod command;
pub mod core;
pub mod driver;
pub mod sink;
pub mod web;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(feature = "clock")]
pub mod clock;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::command::{parse_key_sequence, Command, KeySequenceError};
    pub use crate::core::display::format_display;
    pub use crate::core::{
        CalcError, CalcResult, Calculator, CalculatorState, Digit, Operator, PendingOperation,
    };
    pub use crate::driver::{CalculatorDriver, EngineDriver};
    pub use crate::sink::{DisplaySink, FnSink, Frame, NullSink, RecordingSink};
    pub use crate::web::{DomElement, MockDom, WebCalculator, WebDriver};

    #[cfg(feature = "tui")]
    pub use crate::driver::TuiDriver;

    #[cfg(feature = "clock")]
    pub use crate::clock::{ClockError, ClockReading, WorldClock};
}
