//! Calculator core: engine state machine, operators and number text
//!
//! Everything in here is presentation-free. Frontends drive the engine
//! through [`Calculator`] and observe it through a [`DisplaySink`].

pub mod display;
mod engine;
pub mod number;
mod operations;

pub use engine::{Calculator, CalculatorState, PendingOperation};
pub use operations::{Digit, Operator};

pub use crate::sink::DisplaySink;

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
///
/// `DivideByZero` and `Overflow` are shown to the user through
/// [`DisplaySink::notify`]. `MalformedInput` is only ever coerced and logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Division with a zero right operand
    #[error("Cannot divide by zero")]
    DivideByZero,
    /// Result is not a finite number
    #[error("Result is too large to display")]
    Overflow,
    /// Entered text could not be read as a number
    #[error("Malformed number: {0:?}")]
    MalformedInput(String),
}

impl CalcError {
    /// Returns true for errors the user should be told about
    #[must_use]
    pub const fn is_user_visible(&self) -> bool {
        matches!(self, Self::DivideByZero | Self::Overflow)
    }
}
