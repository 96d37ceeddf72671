//! Unified calculator driver
//!
//! Every frontend implements [`CalculatorDriver`], so a behaviour check is
//! written once as a `verify_*` function and run against the bare engine,
//! the terminal app and the page adapter alike.
//!
//! ```rust
//! use deskcalc::driver::{verify_chaining, EngineDriver};
//!
//! let mut driver = EngineDriver::new();
//! verify_chaining(&mut driver).unwrap();
//! ```

use crate::command::{parse_key_sequence, Command, KeySequenceError};
use crate::core::Calculator;
use crate::sink::RecordingSink;

/// Abstract driver for calculator interactions
pub trait CalculatorDriver {
    /// Presses one key
    fn press(&mut self, command: Command);

    /// Presses every key of a sequence such as `"12+3="`.
    ///
    /// Nothing is pressed when the sequence contains an unknown key.
    fn press_keys(&mut self, keys: &str) -> Result<(), KeySequenceError> {
        for command in parse_key_sequence(keys)? {
            self.press(command);
        }
        Ok(())
    }

    /// Readout as the user currently sees it
    fn display(&self) -> String;

    /// Whether the memory indicator is lit
    fn memory_indicator(&self) -> bool;

    /// Every notification shown so far, oldest first
    fn notifications(&self) -> Vec<String>;

    /// Back to a fresh calculator: memory cleared, notifications dropped
    fn reset(&mut self);
}

/// Driver over the bare engine
#[derive(Debug)]
pub struct EngineDriver {
    calculator: Calculator<RecordingSink>,
}

impl Default for EngineDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineDriver {
    /// Creates a driver around a fresh calculator
    #[must_use]
    pub fn new() -> Self {
        Self {
            calculator: Calculator::with_sink(RecordingSink::new()),
        }
    }

    /// Underlying calculator
    #[must_use]
    pub fn calculator(&self) -> &Calculator<RecordingSink> {
        &self.calculator
    }
}

impl CalculatorDriver for EngineDriver {
    fn press(&mut self, command: Command) {
        self.calculator.apply(command);
    }

    fn display(&self) -> String {
        self.calculator
            .sink()
            .last()
            .map_or_else(|| self.calculator.display(), |frame| frame.display.clone())
    }

    fn memory_indicator(&self) -> bool {
        self.calculator
            .sink()
            .last()
            .is_some_and(|frame| frame.memory_active)
    }

    fn notifications(&self) -> Vec<String> {
        self.calculator
            .sink()
            .notices()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    fn reset(&mut self) {
        self.calculator = Calculator::with_sink(RecordingSink::new());
    }
}

/// Terminal driver
#[cfg(feature = "tui")]
pub mod tui_driver {
    use super::{CalculatorDriver, Command};
    use crate::tui::CalculatorApp;

    /// Driver wrapping the terminal calculator app
    #[derive(Debug)]
    pub struct TuiDriver {
        app: CalculatorApp,
    }

    impl Default for TuiDriver {
        fn default() -> Self {
            Self::new()
        }
    }

    impl TuiDriver {
        /// Creates a new TUI driver
        #[must_use]
        pub fn new() -> Self {
            Self {
                app: CalculatorApp::new(),
            }
        }

        /// Creates a TUI driver with an existing app
        #[must_use]
        pub fn with_app(app: CalculatorApp) -> Self {
            Self { app }
        }

        /// Returns a reference to the underlying app
        #[must_use]
        pub fn app(&self) -> &CalculatorApp {
            &self.app
        }

        /// Returns a mutable reference to the underlying app
        pub fn app_mut(&mut self) -> &mut CalculatorApp {
            &mut self.app
        }
    }

    impl CalculatorDriver for TuiDriver {
        fn press(&mut self, command: Command) {
            // A user has to dismiss the modal before the key lands
            self.app.dismiss_notice();
            self.app.press(command);
        }

        fn display(&self) -> String {
            self.app.display().to_string()
        }

        fn memory_indicator(&self) -> bool {
            self.app.memory_active()
        }

        fn notifications(&self) -> Vec<String> {
            self.app
                .notice_log()
                .iter()
                .map(ToString::to_string)
                .collect()
        }

        fn reset(&mut self) {
            self.app = CalculatorApp::new();
        }
    }
}

#[cfg(feature = "tui")]
pub use tui_driver::TuiDriver;

// ===== Unified specifications =====
// These work with ANY CalculatorDriver implementation

/// Digits replace the leading zero and append afterwards
pub fn verify_digit_entry<D: CalculatorDriver>(driver: &mut D) -> Result<(), KeySequenceError> {
    driver.reset();
    assert_eq!(driver.display(), "0");

    driver.press_keys("007")?;
    assert_eq!(driver.display(), "7");

    driver.press_keys("05")?;
    assert_eq!(driver.display(), "705");
    Ok(())
}

/// Only one decimal point per entry
pub fn verify_decimal_entry<D: CalculatorDriver>(driver: &mut D) -> Result<(), KeySequenceError> {
    driver.reset();
    driver.press_keys("3..1.4")?;
    assert_eq!(driver.display(), "3.14");

    driver.press_keys("+.5=")?;
    assert_eq!(driver.display(), "3.64");
    Ok(())
}

/// Operators chain strictly left to right
pub fn verify_chaining<D: CalculatorDriver>(driver: &mut D) -> Result<(), KeySequenceError> {
    driver.reset();
    driver.press_keys("5+3*2=")?;
    assert_eq!(driver.display(), "16");

    driver.reset();
    driver.press_keys("10-4-3=")?;
    assert_eq!(driver.display(), "3");

    // The result feeds the next operation
    driver.press_keys("*7=")?;
    assert_eq!(driver.display(), "21");
    Ok(())
}

/// Dividing by zero keeps the left operand and notifies
pub fn verify_divide_by_zero<D: CalculatorDriver>(driver: &mut D) -> Result<(), KeySequenceError> {
    driver.reset();
    driver.press_keys("10/0=")?;
    assert_eq!(driver.display(), "10");
    assert_eq!(driver.notifications(), vec!["Cannot divide by zero"]);

    // The calculator keeps working afterwards
    driver.press_keys("+5=")?;
    assert_eq!(driver.display(), "15");
    Ok(())
}

/// Memory survives a full clear and drives the indicator
pub fn verify_memory_round_trip<D: CalculatorDriver>(
    driver: &mut D,
) -> Result<(), KeySequenceError> {
    driver.reset();
    assert!(!driver.memory_indicator());

    driver.press_keys("42<MS><Esc>")?;
    assert_eq!(driver.display(), "0");
    assert!(driver.memory_indicator());

    driver.press_keys("<MR>")?;
    assert_eq!(driver.display(), "42");

    driver.press_keys("<Esc>8<M+><Esc>2<M-><MR>")?;
    assert_eq!(driver.display(), "48");

    driver.press_keys("<MC>")?;
    assert!(!driver.memory_indicator());
    Ok(())
}

/// Backspace trims one character and bottoms out at zero
pub fn verify_backspace<D: CalculatorDriver>(driver: &mut D) -> Result<(), KeySequenceError> {
    driver.reset();
    driver.press_keys("123<BS>")?;
    assert_eq!(driver.display(), "12");

    driver.press_keys("<BS><BS><BS>")?;
    assert_eq!(driver.display(), "0");
    Ok(())
}

/// Clear entry keeps the pending operation, clear all drops it
pub fn verify_clear<D: CalculatorDriver>(driver: &mut D) -> Result<(), KeySequenceError> {
    driver.reset();
    driver.press_keys("12+34<CE>5=")?;
    assert_eq!(driver.display(), "17");

    driver.press_keys("9+<Esc>3=")?;
    assert_eq!(driver.display(), "3");
    Ok(())
}

/// Grouping and scientific notation in the readout
pub fn verify_display_format<D: CalculatorDriver>(driver: &mut D) -> Result<(), KeySequenceError> {
    driver.reset();
    driver.press_keys("1234")?;
    assert_eq!(driver.display(), "1,234");

    driver.reset();
    driver.press_keys("1234567890123")?;
    assert_eq!(driver.display(), "1.234568e+12");

    driver.reset();
    driver.press_keys("0.0000001")?;
    assert_eq!(driver.display(), "1.000000e-7");

    driver.reset();
    driver.press_keys("1/8=")?;
    assert_eq!(driver.display(), "0.125");
    Ok(())
}

/// Runs every specification in turn
pub fn run_full_specification<D: CalculatorDriver>(
    driver: &mut D,
) -> Result<(), KeySequenceError> {
    verify_digit_entry(driver)?;
    verify_decimal_entry(driver)?;
    verify_chaining(driver)?;
    verify_divide_by_zero(driver)?;
    verify_memory_round_trip(driver)?;
    verify_backspace(driver)?;
    verify_clear(driver)?;
    verify_display_format(driver)?;
    Ok(())
}
