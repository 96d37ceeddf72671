//! Terminal application state
//!
//! Wraps the engine with what the terminal needs on top: the last rendered
//! readout, the keypad highlight, a modal notice and the quit flag.

use tracing::debug;

use super::input::KeyAction;
use super::keypad::Keypad;
use crate::command::Command;
use crate::core::display::format_value;
use crate::core::{CalcError, Calculator, CalculatorState};
use crate::sink::DisplaySink;

/// Sink feeding the terminal panels
#[derive(Debug, Default)]
pub struct PanelSink {
    display: String,
    memory_active: bool,
    notices: Vec<CalcError>,
}

impl DisplaySink for PanelSink {
    fn render(&mut self, display: &str, memory_active: bool) {
        display.clone_into(&mut self.display);
        self.memory_active = memory_active;
    }

    fn notify(&mut self, error: &CalcError) {
        self.notices.push(error.clone());
    }
}

/// Calculator application state
#[derive(Debug)]
pub struct CalculatorApp {
    calculator: Calculator<PanelSink>,
    keypad: Keypad,
    /// Notice waiting to be dismissed
    notice: Option<CalcError>,
    should_quit: bool,
}

impl Default for CalculatorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorApp {
    /// Creates a new calculator app
    #[must_use]
    pub fn new() -> Self {
        Self {
            calculator: Calculator::with_sink(PanelSink::default()),
            keypad: Keypad::new(),
            notice: None,
            should_quit: false,
        }
    }

    /// Readout as last rendered
    #[must_use]
    pub fn display(&self) -> &str {
        &self.calculator.sink().display
    }

    /// Memory indicator as last rendered
    #[must_use]
    pub fn memory_active(&self) -> bool {
        self.calculator.sink().memory_active
    }

    /// Engine state
    #[must_use]
    pub fn state(&self) -> &CalculatorState {
        self.calculator.state()
    }

    /// Pending operation as `"12 +"`, if any
    #[must_use]
    pub fn pending_line(&self) -> Option<String> {
        let pending = self.state().pending()?;
        let left = pending.left.map_or_else(|| "?".to_string(), format_value);
        Some(format!("{left} {}", pending.operator))
    }

    /// The keypad, with the last pressed key highlighted
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Notice currently shown, if any
    #[must_use]
    pub fn notice(&self) -> Option<&CalcError> {
        self.notice.as_ref()
    }

    /// Every notice raised so far
    #[must_use]
    pub fn notice_log(&self) -> &[CalcError] {
        &self.calculator.sink().notices
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Closes the notice
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Runs a command and highlights its keypad button
    pub fn press(&mut self, command: Command) {
        let before = self.notice_log().len();
        self.calculator.apply(command);
        self.keypad.highlight(command);

        if self.notice_log().len() > before {
            self.notice = self.notice_log().last().cloned();
        }
    }

    /// Applies an input action.
    ///
    /// While a notice is open, any action other than quitting only
    /// dismisses it.
    pub fn handle_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Quit => self.quit(),
            KeyAction::None => {}
            KeyAction::Command(_) if self.notice.is_some() => {
                debug!("notice dismissed");
                self.dismiss_notice();
            }
            KeyAction::Command(command) => self.press(command),
        }
    }
}
