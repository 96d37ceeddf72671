//! Calculator page: the engine wired to a DOM

use std::collections::HashMap;

use tracing::trace;

use super::dom::{
    button_id, DomEvent, MockDom, ACTIVE_CLASS, DISPLAY_ID, MEMORY_INDICATOR_ID,
};
use crate::command::{keypad_commands, Command};
use crate::core::{CalcError, Calculator, CalculatorState};
use crate::sink::DisplaySink;

/// Sink writing the readout into the page
#[derive(Debug)]
pub struct DomSink {
    dom: MockDom,
}

impl DomSink {
    /// Wraps a page
    #[must_use]
    pub fn new(dom: MockDom) -> Self {
        Self { dom }
    }

    /// The page
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        &self.dom
    }
}

impl DisplaySink for DomSink {
    fn render(&mut self, display: &str, memory_active: bool) {
        self.dom.set_element_text(DISPLAY_ID, display);
        if let Some(indicator) = self.dom.get_element_mut(MEMORY_INDICATOR_ID) {
            indicator.toggle_class(ACTIVE_CLASS, memory_active);
        }
    }

    fn notify(&mut self, error: &CalcError) {
        self.dom.alert(&error.to_string());
    }
}

/// The calculator page: click and keydown handlers over one engine
#[derive(Debug)]
pub struct WebCalculator {
    calculator: Calculator<DomSink>,
    buttons: HashMap<String, Command>,
}

impl Default for WebCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl WebCalculator {
    /// Builds the page and renders the startup readout
    #[must_use]
    pub fn new() -> Self {
        let buttons = keypad_commands()
            .into_iter()
            .map(|command| (button_id(command), command))
            .collect();

        Self {
            calculator: Calculator::with_sink(DomSink::new(MockDom::calculator())),
            buttons,
        }
    }

    /// The page
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        self.calculator.sink().dom()
    }

    /// Engine state
    #[must_use]
    pub fn state(&self) -> &CalculatorState {
        self.calculator.state()
    }

    /// Click handler. Returns whether the element was a calculator key.
    pub fn click(&mut self, element_id: &str) -> bool {
        self.calculator
            .sink_mut()
            .dom
            .dispatch_event(DomEvent::click(element_id));

        match self.buttons.get(element_id).copied() {
            Some(command) => {
                self.calculator.apply(command);
                true
            }
            None => false,
        }
    }

    /// Document keydown handler. Returns whether the default action was
    /// prevented.
    pub fn key_down(&mut self, key: &str) -> bool {
        let prevent = Command::suppresses_default(key);
        trace!(key, prevent, "keydown");
        self.calculator
            .sink_mut()
            .dom
            .dispatch_event(DomEvent::key_down(key, prevent));

        if let Some(command) = Command::from_key(key) {
            self.calculator.apply(command);
        }
        prevent
    }

    /// Text of the readout element
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.dom().get_element_text(DISPLAY_ID).unwrap_or_default()
    }

    /// Whether the memory indicator carries the active class
    #[must_use]
    pub fn memory_indicator_active(&self) -> bool {
        self.dom()
            .get_element(MEMORY_INDICATOR_ID)
            .is_some_and(|e| e.has_class(ACTIVE_CLASS))
    }
}
