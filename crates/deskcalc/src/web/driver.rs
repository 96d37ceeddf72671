//! Page driver
//!
//! Runs the unified specifications through button clicks on the page.

use super::dom::{button_id, MockDom};
use super::page::WebCalculator;
use crate::command::Command;
use crate::driver::CalculatorDriver;

/// Driver clicking buttons on the calculator page
#[derive(Debug, Default)]
pub struct WebDriver {
    page: WebCalculator,
}

impl WebDriver {
    /// Creates a driver over a fresh page
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a reference to the page
    #[must_use]
    pub fn page(&self) -> &WebCalculator {
        &self.page
    }

    /// Returns a mutable reference to the page
    pub fn page_mut(&mut self) -> &mut WebCalculator {
        &mut self.page
    }

    /// Returns a reference to the DOM
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        self.page.dom()
    }
}

impl CalculatorDriver for WebDriver {
    fn press(&mut self, command: Command) {
        self.page.click(&button_id(command));
    }

    fn display(&self) -> String {
        self.page.display_text().to_string()
    }

    fn memory_indicator(&self) -> bool {
        self.page.memory_indicator_active()
    }

    fn notifications(&self) -> Vec<String> {
        self.dom().alerts().to_vec()
    }

    fn reset(&mut self) {
        self.page = WebCalculator::new();
    }
}
