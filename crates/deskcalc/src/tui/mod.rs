//! Terminal frontend (ratatui + crossterm)
//!
//! [`CalculatorApp`] owns the engine; [`InputHandler`] turns key presses and
//! keypad clicks into [`KeyAction`]s; [`render`] draws the readout, the
//! pending operation, the keypad and any open notice.

mod app;
mod input;
mod keypad;
mod ui;

pub use app::{CalculatorApp, PanelSink};
pub use input::{InputHandler, KeyAction};
pub use keypad::{Keypad, KeypadButton, KeypadWidget};
pub use ui::{keypad_area, render, CalculatorUI};
