//! Keyboard and mouse input for the terminal calculator

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use super::keypad::Keypad;
use crate::command::Command;

/// Actions that can be triggered by terminal input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Run a calculator command
    Command(Command),
    /// Quit the application
    Quit,
    /// No action (ignored input)
    None,
}

/// Input handler that maps terminal events to actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to an action.
    ///
    /// Browser key names apply (`0-9 + - * / . , = Enter Esc Backspace`),
    /// plus `Delete` for CE and letters for the memory keys:
    /// `s` MS, `r` MR, `p` M+, `m` M-, `x` MC.
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> KeyAction {
        let KeyEvent {
            code,
            modifiers,
            kind,
            ..
        } = event;

        if kind == KeyEventKind::Release {
            return KeyAction::None;
        }

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => KeyAction::Quit,
                _ => KeyAction::None,
            };
        }

        let command = match code {
            KeyCode::Char(c) => Self::char_command(c),
            KeyCode::Enter => Some(Command::Evaluate),
            KeyCode::Esc => Some(Command::ClearAll),
            KeyCode::Backspace => Some(Command::Backspace),
            KeyCode::Delete => Some(Command::ClearEntry),
            _ => None,
        };
        command.map_or(KeyAction::None, KeyAction::Command)
    }

    /// Maps a left click on the keypad drawn at `keypad_area`
    #[must_use]
    pub fn handle_mouse(&self, event: MouseEvent, keypad: &Keypad, keypad_area: Rect) -> KeyAction {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => keypad
                .command_at(keypad_area, event.column, event.row)
                .map_or(KeyAction::None, KeyAction::Command),
            _ => KeyAction::None,
        }
    }

    fn char_command(c: char) -> Option<Command> {
        match c.to_ascii_lowercase() {
            's' => Some(Command::MemoryStore),
            'r' => Some(Command::MemoryRecall),
            'p' => Some(Command::MemoryAdd),
            'm' => Some(Command::MemorySubtract),
            'x' => Some(Command::MemoryClear),
            _ => Command::from_key(c.encode_utf8(&mut [0; 4])),
        }
    }
}
