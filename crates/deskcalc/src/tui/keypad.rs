//! On-screen keypad for the terminal calculator
//!
//! The keypad is both a widget and a click target: mouse clicks are mapped
//! back to a button with [`Keypad::hit_test`], and the button for the most
//! recent key is highlighted so keyboard input stays visible.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Widget},
};

use crate::command::{keypad_commands, Command, KEYPAD_COLUMNS};

/// Narrowest button cell the keypad draws; narrower keypads are blank
const MIN_BUTTON_WIDTH: u16 = 4;

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// What the button does
    pub command: Command,
    /// Whether the button is currently highlighted
    pub pressed: bool,
}

impl KeypadButton {
    /// Creates an unpressed button
    #[must_use]
    pub const fn new(command: Command) -> Self {
        Self {
            command,
            pressed: false,
        }
    }

    /// Text printed on the button
    #[must_use]
    pub fn label(&self) -> String {
        self.command.label()
    }

    /// Sets the pressed state
    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }

    fn style(&self) -> Style {
        if self.pressed {
            return Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD);
        }
        match self.command {
            Command::Digit(_) | Command::DecimalPoint => Style::default().fg(Color::White),
            Command::Operator(_) => Style::default().fg(Color::Yellow),
            Command::Evaluate => Style::default().fg(Color::Green),
            Command::ClearAll | Command::ClearEntry | Command::Backspace => {
                Style::default().fg(Color::Red)
            }
            _ => Style::default().fg(Color::Magenta),
        }
    }
}

/// The keypad layout, a 6x4 grid
/// ```text
/// [MC] [MR] [M+] [M-]
/// [ C] [CE] [ ⌫] [ /]
/// [ 7] [ 8] [ 9] [ *]
/// [ 4] [ 5] [ 6] [ -]
/// [ 1] [ 2] [ 3] [ +]
/// [ 0] [ .] [MS] [ =]
/// ```
#[derive(Debug, Clone)]
pub struct Keypad {
    /// Buttons in row-major order
    buttons: Vec<KeypadButton>,
    cols: usize,
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        let buttons: Vec<KeypadButton> = keypad_commands()
            .into_iter()
            .map(KeypadButton::new)
            .collect();
        let rows = buttons.len().div_ceil(KEYPAD_COLUMNS);

        Self {
            buttons,
            cols: KEYPAD_COLUMNS,
            rows,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets a button by index
    #[must_use]
    pub fn get_button(&self, index: usize) -> Option<&KeypadButton> {
        self.buttons.get(index)
    }

    /// Gets a button by row and column
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        if row < self.rows && col < self.cols {
            self.buttons.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Finds the button that issues `command`
    #[must_use]
    pub fn find_button(&self, command: Command) -> Option<usize> {
        self.buttons.iter().position(|b| b.command == command)
    }

    /// Releases all buttons
    pub fn release_all(&mut self) {
        for btn in &mut self.buttons {
            btn.set_pressed(false);
        }
    }

    /// Highlights the button for `command`, releasing the others
    pub fn highlight(&mut self, command: Command) {
        self.release_all();
        if let Some(btn) = self
            .find_button(command)
            .and_then(|idx| self.buttons.get_mut(idx))
        {
            btn.set_pressed(true);
        }
    }

    /// Index of the highlighted button, if any
    #[must_use]
    pub fn highlighted(&self) -> Option<usize> {
        self.buttons.iter().position(|b| b.pressed)
    }

    /// Returns an iterator over all buttons
    pub fn buttons(&self) -> impl Iterator<Item = &KeypadButton> {
        self.buttons.iter()
    }

    /// Returns an iterator over buttons with their (row, col) positions
    pub fn buttons_with_positions(&self) -> impl Iterator<Item = ((usize, usize), &KeypadButton)> {
        self.buttons.iter().enumerate().map(move |(i, btn)| {
            let row = i / self.cols;
            let col = i % self.cols;
            ((row, col), btn)
        })
    }

    /// Converts a click position inside the bordered `area` to a button index
    #[must_use]
    pub fn hit_test(&self, area: Rect, x: u16, y: u16) -> Option<usize> {
        if x < area.x || y < area.y || x >= area.x + area.width || y >= area.y + area.height {
            return None;
        }

        let rel_x = x - area.x;
        let rel_y = y - area.y;

        // Border takes one cell on each side
        if rel_x == 0 || rel_y == 0 || rel_x >= area.width - 1 || rel_y >= area.height - 1 {
            return None;
        }

        // Nothing is drawn below the minimum width, so nothing is clickable
        let (btn_width, btn_height) = self.cell_size(area);
        if btn_width < MIN_BUTTON_WIDTH || btn_height == 0 {
            return None;
        }

        let col = usize::from((rel_x - 1) / btn_width);
        let row = usize::from((rel_y - 1) / btn_height);

        if row < self.rows && col < self.cols {
            Some(row * self.cols + col)
        } else {
            None
        }
    }

    /// Command under a click position, if any
    #[must_use]
    pub fn command_at(&self, area: Rect, x: u16, y: u16) -> Option<Command> {
        self.hit_test(area, x, y)
            .and_then(|idx| self.get_button(idx))
            .map(|btn| btn.command)
    }

    fn cell_size(&self, area: Rect) -> (u16, u16) {
        let inner_width = area.width.saturating_sub(2);
        let inner_height = area.height.saturating_sub(2);
        let cols = u16::try_from(self.cols).unwrap_or(u16::MAX);
        let rows = u16::try_from(self.rows).unwrap_or(u16::MAX);
        (inner_width / cols, inner_height / rows)
    }
}

/// Keypad widget for rendering
#[derive(Debug)]
pub struct KeypadWidget<'a> {
    keypad: &'a Keypad,
}

impl<'a> KeypadWidget<'a> {
    /// Creates a new keypad widget
    #[must_use]
    pub fn new(keypad: &'a Keypad) -> Self {
        Self { keypad }
    }
}

impl Widget for KeypadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(" Keypad ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .render(area, buf);

        let (btn_width, btn_height) = self.keypad.cell_size(area);
        if btn_width < MIN_BUTTON_WIDTH || btn_height == 0 {
            return; // Too small to render
        }

        let inner_x = area.x + 1;
        let inner_y = area.y + 1;

        for ((row, col), btn) in self.keypad.buttons_with_positions() {
            let x = inner_x + col as u16 * btn_width;
            let y = inner_y + row as u16 * btn_height;

            let label = format!("[{:>2}]", btn.label());
            let label_width = label.chars().count() as u16;
            let label_x = x + btn_width.saturating_sub(label_width) / 2;
            let label_y = y + btn_height / 2;

            buf.set_span(
                label_x,
                label_y,
                &Span::styled(label, btn.style()),
                btn_width,
            );
        }
    }
}
