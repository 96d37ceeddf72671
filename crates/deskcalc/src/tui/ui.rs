//! Terminal rendering

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Widget, Wrap},
    Frame,
};

use super::app::CalculatorApp;
use super::keypad::KeypadWidget;

/// Title shown on the outer border
pub const TITLE: &str = " deskcalc ";

/// Key help for the sidebar
pub const HELP_SHORTCUTS: &[(&str, &str)] = &[
    ("0-9 .", "Enter number"),
    ("+-*/", "Operator"),
    ("Enter =", "Evaluate"),
    ("Esc", "Clear all"),
    ("Del", "Clear entry"),
    ("Bksp", "Delete digit"),
    ("s r", "MS / MR"),
    ("p m x", "M+ / M- / MC"),
    ("Ctrl+C", "Quit"),
];

const KEYPAD_WIDTH: u16 = 26;

/// Renders the calculator UI to the frame
pub fn render(app: &CalculatorApp, frame: &mut Frame) {
    let area = frame.area();
    frame.render_widget(CalculatorUI::new(app), area);
}

/// Where the keypad lands when the whole UI fills `area`.
///
/// Mouse handling uses this to hit-test clicks against the drawn keypad.
#[must_use]
pub fn keypad_area(area: Rect) -> Rect {
    split_columns(area).1
}

fn split_columns(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Min(30), Constraint::Length(KEYPAD_WIDTH)])
        .split(area);
    (chunks[0], chunks[1])
}

/// Calculator UI widget
#[derive(Debug)]
pub struct CalculatorUI<'a> {
    app: &'a CalculatorApp,
}

impl<'a> CalculatorUI<'a> {
    /// Creates a new calculator UI widget
    #[must_use]
    pub fn new(app: &'a CalculatorApp) -> Self {
        Self { app }
    }

    fn create_layout(area: Rect) -> Vec<Rect> {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Display
                Constraint::Length(3), // Pending operation
                Constraint::Min(4),    // Help
            ])
            .split(area)
            .to_vec()
    }

    fn render_display(&self, area: Rect, buf: &mut Buffer) {
        let memory = if self.app.memory_active() {
            Span::styled(
                " M ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::raw("")
        };

        let readout = Paragraph::new(Span::styled(
            self.app.display(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .title(Line::from(vec![Span::raw(" Display "), memory]))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
        readout.render(area, buf);
    }

    fn render_pending(&self, area: Rect, buf: &mut Buffer) {
        let text = self.app.pending_line().unwrap_or_default();
        Paragraph::new(Span::styled(text, Style::default().fg(Color::Gray)))
            .alignment(Alignment::Right)
            .block(
                Block::default()
                    .title(" Pending ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Blue)),
            )
            .render(area, buf);
    }

    fn render_help(area: Rect, buf: &mut Buffer) {
        let shortcuts: Vec<ListItem> = HELP_SHORTCUTS
            .iter()
            .map(|(key, desc)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{key:>7}"), Style::default().fg(Color::Yellow)),
                    Span::raw(" "),
                    Span::styled(*desc, Style::default().fg(Color::Gray)),
                ]))
            })
            .collect();

        List::new(shortcuts)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .render(area, buf);
    }

    fn render_notice(&self, area: Rect, buf: &mut Buffer) {
        let Some(notice) = self.app.notice() else {
            return;
        };

        let popup = centered(area, 36, 5);
        Clear.render(popup, buf);
        Paragraph::new(vec![
            Line::from(Span::styled(
                notice.to_string(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "press any key",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Notice ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
        .render(popup, buf);
    }
}

impl Widget for CalculatorUI<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(TITLE)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .render(area, buf);

        let (main_area, keypad) = split_columns(area);
        let chunks = Self::create_layout(main_area);
        self.render_display(chunks[0], buf);
        self.render_pending(chunks[1], buf);
        Self::render_help(chunks[2], buf);

        KeypadWidget::new(self.app.keypad()).render(keypad, buf);

        self.render_notice(area, buf);
    }
}

/// A `width` x `height` rectangle centred in `area`, clipped to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
