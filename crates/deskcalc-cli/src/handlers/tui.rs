//! Tui command handler: the interactive calculator

use std::io;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use deskcalc::tui::{keypad_area, render, CalculatorApp, InputHandler, KeyAction};
use ratatui::{backend::Backend, backend::CrosstermBackend, layout::Rect, Terminal};
use tracing::{debug, warn};

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

/// Execute the tui command
pub fn execute_tui(_config: &CliConfig) -> CliResult<()> {
    if !io::IsTerminal::is_terminal(&io::stdout()) {
        return Err(CliError::terminal(
            "stdout is not a terminal; use `deskcalc keys` for scripted input",
        ));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(err) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
        let _ = disable_raw_mode();
        return Err(err.into());
    }
    let mut terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
        Ok(terminal) => terminal,
        Err(err) => {
            let mut stdout = io::stdout();
            let _ = first_error([
                disable_raw_mode(),
                execute!(stdout, LeaveAlternateScreen, DisableMouseCapture),
            ]);
            return Err(err.into());
        }
    };

    let mut app = CalculatorApp::new();
    let result = run_app(&mut terminal, &mut app);

    // Restore even when the loop failed; the loop error wins
    let restored = restore_terminal(&mut terminal);
    result.and(restored)
}

/// Runs every restore step, even after one fails
fn restore_terminal<B: Backend + io::Write>(terminal: &mut Terminal<B>) -> CliResult<()> {
    let raw_mode = disable_raw_mode();
    let screen = execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    );
    let cursor = terminal.show_cursor();
    first_error([raw_mode, screen, cursor]).map_err(CliError::from)
}

/// The first failure among steps that have all already run
fn first_error(steps: impl IntoIterator<Item = io::Result<()>>) -> io::Result<()> {
    steps.into_iter().fold(Ok(()), |first, step| match first {
        Ok(()) => step,
        failed => {
            if let Err(err) = step {
                warn!(%err, "terminal restore step failed");
            }
            failed
        }
    })
}

/// Draw, read one event, apply it; until the app quits
pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut CalculatorApp) -> CliResult<()> {
    let input = InputHandler::new();

    while !app.should_quit() {
        let area = terminal.draw(|f| render(app, f))?.area;
        let action = translate(&input, app, area, event::read()?);
        if action != KeyAction::None {
            debug!(?action, "input");
        }
        app.handle_action(action);
    }

    Ok(())
}

/// Maps a terminal event to an action against the keypad drawn in `area`
pub fn translate(input: &InputHandler, app: &CalculatorApp, area: Rect, event: Event) -> KeyAction {
    match event {
        Event::Key(key) => input.handle_key(key),
        Event::Mouse(mouse) => input.handle_mouse(mouse, app.keypad(), keypad_area(area)),
        _ => KeyAction::None,
    }
}
