//! TUI shell: terminal lifecycle, event loop, key handling.
//!
//! Rendering itself lives in [`grid`]; this module owns raw mode, the
//! alternate screen, and the translation of key events into `AppState`
//! mutations.

pub mod grid;
pub mod styles;

pub use styles::CalendarStyles;

use crate::engine::Granularity;
use crate::state::AppState;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during TUI operations.
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations.
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// Main TUI application.
///
/// Generic over backend to support testing with TestBackend.
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    state: AppState,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application.
    ///
    /// Sets up the terminal in raw mode with the alternate screen.
    pub fn new(state: AppState) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal, state })
    }

    /// Run the main event loop. Returns when the user quits.
    pub fn run(&mut self) -> Result<(), TuiError> {
        const POLL_INTERVAL: Duration = Duration::from_millis(250);

        // Initial render so the screen has content immediately
        self.draw()?;

        loop {
            if event::poll(POLL_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                        self.draw()?;
                    }
                    Event::Resize(_, _) => {
                        self.draw()?;
                    }
                    _ => {}
                }
            }
        }
    }

}

/// Restore the terminal to its normal state.
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create an app over an existing terminal (used by tests).
    #[cfg(test)]
    fn with_terminal(terminal: Terminal<B>, state: AppState) -> Self {
        Self { terminal, state }
    }

    /// Draw one frame.
    fn draw(&mut self) -> Result<(), TuiError> {
        self.terminal.draw(|frame| {
            grid::render_calendar(frame, &self.state);
        })?;
        Ok(())
    }

    /// Handle a single keyboard event.
    ///
    /// Returns true if the app should quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Left => self.state.prev_period(),
            KeyCode::Right => self.state.next_period(),
            KeyCode::Char('t') => self.state.goto_today(),
            KeyCode::Char('g') => self.state.cycle_granularity(),
            KeyCode::Char('1') => self.state.set_granularity(Granularity::Week),
            KeyCode::Char('2') => self.state.set_granularity(Granularity::Month),
            KeyCode::Char('3') => self.state.set_granularity(Granularity::Quarter),
            KeyCode::Char('4') => self.state.set_granularity(Granularity::Semester),
            KeyCode::Tab => self.state.select_next(),
            KeyCode::BackTab => self.state.select_prev(),
            KeyCode::Char('<') => self.state.shift_selected(-1),
            KeyCode::Char('>') => self.state.shift_selected(1),
            _ => {
                debug!(?key, "Unhandled key");
            }
        }
        false
    }
}

/// Run the TUI with the given state, restoring the terminal on exit.
pub fn run(state: AppState) -> Result<(), TuiError> {
    let mut app = TuiApp::new(state)?;
    let result = app.run();
    let restore_result = restore_terminal();
    result.and(restore_result)
}
