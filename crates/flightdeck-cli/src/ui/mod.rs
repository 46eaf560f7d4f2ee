//! Terminal UI for the HUDs and the status surface

mod dashboard;
mod hud_view;
mod status_view;

pub use dashboard::Dashboard;
pub use status_view::StatusPanel;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use std::io;
use std::time::Duration;

/// Owns the terminal while a UI is on screen; restores it on drop
pub struct TuiSession {
    terminal: DefaultTerminal,
}

impl TuiSession {
    /// Enter the alternate screen in raw mode
    pub fn start() -> Self {
        Self {
            terminal: ratatui::init(),
        }
    }

    pub fn terminal(&mut self) -> &mut DefaultTerminal {
        &mut self.terminal
    }
}

impl Drop for TuiSession {
    fn drop(&mut self) {
        ratatui::restore();
    }
}

/// Drain pending input without blocking; true when the user asked to quit
pub fn quit_requested() -> io::Result<bool> {
    while event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(true);
                }
                _ => {}
            }
        }
    }
    Ok(false)
}
