/*
[INPUT]:  Crossterm stdout, raw mode, mouse capture
[OUTPUT]: BoardTerminal that owns the ratatui backend for the board's lifetime
[POS]:    TUI terminal lifecycle
[UPDATE]: When the board needs another terminal mode (keyboard enhancement, focus events)
*/

use std::io;

use anyhow::{Context, Result};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// Raw mode, alternate screen, and mouse capture for drags; undone on drop.
pub(super) struct BoardTerminal {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl BoardTerminal {
    pub(super) fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
            restore();
            return Err(err).context("enter board screen");
        }
        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(err) => {
                restore();
                Err(err).context("create terminal backend")
            }
        }
    }

    pub(super) fn draw<F>(&mut self, render: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(render)?;
        Ok(())
    }
}

impl Drop for BoardTerminal {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        restore();
    }
}

fn restore() {
    let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}
