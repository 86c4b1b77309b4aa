use std::{
    io::{stdout, Stdout},
    ops::{Deref, DerefMut},
};

use color_eyre::eyre::Result;
use crossterm::{
    cursor,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use tracing::error;

pub type Backend = CrosstermBackend<Stdout>;

/// Alternate-screen terminal session. Raw mode stays off so Ctrl-C still raises SIGINT.
pub struct Tui {
    pub terminal: ratatui::Terminal<Backend>,
    active: bool,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let terminal = ratatui::Terminal::new(CrosstermBackend::new(stdout()))?;
        Ok(Self { terminal, active: false })
    }

    pub fn enter(&mut self) -> Result<()> {
        crossterm::execute!(stdout(), EnterAlternateScreen, cursor::Hide)?;
        self.active = true;
        self.terminal.clear()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.terminal.flush()?;
        crossterm::execute!(stdout(), LeaveAlternateScreen, cursor::Show)?;
        self.active = false;
        Ok(())
    }
}

impl Deref for Tui {
    type Target = ratatui::Terminal<Backend>;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for Tui {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if self.active {
            if let Err(r) = self.exit() {
                error!("Unable to exit Terminal: {:?}", r);
            }
        }
    }
}
