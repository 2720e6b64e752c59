//! Crossterm renderer
//!
//! Owns raw mode and the alternate screen for its lifetime.

use std::io::{self, Stdout, Write};

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::Print,
    terminal::{
        self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};

use super::Renderer;
use super::layout::compose;
use crate::consts::{FALLBACK_HEIGHT, FALLBACK_WIDTH};
use crate::sim::SimState;

pub struct TerminalRenderer {
    stdout: Stdout,
}

impl TerminalRenderer {
    /// Enter raw mode and the alternate screen
    pub fn start() -> Result<Self> {
        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enable raw mode")?;
        if let Err(err) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(err).context("failed to enter alternate screen");
        }
        Ok(Self { stdout })
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        if let Err(err) = execute!(self.stdout, Show, LeaveAlternateScreen) {
            log::error!("failed to leave alternate screen: {}", err);
        }
        if let Err(err) = disable_raw_mode() {
            log::error!("failed to disable raw mode: {}", err);
        }
    }
}

impl Renderer for TerminalRenderer {
    fn name(&self) -> &'static str {
        "terminal"
    }

    fn size(&self) -> (u16, u16) {
        terminal::size().unwrap_or((FALLBACK_WIDTH, FALLBACK_HEIGHT))
    }

    fn draw(&mut self, state: &SimState, lane_count: usize) -> Result<()> {
        let (width, height) = self.size();
        let frame = compose(state, lane_count, width, height);

        // Every row is full width, so overwriting replaces the last frame
        for (y, row) in frame.rows().enumerate() {
            // Writing the bottom-right cell would scroll the screen
            let row: String = if y + 1 == frame.height as usize {
                row.chars().take(width.saturating_sub(1) as usize).collect()
            } else {
                row
            };
            queue!(self.stdout, MoveTo(0, y as u16), Print(row))?;
        }
        self.stdout.flush()?;
        Ok(())
    }

    fn show_message(&mut self, message: &str) -> Result<()> {
        let (width, _) = self.size();
        let text: String = message.chars().take(width.saturating_sub(1) as usize).collect();
        queue!(self.stdout, Clear(ClearType::All), MoveTo(0, 0), Print(text))?;
        self.stdout.flush()?;
        Ok(())
    }
}
