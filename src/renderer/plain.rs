//! Plain console renderer
//!
//! Clears the screen and prints the whole grid each frame. Needs no raw mode
//! or alternate screen, at the cost of flicker.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};

use super::Renderer;
use super::layout::compose;
use crate::consts::{FALLBACK_HEIGHT, FALLBACK_WIDTH};
use crate::sim::SimState;

pub struct PlainRenderer<W: Write = io::Stdout> {
    out: W,
    width: u16,
    height: u16,
}

impl PlainRenderer {
    /// Render to stdout, sized from the terminal when it can be queried
    pub fn stdout() -> Self {
        let (width, height) =
            crossterm::terminal::size().unwrap_or((FALLBACK_WIDTH, FALLBACK_HEIGHT));
        Self::new(io::stdout(), width, height)
    }
}

impl<W: Write> PlainRenderer<W> {
    pub fn new(out: W, width: u16, height: u16) -> Self {
        Self { out, width, height }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for PlainRenderer<W> {
    fn name(&self) -> &'static str {
        "plain"
    }

    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn draw(&mut self, state: &SimState, lane_count: usize) -> Result<()> {
        let frame = compose(state, lane_count, self.width, self.height);
        let text: Vec<String> = frame.rows().collect();
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        writeln!(self.out, "{}", text.join("\n"))?;
        self.out.flush()?;
        Ok(())
    }

    fn show_message(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{}", message)?;
        self.out.flush()?;
        Ok(())
    }
}
