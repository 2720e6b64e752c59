//! Rendering backends
//!
//! The frame is composed once in `layout`; each backend just presents it.

pub mod layout;
pub mod plain;
pub mod terminal;

use anyhow::Result;

use crate::sim::SimState;

pub use layout::Frame;
pub use plain::PlainRenderer;
pub use terminal::TerminalRenderer;

/// A display surface the driver paints once per frame
pub trait Renderer {
    fn name(&self) -> &'static str;

    /// Current surface size as (width, height)
    fn size(&self) -> (u16, u16);

    /// Paint the current state
    fn draw(&mut self, state: &SimState, lane_count: usize) -> Result<()>;

    /// Show the end-of-run message
    fn show_message(&mut self, message: &str) -> Result<()>;
}
