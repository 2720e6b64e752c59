//! Kerplunk - A terminal lane-dodging arcade game
//!
//! Core modules:
//! - `sim`: Simulation engine (spawning, motion, scoring, collisions)
//! - `renderer`: Terminal and plain-console rendering backends
//! - `platform`: Keyboard input sources
//! - `game`: Frame loop driving the simulation
//! - `settings`: Driver settings and JSON overrides

pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Backend, Settings};

/// Game configuration constants
pub mod consts {
    /// Default number of lanes
    pub const LANE_COUNT: usize = 5;
    /// Default frame rate for the driver loop
    pub const FPS: f32 = 18.0;
    /// Largest elapsed time handed to a single tick (seconds)
    pub const MAX_FRAME_DT: f32 = 0.2;

    /// Player marker art
    pub const PLAYER_ART: &str = "<P>";

    /// Minimum terminal size the field renders at
    pub const MIN_WIDTH: u16 = 40;
    pub const MIN_HEIGHT: u16 = 12;

    /// Field size used when the terminal can't be queried
    pub const FALLBACK_WIDTH: u16 = 80;
    pub const FALLBACK_HEIGHT: u16 = 24;
}

/// Clamp a lane step to `[0, lane_count)`
#[inline]
pub fn step_lane(lane: usize, delta: i32, lane_count: usize) -> usize {
    let max = lane_count.saturating_sub(1) as i64;
    (lane as i64 + delta as i64).clamp(0, max) as usize
}
