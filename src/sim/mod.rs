//! Simulation module
//!
//! All gameplay logic lives here. This module has no rendering, input or
//! timing dependencies:
//! - Caller supplies (already clamped) elapsed time and player lane
//! - Tuning comes in through `SimConfig`
//! - One tick always runs spawn, motion, judge in that order

pub mod autopilot;
pub mod config;
pub mod judge;
pub mod motion;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::choose_lane;
pub use config::{ConfigError, SimConfig};
pub use judge::Judgement;
pub use state::{Obstacle, ObstacleKind, PLAYER_ROW_OFFSET, SimState, player_row};
pub use tick::{TickOutcome, initialize, initialize_seeded, tick};
