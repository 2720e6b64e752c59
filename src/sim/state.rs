//! Simulation state and core types
//!
//! Everything a run mutates lives in [`SimState`]; tuning lives in
//! [`SimConfig`](super::SimConfig) and is passed alongside it.

use rand::Rng;
use rand_pcg::Pcg32;

/// Rows between the bottom of the field and the player
pub const PLAYER_ROW_OFFSET: i32 = 3;

/// Row the player occupies for a field of the given height
#[inline]
pub fn player_row(height: u16) -> i32 {
    height as i32 - PLAYER_ROW_OFFSET
}

/// Visual tag for an obstacle; has no gameplay effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Boxcar,
    Bumper,
    Pod,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [
        ObstacleKind::Boxcar,
        ObstacleKind::Bumper,
        ObstacleKind::Pod,
    ];

    pub fn art(&self) -> &'static str {
        match self {
            ObstacleKind::Boxcar => "<#>",
            ObstacleKind::Bumper => "[=]",
            ObstacleKind::Pod => "<o>",
        }
    }

    /// Uniformly random kind
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// An obstacle travelling down one lane
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub lane: usize,
    /// Row coordinate; negative values are above the visible field
    pub position: f32,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub fn new(lane: usize, position: f32, kind: ObstacleKind) -> Self {
        Self {
            lane,
            position,
            kind,
        }
    }

    /// Row used for pass detection
    #[inline]
    pub fn floor_row(&self) -> i32 {
        self.position.floor() as i32
    }

    /// Visually nearest row, used for collision detection and drawing
    #[inline]
    pub fn nearest_row(&self) -> i32 {
        self.position.round_ties_even() as i32
    }
}

/// Complete state of one run
#[derive(Debug, Clone, PartialEq)]
pub struct SimState {
    pub(crate) obstacles: Vec<Obstacle>,
    pub(crate) player_lane: usize,
    pub(crate) passed_count: u32,
    pub(crate) score: u64,
    pub(crate) speed_multiplier: f32,
    /// Seconds until the next spawn
    pub(crate) spawn_timer: f32,
    pub(crate) alive: bool,
    pub(crate) field_height: u16,
    pub(crate) rng: Pcg32,
}

impl SimState {
    /// Empty, living state with the player in the middle lane
    pub(crate) fn new(lane_count: usize, field_height: u16, rng: Pcg32) -> Self {
        Self {
            obstacles: Vec::new(),
            player_lane: lane_count / 2,
            passed_count: 0,
            score: 0,
            speed_multiplier: 1.0,
            spawn_timer: 0.0,
            alive: true,
            field_height,
            rng,
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn player_lane(&self) -> usize {
        self.player_lane
    }

    pub fn passed_count(&self) -> u32 {
        self.passed_count
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    pub fn spawn_timer(&self) -> f32 {
        self.spawn_timer
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn field_height(&self) -> u16 {
        self.field_height
    }

    pub fn player_row(&self) -> i32 {
        player_row(self.field_height)
    }

    /// Track a resized field; the player row follows on the next tick
    pub fn set_field_height(&mut self, height: u16) {
        if height != self.field_height {
            log::debug!("Field height {} -> {}", self.field_height, height);
            self.field_height = height;
        }
    }
}
