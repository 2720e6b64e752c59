//! Simulation tuning
//!
//! Every number the engine consults lives here so tests (and settings files)
//! can override them without touching globals.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected tuning values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("at least one lane speed is required")]
    NoLanes,
    #[error("lane {lane} speed {speed} must be finite and positive")]
    InvalidLaneSpeed { lane: usize, speed: f32 },
    #[error("ramp factor {0} must be greater than 1.0")]
    InvalidRampFactor(f32),
    #[error("ramp_every must be at least 1")]
    ZeroRampEvery,
    #[error("invalid configuration: {0}")]
    InvalidValue(&'static str),
}

/// Immutable tuning for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Base speed per lane in rows/sec; lane count is `lane_speeds.len()`
    pub lane_speeds: Vec<f32>,
    /// Spawn interval at multiplier 1.0 (seconds, before the 0.9 factor)
    pub base_spawn_interval: f32,
    /// Hard floor on the spawn interval
    pub min_spawn_interval: f32,
    /// Multiplier weighting when shrinking the spawn interval
    pub spawn_speed_factor: f32,
    /// Jitter range applied to the spawn interval
    pub spawn_jitter: (f32, f32),
    /// How far above the field a new obstacle may start (rows)
    pub max_initial_distance: f32,
    /// Speed multiplier step applied on each ramp
    pub ramp_factor: f32,
    /// Obstacles passed between ramps
    pub ramp_every: u32,
    /// Obstacles spawned by `initialize`
    pub seed_count: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            lane_speeds: vec![0.9, 1.2, 1.6, 1.0, 1.4],
            base_spawn_interval: 0.8,
            min_spawn_interval: 0.15,
            spawn_speed_factor: 0.9,
            spawn_jitter: (0.6, 1.4),
            max_initial_distance: 8.0,
            ramp_factor: 1.22,
            ramp_every: 10,
            seed_count: 6,
        }
    }
}

impl SimConfig {
    pub fn lane_count(&self) -> usize {
        self.lane_speeds.len()
    }

    /// Base speed for `lane` (rows/sec at multiplier 1.0)
    #[inline]
    pub fn lane_speed(&self, lane: usize) -> f32 {
        self.lane_speeds[lane]
    }

    /// Unjittered spawn interval at the given speed multiplier
    pub fn spawn_interval(&self, speed_multiplier: f32) -> f32 {
        (self.base_spawn_interval / (speed_multiplier * self.spawn_speed_factor))
            .max(self.min_spawn_interval)
    }

    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lane_speeds.is_empty() {
            return Err(ConfigError::NoLanes);
        }
        for (lane, &speed) in self.lane_speeds.iter().enumerate() {
            if !speed.is_finite() || speed <= 0.0 {
                return Err(ConfigError::InvalidLaneSpeed { lane, speed });
            }
        }
        if !(self.ramp_factor > 1.0) || !self.ramp_factor.is_finite() {
            return Err(ConfigError::InvalidRampFactor(self.ramp_factor));
        }
        if self.ramp_every == 0 {
            return Err(ConfigError::ZeroRampEvery);
        }
        if !(self.min_spawn_interval > 0.0) || !(self.base_spawn_interval > 0.0) {
            return Err(ConfigError::InvalidValue("spawn intervals must be positive"));
        }
        if !(self.spawn_speed_factor > 0.0) {
            return Err(ConfigError::InvalidValue("spawn_speed_factor must be positive"));
        }
        let (lo, hi) = self.spawn_jitter;
        if !(lo > 0.0) || lo > hi {
            return Err(ConfigError::InvalidValue(
                "spawn_jitter must be a positive, ordered range",
            ));
        }
        if !(self.max_initial_distance >= 0.0) {
            return Err(ConfigError::InvalidValue("max_initial_distance must not be negative"));
        }
        Ok(())
    }
}
