//! Driver settings and preferences
//!
//! Loaded from an optional JSON file; anything missing falls back to defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::consts::{FPS, MAX_FRAME_DT};
use crate::sim::SimConfig;

/// Display/input backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Terminal if it starts, plain console otherwise
    #[default]
    Auto,
    Terminal,
    Plain,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Auto => "auto",
            Backend::Terminal => "terminal",
            Backend::Plain => "plain",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Some(Backend::Auto),
            "terminal" | "term" | "crossterm" => Some(Backend::Terminal),
            "plain" | "console" => Some(Backend::Plain),
            _ => None,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Target frame rate of the driver loop
    pub fps: f32,
    /// Largest `dt` handed to one tick, so a stall doesn't teleport traffic
    pub max_dt: f32,
    pub backend: Backend,
    /// Let the autopilot steer
    pub autopilot: bool,
    /// Simulation tuning
    pub sim: SimConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: FPS,
            max_dt: MAX_FRAME_DT,
            backend: Backend::Auto,
            autopilot: false,
            sim: SimConfig::default(),
        }
    }
}

impl Settings {
    /// Seconds per frame at the target rate
    pub fn frame_time(&self) -> f32 {
        1.0 / self.fps
    }

    /// Clamp a measured frame delta to what one tick may consume
    pub fn clamp_dt(&self, dt: f32) -> f32 {
        dt.clamp(0.0, self.max_dt)
    }

    /// Parse settings from JSON text and validate the tuning
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json).context("malformed settings JSON")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        let settings = Self::from_json(&json)
            .with_context(|| format!("invalid settings in {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.fps.is_finite() || self.fps <= 0.0 {
            anyhow::bail!("fps must be positive, got {}", self.fps);
        }
        if !self.max_dt.is_finite() || self.max_dt <= 0.0 {
            anyhow::bail!("max_dt must be positive, got {}", self.max_dt);
        }
        self.sim.validate().context("invalid simulation tuning")?;
        Ok(())
    }
}
