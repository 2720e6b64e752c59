//! Frame loop
//!
//! Measures and clamps elapsed time, applies input, ticks the simulation,
//! paints the frame and sleeps off the rest of the frame budget.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::consts::FALLBACK_HEIGHT;
use crate::platform::{Command, InputSource};
use crate::renderer::Renderer;
use crate::renderer::layout::{game_over_message, game_over_prompt};
use crate::settings::Settings;
use crate::sim::{SimState, choose_lane, initialize, initialize_seeded, tick};
use crate::step_lane;

/// How a run went, reported when it ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub ticks: u64,
    /// Total clamped `dt` fed to the simulation
    pub sim_seconds: f32,
    pub passed: u32,
    pub score: u64,
    pub speed_multiplier: f32,
    /// False if the run ended in a collision
    pub alive: bool,
}

impl RunSummary {
    fn from_state(state: &SimState, ticks: u64, sim_seconds: f32) -> Self {
        Self {
            ticks,
            sim_seconds,
            passed: state.passed_count(),
            score: state.score(),
            speed_multiplier: state.speed_multiplier(),
            alive: state.is_alive(),
        }
    }
}

fn new_state(settings: &Settings, field_height: u16, seed: Option<u64>) -> SimState {
    match seed {
        Some(seed) => initialize_seeded(&settings.sim, field_height, seed),
        None => initialize(&settings.sim, field_height),
    }
}

/// Game instance tying the simulation to a display and an input source
pub struct Game {
    settings: Settings,
    state: SimState,
    renderer: Box<dyn Renderer>,
    input: Box<dyn InputSource>,
    /// Lane the player is steering toward
    lane: usize,
    /// Wait for a key after the game-over message
    pause_on_exit: bool,
}

impl Game {
    pub fn new(
        settings: Settings,
        seed: Option<u64>,
        renderer: Box<dyn Renderer>,
        input: Box<dyn InputSource>,
    ) -> Self {
        let (_, height) = renderer.size();
        let state = new_state(&settings, height, seed);
        let lane = state.player_lane();
        log::info!(
            "Game ready: renderer={}, input={}, autopilot={}",
            renderer.name(),
            input.name(),
            settings.autopilot
        );
        Self {
            settings,
            state,
            renderer,
            input,
            lane,
            pause_on_exit: false,
        }
    }

    pub fn with_exit_pause(mut self, pause: bool) -> Self {
        self.pause_on_exit = pause;
        self
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    /// Apply queued commands; returns true if the player asked to quit
    fn apply_commands(&mut self, commands: &[Command]) -> bool {
        let lane_count = self.settings.sim.lane_count();
        for command in commands {
            match command {
                Command::Quit => return true,
                movement => self.lane = step_lane(self.lane, movement.lane_delta(), lane_count),
            }
        }
        false
    }

    /// Run until the player quits or collides
    pub fn run(&mut self) -> Result<RunSummary> {
        let frame_time = Duration::from_secs_f32(self.settings.frame_time());
        let lane_count = self.settings.sim.lane_count();
        let mut ticks = 0u64;
        let mut sim_seconds = 0.0f32;
        let mut last = Instant::now();

        loop {
            let frame_start = Instant::now();
            let dt = self
                .settings
                .clamp_dt(frame_start.duration_since(last).as_secs_f32());
            last = frame_start;

            let (_, height) = self.renderer.size();
            self.state.set_field_height(height);

            let commands = self.input.poll()?;
            if self.apply_commands(&commands) {
                log::info!("Player quit after {} ticks", ticks);
                break;
            }
            if self.settings.autopilot {
                self.lane = choose_lane(&self.state, &self.settings.sim);
            }

            let outcome = tick(&mut self.state, &self.settings.sim, dt, self.lane);
            ticks += 1;
            sim_seconds += dt;

            self.renderer.draw(&self.state, lane_count)?;
            if !outcome.alive {
                break;
            }

            let spent = frame_start.elapsed();
            if spent < frame_time {
                thread::sleep(frame_time - spent);
            }
        }

        let summary = RunSummary::from_state(&self.state, ticks, sim_seconds);
        log::info!(
            "Run over: passed={}, speed={:.2}, alive={}",
            summary.passed,
            summary.speed_multiplier,
            summary.alive
        );
        let passed = self.state.passed_count();
        let message = if self.pause_on_exit {
            game_over_prompt(passed)
        } else {
            game_over_message(passed)
        };
        self.renderer.show_message(&message)?;
        if self.pause_on_exit {
            self.input.wait_for_key()?;
        }
        Ok(summary)
    }
}

/// Drive a run with the autopilot and no display, at a fixed `dt` of one frame
pub fn run_headless(settings: &Settings, ticks: u64, seed: Option<u64>) -> RunSummary {
    let config = &settings.sim;
    let dt = settings.clamp_dt(settings.frame_time());
    let mut state = new_state(settings, FALLBACK_HEIGHT, seed);
    let mut done = 0u64;

    while done < ticks {
        let lane = choose_lane(&state, config);
        let outcome = tick(&mut state, config, dt, lane);
        done += 1;
        if !outcome.alive {
            break;
        }
    }

    let summary = RunSummary::from_state(&state, done, done as f32 * dt);
    log::info!(
        "Headless run: {} ticks, passed={}, alive={}",
        summary.ticks,
        summary.passed,
        summary.alive
    );
    summary
}
