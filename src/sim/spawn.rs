//! Obstacle spawning
//!
//! Spawn cadence tightens as the run speeds up, down to a hard floor.

use rand::Rng;

use super::config::SimConfig;
use super::state::{Obstacle, ObstacleKind, SimState};

/// Append one obstacle in a random lane, somewhere above the visible field
pub fn spawn_obstacle(state: &mut SimState, config: &SimConfig) {
    let lane = state.rng.random_range(0..config.lane_count());
    let kind = ObstacleKind::random(&mut state.rng);
    let distance = state.rng.random_range(0.0..=config.max_initial_distance);
    log::debug!("Spawn {:?} in lane {} at -{:.2}", kind, lane, distance);
    state.obstacles.push(Obstacle::new(lane, -distance, kind));
}

/// Count down the spawn timer; on expiry spawn once and draw the next delay
///
/// Returns true if an obstacle was spawned.
pub fn update_spawner(state: &mut SimState, config: &SimConfig, dt: f32) -> bool {
    state.spawn_timer -= dt;
    if state.spawn_timer > 0.0 {
        return false;
    }

    let interval = config.spawn_interval(state.speed_multiplier);
    let (lo, hi) = config.spawn_jitter;
    state.spawn_timer = state.rng.random_range(interval * lo..=interval * hi);
    spawn_obstacle(state, config);
    true
}
