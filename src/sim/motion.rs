//! Obstacle motion and the difficulty ramp

use super::config::SimConfig;
use super::state::SimState;

/// Advance every obstacle by `dt` seconds at its lane's current speed
///
/// `dt` is trusted as-is; clamping after a stall is the driver's job.
pub fn advance_obstacles(state: &mut SimState, config: &SimConfig, dt: f32) {
    let multiplier = state.speed_multiplier;
    for obstacle in &mut state.obstacles {
        obstacle.position += dt * config.lane_speed(obstacle.lane) * multiplier;
    }
}

/// Raise the global speed by one ramp step
pub fn apply_ramp(state: &mut SimState, config: &SimConfig) {
    let before = state.speed_multiplier;
    state.speed_multiplier *= config.ramp_factor;
    log::info!(
        "Speed ramp at {} passed: {:.2} -> {:.2}",
        state.passed_count,
        before,
        state.speed_multiplier
    );
}

/// Whether reaching `passed_count` triggers a ramp
#[inline]
pub fn is_ramp_point(passed_count: u32, config: &SimConfig) -> bool {
    passed_count > 0 && passed_count.is_multiple_of(config.ramp_every)
}
