//! Demo/headless autopilot
//!
//! Moves at most one lane per tick, like a player would, toward the
//! neighbouring lane whose next obstacle is furthest away in time.

use super::config::SimConfig;
use super::state::SimState;

/// Seconds until the next obstacle in `lane` enters the player's cell
///
/// Infinite if the lane is clear.
pub fn time_to_impact(state: &SimState, config: &SimConfig, lane: usize) -> f32 {
    let row = state.player_row();
    // Collision starts once the obstacle rounds to the player row
    let hit_from = row as f32 - 0.5;
    let speed = config.lane_speed(lane) * state.speed_multiplier();

    state
        .obstacles()
        .iter()
        .filter(|o| o.lane == lane && o.nearest_row() <= row)
        .map(|o| (hit_from - o.position).max(0.0) / speed)
        .fold(f32::INFINITY, f32::min)
}

/// Pick the safest lane reachable this tick
pub fn choose_lane(state: &SimState, config: &SimConfig) -> usize {
    let current = state.player_lane();
    let last = config.lane_count().saturating_sub(1);
    let mut candidates = vec![current];
    if current > 0 {
        candidates.push(current - 1);
    }
    if current < last {
        candidates.push(current + 1);
    }

    let mut best = current;
    let mut best_time = time_to_impact(state, config, current);
    for &lane in &candidates[1..] {
        let time = time_to_impact(state, config, lane);
        // Strictly better only; staying put wins ties
        if time > best_time {
            best = lane;
            best_time = time;
        }
    }
    best
}
