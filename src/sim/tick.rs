//! Simulation tick
//!
//! Each tick runs spawn, motion, then judging, always in that order.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::config::SimConfig;
use super::judge::judge;
use super::motion::advance_obstacles;
use super::spawn::{spawn_obstacle, update_spawner};
use super::state::SimState;

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// A new obstacle was spawned
    pub spawned: bool,
    /// Obstacles that passed the player
    pub passed: u32,
    /// The speed multiplier increased
    pub ramped: bool,
    /// Run is still alive after the tick
    pub alive: bool,
}

/// Start a run, seeding the RNG from OS entropy
pub fn initialize(config: &SimConfig, field_height: u16) -> SimState {
    let rng = Pcg32::from_rng(&mut rand::rng());
    initialize_with_rng(config, field_height, rng)
}

/// Start a run with a fixed RNG seed
pub fn initialize_seeded(config: &SimConfig, field_height: u16, seed: u64) -> SimState {
    initialize_with_rng(config, field_height, Pcg32::seed_from_u64(seed))
}

fn initialize_with_rng(config: &SimConfig, field_height: u16, rng: Pcg32) -> SimState {
    let mut state = SimState::new(config.lane_count(), field_height, rng);
    // Start with traffic on the field
    for _ in 0..config.seed_count {
        spawn_obstacle(&mut state, config);
    }
    log::info!(
        "Run initialized: {} lanes, {} obstacles, player row {}",
        config.lane_count(),
        state.obstacles.len(),
        state.player_row()
    );
    state
}

/// Advance the run by `dt` seconds with the player in `player_lane`
///
/// A dead state is left untouched.
pub fn tick(state: &mut SimState, config: &SimConfig, dt: f32, player_lane: usize) -> TickOutcome {
    if !state.alive {
        return TickOutcome::default();
    }
    assert!(
        player_lane < config.lane_count(),
        "player lane {} out of range",
        player_lane
    );
    state.player_lane = player_lane;

    let spawned = update_spawner(state, config, dt);
    advance_obstacles(state, config, dt);
    let judgement = judge(state, config);

    if judgement.collided {
        log::info!(
            "Collision in lane {}: {} passed, speed {:.2}",
            state.player_lane,
            state.passed_count,
            state.speed_multiplier
        );
    }

    TickOutcome {
        spawned,
        passed: judgement.passed,
        ramped: judgement.ramps > 0,
        alive: state.alive,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FPS;
    use crate::sim::state::{Obstacle, ObstacleKind};

    #[test]
    fn test_initialize_seeds_traffic() {
        let config = SimConfig::default();
        let state = initialize(&config, 24);
        assert_eq!(state.obstacles().len(), 6);
        assert!(state.is_alive());
        assert_eq!(state.passed_count(), 0);
        assert_eq!(state.score(), 0);
        assert_eq!(state.speed_multiplier(), 1.0);
        for obstacle in state.obstacles() {
            assert!(obstacle.lane < 5);
            assert!(obstacle.position <= 0.0);
        }
    }

    #[test]
    fn test_dead_state_is_frozen() {
        let config = SimConfig::default();
        let mut state = initialize_seeded(&config, 24, 42);
        state.alive = false;
        let before = state.clone();

        for lane in 0..5 {
            let outcome = tick(&mut state, &config, 0.1, lane);
            assert!(!outcome.alive);
            assert_eq!(outcome, TickOutcome::default());
        }
        assert_eq!(state, before);
    }

    #[test]
    fn test_tick_writes_player_lane() {
        let config = SimConfig::default();
        let mut state = initialize_seeded(&config, 24, 5);
        state.obstacles.clear();

        tick(&mut state, &config, 0.01, 4);
        assert_eq!(state.player_lane(), 4);
    }

    #[test]
    #[should_panic(expected = "player lane 5 out of range")]
    fn test_out_of_range_lane_fails_fast() {
        let config = SimConfig::default();
        let mut state = initialize_seeded(&config, 24, 6);
        tick(&mut state, &config, 0.05, 5);
    }

    #[test]
    fn test_tick_order_spawn_move_judge() {
        let config = SimConfig::default();
        let mut state = initialize_seeded(&config, 13, 9);
        state.obstacles.clear();
        state.spawn_timer = 10.0;
        // Player row 10; lane 2 moves 1.6 rows/sec
        state.obstacles.push(Obstacle::new(2, 8.5, ObstacleKind::Pod));

        let outcome = tick(&mut state, &config, 0.5, 2);
        assert!(!outcome.spawned);
        // 8.5 + 0.8 = 9.3 rounds to 9, no hit yet
        assert!(outcome.alive);

        let outcome = tick(&mut state, &config, 0.25, 2);
        // 9.3 + 0.4 = 9.7 rounds to 10
        assert!(!outcome.alive);
        assert!(!state.is_alive());
    }

    #[test]
    fn test_dodging_scores() {
        let config = SimConfig::default();
        let mut state = initialize_seeded(&config, 13, 11);
        state.obstacles.clear();
        state.spawn_timer = 10.0;
        state.obstacles.push(Obstacle::new(0, 9.0, ObstacleKind::Boxcar));

        // Lane 0 moves 0.9 rows/sec; player stays clear in lane 4
        let mut passed = 0;
        for _ in 0..5 {
            passed += tick(&mut state, &config, 0.5, 4).passed;
        }
        assert_eq!(passed, 1);
        assert_eq!(state.score(), 1);
        assert!(state.obstacles().is_empty());
        assert!(state.is_alive());
    }

    #[test]
    fn test_ramp_reported_on_boundary() {
        let config = SimConfig::default();
        let mut state = initialize_seeded(&config, 13, 3);
        state.obstacles.clear();
        state.spawn_timer = 10.0;
        state.passed_count = 9;
        state.obstacles.push(Obstacle::new(0, 10.9, ObstacleKind::Boxcar));

        let outcome = tick(&mut state, &config, 0.2, 4);
        assert_eq!(outcome.passed, 1);
        assert!(outcome.ramped);
        assert!(state.speed_multiplier() > 1.0);

        state.obstacles.push(Obstacle::new(0, 10.9, ObstacleKind::Boxcar));
        let before = state.speed_multiplier();
        let outcome = tick(&mut state, &config, 0.2, 4);
        assert_eq!(outcome.passed, 1);
        assert!(!outcome.ramped);
        assert_eq!(state.speed_multiplier(), before);
    }

    #[test]
    fn test_long_run_stays_sane() {
        let config = SimConfig::default();
        let mut state = initialize_seeded(&config, 24, 12345);
        let dt = 1.0 / FPS;
        let mut last_speed = state.speed_multiplier();

        for i in 0..10_000 {
            let lane = (i / 40) % 5;
            tick(&mut state, &config, dt, lane);
            assert!(state.speed_multiplier() >= last_speed);
            assert!(state.speed_multiplier() >= 1.0);
            assert!(state.obstacles().iter().all(|o| o.lane < 5));
            last_speed = state.speed_multiplier();
        }
        assert_eq!(state.score(), state.passed_count() as u64);
    }

    #[test]
    fn test_determinism() {
        // Same seed and inputs give identical runs
        let config = SimConfig::default();
        let mut state1 = initialize_seeded(&config, 24, 99999);
        let mut state2 = initialize_seeded(&config, 24, 99999);

        for i in 0..200 {
            let lane = i % 5;
            tick(&mut state1, &config, 1.0 / 18.0, lane);
            tick(&mut state2, &config, 1.0 / 18.0, lane);
        }
        assert_eq!(state1, state2);
    }
}
