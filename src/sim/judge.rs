//! Pass scoring and collision detection
//!
//! Pass detection compares the floored row while collision compares the
//! nearest row, so the two hit windows differ slightly. Passes are judged
//! first and passed obstacles are gone before collisions are checked.

use super::config::SimConfig;
use super::motion::{apply_ramp, is_ramp_point};
use super::state::SimState;

/// Result of judging one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Judgement {
    /// Obstacles that scrolled past the player this tick
    pub passed: u32,
    /// Number of speed ramps applied this tick
    pub ramps: u32,
    /// Player was hit
    pub collided: bool,
}

/// Remove obstacles that passed the player row, scoring one point each
///
/// Returns (passed, ramps).
pub fn score_passed(state: &mut SimState, config: &SimConfig) -> (u32, u32) {
    let pass_row = state.player_row() + 1;
    let (passed, retained): (Vec<_>, Vec<_>) = std::mem::take(&mut state.obstacles)
        .into_iter()
        .partition(|o| o.floor_row() >= pass_row);
    state.obstacles = retained;

    let mut ramps = 0;
    for _ in &passed {
        state.passed_count += 1;
        state.score += 1;
        if is_ramp_point(state.passed_count, config) {
            apply_ramp(state, config);
            ramps += 1;
        }
    }
    (passed.len() as u32, ramps)
}

/// Whether any remaining obstacle occupies the player's cell
pub fn detect_collision(state: &SimState) -> bool {
    let row = state.player_row();
    state
        .obstacles
        .iter()
        .any(|o| o.lane == state.player_lane && o.nearest_row() == row)
}

/// Run pass detection then collision detection
pub fn judge(state: &mut SimState, config: &SimConfig) -> Judgement {
    let (passed, ramps) = score_passed(state, config);
    let collided = detect_collision(state);
    if collided {
        state.alive = false;
    }
    Judgement {
        passed,
        ramps,
        collided,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Obstacle, ObstacleKind};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Field of height 13 puts the player on row 10
    fn state_with(obstacles: &[(usize, f32)], player_lane: usize) -> SimState {
        let mut state = SimState::new(5, 13, Pcg32::seed_from_u64(0));
        state.player_lane = player_lane;
        for &(lane, position) in obstacles {
            state.obstacles.push(Obstacle::new(lane, position, ObstacleKind::Bumper));
        }
        state
    }

    #[test]
    fn test_collision_on_nearest_row() {
        let config = SimConfig::default();
        let mut state = state_with(&[(3, 9.6)], 3);

        let judgement = judge(&mut state, &config);
        assert!(judgement.collided);
        assert_eq!(judgement.passed, 0);
        assert!(!state.alive);
    }

    #[test]
    fn test_other_lane_is_safe() {
        let config = SimConfig::default();
        let mut state = state_with(&[(2, 9.6)], 3);

        let judgement = judge(&mut state, &config);
        assert!(!judgement.collided);
        assert!(state.alive);
    }

    #[test]
    fn test_floor_window_does_not_pass_early() {
        let config = SimConfig::default();
        // floor(10.6) = 10, below the pass row of 11; rounds to 11 so no hit either
        let mut state = state_with(&[(3, 10.6)], 3);

        let judgement = judge(&mut state, &config);
        assert_eq!(judgement.passed, 0);
        assert!(!judgement.collided);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_passed_obstacle_is_not_checked_for_collision() {
        let config = SimConfig::default();
        // floor(11.2) = 11 passes; it never reaches collision detection
        let mut state = state_with(&[(3, 11.2), (0, 4.0)], 3);

        let judgement = judge(&mut state, &config);
        assert_eq!(judgement.passed, 1);
        assert!(!judgement.collided);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].lane, 0);
        assert_eq!(state.passed_count, 1);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_ramp_on_tenth_pass() {
        let config = SimConfig::default();
        let mut state = state_with(&[(1, 12.0), (4, 15.0)], 0);
        state.passed_count = 9;
        state.score = 9;

        let judgement = judge(&mut state, &config);
        assert_eq!(judgement.passed, 2);
        assert_eq!(judgement.ramps, 1);
        assert_eq!(state.passed_count, 11);
        assert!((state.speed_multiplier - 1.22).abs() < 1e-6);
    }

    #[test]
    fn test_no_ramp_off_boundary() {
        let config = SimConfig::default();
        let mut state = state_with(&[(1, 12.0)], 0);
        state.passed_count = 3;

        judge(&mut state, &config);
        assert_eq!(state.speed_multiplier, 1.0);
    }
}
