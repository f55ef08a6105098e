//! Per-frame simulation step
//!
//! Rates are authored per 60 Hz frame and scaled by the real elapsed time,
//! so gravity and obstacle speed feel the same at any refresh rate.

use super::collision::hits_obstacle;
use super::state::GameState;
use crate::consts::SCORE_PER_OBSTACLE;
use crate::scaled_delta;

/// Advance the session by `dt_ms` milliseconds.
///
/// A collision resets the whole session and ends the step right there;
/// obstacles not yet visited this frame are left alone (they are gone anyway).
pub fn update(state: &mut GameState, dt_ms: f32) {
    let dt = scaled_delta(dt_ms);

    // Gravity
    let player = &mut state.player;
    player.dy += player.gravity * dt;
    player.pos.y += player.dy * dt;
    player.clamp_to(&state.viewport);

    // Spawn cadence; overshoot past the interval is dropped
    state.obstacle_timer += dt_ms;
    if state.obstacle_timer > state.obstacle_interval {
        state.spawn_obstacle();
        state.obstacle_timer = 0.0;
    }

    // Reverse order so removal doesn't disturb the indices still to visit
    for i in (0..state.obstacles.len()).rev() {
        let player_box = state.player.bounds();
        let obstacle = &mut state.obstacles[i];
        obstacle.x -= state.game_speed * dt;

        if !obstacle.passed && obstacle.right_edge() < player_box.min.x {
            obstacle.passed = true;
            state.score += SCORE_PER_OBSTACLE;
        }

        if hits_obstacle(&player_box, obstacle) {
            log::info!("Collision! Game over. Score: {}", state.score);
            state.reset();
            return;
        }

        if obstacle.right_edge() < 0.0 {
            state.obstacles.remove(i);
        }
    }
}

/// Kick the player upward. Always allowed, mid-air included.
pub fn jump(state: &mut GameState) {
    state.player.dy = state.player.jump_power;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Tuning;
    use crate::sim::state::{Obstacle, Viewport};
    use glam::Vec2;
    use proptest::prelude::*;

    fn state() -> GameState {
        GameState::new(Tuning::default(), Viewport::new(800.0, 600.0), 12345)
    }

    /// Player hovering at (200, y), gravity off, no spawns
    fn still_state(y: f32) -> GameState {
        let mut state = state();
        state.player.gravity = 0.0;
        state.player.pos = Vec2::new(200.0, y);
        state.obstacle_interval = f32::MAX;
        state
    }

    #[test]
    fn test_gravity_uses_reference_scaling() {
        let mut state = state();
        update(&mut state, 1000.0 / 60.0);
        // One reference frame: dy = 0.8, y += 0.8
        assert!((state.player.dy - 0.8).abs() < 1e-4);
        assert!((state.player.pos.y - 300.8).abs() < 1e-3);
    }

    #[test]
    fn test_zero_delta_changes_nothing() {
        let mut state = state();
        state.spawn_obstacle();
        let before = state.obstacles.clone();
        update(&mut state, 0.0);
        assert_eq!(state.obstacles, before);
        assert_eq!(state.player.pos.y, 300.0);
        assert_eq!(state.player.dy, 0.0);
    }

    #[test]
    fn test_floor_is_soft_stop() {
        let mut state = state();
        state.player.pos.y = 559.0;
        state.player.dy = 20.0;
        update(&mut state, 16.0);
        assert_eq!(state.player.pos.y, 560.0);
        assert_eq!(state.player.dy, 0.0);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_ceiling_is_soft_stop() {
        let mut state = state();
        state.player.pos.y = 2.0;
        jump(&mut state);
        update(&mut state, 16.0);
        assert_eq!(state.player.pos.y, 0.0);
        assert_eq!(state.player.dy, 0.0);
    }

    #[test]
    fn test_spawn_after_interval_and_drop_overshoot() {
        let mut state = state();
        state.player.gravity = 0.0;

        update(&mut state, 1000.0);
        assert!(state.obstacles.is_empty());
        update(&mut state, 500.0);
        // Exactly at the interval is not past it
        assert!(state.obstacles.is_empty());

        update(&mut state, 10.0);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacle_timer, 0.0);
        // Spawned at the right edge then advanced in the same step
        let expected = 800.0 - 3.0 * scaled_delta(10.0);
        assert!((state.obstacles[0].x - expected).abs() < 1e-3);
    }

    #[test]
    fn test_pass_scores_once() {
        let mut state = still_state(150.0);
        state.obstacles.push(Obstacle::new(139.0, 60.0, 80.0, 200.0));

        update(&mut state, 16.0);
        assert!(state.obstacles[0].passed);
        assert_eq!(state.score, 10);

        // No movement, no second score
        update(&mut state, 0.0);
        update(&mut state, 0.0);
        assert_eq!(state.score, 10);

        update(&mut state, 16.0);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_scenario_fly_through_gap() {
        // Box spans y 200..240, inside the 80..280 opening
        let mut state = still_state(200.0);
        state.obstacles.push(Obstacle::new(800.0, 60.0, 80.0, 200.0));

        let mut saw_overlap = false;
        for _ in 0..400 {
            update(&mut state, 16.0);
            assert!(!state.obstacles.is_empty(), "unexpected reset");
            let obstacle = &state.obstacles[0];
            if obstacle.x < 240.0 && obstacle.right_edge() > 200.0 {
                saw_overlap = true;
            }
            if obstacle.passed {
                break;
            }
        }

        assert!(saw_overlap);
        assert!(state.obstacles[0].passed);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_scenario_hit_top_resets() {
        let mut state = still_state(0.0);
        state.score = 30;
        state.obstacles.push(Obstacle::new(800.0, 60.0, 80.0, 200.0));

        for _ in 0..400 {
            update(&mut state, 16.0);
            if state.obstacles.is_empty() {
                break;
            }
        }

        // Reset put everything back
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.player.pos, Vec2::new(200.0, 300.0));
        assert_eq!(state.player.dy, 0.0);
        assert_eq!(state.last_time, 0.0);
    }

    #[test]
    fn test_collision_stops_processing_remaining_obstacles() {
        let mut state = still_state(0.0);
        let far = Obstacle::new(700.0, 60.0, 80.0, 200.0);
        // Last in, so visited first
        let hit = Obstacle::new(190.0, 60.0, 80.0, 200.0);
        state.obstacles.push(far);
        state.obstacles.push(hit);
        state.score = 20;

        update(&mut state, 16.0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_offscreen_obstacle_removed() {
        let mut state = still_state(150.0);
        state.obstacles.push(Obstacle::new(-59.0, 60.0, 80.0, 200.0));
        state.obstacles.push(Obstacle::new(500.0, 60.0, 80.0, 200.0));

        update(&mut state, 16.0);
        assert_eq!(state.obstacles.len(), 1);
        assert!(state.obstacles[0].x > 400.0);
    }

    #[test]
    fn test_jump_is_unconditional() {
        let mut state = state();
        jump(&mut state);
        assert_eq!(state.player.dy, -10.0);
        update(&mut state, 16.0);
        jump(&mut state);
        jump(&mut state);
        assert_eq!(state.player.dy, -10.0);
    }

    #[test]
    fn test_determinism() {
        let mut a = state();
        let mut b = state();
        for i in 0..500 {
            if i % 23 == 0 {
                jump(&mut a);
                jump(&mut b);
            }
            update(&mut a, 16.0);
            update(&mut b, 16.0);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.player.pos, b.player.pos);
    }

    proptest! {
        #[test]
        fn prop_player_stays_on_screen(
            steps in proptest::collection::vec((0.0f32..1000.0, any::<bool>()), 1..200)
        ) {
            let mut state = state();
            for (dt, jump_now) in steps {
                if jump_now {
                    jump(&mut state);
                }
                update(&mut state, dt);
                let y = state.player.pos.y;
                prop_assert!(y >= 0.0);
                prop_assert!(y <= 600.0 - state.player.height);
            }
        }

        #[test]
        fn prop_obstacles_stay_in_spawn_order(
            steps in proptest::collection::vec(1u16..400, 1..300)
        ) {
            let mut state = state();
            state.player.gravity = 0.0;
            state.obstacle_interval = 100.0;
            // Off the obstacles' path so nothing resets
            state.player.pos.x = -1000.0;
            for dt in steps {
                update(&mut state, dt as f32);
                // Oldest first, so spawn order runs right-to-left on screen
                for pair in state.obstacles.windows(2) {
                    prop_assert!(pair[0].x < pair[1].x);
                }
            }
        }
    }
}
