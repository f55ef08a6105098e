//! Frame driver
//!
//! `Game` owns the session and turns timestamps from whatever scheduler the
//! platform has (requestAnimationFrame, a synthetic clock) into simulation
//! steps. Input is queued and consumed at the start of the next frame.

use crate::error::Result;
use crate::renderer::{Canvas, draw};
use crate::settings::Settings;
use crate::sim::{self, GameState, Viewport, autopilot};

/// Where a jump request came from. Every source does the same thing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Pointer,
    Touch,
    Key,
}

/// What a call to `Game::frame` did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameStep {
    Simulated { dt_ms: f32 },
    /// The gap since the previous frame was too long to simulate
    Skipped { gap_ms: f64 },
}

/// A running session plus the bits of driver state around it
pub struct Game {
    pub state: GameState,
    pub settings: Settings,
    /// Draw the sprite (true) or the placeholder box
    pub sprite_ready: bool,
    pending_jump: bool,
    autopilot: bool,
    /// Sessions ended by a collision
    pub crashes: u32,
    pub best_score: u32,
}

impl Game {
    /// Create the session and put the first obstacle on screen
    pub fn start(settings: Settings, viewport: Viewport, seed: u64, sprite_ready: bool) -> Self {
        let mut state = GameState::new(settings.tuning, viewport, seed);
        state.spawn_obstacle();
        log::info!(
            "Game started ({}x{}, seed {})",
            viewport.width,
            viewport.height,
            seed
        );

        Self {
            state,
            settings,
            sprite_ready,
            pending_jump: false,
            autopilot: false,
            crashes: 0,
            best_score: 0,
        }
    }

    /// Queue a jump for the next frame
    pub fn trigger(&mut self, source: Trigger) {
        log::trace!("Jump from {:?}", source);
        self.pending_jump = true;
    }

    pub fn set_autopilot(&mut self, on: bool) {
        self.autopilot = on;
        log::info!("Autopilot: {}", on);
    }

    pub fn toggle_autopilot(&mut self) {
        self.set_autopilot(!self.autopilot);
    }

    /// New drawable size. The session keeps going as is.
    pub fn resize(&mut self, viewport: Viewport) {
        log::debug!("Resize to {}x{}", viewport.width, viewport.height);
        self.state.resize(viewport);
    }

    /// Run one frame of simulation for `timestamp` (ms, monotonic)
    pub fn frame(&mut self, timestamp: f64) -> FrameStep {
        if std::mem::take(&mut self.pending_jump) {
            sim::jump(&mut self.state);
        }
        if self.autopilot && autopilot::wants_jump(&self.state) {
            sim::jump(&mut self.state);
        }

        if self.state.last_time == 0.0 {
            self.state.last_time = timestamp;
        }
        let gap_ms = timestamp - self.state.last_time;
        self.state.last_time = timestamp;

        if gap_ms >= self.settings.max_frame_gap_ms {
            log::info!("Skipping frame after {:.0} ms gap", gap_ms);
            return FrameStep::Skipped { gap_ms };
        }

        let dt_ms = gap_ms as f32;
        let score_before = self.state.score;
        let resets_before = self.state.resets;
        sim::update(&mut self.state, dt_ms);

        self.best_score = self.best_score.max(score_before).max(self.state.score);
        if self.state.resets != resets_before {
            self.crashes += 1;
        }

        FrameStep::Simulated { dt_ms }
    }

    /// Simulate, then always draw the result
    pub fn render_frame(&mut self, timestamp: f64, canvas: &mut dyn Canvas) -> Result<FrameStep> {
        let step = self.frame(timestamp);
        let list = draw(
            &self.state,
            self.sprite_ready,
            &self.settings.score_label,
            timestamp,
        );
        canvas.present(&list)?;
        Ok(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawList;
    use glam::Vec2;

    #[derive(Default)]
    struct RecordingCanvas {
        frames: Vec<DrawList>,
    }

    impl Canvas for RecordingCanvas {
        fn present(&mut self, frame: &DrawList) -> Result<()> {
            self.frames.push(frame.clone());
            Ok(())
        }
    }

    fn game() -> Game {
        Game::start(Settings::default(), Viewport::new(800.0, 600.0), 99, true)
    }

    #[test]
    fn test_start_spawns_first_obstacle() {
        let game = game();
        assert_eq!(game.state.obstacles.len(), 1);
        assert_eq!(game.state.obstacles[0].x, 800.0);
        assert_eq!(game.state.score, 0);
    }

    #[test]
    fn test_first_frame_has_zero_delta() {
        let mut game = game();
        let before = game.state.player.pos;
        assert_eq!(game.frame(5000.0), FrameStep::Simulated { dt_ms: 0.0 });
        assert_eq!(game.state.player.pos, before);
        assert_eq!(game.state.last_time, 5000.0);
    }

    #[test]
    fn test_long_gap_skipped_but_rendered() {
        let mut game = game();
        let mut canvas = RecordingCanvas::default();
        game.render_frame(1000.0, &mut canvas).unwrap();
        let pos = game.state.player.pos;
        let x = game.state.obstacles[0].x;

        let step = game.render_frame(2200.0, &mut canvas).unwrap();
        assert_eq!(step, FrameStep::Skipped { gap_ms: 1200.0 });
        assert_eq!(game.state.player.pos, pos);
        assert_eq!(game.state.obstacles[0].x, x);
        assert_eq!(canvas.frames.len(), 2);
        // The clock still advances so the next frame is a normal step
        assert_eq!(game.frame(2216.0), FrameStep::Simulated { dt_ms: 16.0 });
    }

    #[test]
    fn test_gap_at_threshold_is_skipped() {
        let mut game = game();
        game.frame(1.0);
        assert_eq!(game.frame(1001.0), FrameStep::Skipped { gap_ms: 1000.0 });
    }

    #[test]
    fn test_triggers_are_equivalent() {
        let mut results = Vec::new();
        for source in [Trigger::Pointer, Trigger::Touch, Trigger::Key] {
            let mut game = game();
            game.frame(100.0);
            game.trigger(source);
            game.frame(116.0);
            results.push((game.state.player.pos, game.state.player.dy));
        }
        assert_eq!(results[0], results[1]);
        assert_eq!(results[1], results[2]);
    }

    #[test]
    fn test_trigger_waits_for_next_frame() {
        let mut game = game();
        game.frame(100.0);
        game.trigger(Trigger::Key);
        assert_eq!(game.state.player.dy, 0.0);

        game.frame(100.0);
        // Jump applied, then a zero-length update
        assert_eq!(game.state.player.dy, -10.0);

        // Consumed once
        game.state.player.dy = 0.0;
        game.frame(100.0);
        assert_eq!(game.state.player.dy, 0.0);
    }

    #[test]
    fn test_trigger_applies_on_skipped_frame() {
        let mut game = game();
        game.frame(100.0);
        game.trigger(Trigger::Pointer);
        assert!(matches!(game.frame(5000.0), FrameStep::Skipped { .. }));
        assert_eq!(game.state.player.dy, -10.0);
    }

    #[test]
    fn test_resize_keeps_session() {
        let mut game = game();
        game.state.score = 30;
        game.state.player.pos = Vec2::new(200.0, 120.0);
        game.resize(Viewport::new(1024.0, 768.0));

        assert_eq!(game.state.score, 30);
        assert_eq!(game.state.player.pos, Vec2::new(200.0, 120.0));
        assert_eq!(game.state.obstacles[0].x, 800.0);
        assert_eq!(game.state.viewport, Viewport::new(1024.0, 768.0));
    }

    #[test]
    fn test_crash_counted_and_best_score_kept() {
        let mut game = game();
        game.state.obstacles.clear();
        game.state.obstacle_interval = f32::MAX;
        game.state.score = 20;
        game.state.player.gravity = 0.0;
        game.state.player.pos = Vec2::new(200.0, 0.0);
        game.state
            .obstacles
            .push(crate::sim::Obstacle::new(190.0, 60.0, 80.0, 200.0));

        game.frame(100.0);
        game.frame(116.0);

        assert_eq!(game.crashes, 1);
        assert_eq!(game.state.score, 0);
        assert_eq!(game.best_score, 20);
    }

    #[test]
    fn test_crash_at_time_zero_is_counted() {
        let mut game = game();
        game.state.obstacles.clear();
        game.state.player.pos = Vec2::new(200.0, 0.0);
        game.state
            .obstacles
            .push(crate::sim::Obstacle::new(190.0, 60.0, 80.0, 200.0));

        game.frame(0.0);
        assert_eq!(game.crashes, 1);
        assert_eq!(game.state.resets, 1);

        // A quiet frame afterwards adds nothing
        game.frame(16.0);
        assert_eq!(game.crashes, 1);
    }

    #[test]
    fn test_autopilot_survives() {
        let mut game = game();
        game.set_autopilot(true);
        let mut t = 16.0;
        for _ in 0..60 * 30 {
            game.frame(t);
            t += 1000.0 / 60.0;
        }
        assert_eq!(game.crashes, 0);
        assert!(game.state.score >= 10);
    }

    #[test]
    fn test_score_label_reaches_draw_list() {
        let settings = Settings {
            score_label: "Score".to_string(),
            ..Default::default()
        };
        let mut game = Game::start(settings, Viewport::new(800.0, 600.0), 1, false);
        let mut canvas = RecordingCanvas::default();
        game.render_frame(10.0, &mut canvas).unwrap();

        let last = canvas.frames[0].commands.last().cloned();
        assert!(matches!(
            last,
            Some(crate::renderer::DrawCommand::Text { ref text, .. }) if text == "Score: 0"
        ));
    }
}
