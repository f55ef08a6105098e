//! Session state and core simulation types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Aabb;
use crate::settings::Tuning;

/// Current drawable area in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Where the player starts (left quarter, vertically centered)
    pub fn player_start(&self) -> Vec2 {
        Vec2::new(self.width / 4.0, self.height / 2.0)
    }
}

/// The player's sprite box and vertical motion
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Vertical velocity (positive is down)
    pub dy: f32,
    pub gravity: f32,
    pub jump_power: f32,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            width: tuning.player_width,
            height: tuning.player_height,
            dy: 0.0,
            gravity: tuning.gravity,
            jump_power: tuning.jump_power,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_rect(self.pos, self.width, self.height)
    }

    /// Keep the box inside [0, floor - height]; hitting either edge stops it
    pub fn clamp_to(&mut self, viewport: &Viewport) {
        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.dy = 0.0;
        }
        if self.pos.y + self.height > viewport.height {
            self.pos.y = viewport.height - self.height;
            self.dy = 0.0;
        }
    }
}

/// A pair of blocking regions with a fixed opening between them
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    pub width: f32,
    /// Upper region spans y in [0, top_height)
    pub top_height: f32,
    /// Lower region starts here (top_height + gap)
    pub bottom_y: f32,
    /// Already scored
    pub passed: bool,
}

impl Obstacle {
    pub fn new(x: f32, width: f32, top_height: f32, gap: f32) -> Self {
        Self {
            x,
            width,
            top_height,
            bottom_y: top_height + gap,
            passed: false,
        }
    }

    #[inline]
    pub fn right_edge(&self) -> f32 {
        self.x + self.width
    }

    pub fn gap(&self) -> f32 {
        self.bottom_y - self.top_height
    }

    pub fn top_bounds(&self) -> Aabb {
        Aabb::from_rect(Vec2::new(self.x, 0.0), self.width, self.top_height)
    }

    /// Lower region down to the bottom of the viewport
    pub fn bottom_bounds(&self, viewport: &Viewport) -> Aabb {
        Aabb::from_rect(
            Vec2::new(self.x, self.bottom_y),
            self.width,
            (viewport.height - self.bottom_y).max(0.0),
        )
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducible obstacle layouts
    pub seed: u64,
    pub rng: Pcg32,
    /// Constants the session resets to
    pub tuning: Tuning,
    pub viewport: Viewport,
    pub player: Player,
    /// Spawn order: oldest (leftmost) first, so x increases along the vec
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub game_speed: f32,
    /// Milliseconds since the last spawn
    pub obstacle_timer: f32,
    pub obstacle_interval: f32,
    /// Timestamp of the previous frame; 0.0 means none yet
    pub last_time: f64,
    /// How many times `reset` has run
    pub resets: u32,
}

impl GameState {
    pub fn new(tuning: Tuning, viewport: Viewport, seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            viewport,
            player: Player::new(viewport.player_start(), &tuning),
            obstacles: Vec::new(),
            score: 0,
            game_speed: tuning.game_speed,
            obstacle_timer: 0.0,
            obstacle_interval: tuning.obstacle_interval_ms,
            last_time: 0.0,
            resets: 0,
        }
    }

    /// Throw the run away and start over from the initial constants.
    ///
    /// The player start is derived from the current viewport. `last_time`
    /// goes back to the sentinel so the next frame does not see a huge delta.
    pub fn reset(&mut self) {
        self.score = 0;
        self.obstacles.clear();
        self.player.pos = self.viewport.player_start();
        self.player.dy = 0.0;
        self.game_speed = self.tuning.game_speed;
        self.obstacle_interval = self.tuning.obstacle_interval_ms;
        self.obstacle_timer = 0.0;
        self.last_time = 0.0;
        self.resets += 1;
    }

    /// Push a new obstacle at the right edge with a random opening height
    pub fn spawn_obstacle(&mut self) {
        let gap = self.tuning.obstacle_gap;
        let min_height = self.tuning.obstacle_min_height;
        let max_height = self.viewport.height - gap - min_height;
        // Short viewports collapse the range to min_height instead of going negative
        let span = (max_height - min_height).max(0.0);
        let top_height = self.rng.random::<f32>() * span + min_height;

        self.obstacles.push(Obstacle::new(
            self.viewport.width,
            self.tuning.obstacle_width,
            top_height,
            gap,
        ));
    }

    /// Adopt a new viewport size. Nothing else moves.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }
}
