//! Duck Hop - a one-button gap-dodging arcade game
//!
//! Core modules:
//! - `sim`: Simulation (gravity, obstacles, collisions, score)
//! - `renderer`: Draw list construction and the WebGPU backend
//! - `game`: Frame driver and input queue
//! - `platform`: Browser/native platform helpers
//! - `settings`: Data-driven tuning and preferences

pub mod assets;
pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{GameError, Result};
pub use game::{FrameStep, Game, Trigger};
pub use settings::{Settings, Tuning};

/// Game configuration constants
pub mod consts {
    /// Update rate the per-frame tuning values were authored against.
    /// Every rate is multiplied by `elapsed_seconds * REFERENCE_FRAME_RATE`.
    pub const REFERENCE_FRAME_RATE: f32 = 60.0;

    /// Frames further apart than this are treated as a pause (ms)
    pub const MAX_FRAME_GAP_MS: f64 = 1000.0;

    /// Points awarded per obstacle cleared
    pub const SCORE_PER_OBSTACLE: u32 = 10;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    pub const GRAVITY: f32 = 0.8;
    pub const JUMP_POWER: f32 = -10.0;

    /// Obstacle defaults
    pub const GAME_SPEED: f32 = 3.0;
    pub const OBSTACLE_INTERVAL_MS: f32 = 1500.0;
    pub const OBSTACLE_GAP: f32 = 200.0;
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    pub const OBSTACLE_MIN_HEIGHT: f32 = 80.0;

    /// Score text placement (top-left, baseline)
    pub const SCORE_TEXT_X: f32 = 20.0;
    pub const SCORE_TEXT_Y: f32 = 40.0;
    pub const SCORE_TEXT_SIZE: f32 = 24.0;
}

/// Convert elapsed milliseconds into reference frames
#[inline]
pub fn scaled_delta(dt_ms: f32) -> f32 {
    dt_ms / 1000.0 * consts::REFERENCE_FRAME_RATE
}
