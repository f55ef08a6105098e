//! Simulation module
//!
//! All gameplay logic lives here:
//! - Time-scaled gravity against a 60 Hz reference frame
//! - Seeded RNG only (obstacle heights)
//! - Obstacles kept in spawn order
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Aabb, hits_obstacle};
pub use state::{GameState, Obstacle, Player, Viewport};
pub use tick::{jump, update};
