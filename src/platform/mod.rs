//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Viewport size
//! - Sprite loading (fetch on web, filesystem on native)
//! - Operator notification and headless presentation

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(not(target_arch = "wasm32"))]
pub mod native;
