//! Rendering module
//!
//! `scene::draw` turns the session into a `DrawList`; a `Canvas` presents it.
//! The WebGPU backend tessellates the list into colored and sprite batches.

pub mod glyphs;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{DrawCommand, DrawList, Rect, draw};

use crate::error::Result;

/// Something that can put a finished frame on screen
pub trait Canvas {
    fn present(&mut self, frame: &DrawList) -> Result<()>;
}
