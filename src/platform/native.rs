//! Native helpers: filesystem sprite loading and an off-screen canvas

use std::path::Path;

use crate::assets::{SpriteImage, decode_sprite};
use crate::error::{GameError, Result};
use crate::renderer::{Canvas, DrawCommand, DrawList};

/// Read and decode the player sprite from disk
pub fn load_sprite(path: impl AsRef<Path>) -> Result<SpriteImage> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| GameError::AssetLoad {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    decode_sprite(&bytes)
}

/// Canvas that draws nothing and keeps statistics instead
#[derive(Debug, Default)]
pub struct HeadlessCanvas {
    pub frames: u64,
    pub commands: u64,
    /// Score line of the most recent frame
    pub last_text: Option<String>,
}

impl Canvas for HeadlessCanvas {
    fn present(&mut self, frame: &DrawList) -> Result<()> {
        self.frames += 1;
        self.commands += frame.commands.len() as u64;
        self.last_text = frame.commands.iter().rev().find_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.clone()),
            _ => None,
        });
        Ok(())
    }
}
