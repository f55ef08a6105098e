//! Player sprite decoding and the start-up gate
//!
//! The sprite is fetched by the platform layer, decoded here, and must be
//! ready before the first frame is scheduled.

use crate::error::{GameError, Result};
use crate::settings::Settings;

/// Decoded RGBA8 sprite pixels
#[derive(Debug, Clone)]
pub struct SpriteImage {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA, 4 bytes per pixel
    pub rgba: Vec<u8>,
}

impl SpriteImage {
    /// Wrap raw pixels; zero-sized or short buffers are rejected
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GameError::EmptySprite { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(GameError::AssetLoad {
                path: "<memory>".to_string(),
                reason: format!("expected {} bytes of RGBA, got {}", expected, rgba.len()),
            });
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }
}

/// Decode an encoded image (PNG) into RGBA8
pub fn decode_sprite(bytes: &[u8]) -> Result<SpriteImage> {
    let img = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = img.dimensions();
    SpriteImage::new(width, height, img.into_raw())
}

/// Decide whether the game may start given the sprite load outcome.
///
/// - `Ok(Some(sprite))`: start with the sprite
/// - `Ok(None)`: start with the placeholder box (only when allowed)
/// - `Err(_)`: do not start
pub fn resolve_sprite(
    loaded: Result<SpriteImage>,
    settings: &Settings,
) -> Result<Option<SpriteImage>> {
    match loaded {
        Ok(sprite) => {
            log::info!("Sprite ready ({}x{})", sprite.width, sprite.height);
            Ok(Some(sprite))
        }
        Err(e) if settings.allow_placeholder_start => {
            log::warn!("Sprite unavailable, starting with placeholder: {}", e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
