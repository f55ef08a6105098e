//! Error types for Duck Hop

use thiserror::Error;

/// Everything that can stop the game from starting or presenting a frame.
///
/// Collisions are not errors; they go through the reset protocol.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Canvas element not found: {0}")]
    CanvasMissing(String),

    #[error("Failed to create drawing surface: {0}")]
    SurfaceUnavailable(String),

    #[error("No compatible graphics adapter: {0}")]
    AdapterUnavailable(String),

    #[error("Failed to create graphics device: {0}")]
    DeviceUnavailable(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Failed to load sprite '{path}': {reason}")]
    AssetLoad { path: String, reason: String },

    #[error("Failed to decode sprite: {0}")]
    AssetDecode(#[from] image::ImageError),

    #[error("Sprite has zero size ({width}x{height})")]
    EmptySprite { width: u32, height: u32 },

    #[error("Settings parse error: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Duck Hop operations
pub type Result<T> = std::result::Result<T, GameError>;

impl GameError {
    /// Whether this error must stop startup no matter what policy is set
    pub fn is_fatal_init(&self) -> bool {
        matches!(
            self,
            GameError::CanvasMissing(_)
                | GameError::SurfaceUnavailable(_)
                | GameError::AdapterUnavailable(_)
                | GameError::DeviceUnavailable(_)
        )
    }

    /// Whether this error came from the sprite asset
    pub fn is_asset(&self) -> bool {
        matches!(
            self,
            GameError::AssetLoad { .. } | GameError::AssetDecode(_) | GameError::EmptySprite { .. }
        )
    }

    /// One-line message for whoever is watching the screen
    pub fn operator_message(&self) -> String {
        if self.is_fatal_init() {
            format!("Duck Hop needs WebGPU or WebGL to run: {}", self)
        } else if self.is_asset() {
            format!("Duck Hop could not load the player sprite: {}", self)
        } else {
            format!("Duck Hop stopped: {}", self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        assert!(GameError::SurfaceUnavailable("no context".into()).is_fatal_init());
        assert!(!GameError::SurfaceUnavailable("no context".into()).is_asset());

        let err = GameError::AssetLoad {
            path: "duck.png".into(),
            reason: "404".into(),
        };
        assert!(err.is_asset());
        assert!(!err.is_fatal_init());
        assert_eq!(err.to_string(), "Failed to load sprite 'duck.png': 404");
    }

    #[test]
    fn test_operator_message_by_class() {
        let surface = GameError::AdapterUnavailable("none".into());
        assert!(surface.operator_message().contains("WebGPU or WebGL"));

        let sprite = GameError::EmptySprite {
            width: 0,
            height: 40,
        };
        assert!(sprite.operator_message().contains("player sprite"));

        let render = GameError::Render("out of memory".into());
        assert_eq!(
            render.operator_message(),
            "Duck Hop stopped: Render error: out of memory"
        );
    }
}
