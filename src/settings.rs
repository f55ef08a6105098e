//! Game tuning and preferences
//!
//! Loaded from LocalStorage on web and from a JSON file on native.
//! Every field has a default, so partial overrides are fine.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::Result;

/// Gameplay constants. Rates are per reference frame (see `scaled_delta`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration per reference frame²
    pub gravity: f32,
    /// Vertical velocity set by a jump (negative is up)
    pub jump_power: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Obstacle horizontal speed per reference frame
    pub game_speed: f32,
    /// Spawn cadence (ms)
    pub obstacle_interval_ms: f32,
    /// Vertical opening between the top and bottom regions
    pub obstacle_gap: f32,
    pub obstacle_width: f32,
    /// Smallest top region height (and bottom margin)
    pub obstacle_min_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_power: JUMP_POWER,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            game_speed: GAME_SPEED,
            obstacle_interval_ms: OBSTACLE_INTERVAL_MS,
            obstacle_gap: OBSTACLE_GAP,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_min_height: OBSTACLE_MIN_HEIGHT,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tuning: Tuning,

    // === Loop ===
    /// Frame gaps at or above this are skipped instead of simulated (ms)
    pub max_frame_gap_ms: f64,

    // === HUD ===
    /// Label in front of the score ("Skor: 10")
    pub score_label: String,

    // === Assets ===
    /// Sprite location (URL on web, file path on native)
    pub sprite_path: String,
    /// Start with the placeholder box if the sprite fails to load
    pub allow_placeholder_start: bool,

    /// Fixed RNG seed for reproducible obstacle layouts
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tuning: Tuning::default(),
            max_frame_gap_ms: MAX_FRAME_GAP_MS,
            score_label: "Skor".to_string(),
            sprite_path: "duck.png".to_string(),
            allow_placeholder_start: false,
            seed: None,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "duck_hop_settings";

    /// Environment variable naming a settings file (native only)
    pub const ENV_PATH: &'static str = "DUCK_HOP_SETTINGS";

    /// Parse settings from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Seed to use for this session, falling back to the given clock value
    pub fn seed_or(&self, fallback: u64) -> u64 {
        self.seed.unwrap_or(fallback)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from the file named by `DUCK_HOP_SETTINGS` (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_PATH) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match std::fs::read_to_string(&path)
            .map_err(crate::GameError::from)
            .and_then(|json| Self::from_json(&json))
        {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings file {}: {}", path, e);
                Self::default()
            }
        }
    }
}
