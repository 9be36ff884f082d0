//! Game balance and arena geometry
//!
//! Defaults match the shipped game. A JSON override can be supplied through
//! LocalStorage on web or a file path natively; missing fields keep defaults.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Tunable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    /// Arena width (px)
    pub arena_width: f32,
    /// Arena height (px)
    pub arena_height: f32,

    // === Player ===
    /// Full sprite size (girl + parachute)
    pub player_size: Vec2,
    /// Parachute hitbox offset from the sprite's top-left corner
    pub hitbox_offset: Vec2,
    /// Parachute hitbox size
    pub hitbox_size: Vec2,

    // === Obstacles ===
    pub obstacle_size: Vec2,
    /// Minimum time between obstacle spawns (ms)
    pub obstacle_interval_ms: f64,
    /// Fall speed (px per frame)
    pub obstacle_speed: f32,

    // === Coins ===
    pub coin_size: Vec2,
    /// Minimum time between coin spawns (ms)
    pub coin_interval_ms: f64,
    /// Fall speed (px per frame)
    pub coin_speed: f32,
    /// Points for a x1 coin
    pub coin_base_value: f64,
    /// Roll below this spawns a triple coin
    pub triple_chance: f64,
    /// Roll below this (and not triple) spawns a double coin
    pub double_cutoff: f64,

    // === Score ===
    /// Points added every frame while flying
    pub score_per_frame: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: 480.0,
            arena_height: 640.0,

            player_size: Vec2::new(64.0, 96.0),
            hitbox_offset: Vec2::new(8.0, 0.0),
            hitbox_size: Vec2::new(48.0, 32.0),

            obstacle_size: Vec2::new(70.0, 30.0),
            obstacle_interval_ms: 900.0,
            obstacle_speed: 3.0,

            coin_size: Vec2::new(40.0, 40.0),
            coin_interval_ms: 700.0,
            coin_speed: 2.5,
            coin_base_value: 10.0,
            triple_chance: 0.15,
            double_cutoff: 0.40,

            score_per_frame: 0.08,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Same tuning with the arena resized to the host container
    pub fn with_arena(mut self, width: f32, height: f32) -> Self {
        self.arena_width = width;
        self.arena_height = height;
        self
    }

    /// Arena size as a vector
    #[inline]
    pub fn arena_size(&self) -> Vec2 {
        Vec2::new(self.arena_width, self.arena_height)
    }

    /// Load tuning override from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(crate::consts::TUNING_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning override from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring malformed tuning override: {}", e),
                }
            }
        }

        Self::default()
    }

    /// Load tuning from a JSON file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring malformed tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
