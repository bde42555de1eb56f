//! Game settings and tuning
//!
//! Persisted as JSON: LocalStorage in the browser, a file on native.

use std::collections::BTreeMap;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Player physics tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Added to vertical velocity every frame (pixels/frame²)
    pub gravity: f32,
    /// Horizontal speed while a direction key is held (pixels/frame)
    pub move_speed: f32,
    /// Upward speed given by a jump (pixels/frame)
    pub jump_velocity: f32,
    /// Sprite top-left at the start of a session
    pub spawn: Vec2,
    /// Hitbox offset from the sprite's top-left corner
    pub hitbox_offset: Vec2,
    pub hitbox_size: Vec2,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            move_speed: MOVE_SPEED,
            jump_velocity: JUMP_VELOCITY,
            spawn: Vec2::from(PLAYER_SPAWN),
            hitbox_offset: Vec2::from(HITBOX_OFFSET),
            hitbox_size: Vec2::from(HITBOX_SIZE),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub physics: PhysicsSettings,

    // === Surface ===
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Background image drawn at the origin each frame
    pub background_src: String,
    /// Directory holding the player sprite sheets
    pub sprite_dir: String,
    /// Sprite sheet scale factor
    pub sprite_scale: f32,

    // === Lessons ===
    /// Used for `{base}/lesson{n}` when `level_urls` is empty
    pub lesson_base_url: String,
    /// Explicit level -> URL table
    pub level_urls: BTreeMap<u32, String>,

    // === Debug ===
    /// Outline the player hitbox
    pub show_hitbox: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            physics: PhysicsSettings::default(),

            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            background_src: "./img/background.png".to_string(),
            sprite_dir: "./img/warrior".to_string(),
            sprite_scale: 0.5,

            lesson_base_url: "http://localhost:3000/lessons".to_string(),
            level_urls: BTreeMap::new(),

            show_hitbox: false,
        }
    }
}

impl Settings {
    /// Parse settings JSON, falling back to defaults for missing fields
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load from a JSON file, or defaults if it is missing or unreadable
    pub fn load_from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Failed to parse {}: {e}, using defaults", path.display());
                    Self::default()
                }
            }
            Err(_) => Self::default(),
        }
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "lesson_platformer_settings";

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
                    Err(e) => log::warn!("Stored settings unreadable: {e}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }
}
