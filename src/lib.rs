//! Lesson Platformer - collision and level-tagging core
//!
//! Core modules:
//! - `map`: Tile decoding, platform building, level grouping, collision registry
//! - `sim`: Per-frame simulation (player physics, collisions, animation)
//! - `renderer`: Platform-neutral scene painting
//! - `input`: Keyboard pressed-state record
//! - `settings`: Data-driven tuning and level URLs

pub mod error;
pub mod input;
pub mod map;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::MapError;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Edge length of one map tile in pixels
    pub const TILE_SIZE: i32 = 16;
    /// Tiles per map row
    pub const MAP_COLUMNS: usize = 36;
    /// Tile value marking floor/platform geometry
    pub const SOLID_TILE: i32 = 202;

    /// Floor blocks fill the whole tile
    pub const FLOOR_BLOCK_HEIGHT: i32 = 16;
    /// Platform blocks are a thin ledge at the top of the tile
    pub const PLATFORM_BLOCK_HEIGHT: i32 = 4;

    /// Drawing surface dimensions
    pub const CANVAS_WIDTH: f32 = 576.0;
    pub const CANVAS_HEIGHT: f32 = 432.0;

    /// Player defaults
    pub const GRAVITY: f32 = 0.1;
    pub const MOVE_SPEED: f32 = 2.0;
    pub const JUMP_VELOCITY: f32 = 4.0;
    pub const PLAYER_SPAWN: (f32, f32) = (50.0, 300.0);

    /// Hitbox relative to the sprite's top-left corner
    pub const HITBOX_OFFSET: (f32, f32) = (35.0, 26.0);
    pub const HITBOX_SIZE: (f32, f32) = (14.0, 27.0);

    /// Nudge applied when pushing the player out of a block
    pub const COLLISION_EPSILON: f32 = 0.01;

    /// Levels covered by the default URL table
    pub const DEFAULT_LEVEL_COUNT: u32 = 19;
}

/// Pixel coordinate of a tile index
#[inline]
pub fn tile_to_px(index: usize) -> i32 {
    index as i32 * consts::TILE_SIZE
}
