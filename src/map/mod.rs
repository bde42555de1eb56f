//! Map setup pipeline
//!
//! Runs once before the first frame:
//! decode tile layers -> build platforms -> assign levels -> collision registry.
//! Same input always yields the same registry.

pub mod grid;
pub mod levels;
pub mod platform;
pub mod registry;

pub use grid::{STANDARD_PATCHES, TileGrid, TilePatch, apply_patches, is_solid};
pub use levels::{LevelTag, LevelUrls, TaggedPlatform, assign_levels};
pub use platform::{Platform, build_platforms};
pub use registry::{BlockId, BlockLayer, CollisionBlock, CollisionRegistry};

use serde::{Deserialize, Serialize};

use crate::consts::MAP_COLUMNS;
use crate::error::MapError;

/// Raw tile layers as exported by the map editor
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapData {
    pub floor_collisions: Vec<i32>,
    pub platform_collisions: Vec<i32>,
}

impl MapData {
    pub fn from_json(json: &str) -> Result<Self, MapError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Build the collision registry for `map`, patching the platform layer first
pub fn build_registry(
    map: &MapData,
    patches: &[TilePatch],
    urls: &LevelUrls,
) -> Result<CollisionRegistry, MapError> {
    let floor = TileGrid::decode(&map.floor_collisions)?;

    let mut platform_tiles = map.platform_collisions.clone();
    apply_patches(&mut platform_tiles, MAP_COLUMNS, patches)?;
    let platform_grid = TileGrid::decode(&platform_tiles)?;

    let platforms = build_platforms(&platform_grid);
    let tagged = assign_levels(platforms, urls);
    Ok(CollisionRegistry::new(&floor, tagged))
}
