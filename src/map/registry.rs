//! Collision block arena
//!
//! Every solid tile becomes one block. Floor blocks are plain geometry;
//! platform blocks carry their lesson tag and a visited flag. Blocks are
//! never added or removed after construction.

use std::collections::BTreeMap;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::grid::TileGrid;
use super::levels::{LevelTag, TaggedPlatform};
use crate::consts::{FLOOR_BLOCK_HEIGHT, PLATFORM_BLOCK_HEIGHT, TILE_SIZE};
use crate::tile_to_px;

/// Which layer a block came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BlockLayer {
    Floor,
    Platform,
}

/// Stable handle into the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId {
    pub layer: BlockLayer,
    pub index: usize,
}

/// One tile's worth of collision geometry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionBlock {
    pub position: IVec2,
    pub width: i32,
    pub height: i32,
    /// Lesson tag (platform blocks only)
    pub tag: Option<LevelTag>,
    pub visited: bool,
}

impl CollisionBlock {
    pub fn floor(position: IVec2) -> Self {
        Self {
            position,
            width: TILE_SIZE,
            height: FLOOR_BLOCK_HEIGHT,
            tag: None,
            visited: false,
        }
    }

    pub fn platform(position: IVec2, tag: LevelTag) -> Self {
        Self {
            position,
            width: TILE_SIZE,
            height: PLATFORM_BLOCK_HEIGHT,
            tag: Some(tag),
            visited: false,
        }
    }

    pub fn level(&self) -> Option<u32> {
        self.tag.as_ref().map(|t| t.level)
    }

    pub fn platform_id(&self) -> Option<u32> {
        self.tag.as_ref().map(LevelTag::platform_id)
    }

    pub fn lesson_id(&self) -> Option<&str> {
        self.tag.as_ref().map(|t| t.lesson_id.as_str())
    }

    pub fn url(&self) -> Option<&str> {
        self.tag.as_ref().and_then(|t| t.url.as_deref())
    }
}

/// All collision geometry for one map
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollisionRegistry {
    floor: Vec<CollisionBlock>,
    platforms: Vec<CollisionBlock>,
    /// platform id -> indices into `platforms`
    by_platform: BTreeMap<u32, Vec<usize>>,
}

impl CollisionRegistry {
    /// Materialize floor blocks from `floor` and tagged blocks from `tagged`
    pub fn new(floor: &TileGrid, tagged: Vec<TaggedPlatform>) -> Self {
        let floor: Vec<CollisionBlock> = floor
            .solid_cells()
            .map(|(row, col)| CollisionBlock::floor(IVec2::new(tile_to_px(col), tile_to_px(row))))
            .collect();

        let mut platforms = Vec::new();
        let mut by_platform: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
        for TaggedPlatform { platform, tag } in tagged {
            for &position in platform.blocks() {
                by_platform
                    .entry(tag.platform_id())
                    .or_default()
                    .push(platforms.len());
                platforms.push(CollisionBlock::platform(position, tag.clone()));
            }
        }

        log::info!(
            "Collision registry: {} floor blocks, {} platform blocks, {} levels",
            floor.len(),
            platforms.len(),
            by_platform.len()
        );

        Self {
            floor,
            platforms,
            by_platform,
        }
    }

    pub fn floor_blocks(&self) -> &[CollisionBlock] {
        &self.floor
    }

    pub fn platform_blocks(&self) -> &[CollisionBlock] {
        &self.platforms
    }

    pub fn block(&self, id: BlockId) -> Option<&CollisionBlock> {
        match id.layer {
            BlockLayer::Floor => self.floor.get(id.index),
            BlockLayer::Platform => self.platforms.get(id.index),
        }
    }

    /// Every block tagged with `platform_id`
    pub fn blocks_for_platform(&self, platform_id: u32) -> impl Iterator<Item = &CollisionBlock> {
        self.by_platform
            .get(&platform_id)
            .into_iter()
            .flatten()
            .map(|&i| &self.platforms[i])
    }

    /// True once the player has landed on any block of this platform
    pub fn is_platform_visited(&self, platform_id: u32) -> bool {
        self.blocks_for_platform(platform_id).any(|b| b.visited)
    }

    /// Flag a platform block as landed on. Returns whether this was the
    /// platform's first visit.
    pub fn mark_visited(&mut self, id: BlockId) -> bool {
        if id.layer != BlockLayer::Platform {
            return false;
        }
        let Some(platform_id) = self.platforms.get(id.index).and_then(CollisionBlock::platform_id) else {
            return false;
        };
        let first = !self.is_platform_visited(platform_id);
        self.platforms[id.index].visited = true;
        first
    }

    /// Distinct platform ids in ascending order
    pub fn platform_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.by_platform.keys().copied()
    }

    pub fn level_count(&self) -> usize {
        self.by_platform.len()
    }

    pub fn is_empty(&self) -> bool {
        self.floor.is_empty() && self.platforms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{MAP_COLUMNS, SOLID_TILE};
    use crate::map::levels::{LevelUrls, assign_levels};
    use crate::map::platform::build_platforms;

    fn layer(cells: &[(usize, usize)]) -> TileGrid {
        let mut tiles = vec![0; 27 * MAP_COLUMNS];
        for &(row, col) in cells {
            tiles[row * MAP_COLUMNS + col] = SOLID_TILE;
        }
        TileGrid::decode(&tiles).unwrap()
    }

    fn registry(floor: &[(usize, usize)], platforms: &[(usize, usize)]) -> CollisionRegistry {
        let urls = LevelUrls::with_base("https://lessons.test", 19);
        let tagged = assign_levels(build_platforms(&layer(platforms)), &urls);
        CollisionRegistry::new(&layer(floor), tagged)
    }

    #[test]
    fn test_floor_blocks_are_untagged_full_tiles() {
        let reg = registry(&[(26, 0), (26, 1)], &[]);
        assert_eq!(reg.floor_blocks().len(), 2);
        let block = &reg.floor_blocks()[1];
        assert_eq!(block.position, IVec2::new(16, 416));
        assert_eq!(block.height, 16);
        assert_eq!(block.level(), None);
        assert_eq!(block.url(), None);
        assert_eq!(block.platform_id(), None);
    }

    #[test]
    fn test_platform_blocks_are_tagged_ledges() {
        let reg = registry(&[], &[(2, 12), (2, 13), (2, 14)]);
        assert_eq!(reg.platform_blocks().len(), 3);
        for block in reg.platform_blocks() {
            assert_eq!(block.height, 4);
            assert_eq!(block.width, 16);
            assert_eq!(block.level(), Some(1));
            assert_eq!(block.platform_id(), Some(1));
            assert_eq!(block.lesson_id(), Some("lesson1"));
            assert_eq!(block.url(), Some("https://lessons.test/lesson1"));
            assert!(!block.visited);
        }
        assert_eq!(reg.level_count(), 1);
    }

    #[test]
    fn test_shared_visitation() {
        let mut reg = registry(&[], &[(5, 0), (5, 1), (5, 2), (3, 10)]);
        assert!(!reg.is_platform_visited(1));

        let first = reg.mark_visited(BlockId {
            layer: BlockLayer::Platform,
            index: 1,
        });
        assert!(first);
        assert!(reg.is_platform_visited(1));
        assert!(!reg.is_platform_visited(2));
        // Only the landed block carries the flag; the others read it through the group
        assert_eq!(reg.blocks_for_platform(1).filter(|b| b.visited).count(), 1);

        let again = reg.mark_visited(BlockId {
            layer: BlockLayer::Platform,
            index: 0,
        });
        assert!(!again);
    }

    #[test]
    fn test_mark_visited_ignores_floor() {
        let mut reg = registry(&[(26, 0)], &[]);
        assert!(!reg.mark_visited(BlockId {
            layer: BlockLayer::Floor,
            index: 0,
        }));
        assert!(!reg.floor_blocks()[0].visited);
    }

    #[test]
    fn test_unknown_platform_is_unvisited() {
        let reg = registry(&[], &[]);
        assert!(reg.is_empty());
        assert!(!reg.is_platform_visited(7));
        assert_eq!(reg.blocks_for_platform(7).count(), 0);
    }

    #[test]
    fn test_blocks_on_tile_grid() {
        let reg = registry(&[(26, 3), (25, 35)], &[(10, 4), (10, 5), (1, 30)]);
        for block in reg.floor_blocks().iter().chain(reg.platform_blocks()) {
            assert_eq!(block.position.x % TILE_SIZE, 0);
            assert_eq!(block.position.y % TILE_SIZE, 0);
        }
    }
}
