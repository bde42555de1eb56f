//! Platform segments from solid platform tiles
//!
//! A platform is a maximal horizontal run of solid tiles in one row.

use glam::IVec2;

use super::grid::TileGrid;
use crate::consts::TILE_SIZE;
use crate::tile_to_px;

/// A run of adjacent platform blocks sharing one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    /// Top-left pixel position of every block, left to right
    blocks: Vec<IVec2>,
}

impl Platform {
    fn start(at: IVec2) -> Self {
        Self { blocks: vec![at] }
    }

    /// Pixel position of the leftmost block
    pub fn origin(&self) -> IVec2 {
        self.blocks[0]
    }

    pub fn blocks(&self) -> &[IVec2] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// One past the rightmost pixel
    pub fn right_edge(&self) -> i32 {
        self.origin().x + self.blocks.len() as i32 * TILE_SIZE
    }

    /// Whether a tile at `at` continues this run
    fn extends_to(&self, at: IVec2) -> bool {
        self.origin().y == at.y && self.right_edge() == at.x
    }
}

/// Scan rows top-to-bottom, columns left-to-right, merging adjacent tiles
pub fn build_platforms(grid: &TileGrid) -> Vec<Platform> {
    let mut platforms = Vec::new();
    let mut current: Option<Platform> = None;

    for (row, col) in grid.solid_cells() {
        let at = IVec2::new(tile_to_px(col), tile_to_px(row));
        if let Some(platform) = current.as_mut().filter(|p| p.extends_to(at)) {
            platform.blocks.push(at);
        } else if let Some(done) = current.replace(Platform::start(at)) {
            platforms.push(done);
        }
    }
    platforms.extend(current);

    log::debug!("Built {} platforms", platforms.len());
    platforms
}
