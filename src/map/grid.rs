//! Flat tile arrays to row-major grids
//!
//! Map layers arrive as one long sequence of tile codes. Rows are a fixed
//! number of columns wide; anything that isn't a whole number of rows is
//! rejected rather than truncated.

use std::ops::RangeInclusive;

use crate::consts::{MAP_COLUMNS, SOLID_TILE};
use crate::error::MapError;

/// One decoded layer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TileGrid {
    rows: Vec<Vec<i32>>,
}

impl TileGrid {
    /// Decode with the standard map width
    pub fn decode(tiles: &[i32]) -> Result<Self, MapError> {
        Self::decode_with_width(tiles, MAP_COLUMNS)
    }

    /// Reshape `tiles` into rows of `width` values, preserving order
    pub fn decode_with_width(tiles: &[i32], width: usize) -> Result<Self, MapError> {
        if width == 0 || tiles.len() % width != 0 {
            return Err(MapError::MalformedTileData {
                len: tiles.len(),
                width,
            });
        }
        let rows = tiles.chunks_exact(width).map(<[i32]>::to_vec).collect();
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[Vec<i32>] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Every solid cell as (row, column), row-major
    pub fn solid_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &value)| is_solid(value))
                .map(move |(x, _)| (y, x))
        })
    }
}

/// Does this tile code denote collision geometry?
#[inline]
pub fn is_solid(value: i32) -> bool {
    value == SOLID_TILE
}

/// Hand edit applied to a flat layer before decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilePatch {
    pub row: usize,
    pub columns: RangeInclusive<usize>,
    pub value: i32,
}

impl TilePatch {
    pub const fn new(row: usize, columns: RangeInclusive<usize>, value: i32) -> Self {
        Self { row, columns, value }
    }
}

/// Fixups for the bundled platform layer: drop the ledge at row 22 and add
/// the two rooftop ledges on row 2.
pub const STANDARD_PATCHES: [TilePatch; 3] = [
    TilePatch::new(22, 3..=5, 0),
    TilePatch::new(2, 12..=14, SOLID_TILE),
    TilePatch::new(2, 24..=26, SOLID_TILE),
];

/// Apply `patches` in order to a flat layer of width `width`
pub fn apply_patches(tiles: &mut [i32], width: usize, patches: &[TilePatch]) -> Result<(), MapError> {
    let len = tiles.len();
    for patch in patches {
        for column in patch.columns.clone() {
            let index = patch
                .row
                .checked_mul(width)
                .and_then(|start| start.checked_add(column))
                .filter(|_| column < width);
            let Some(tile) = index.and_then(|i| tiles.get_mut(i)) else {
                return Err(MapError::PatchOutOfBounds {
                    row: patch.row,
                    column,
                    len,
                });
            };
            *tile = patch.value;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_preserves_order() {
        let tiles: Vec<i32> = (0..72).collect();
        let grid = TileGrid::decode(&tiles).unwrap();
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.rows()[0][0], 0);
        assert_eq!(grid.rows()[0][35], 35);
        assert_eq!(grid.rows()[1][0], 36);
    }

    #[test]
    fn test_decode_rejects_partial_row() {
        let tiles = vec![0; 40];
        assert_eq!(
            TileGrid::decode(&tiles),
            Err(MapError::MalformedTileData { len: 40, width: 36 })
        );
    }

    #[test]
    fn test_decode_empty_is_zero_rows() {
        let grid = TileGrid::decode(&[]).unwrap();
        assert_eq!(grid.height(), 0);
    }

    #[test]
    fn test_solid_cells() {
        let mut tiles = vec![0; 72];
        tiles[3] = SOLID_TILE;
        tiles[36 + 35] = SOLID_TILE;
        tiles[10] = 201;
        let grid = TileGrid::decode(&tiles).unwrap();
        let cells: Vec<_> = grid.solid_cells().collect();
        assert_eq!(cells, vec![(0, 3), (1, 35)]);
    }

    #[test]
    fn test_standard_patches() {
        let mut tiles = vec![0; MAP_COLUMNS * 27];
        for col in 0..MAP_COLUMNS {
            tiles[22 * MAP_COLUMNS + col] = SOLID_TILE;
        }
        apply_patches(&mut tiles, MAP_COLUMNS, &STANDARD_PATCHES).unwrap();

        let grid = TileGrid::decode(&tiles).unwrap();
        let row22 = &grid.rows()[22];
        assert!(is_solid(row22[2]));
        assert!((3..=5).all(|c| !is_solid(row22[c])));
        assert!(is_solid(row22[6]));

        let row2 = &grid.rows()[2];
        let solid: Vec<usize> = (0..MAP_COLUMNS).filter(|&c| is_solid(row2[c])).collect();
        assert_eq!(solid, vec![12, 13, 14, 24, 25, 26]);
    }

    #[test]
    fn test_patch_out_of_bounds() {
        let mut tiles = vec![0; MAP_COLUMNS * 2];
        let err = apply_patches(&mut tiles, MAP_COLUMNS, &STANDARD_PATCHES).unwrap_err();
        assert_eq!(
            err,
            MapError::PatchOutOfBounds {
                row: 22,
                column: 3,
                len: 72
            }
        );
    }

    #[test]
    fn test_huge_patch_is_out_of_bounds() {
        let mut tiles = vec![0; MAP_COLUMNS];
        let far_row = TilePatch::new(usize::MAX, 0..=0, SOLID_TILE);
        assert_eq!(
            apply_patches(&mut tiles, MAP_COLUMNS, &[far_row]),
            Err(MapError::PatchOutOfBounds {
                row: usize::MAX,
                column: 0,
                len: MAP_COLUMNS
            })
        );

        let far_column = TilePatch::new(0, usize::MAX..=usize::MAX, SOLID_TILE);
        assert!(apply_patches(&mut tiles, MAP_COLUMNS, &[far_column]).is_err());
        assert!(tiles.iter().all(|&t| t == 0));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn decode_yields_whole_rows(rows in 0usize..30, seed in any::<i32>()) {
                let tiles: Vec<i32> = (0..rows * MAP_COLUMNS)
                    .map(|i| seed.wrapping_add(i as i32))
                    .collect();
                let grid = TileGrid::decode(&tiles).unwrap();
                prop_assert_eq!(grid.height(), rows);
                prop_assert!(grid.rows().iter().all(|r| r.len() == MAP_COLUMNS));
                let flat: Vec<i32> = grid.rows().concat();
                prop_assert_eq!(flat, tiles);
            }

            #[test]
            fn decode_rejects_any_remainder(rows in 0usize..10, extra in 1usize..MAP_COLUMNS) {
                let tiles = vec![0; rows * MAP_COLUMNS + extra];
                let is_malformed = matches!(
                    TileGrid::decode(&tiles),
                    Err(MapError::MalformedTileData { .. })
                );
                prop_assert!(is_malformed);
            }
        }
    }
}
