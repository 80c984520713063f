//! # Marching Squares Indexing
//!
//! Each 2x2 quad of cells maps to one of 16 boundary tiles.
//!
//! ```text
//!   (x, y)   zero ---- one    (x, y+1)
//!             |         |
//!   (x+1, y) three ---- two   (x+1, y+1)
//!
//!   index = three*8 + two*4 + one*2 + zero
//! ```

use std::fmt;

use crate::grid::Grid;

/// A 4-bit marching-squares tile index in `[0, 15]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileIndex(u8);

impl TileIndex {
    /// Empty quad.
    pub const EMPTY: Self = Self(0);
    /// Fully filled quad.
    pub const FULL: Self = Self(15);

    /// Creates a tile index from the low four bits of `bits`.
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0b1111)
    }

    /// Returns the raw index.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Reduces the index into a tileset of `variants` entries.
    ///
    /// # Panics
    ///
    /// Panics if `variants` is zero.
    #[inline]
    #[must_use]
    pub const fn wrapped(self, variants: u8) -> u8 {
        self.0 % variants
    }
}

impl fmt::Display for TileIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Computes the tile index of the quad whose top-left corner is `(x, y)`.
///
/// Reads exactly `(x, y)`, `(x, y+1)`, `(x+1, y+1)` and `(x+1, y)`.
///
/// # Panics
///
/// Panics unless `x < dim_x - 1` and `y < dim_y - 1`.
#[inline]
#[must_use]
pub fn cell_to_tile_index(grid: &Grid, x: usize, y: usize) -> TileIndex {
    let zero = grid.get(x, y);
    let one = grid.get(x, y + 1);
    let two = grid.get(x + 1, y + 1);
    let three = grid.get(x + 1, y);

    TileIndex((three << 3) | (two << 2) | (one << 1) | zero)
}

/// One quad, resolved for drawing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TilePlacement {
    /// Outer-axis grid coordinate.
    pub grid_x: usize,
    /// Inner-axis grid coordinate.
    pub grid_y: usize,
    /// Marching-squares tile.
    pub index: TileIndex,
    /// Horizontal screen pixel, `grid_y * cell_size`.
    pub screen_x: usize,
    /// Vertical screen pixel, `grid_x * cell_size`.
    pub screen_y: usize,
}

/// Iterates every quad of `grid` in scan order (`y` outer, `x` inner).
///
/// Covers `x in [0, dim_x - 1)` and `y in [0, dim_y - 1)`; grids narrower
/// than two cells on either axis yield nothing.
pub fn tile_placements(
    grid: &Grid,
    cell_size: usize,
) -> impl Iterator<Item = TilePlacement> + '_ {
    let quads_x = grid.dim_x().saturating_sub(1);
    let quads_y = grid.dim_y().saturating_sub(1);

    (0..quads_y).flat_map(move |y| {
        (0..quads_x).map(move |x| TilePlacement {
            grid_x: x,
            grid_y: y,
            index: cell_to_tile_index(grid, x, y),
            screen_x: y * cell_size,
            screen_y: x * cell_size,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_quad() {
        // zero=0, one=1, two=1, three=0 -> 0b0110.
        let grid = Grid::from_rows(&[[0, 1], [0, 1]]);
        assert_eq!(cell_to_tile_index(&grid, 0, 0).value(), 6);
    }

    #[test]
    fn test_each_corner_bit() {
        let cases = [
            ((0, 0), 1),  // zero
            ((0, 1), 2),  // one
            ((1, 1), 4),  // two
            ((1, 0), 8),  // three
        ];
        for ((cx, cy), expected) in cases {
            let mut grid = Grid::new(2, 2);
            grid.set(cx, cy, true);
            assert_eq!(
                cell_to_tile_index(&grid, 0, 0).value(),
                expected,
                "corner ({cx}, {cy})"
            );
        }
    }

    #[test]
    fn test_all_sixteen_patterns() {
        for bits in 0u8..16 {
            let mut grid = Grid::new(2, 2);
            grid.set(0, 0, bits & 1 != 0);
            grid.set(0, 1, bits & 2 != 0);
            grid.set(1, 1, bits & 4 != 0);
            grid.set(1, 0, bits & 8 != 0);
            assert_eq!(cell_to_tile_index(&grid, 0, 0), TileIndex::from_bits(bits));
        }
    }

    #[test]
    fn test_ignores_cells_outside_quad() {
        let base = Grid::from_rows(&[
            [0, 0, 0, 0],
            [0, 1, 0, 0],
            [0, 1, 1, 0],
            [0, 0, 0, 0],
        ]);
        let expected = cell_to_tile_index(&base, 1, 1);

        let mut noisy = base.clone();
        for (x, y) in [(0, 0), (0, 3), (3, 0), (3, 3), (0, 1), (1, 3), (3, 2)] {
            noisy.set(x, y, true);
        }
        assert_eq!(cell_to_tile_index(&noisy, 1, 1), expected);
        assert_eq!(expected.value(), 0b1101);
    }

    #[test]
    fn test_wrapped() {
        assert_eq!(TileIndex::FULL.wrapped(16), 15);
        assert_eq!(TileIndex::FULL.wrapped(8), 7);
        assert_eq!(TileIndex::EMPTY.wrapped(4), 0);
    }

    #[test]
    #[should_panic]
    fn test_last_row_out_of_range() {
        let grid = Grid::new(3, 3);
        let _ = cell_to_tile_index(&grid, 2, 0);
    }

    #[test]
    fn test_placements_swap_axes() {
        let grid = Grid::new(3, 5);
        let placements: Vec<_> = tile_placements(&grid, 10).collect();
        assert_eq!(placements.len(), 2 * 4);

        let last = placements.last().unwrap();
        assert_eq!((last.grid_x, last.grid_y), (1, 3));
        assert_eq!((last.screen_x, last.screen_y), (30, 10));
    }

    #[test]
    fn test_placements_degenerate_grid() {
        let grid = Grid::new(1, 5);
        assert_eq!(tile_placements(&grid, 9).count(), 0);
    }
}
