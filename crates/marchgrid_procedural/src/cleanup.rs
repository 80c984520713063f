//! # Chunk Cleanup
//!
//! Two-pass cellular filter over 3x3 neighborhoods.
//!
//! 1. **Isolated-point removal**: a cell whose neighborhood matches one of
//!    [`BAD_CHUNKS`] is cleared.
//! 2. **Chunk merge**: a cell with 5 or more filled cells in its
//!    neighborhood (itself included) is filled.
//!
//! Both passes sweep `y` outer, `x` inner over `x in [1, dim_x - 3]`,
//! `y in [1, dim_y - 3]` and write into the buffer they read from. A cell
//! cleared or filled earlier in a pass is seen by every later read in that
//! same pass. This is not equivalent to a double-buffered sweep.
//!
//! ## Chunk Encoding
//!
//! ```text
//!          j=-1  j=0  j=+1
//!   i=-1 [  b0 | b1 | b2 ]
//!   i= 0 [  b3 | b4 | b5 ]      cell (x + i, y + j) -> bit b
//!   i=+1 [  b6 | b7 | b8 ]
//! ```

use crate::grid::Grid;

/// Neighborhoods whose center is removed in pass 1.
///
/// Opaque table: membership is fixed, not derived from a rule.
pub const BAD_CHUNKS: [u16; 15] = [
    0b000_010_000,
    0b000_010_001,
    0b000_010_100,
    0b100_010_000,
    0b001_010_000,
    0b000_010_101,
    0b100_010_100,
    0b101_010_000,
    0b001_010_001,
    0b100_010_001,
    0b001_010_100,
    0b100_010_101,
    0b101_010_100,
    0b001_010_101,
    0b101_010_101,
];

/// Filled-cell count at which pass 2 fills the center.
pub const MERGE_THRESHOLD: u32 = 5;

/// 512-entry membership table for [`BAD_CHUNKS`].
const BAD_LOOKUP: [bool; 512] = {
    let mut table = [false; 512];
    let mut i = 0;
    while i < BAD_CHUNKS.len() {
        table[BAD_CHUNKS[i] as usize] = true;
        i += 1;
    }
    table
};

/// Returns true if `chunk` is one of the [`BAD_CHUNKS`].
#[inline]
#[must_use]
pub const fn is_bad_chunk(chunk: u16) -> bool {
    (chunk as usize) < BAD_LOOKUP.len() && BAD_LOOKUP[chunk as usize]
}

/// Encodes the 3x3 neighborhood centered on `(x, y)` as a 9-bit chunk.
///
/// # Panics
///
/// Panics unless `1 <= x < dim_x - 1` and `1 <= y < dim_y - 1`.
#[must_use]
pub fn chunk_at(grid: &Grid, x: usize, y: usize) -> u16 {
    let mut chunk = 0u16;
    let mut bit = 0;
    for cx in [x - 1, x, x + 1] {
        for cy in [y - 1, y, y + 1] {
            chunk |= u16::from(grid.get(cx, cy)) << bit;
            bit += 1;
        }
    }
    chunk
}

/// Number of filled cells in the 3x3 neighborhood of `(x, y)`, center included.
///
/// # Panics
///
/// Same bounds as [`chunk_at`].
#[inline]
#[must_use]
pub fn neighborhood_count(grid: &Grid, x: usize, y: usize) -> u32 {
    chunk_at(grid, x, y).count_ones()
}

/// Interior cells visited by both passes, in sweep order.
fn sweep(grid: &Grid) -> impl Iterator<Item = (usize, usize)> {
    let end_x = grid.dim_x().saturating_sub(2);
    let end_y = grid.dim_y().saturating_sub(2);
    (1..end_y).flat_map(move |y| (1..end_x).map(move |x| (x, y)))
}

/// Pass 1: clears centers of [`BAD_CHUNKS`] in place. Returns the number cleared.
pub fn remove_isolated(grid: &mut Grid) -> usize {
    let mut cleared = 0;
    for (x, y) in sweep(grid) {
        if is_bad_chunk(chunk_at(grid, x, y)) {
            grid.set(x, y, false);
            cleared += 1;
        }
    }
    cleared
}

/// Pass 2: fills cells with dense neighborhoods in place. Returns the number
/// of cells that changed from empty to filled.
pub fn merge_dense(grid: &mut Grid) -> usize {
    let mut filled = 0;
    for (x, y) in sweep(grid) {
        if neighborhood_count(grid, x, y) >= MERGE_THRESHOLD {
            if !grid.is_filled(x, y) {
                filled += 1;
            }
            grid.set(x, y, true);
        }
    }
    filled
}

/// Runs both passes on a copy of `grid`. The input is left untouched.
#[must_use]
pub fn cleanup(grid: &Grid) -> Grid {
    let mut cleaned = grid.clone();
    let removed = remove_isolated(&mut cleaned);
    tracing::debug!(removed, "cleanup pass 1: isolated points");
    let merged = merge_dense(&mut cleaned);
    tracing::debug!(merged, "cleanup pass 2: dense merge");
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_table() {
        assert_eq!(BAD_CHUNKS.len(), 15);
        for &chunk in &BAD_CHUNKS {
            assert!(chunk & 0b000_010_000 != 0, "center bit set in {chunk:#011b}");
            assert!(is_bad_chunk(chunk));
        }
        // Three corners {b0, b6, b8} is deliberately absent.
        assert!(!is_bad_chunk(0b101_010_001));
        assert!(!is_bad_chunk(0));
        assert!(!is_bad_chunk(0b000_110_000));
        assert!(!is_bad_chunk(1024));
    }

    #[test]
    fn test_chunk_bit_order() {
        let mut grid = Grid::new(3, 3);
        grid.set(0, 0, true); // i=-1, j=-1 -> b0
        assert_eq!(chunk_at(&grid, 1, 1), 0b1);

        let mut grid = Grid::new(3, 3);
        grid.set(0, 2, true); // i=-1, j=+1 -> b2
        assert_eq!(chunk_at(&grid, 1, 1), 0b100);

        let mut grid = Grid::new(3, 3);
        grid.set(2, 0, true); // i=+1, j=-1 -> b6
        assert_eq!(chunk_at(&grid, 1, 1), 0b001_000_000);

        let mut grid = Grid::new(3, 3);
        grid.set(1, 2, true); // i=0, j=+1 -> b5
        assert_eq!(chunk_at(&grid, 1, 1), 0b000_100_000);
    }

    #[test]
    fn test_all_zero_stays_zero() {
        let grid = Grid::new(12, 9);
        assert_eq!(cleanup(&grid), grid);
    }

    #[test]
    fn test_isolated_point_cleared() {
        let mut grid = Grid::new(6, 6);
        grid.set(2, 2, true);
        assert_eq!(chunk_at(&grid, 2, 2), 0b000_010_000);

        let cleaned = cleanup(&grid);
        assert_eq!(cleaned.count_filled(), 0);
        assert!(grid.is_filled(2, 2), "Input must not be mutated");
    }

    #[test]
    fn test_orthogonal_pair_survives() {
        let mut grid = Grid::new(6, 6);
        grid.set(2, 2, true);
        grid.set(2, 3, true);
        let cleaned = cleanup(&grid);
        assert!(cleaned.is_filled(2, 2));
        assert!(cleaned.is_filled(2, 3));
    }

    #[test]
    fn test_high_margin_untouched() {
        // (dim_x - 2, dim_y - 2) is outside the sweep.
        let mut grid = Grid::new(6, 6);
        grid.set(4, 4, true);
        assert_eq!(cleanup(&grid), grid);
    }

    #[test]
    fn test_pass_one_reads_its_own_writes() {
        // Diagonal cluster around b = (3, 3): a = (2, 2), c = (4, 2), d = (4, 4).
        // A double-buffered sweep sees b as 0b101_010_001 and keeps it.
        // In place, a and c are cleared first, b then reads 0b100_010_000.
        let mut grid = Grid::new(7, 7);
        for (x, y) in [(2, 2), (4, 2), (3, 3), (4, 4)] {
            grid.set(x, y, true);
        }
        assert_eq!(chunk_at(&grid, 3, 3), 0b101_010_001);

        let cleared = remove_isolated(&mut grid);
        assert_eq!(cleared, 4);
        assert_eq!(grid.count_filled(), 0);
    }

    #[test]
    fn test_pass_two_reads_its_own_writes() {
        // p = (2, 2) has 5 filled neighbours and fills; q = (3, 2) only
        // reaches 5 because p was filled earlier in the same sweep.
        let mut grid = Grid::new(7, 7);
        for (x, y) in [(1, 1), (1, 2), (1, 3), (2, 1), (2, 3), (4, 1), (4, 3)] {
            grid.set(x, y, true);
        }
        assert_eq!(neighborhood_count(&grid, 3, 2), 4);

        let filled = merge_dense(&mut grid);
        assert!(grid.is_filled(2, 2));
        assert!(grid.is_filled(3, 2));
        assert!(filled >= 2);
    }

    #[test]
    fn test_dense_block_fills_hole() {
        let mut grid = Grid::from_rows(&[
            [0, 0, 0, 0, 0, 0],
            [0, 1, 1, 1, 0, 0],
            [0, 1, 0, 1, 0, 0],
            [0, 1, 1, 1, 0, 0],
            [0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0],
        ]);
        grid = cleanup(&grid);
        assert!(grid.is_filled(2, 2), "Hole surrounded by 8 cells is merged");
    }

    #[test]
    fn test_tiny_grid_is_noop() {
        let grid = Grid::from_rows(&[[1, 1], [1, 1]]);
        assert_eq!(cleanup(&grid), grid);
    }
}
