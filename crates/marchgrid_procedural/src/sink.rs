//! # Tile Sink
//!
//! The seam between generation and presentation. A sink receives one
//! [`TilePlacement`] per quad and decides how to draw it: atlas slicing,
//! colours and blitting all live behind this trait.

use crate::grid::Grid;
use crate::marching::{tile_placements, TilePlacement};

/// Receives resolved tiles for one frame.
pub trait TileSink {
    /// Called once before the first tile of a frame.
    fn begin_frame(&mut self, _dim_x: usize, _dim_y: usize) {}

    /// Draws one quad.
    fn draw_tile(&mut self, placement: &TilePlacement);

    /// Called once after the last tile of a frame.
    fn end_frame(&mut self) {}
}

/// Drives `sink` over every quad of `grid`. Returns the number of tiles drawn.
pub fn render_grid<S: TileSink + ?Sized>(grid: &Grid, cell_size: usize, sink: &mut S) -> usize {
    sink.begin_frame(grid.dim_x(), grid.dim_y());
    let mut drawn = 0;
    for placement in tile_placements(grid, cell_size) {
        sink.draw_tile(&placement);
        drawn += 1;
    }
    sink.end_frame();
    drawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marching::TileIndex;

    #[derive(Default)]
    struct Recorder {
        frames: usize,
        ended: usize,
        tiles: Vec<(TileIndex, usize, usize)>,
    }

    impl TileSink for Recorder {
        fn begin_frame(&mut self, _dim_x: usize, _dim_y: usize) {
            self.frames += 1;
        }

        fn draw_tile(&mut self, placement: &TilePlacement) {
            self.tiles
                .push((placement.index, placement.screen_x, placement.screen_y));
        }

        fn end_frame(&mut self) {
            self.ended += 1;
        }
    }

    #[test]
    fn test_render_visits_every_quad() {
        let grid = Grid::from_rows(&[[0, 0, 0], [0, 1, 0], [0, 0, 0]]);
        let mut sink = Recorder::default();
        let drawn = render_grid(&grid, 27, &mut sink);

        assert_eq!(drawn, 4);
        assert_eq!((sink.frames, sink.ended), (1, 1));
        // Scan order (0,0), (1,0), (0,1), (1,1): the filled cell is two, one, three, zero.
        let indices: Vec<u8> = sink.tiles.iter().map(|t| t.0.value()).collect();
        assert_eq!(indices, vec![4, 2, 8, 1]);
        assert_eq!((sink.tiles[1].1, sink.tiles[1].2), (0, 27));
    }
}
