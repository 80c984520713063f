//! Text tile sinks.
//!
//! Both sinks lay quads out on a character canvas, one cell per quad,
//! indexed by grid coordinates rather than screen pixels.

use marchgrid_procedural::{TilePlacement, TileSink, TILE_VARIANTS};

/// One glyph per tile index, approximating the contour through the quad.
const GLYPHS: [char; TILE_VARIANTS as usize] = [
    ' ', '/', '\\', '-', '/', '%', '|', '\\', '\\', '|', '%', '/', '_', '\\', '/', '#',
];

/// Draws the contour as ASCII art.
#[derive(Debug, Default)]
pub struct AsciiSink {
    canvas: Vec<Vec<char>>,
}

impl AsciiSink {
    /// The rendered frame, trailing blanks trimmed.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.canvas {
            let line: String = line.iter().collect();
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

impl TileSink for AsciiSink {
    fn begin_frame(&mut self, dim_x: usize, dim_y: usize) {
        let rows = dim_x.saturating_sub(1);
        let cols = dim_y.saturating_sub(1);
        self.canvas = vec![vec![' '; cols]; rows];
    }

    fn draw_tile(&mut self, placement: &TilePlacement) {
        let glyph = GLYPHS[usize::from(placement.index.wrapped(TILE_VARIANTS))];
        self.canvas[placement.grid_x][placement.grid_y] = glyph;
    }
}

/// Collects the raw tile index matrix.
#[derive(Debug, Default)]
pub struct IndexSink {
    rows: Vec<Vec<u8>>,
}

impl IndexSink {
    /// Whitespace separated indices, one grid row per line.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(|index| format!("{index:2}")).collect();
            out.push_str(&cells.join(" "));
            out.push('\n');
        }
        out
    }
}

impl TileSink for IndexSink {
    fn begin_frame(&mut self, dim_x: usize, dim_y: usize) {
        self.rows = vec![vec![0; dim_y.saturating_sub(1)]; dim_x.saturating_sub(1)];
    }

    fn draw_tile(&mut self, placement: &TilePlacement) {
        self.rows[placement.grid_x][placement.grid_y] = placement.index.value();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marchgrid_procedural::{render_grid, Grid};

    fn speck() -> Grid {
        Grid::from_rows(&[[0, 0, 0], [0, 1, 0], [0, 0, 0]])
    }

    #[test]
    fn test_ascii_speck() {
        let mut sink = AsciiSink::default();
        render_grid(&speck(), 9, &mut sink);
        // Quads around the center: BR, BL / TR, TL corners.
        assert_eq!(sink.render(), "/\\\n\\/\n");
    }

    #[test]
    fn test_ascii_blank_grid() {
        let mut sink = AsciiSink::default();
        render_grid(&Grid::new(3, 4), 9, &mut sink);
        assert_eq!(sink.render(), "\n\n");
    }

    #[test]
    fn test_index_matrix() {
        let mut sink = IndexSink::default();
        render_grid(&speck(), 9, &mut sink);
        assert_eq!(sink.render(), " 4  8\n 2  1\n");
    }

    #[test]
    fn test_index_matrix_wide_values() {
        let grid = Grid::from_rows(&[[1, 1, 0], [1, 1, 0], [0, 0, 0]]);
        let mut sink = IndexSink::default();
        render_grid(&grid, 9, &mut sink);
        assert_eq!(sink.render(), "15  9\n 3  1\n");
    }

    #[test]
    fn test_full_glyph() {
        assert_eq!(GLYPHS[15], '#');
        assert_eq!(GLYPHS[0], ' ');
    }
}
