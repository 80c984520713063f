//! # Occupancy Grid
//!
//! A 2D array of single-bit cells built by thresholding [`Noise1D`] samples.
//!
//! ## Layout
//!
//! Cells are addressed `(x, y)`. `x` is the outer scan axis (one step per
//! `cell_size` of screen height) and `y` the inner one (one step per
//! `cell_size` of screen width). A sink places quad `(x, y)` at screen
//! pixel `(y * cell_size, x * cell_size)`.
//!
//! ```text
//!            y ->  (screen horizontal)
//!        +---+---+---+---+
//!   x    | 0 | 0 | 0 | 0 |   <- border
//!   |    +---+---+---+---+
//!   v    | 0 | ? | ? | 0 |
//!        +---+---+---+---+
//!        | 0 | 0 | 0 | 0 |   <- border
//!        +---+---+---+---+
//! ```
//!
//! ## Noise Coupling
//!
//! The noise index advances once per visited cell, border cells included,
//! in scan order. Resizing the grid therefore shifts which samples every
//! interior cell receives.

use std::fmt;

use crate::config::GenerationPlan;
use crate::noise::{Interpolation, Noise1D, NoiseSeed};

/// Screen extent in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScreenSize {
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
}

impl ScreenSize {
    /// Creates a new screen size.
    #[inline]
    #[must_use]
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

/// Binary occupancy grid.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Extent of the outer axis.
    dim_x: usize,
    /// Extent of the inner axis.
    dim_y: usize,
    /// Cells, 0 or 1, indexed `x * dim_y + y`.
    cells: Vec<u8>,
}

impl Grid {
    /// Creates an all-empty grid.
    #[must_use]
    pub fn new(dim_x: usize, dim_y: usize) -> Self {
        Self {
            dim_x,
            dim_y,
            cells: vec![0; dim_x * dim_y],
        }
    }

    /// Builds a grid from nested rows, `rows[x][y]`. Any non-zero value is filled.
    ///
    /// # Panics
    ///
    /// Panics if the rows have different lengths.
    #[must_use]
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Self {
        let dim_x = rows.len();
        let dim_y = rows.first().map_or(0, |row| row.as_ref().len());
        let mut cells = Vec::with_capacity(dim_x * dim_y);
        for row in rows {
            let row = row.as_ref();
            assert_eq!(row.len(), dim_y, "ragged grid rows");
            cells.extend(row.iter().map(|&v| u8::from(v != 0)));
        }
        Self {
            dim_x,
            dim_y,
            cells,
        }
    }

    /// Extent of the outer axis.
    #[inline]
    #[must_use]
    pub const fn dim_x(&self) -> usize {
        self.dim_x
    }

    /// Extent of the inner axis.
    #[inline]
    #[must_use]
    pub const fn dim_y(&self) -> usize {
        self.dim_y
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.dim_x && y < self.dim_y,
            "cell ({x}, {y}) outside {}x{} grid",
            self.dim_x,
            self.dim_y
        );
        x * self.dim_y + y
    }

    /// Reads a cell as 0 or 1.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid. Positions are never clamped.
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.cells[self.offset(x, y)]
    }

    /// Returns true if the cell is filled.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid.
    #[inline]
    #[must_use]
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        self.get(x, y) == 1
    }

    /// Writes a cell.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, filled: bool) {
        let offset = self.offset(x, y);
        self.cells[offset] = u8::from(filled);
    }

    /// Number of filled cells.
    #[must_use]
    pub fn count_filled(&self) -> usize {
        self.cells.iter().filter(|&&c| c == 1).count()
    }

    /// One outer-axis line of cells.
    ///
    /// # Panics
    ///
    /// Panics if `x >= dim_x`.
    #[must_use]
    pub fn row(&self, x: usize) -> &[u8] {
        let start = self.offset(x, 0);
        &self.cells[start..start + self.dim_y]
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {}x{}", self.dim_x, self.dim_y)?;
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for x in 0..self.dim_x {
            for &cell in self.row(x) {
                f.write_str(if cell == 1 { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Thresholded noise grid builder.
///
/// # Example
///
/// ```rust
/// use marchgrid_procedural::{GridBuilder, NoiseSeed, ScreenSize};
///
/// let grid = GridBuilder::new(ScreenSize::new(90, 45), 9, 0.5, 1.0, 64)
///     .with_seed(NoiseSeed::new(3))
///     .build();
/// assert_eq!((grid.dim_x(), grid.dim_y()), (6, 11));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GridBuilder {
    screen: ScreenSize,
    cell_size: usize,
    threshold: f64,
    noise_step: f64,
    period: usize,
    amplitude: f64,
    seed: Option<NoiseSeed>,
    interpolation: Interpolation,
}

impl GridBuilder {
    /// Creates a builder with unit amplitude, entropy seed and cosine sampling.
    ///
    /// `cell_size` and `period` must be at least 1; [`GenerationPlan`]
    /// guarantees both.
    #[must_use]
    pub fn new(
        screen: ScreenSize,
        cell_size: usize,
        threshold: f64,
        noise_step: f64,
        period: usize,
    ) -> Self {
        Self {
            screen,
            cell_size,
            threshold,
            noise_step,
            period,
            amplitude: 1.0,
            seed: None,
            interpolation: Interpolation::default(),
        }
    }

    /// Creates a builder from a validated plan.
    #[must_use]
    pub fn from_plan(plan: &GenerationPlan) -> Self {
        Self {
            screen: plan.screen,
            cell_size: plan.cell_size,
            threshold: plan.threshold,
            noise_step: plan.noise_step,
            period: plan.period,
            amplitude: plan.amplitude,
            seed: plan.seed,
            interpolation: plan.interpolation,
        }
    }

    /// Fixes the noise seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: NoiseSeed) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the noise amplitude.
    #[must_use]
    pub const fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Sets the sampling interpolation.
    #[must_use]
    pub const fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Grid extent for this screen: `ceil((H + cell) / cell)` by `ceil((W + cell) / cell)`.
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (
            (self.screen.height + self.cell_size).div_ceil(self.cell_size),
            (self.screen.width + self.cell_size).div_ceil(self.cell_size),
        )
    }

    /// Fills a fresh noise table of `period` samples for this request.
    #[must_use]
    pub fn noise_table(&self) -> Noise1D {
        Noise1D::new(self.period, self.amplitude, self.seed)
    }

    /// Builds a grid from a fresh noise table.
    #[must_use]
    pub fn build(&self) -> Grid {
        self.build_with_noise(&self.noise_table())
    }

    /// Builds a grid sampling the given table.
    ///
    /// # Panics
    ///
    /// Panics if `noise` is empty and the screen has any interior cell.
    #[must_use]
    pub fn build_with_noise(&self, noise: &Noise1D) -> Grid {
        let (dim_x, dim_y) = self.dimensions();
        let mut grid = Grid::new(dim_x, dim_y);
        let mut noise_index = 0.0;

        for (x, py) in (0..self.screen.height + self.cell_size)
            .step_by(self.cell_size)
            .enumerate()
        {
            for (y, px) in (0..self.screen.width + self.cell_size)
                .step_by(self.cell_size)
                .enumerate()
            {
                let border =
                    py == 0 || px == 0 || px >= self.screen.width || py >= self.screen.height;
                if !border {
                    let value = noise.noise(noise_index, self.interpolation);
                    grid.set(x, y, value >= self.threshold);
                }
                noise_index += self.noise_step;
            }
        }

        tracing::info!(
            "{}x{} grid, {} cells filled",
            grid.dim_x(),
            grid.dim_y(),
            grid.count_filled()
        );
        grid
    }
}
