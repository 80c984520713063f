//! # MARCHGRID Procedural Generation
//!
//! Deterministic occupancy grids, tiled with marching squares.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed and config always produce the same grid
//! 2. **Validated up front**: Nothing is generated from an unchecked config
//! 3. **Pure**: No I/O in the generation path; presentation sits behind [`TileSink`]
//!
//! ## Core Components
//!
//! - `Noise1D`: Periodic seeded value noise with linear/cosine sampling
//! - `GridBuilder`: Thresholds noise into a bordered binary grid
//! - `cell_to_tile_index`: 2x2 quad to 4-bit marching-squares tile
//! - `cleanup`: Two-pass 3x3 cellular filter
//! - `GridSession`: Raw/cleaned buffers and the cleanup toggle
//!
//! ## Example
//!
//! ```rust
//! use marchgrid_procedural::{GenerationConfig, GridSession, SeedSpec};
//!
//! let config = GenerationConfig {
//!     seed: Some(SeedSpec::Number(42)),
//!     ..GenerationConfig::default()
//! };
//! let plan = config.validate().unwrap();
//!
//! let mut session = GridSession::generate(&plan);
//! session.toggle_cleanup();
//! assert_eq!(session.active(), session.cleaned());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod cleanup;
pub mod config;
pub mod error;
pub mod grid;
pub mod marching;
pub mod noise;
pub mod session;
pub mod sink;

pub use cleanup::{cleanup, BAD_CHUNKS};
pub use config::{GenerationConfig, GenerationPlan, SeedSpec, TILE_VARIANTS};
pub use error::{GridError, GridResult};
pub use grid::{Grid, GridBuilder, ScreenSize};
pub use marching::{cell_to_tile_index, tile_placements, TileIndex, TilePlacement};
pub use noise::{Interpolation, Noise1D, NoiseSeed};
pub use session::{GridSession, SharedSession};
pub use sink::{render_grid, TileSink};
