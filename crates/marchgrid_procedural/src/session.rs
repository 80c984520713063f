//! # Grid Session
//!
//! Owns the raw and cleaned grids of the latest generation request and
//! which of the two is active.
//!
//! ## Atomic Replacement
//!
//! A request builds both buffers completely before the session exposes
//! them; a half-built grid is never observable. [`SharedSession`] extends
//! this across threads: writers publish a finished [`GridSession`], readers
//! take an `Arc` snapshot and keep it as long as they like.
//!
//! ```text
//!   generate(plan) --> [ raw | cleaned ] --publish--> RwLock<Arc<GridSession>>
//!                                                        |
//!                                          snapshot() ---+--> reader
//! ```

use std::sync::Arc;

use parking_lot::RwLock;

use crate::cleanup::cleanup;
use crate::config::GenerationPlan;
use crate::grid::{Grid, GridBuilder};
use crate::noise::NoiseSeed;
use crate::sink::{render_grid, TileSink};

/// Result of one generation request plus the cleanup toggle.
///
/// Cloning is cheap: grids are shared.
#[derive(Clone, Debug)]
pub struct GridSession {
    raw: Arc<Grid>,
    cleaned: Arc<Grid>,
    use_cleanup: bool,
    generation: u64,
    seed: NoiseSeed,
    cell_size: usize,
}

impl GridSession {
    /// Runs a generation request: raw grid, then its cleaned copy.
    #[must_use]
    pub fn generate(plan: &GenerationPlan) -> Self {
        let (raw, cleaned, seed) = build_buffers(plan);
        Self {
            raw,
            cleaned,
            use_cleanup: plan.cleanup,
            generation: 1,
            seed,
            cell_size: plan.cell_size,
        }
    }

    /// Replaces both grids with a new request's output.
    ///
    /// The cleanup toggle is kept; the plan's `cleanup` flag only applies
    /// to the first generation.
    pub fn regenerate(&mut self, plan: &GenerationPlan) {
        let (raw, cleaned, seed) = build_buffers(plan);
        self.raw = raw;
        self.cleaned = cleaned;
        self.seed = seed;
        self.cell_size = plan.cell_size;
        self.generation += 1;
        tracing::debug!(generation = self.generation, "session regenerated");
    }

    /// The grid consumers should tile.
    #[inline]
    #[must_use]
    pub fn active(&self) -> &Grid {
        if self.use_cleanup {
            self.cleaned.as_ref()
        } else {
            self.raw.as_ref()
        }
    }

    /// The thresholded noise grid.
    #[inline]
    #[must_use]
    pub fn raw(&self) -> &Grid {
        &self.raw
    }

    /// The grid after both cleanup passes.
    #[inline]
    #[must_use]
    pub fn cleaned(&self) -> &Grid {
        &self.cleaned
    }

    /// Whether the cleaned grid is active.
    #[inline]
    #[must_use]
    pub const fn use_cleanup(&self) -> bool {
        self.use_cleanup
    }

    /// Selects the active buffer. Never regenerates.
    #[inline]
    pub fn set_cleanup(&mut self, enabled: bool) {
        self.use_cleanup = enabled;
    }

    /// Flips the active buffer and returns the new setting.
    pub fn toggle_cleanup(&mut self) -> bool {
        self.use_cleanup = !self.use_cleanup;
        tracing::debug!(cleanup = self.use_cleanup, "cleanup toggled");
        self.use_cleanup
    }

    /// Number of generation requests this session has run.
    #[inline]
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Seed the current grids came from.
    #[inline]
    #[must_use]
    pub const fn seed(&self) -> NoiseSeed {
        self.seed
    }

    /// On-screen cell edge in pixels.
    #[inline]
    #[must_use]
    pub const fn cell_size(&self) -> usize {
        self.cell_size
    }

    /// Draws the active grid into `sink`. Returns the number of tiles drawn.
    pub fn render<S: TileSink + ?Sized>(&self, sink: &mut S) -> usize {
        render_grid(self.active(), self.cell_size, sink)
    }
}

fn build_buffers(plan: &GenerationPlan) -> (Arc<Grid>, Arc<Grid>, NoiseSeed) {
    let builder = GridBuilder::from_plan(plan);
    let noise = builder.noise_table();
    let raw = builder.build_with_noise(&noise);
    let cleaned = cleanup(&raw);

    tracing::info!(
        seed = noise.seed().value(),
        period = noise.size(),
        raw_filled = raw.count_filled(),
        cleaned_filled = cleaned.count_filled(),
        "generation complete"
    );
    (Arc::new(raw), Arc::new(cleaned), noise.seed())
}

/// Thread-safe holder of the latest finished session.
#[derive(Debug)]
pub struct SharedSession {
    current: RwLock<Arc<GridSession>>,
}

impl SharedSession {
    /// Wraps an initial session.
    #[must_use]
    pub fn new(session: GridSession) -> Self {
        Self {
            current: RwLock::new(Arc::new(session)),
        }
    }

    /// Takes a consistent snapshot. Later publishes do not affect it.
    #[must_use]
    pub fn snapshot(&self) -> Arc<GridSession> {
        Arc::clone(&self.current.read())
    }

    /// Replaces the published session.
    pub fn publish(&self, session: GridSession) {
        *self.current.write() = Arc::new(session);
    }

    /// Runs a new generation request off-lock and publishes the result.
    ///
    /// Returns the new generation number.
    #[must_use = "the generation number identifies the published session"]
    pub fn regenerate(&self, plan: &GenerationPlan) -> u64 {
        let mut next = GridSession::clone(&self.snapshot());
        next.regenerate(plan);
        let generation = next.generation();
        self.publish(next);
        generation
    }

    /// Flips the cleanup toggle on the published session.
    ///
    /// Returns the new setting.
    #[must_use]
    pub fn toggle_cleanup(&self) -> bool {
        let mut guard = self.current.write();
        let mut next = GridSession::clone(&guard);
        let enabled = next.toggle_cleanup();
        *guard = Arc::new(next);
        enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationConfig;
    use crate::config::SeedSpec;

    fn plan() -> GenerationPlan {
        GenerationConfig {
            screen_width: 270,
            screen_height: 180,
            scale: 1,
            seed: Some(SeedSpec::Number(2024)),
            ..GenerationConfig::default()
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn test_toggle_switches_buffer_without_regenerating() {
        let mut session = GridSession::generate(&plan());
        assert!(!session.use_cleanup());
        assert_eq!(session.active(), session.raw());

        assert!(session.toggle_cleanup());
        assert_eq!(session.active(), session.cleaned());
        assert_eq!(session.generation(), 1);

        session.set_cleanup(false);
        assert_eq!(session.active(), session.raw());
    }

    #[test]
    fn test_cleaned_matches_cleanup_of_raw() {
        let session = GridSession::generate(&plan());
        assert_eq!(session.cleaned(), &cleanup(session.raw()));
    }

    #[test]
    fn test_regenerate_bumps_generation() {
        let mut session = GridSession::generate(&plan());
        let before = session.raw().clone();
        session.regenerate(&plan());
        assert_eq!(session.generation(), 2);
        assert_eq!(session.raw(), &before, "Fixed seed regenerates the same grid");
        assert_eq!(session.seed(), NoiseSeed::new(2024));
    }

    #[test]
    fn test_shared_snapshot_is_stable() {
        let shared = SharedSession::new(GridSession::generate(&plan()));
        let old = shared.snapshot();

        assert_eq!(shared.regenerate(&plan()), 2);
        assert!(shared.toggle_cleanup());

        assert_eq!(old.generation(), 1);
        assert!(!old.use_cleanup());

        let new = shared.snapshot();
        assert_eq!(new.generation(), 2);
        assert!(new.use_cleanup());
    }

    #[test]
    fn test_shared_across_threads() {
        let shared = Arc::new(SharedSession::new(GridSession::generate(&plan())));
        let writer = {
            let shared = Arc::clone(&shared);
            std::thread::spawn(move || {
                for _ in 0..5 {
                    let _ = shared.regenerate(&plan());
                }
            })
        };

        for _ in 0..20 {
            let snap = shared.snapshot();
            assert_eq!(snap.raw().dim_x(), snap.cleaned().dim_x());
        }
        writer.join().unwrap();
        assert_eq!(shared.snapshot().generation(), 6);
    }
}
