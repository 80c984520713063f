//! # 1D Value Noise
//!
//! A periodic lookup table of random samples with interpolated reads.
//!
//! ## Determinism Guarantee
//!
//! Given the same [`NoiseSeed`], size and amplitude, [`Noise1D`] produces
//! **exactly** the same table on any platform, any time. The stream is a
//! `ChaCha8` generator owned by the table; there is no ambient global RNG.
//!
//! ## Sampling
//!
//! `noise(x)` reads the two table entries around `floor(x)` (wrapping modulo
//! the table size) and blends them by `frac(x)`. The cosine blend is
//! `ease * (y1 - y2) + y2` with `ease = (cos(t * PI) + 1) / 2`, kept verbatim.

use std::f64::consts::PI;
use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seed for a noise table.
///
/// All randomness in a generation request derives from this seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoiseSeed(u64);

impl NoiseSeed {
    /// Creates a new seed.
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Hashes an arbitrary phrase into a seed.
    ///
    /// FNV-1a over the UTF-8 bytes, so `"forest"` is the same seed everywhere.
    #[must_use]
    pub fn from_phrase(phrase: &str) -> Self {
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in phrase.bytes() {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
        }
        Self(hash)
    }

    /// Draws a fresh seed from the thread-local entropy source.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self(rand::thread_rng().gen())
    }
}

impl fmt::Display for NoiseSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How two neighbouring table samples are blended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    /// `(1 - t) * y1 + t * y2`.
    Linear,
    /// `ease * (y1 - y2) + y2`, `ease = (cos(t * PI) + 1) * 0.5`.
    #[default]
    Cosine,
}

/// Periodic 1D noise generator.
///
/// Owns its table, amplitude and the seed that produced them. [`Noise1D::reset`]
/// is the only mutator.
///
/// # Example
///
/// ```rust
/// use marchgrid_procedural::{Interpolation, Noise1D, NoiseSeed};
///
/// let noise = Noise1D::new(64, 1.0, Some(NoiseSeed::new(7)));
/// let v = noise.noise(12.25, Interpolation::Linear);
/// assert!((0.0..1.0).contains(&v));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Noise1D {
    /// Sample table, every entry in `[0, amplitude)`.
    table: Vec<f64>,
    /// Scale applied to each uniform draw.
    amplitude: f64,
    /// Seed the table was filled from (resolved if entropy was used).
    seed: NoiseSeed,
}

impl Noise1D {
    /// Creates and fills a table of `size` samples.
    ///
    /// `None` seeds from OS entropy; the chosen seed is kept and reported by
    /// [`Noise1D::seed`] so the table can be reproduced.
    #[must_use]
    pub fn new(size: usize, amplitude: f64, seed: Option<NoiseSeed>) -> Self {
        let mut noise = Self {
            table: Vec::new(),
            amplitude,
            seed: NoiseSeed::new(0),
        };
        noise.reset(size, amplitude, seed);
        noise
    }

    /// Wraps an existing sample table.
    ///
    /// Amplitude is reported as `1.0` and the seed as `0`; nothing is drawn.
    #[must_use]
    pub fn from_samples(samples: Vec<f64>) -> Self {
        Self {
            table: samples,
            amplitude: 1.0,
            seed: NoiseSeed::new(0),
        }
    }

    /// Reseeds the stream and replaces the whole table.
    ///
    /// Each of the `size` samples is an independent `uniform[0, 1) * amplitude`
    /// draw. Previous samples are discarded.
    pub fn reset(&mut self, size: usize, amplitude: f64, seed: Option<NoiseSeed>) {
        let seed = seed.unwrap_or_else(|| {
            let drawn = NoiseSeed::from_entropy();
            tracing::debug!(seed = drawn.value(), "noise table seeded from entropy");
            drawn
        });

        let mut rng = ChaCha8Rng::seed_from_u64(seed.value());
        self.table.clear();
        self.table
            .extend((0..size).map(|_| rng.gen::<f64>() * amplitude));
        self.amplitude = amplitude;
        self.seed = seed;
    }

    /// Samples the table at `x >= 0`.
    ///
    /// # Panics
    ///
    /// Panics if the table is empty. Callers validate the period first.
    #[must_use]
    pub fn noise(&self, x: f64, interpolation: Interpolation) -> f64 {
        let size = self.table.len();
        // Reduce in f64 first: x may lie far beyond usize::MAX. The
        // remainder is exact and below `size`, so the cast cannot truncate.
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let index = x.floor().rem_euclid(size as f64) as usize;
        let t = x.fract();

        let y1 = self.table[index];
        let y2 = self.table[(index + 1) % size];

        match interpolation {
            Interpolation::Linear => (1.0 - t) * y1 + t * y2,
            Interpolation::Cosine => ((t * PI).cos() + 1.0) * 0.5 * (y1 - y2) + y2,
        }
    }

    /// Samples with the default (cosine) interpolation.
    #[inline]
    #[must_use]
    pub fn sample(&self, x: f64) -> f64 {
        self.noise(x, Interpolation::default())
    }

    /// Raw table entries.
    #[inline]
    #[must_use]
    pub fn samples(&self) -> &[f64] {
        &self.table
    }

    /// Number of entries before the table wraps.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.table.len()
    }

    /// Amplitude the table was filled with.
    #[inline]
    #[must_use]
    pub const fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Seed the table was filled from.
    #[inline]
    #[must_use]
    pub const fn seed(&self) -> NoiseSeed {
        self.seed
    }
}

impl fmt::Display for Noise1D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for value in &self.table {
            write!(f, "{value:.4}, ")?;
        }
        Ok(())
    }
}
