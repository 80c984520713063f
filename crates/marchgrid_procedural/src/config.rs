//! # Generation Configuration
//!
//! Everything a generation request needs, loaded once at startup.
//!
//! A [`GenerationConfig`] is the user-facing shape: it comes from a TOML
//! file, gets command line overrides applied, and may hold nonsense.
//! [`GenerationConfig::validate`] turns it into a [`GenerationPlan`], which
//! is the only thing the generator accepts. No grid is ever built from an
//! unvalidated config.
//!
//! ## Example
//!
//! ```rust
//! use marchgrid_procedural::GenerationConfig;
//!
//! let config = GenerationConfig::from_toml_str("scale = 2\nthreshold = 0.6").unwrap();
//! let plan = config.validate().unwrap();
//! assert_eq!(plan.cell_size, 18);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, GridResult};
use crate::grid::ScreenSize;
use crate::noise::{Interpolation, NoiseSeed};

// =============================================================================
// DEFAULTS
// =============================================================================

/// Edge length of one tileset tile, in source pixels.
pub const TILE_PIXELS: i64 = 9;

/// Number of tile variants in a marching-squares tileset.
pub const TILE_VARIANTS: u8 = 16;

/// Default screen width in pixels.
pub const DEFAULT_SCREEN_WIDTH: i64 = 1280;

/// Default screen height in pixels.
pub const DEFAULT_SCREEN_HEIGHT: i64 = 720;

/// Default integer scale applied to the tileset.
pub const DEFAULT_SCALE: i64 = 3;

/// Default noise index advance per visited cell.
pub const DEFAULT_NOISE_STEP: f64 = 1.0;

/// Default occupancy threshold.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Default noise amplitude.
pub const DEFAULT_AMPLITUDE: f64 = 1.0;

/// A seed as written by a user: a number, or any phrase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeedSpec {
    /// Used verbatim.
    Number(u64),
    /// Hashed with [`NoiseSeed::from_phrase`].
    Phrase(String),
}

impl SeedSpec {
    /// Parses free-form input: digits become a number, anything else a phrase.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        input
            .trim()
            .parse::<u64>()
            .map_or_else(|_| Self::Phrase(input.to_string()), Self::Number)
    }

    /// Resolves to the seed fed to the noise table.
    #[must_use]
    pub fn resolve(&self) -> NoiseSeed {
        match self {
            Self::Number(value) => NoiseSeed::new(*value),
            Self::Phrase(phrase) => NoiseSeed::from_phrase(phrase),
        }
    }
}

/// User-facing generation settings.
///
/// Integers are signed so that negative input is reported as out of range
/// rather than as a parse failure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationConfig {
    /// Screen width in pixels.
    pub screen_width: i64,
    /// Screen height in pixels.
    pub screen_height: i64,
    /// Source tile edge in pixels.
    pub tile_pixels: i64,
    /// Integer tileset scale factor.
    pub scale: i64,
    /// Noise index advance per visited cell.
    pub noise_step: f64,
    /// Cells with noise `>= threshold` are filled.
    pub threshold: f64,
    /// Noise table size. `None` means `(width * height) / cell_size`.
    pub period: Option<i64>,
    /// Noise amplitude.
    pub amplitude: f64,
    /// Noise seed. `None` means OS entropy.
    pub seed: Option<SeedSpec>,
    /// Sampling interpolation.
    pub interpolation: Interpolation,
    /// Whether the cleaned grid is the active one.
    pub cleanup: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            tile_pixels: TILE_PIXELS,
            scale: DEFAULT_SCALE,
            noise_step: DEFAULT_NOISE_STEP,
            threshold: DEFAULT_THRESHOLD,
            period: None,
            amplitude: DEFAULT_AMPLITUDE,
            seed: None,
            interpolation: Interpolation::default(),
            cleanup: false,
        }
    }
}

impl GenerationConfig {
    /// Parses a TOML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ConfigParse`] for malformed TOML, wrong value
    /// types or unknown keys.
    pub fn from_toml_str(source: &str) -> GridResult<Self> {
        toml::from_str(source).map_err(|e| GridError::ConfigParse(e.to_string()))
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ConfigRead`] if the file cannot be read, or
    /// [`GridError::ConfigParse`] if it is not a valid config.
    pub fn from_toml_file(path: &Path) -> GridResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| GridError::ConfigRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "loaded configuration file");
        Self::from_toml_str(&source)
    }

    /// Sets `scale` from free-form text.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidConfiguration`] if the text is not an integer.
    pub fn set_scale(&mut self, input: &str) -> GridResult<()> {
        self.scale = parse_int("scale", input)?;
        Ok(())
    }

    /// Sets `noise_step` from free-form text.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidConfiguration`] if the text is not a number.
    pub fn set_noise_step(&mut self, input: &str) -> GridResult<()> {
        self.noise_step = parse_float("noise_step", input)?;
        Ok(())
    }

    /// Sets `threshold` from free-form text.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidConfiguration`] if the text is not a number.
    pub fn set_threshold(&mut self, input: &str) -> GridResult<()> {
        self.threshold = parse_float("threshold", input)?;
        Ok(())
    }

    /// Sets `period` from free-form text.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidConfiguration`] if the text is not an integer.
    pub fn set_period(&mut self, input: &str) -> GridResult<()> {
        self.period = Some(parse_int("period", input)?);
        Ok(())
    }

    /// Checks every value and produces the plan the generator runs.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidConfiguration`] naming the first bad field.
    pub fn validate(&self) -> GridResult<GenerationPlan> {
        let screen_width = positive("screen_width", self.screen_width)?;
        let screen_height = positive("screen_height", self.screen_height)?;
        let tile_pixels = positive("tile_pixels", self.tile_pixels)?;
        let scale = positive("scale", self.scale)?;

        let cell_size = tile_pixels
            .checked_mul(scale)
            .ok_or_else(|| GridError::invalid("scale", "overflows the cell size"))?;

        let noise_step = non_negative("noise_step", self.noise_step)?;
        let threshold = non_negative("threshold", self.threshold)?;

        if !self.amplitude.is_finite() || self.amplitude <= 0.0 {
            return Err(GridError::invalid(
                "amplitude",
                format!("must be a positive number, got {}", self.amplitude),
            ));
        }

        let period = match self.period {
            Some(period) => positive("period", period)?,
            None => {
                let derived = screen_width
                    .checked_mul(screen_height)
                    .map(|area| area / cell_size)
                    .ok_or_else(|| GridError::invalid("period", "screen area overflows"))?;
                if derived == 0 {
                    return Err(GridError::invalid(
                        "period",
                        "derived period is zero; the screen is smaller than one cell",
                    ));
                }
                derived
            }
        };

        Ok(GenerationPlan {
            screen: ScreenSize::new(screen_width, screen_height),
            tile_pixels,
            scale,
            cell_size,
            noise_step,
            threshold,
            period,
            amplitude: self.amplitude,
            seed: self.seed.as_ref().map(SeedSpec::resolve),
            interpolation: self.interpolation,
            cleanup: self.cleanup,
        })
    }
}

/// A validated generation request.
///
/// Every field is in domain: sizes are positive, step and threshold are
/// finite and non-negative.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationPlan {
    /// Screen extent in pixels.
    pub screen: ScreenSize,
    /// Source tile edge in pixels.
    pub tile_pixels: usize,
    /// Tileset scale factor.
    pub scale: usize,
    /// On-screen cell edge, `tile_pixels * scale`.
    pub cell_size: usize,
    /// Noise index advance per visited cell.
    pub noise_step: f64,
    /// Occupancy threshold.
    pub threshold: f64,
    /// Noise table size.
    pub period: usize,
    /// Noise amplitude.
    pub amplitude: f64,
    /// Resolved seed, `None` for entropy.
    pub seed: Option<NoiseSeed>,
    /// Sampling interpolation.
    pub interpolation: Interpolation,
    /// Whether the cleaned grid starts active.
    pub cleanup: bool,
}

fn parse_int(field: &'static str, input: &str) -> GridResult<i64> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| GridError::invalid(field, format!("must be an integer, got {input:?}")))
}

fn parse_float(field: &'static str, input: &str) -> GridResult<f64> {
    input
        .trim()
        .parse::<f64>()
        .map_err(|_| GridError::invalid(field, format!("must be a number, got {input:?}")))
}

fn positive(field: &'static str, value: i64) -> GridResult<usize> {
    if value <= 0 {
        return Err(GridError::invalid(
            field,
            format!("must be a positive integer, got {value}"),
        ));
    }
    usize::try_from(value).map_err(|_| GridError::invalid(field, "does not fit this platform"))
}

fn non_negative(field: &'static str, value: f64) -> GridResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(GridError::invalid(
            field,
            format!("must be a non-negative number, got {value}"),
        ));
    }
    Ok(value)
}
