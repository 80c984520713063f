//! # Generation Error Types
//!
//! All errors a generation request can surface before any grid exists.
//! Out-of-bounds cell queries are not listed here: they are precondition
//! violations and panic at the call site.

use thiserror::Error;

/// Errors that can occur while configuring a generation request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A configuration value is non-numeric or outside its domain.
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfiguration {
        /// The offending configuration key.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The configuration file could not be read.
    #[error("failed to read configuration file {path}: {reason}")]
    ConfigRead {
        /// Path that was requested.
        path: String,
        /// Underlying I/O error message.
        reason: String,
    },

    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(String),
}

impl GridError {
    /// Shorthand for an [`GridError::InvalidConfiguration`].
    #[must_use]
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }

    /// Returns true for errors caused by bad user input rather than the environment.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfiguration { .. } | Self::ConfigParse(_)
        )
    }
}

/// Result type for generation operations.
pub type GridResult<T> = Result<T, GridError>;
