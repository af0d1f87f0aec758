#![forbid(unsafe_code)]

//! Caller-boundary errors.
//!
//! Layout and reconciliation cannot fail once their inputs are valid, so
//! the only errors in reactbar come from checking those inputs: widths
//! handed in by the embedding view, and configuration loaded at startup.

use reactbar_reactions::ConfigError;

/// Top-level error type for reactbar.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A width was negative, NaN, or infinite.
    #[error("invalid width {width}: must be finite and >= 0")]
    InvalidWidth { width: f64 },
    /// Configuration failed to load or validate.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Standard result type for reactbar APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Check a width before it reaches the engine.
pub fn validate_width(width: f64) -> Result<f64> {
    if width.is_finite() && width >= 0.0 {
        Ok(width)
    } else {
        Err(Error::InvalidWidth { width })
    }
}
