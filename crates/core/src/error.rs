//! Configuration errors
//!
//! Event computation itself cannot fail; everything that could go wrong
//! numerically is guarded in place. What can fail is building an event from a
//! bad configuration, and that is reported here before any grid is allocated.

use thiserror::Error;

/// Rejected configuration value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A strictly positive quantity was zero or negative
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    /// A quantity was NaN or infinite
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    /// The requested grid would be unreasonably large
    #[error("grid of {nsteps}x{nsteps} cells exceeds the limit of {limit} per side")]
    GridTooLarge { nsteps: usize, limit: usize },

    /// The requested extent does not cover a single cell
    #[error("grid-max {max} with grid-step {step} leaves no cells")]
    EmptyGrid { step: f64, max: f64 },
}

impl ConfigError {
    /// Check that `value` is finite
    ///
    /// # Errors
    ///
    /// [`ConfigError::NonFinite`] for NaN or infinite values.
    pub fn check_finite(field: &'static str, value: f64) -> Result<f64, Self> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Self::NonFinite { field, value })
        }
    }

    /// Check that `value` is finite and strictly positive
    ///
    /// # Errors
    ///
    /// [`ConfigError::NonFinite`] or [`ConfigError::NonPositive`].
    pub fn check_positive(field: &'static str, value: f64) -> Result<f64, Self> {
        Self::check_finite(field, value)?;
        if value > 0.0 {
            Ok(value)
        } else {
            Err(Self::NonPositive { field, value })
        }
    }
}
