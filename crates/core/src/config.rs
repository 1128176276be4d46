//! Event configuration
//!
//! A thin, `serde`-deserializable description of everything an
//! [`Event`](crate::Event) needs at construction time. Hosts typically load it
//! from a file or fill it from command-line arguments; the engine only
//! validates and consumes it.
//!
//! ```json
//! {
//!   "normalization": 16.0,
//!   "grid_step": 0.2,
//!   "grid_max": 10.0,
//!   "reduced_thickness": 0.0,
//!   "ncoll": false
//! }
//! ```

use crate::error::ConfigError;
use crate::grid::GridGeometry;
use serde::{Deserialize, Serialize};

/// Construction-time parameters of an event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    /// Overall normalization applied to the reduced thickness
    pub normalization: f64,
    /// Grid cell size (fm)
    pub grid_step: f64,
    /// Requested grid half-width (fm); rounded up to whole steps
    pub grid_max: f64,
    /// Generalized-mean exponent p
    pub reduced_thickness: f64,
    /// Also accumulate binary-collision density
    pub ncoll: bool,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            normalization: 1.0,
            grid_step: 0.2,
            grid_max: 10.0,
            reduced_thickness: 0.0,
            ncoll: false,
        }
    }
}

impl EventConfig {
    pub fn with_normalization(mut self, normalization: f64) -> Self {
        self.normalization = normalization;
        self
    }

    pub fn with_grid(mut self, step: f64, max: f64) -> Self {
        self.grid_step = step;
        self.grid_max = max;
        self
    }

    pub fn with_reduced_thickness(mut self, p: f64) -> Self {
        self.reduced_thickness = p;
        self
    }

    pub fn with_ncoll(mut self, ncoll: bool) -> Self {
        self.ncoll = ncoll;
        self
    }

    /// Check every field and resolve the grid geometry
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found: a non-positive or non-finite
    /// normalization, grid step or grid max, a non-finite exponent, or a grid
    /// that is empty or oversized.
    pub fn validate(&self) -> Result<GridGeometry, ConfigError> {
        ConfigError::check_positive("normalization", self.normalization)?;
        ConfigError::check_finite("reduced-thickness", self.reduced_thickness)?;
        GridGeometry::new(self.grid_step, self.grid_max)
    }
}
