//! Grid geometry: step, size and physical extent
//!
//! The grid is square and centered on the origin. Its side is derived from a
//! configured half-width and step:
//!
//! 1. `nsteps = ceil(2 * max / step)`
//! 2. `xymax = nsteps * step / 2`
//!
//! If the step does not evenly divide the configured extent, the actual
//! half-width is marginally larger (by less than one step).

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Largest accepted grid side, in cells
pub const MAX_GRID_SIDE: usize = 10_000;

/// Step, size and half-width of a square grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    dxy: f64,
    nsteps: usize,
    xymax: f64,
}

impl GridGeometry {
    /// Resolve a grid from step size and requested half-width (both fm)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if either value is not positive and finite, if
    /// the extent rounds to zero cells, or if the resulting side exceeds
    /// [`MAX_GRID_SIDE`].
    pub fn new(step: f64, max: f64) -> Result<Self, ConfigError> {
        let dxy = ConfigError::check_positive("grid-step", step)?;
        let max = ConfigError::check_positive("grid-max", max)?;

        let side = (2.0 * max / dxy).ceil();
        if !side.is_finite() || side > MAX_GRID_SIDE as f64 {
            return Err(ConfigError::GridTooLarge {
                nsteps: if side.is_finite() { side as usize } else { usize::MAX },
                limit: MAX_GRID_SIDE,
            });
        }
        // 2 * max / step can underflow to zero for extreme ratios
        if side < 1.0 {
            return Err(ConfigError::EmptyGrid { step: dxy, max });
        }
        let nsteps = side as usize;

        Ok(Self {
            dxy,
            nsteps,
            xymax: 0.5 * nsteps as f64 * dxy,
        })
    }

    /// Cell side length (fm)
    pub fn step(&self) -> f64 {
        self.dxy
    }

    /// Number of cells per side
    pub fn nsteps(&self) -> usize {
        self.nsteps
    }

    /// Actual half-width of the grid (fm)
    pub fn xymax(&self) -> f64 {
        self.xymax
    }

    /// Area of one cell (fm²)
    pub fn cell_area(&self) -> f64 {
        self.dxy * self.dxy
    }

    /// Index of the cell containing `coord`, clipped into the grid
    ///
    /// Coordinates outside the grid (including NaN) land on the nearest edge
    /// cell, so the result is always a valid index.
    #[inline]
    pub fn clipped_index(&self, coord: f64) -> usize {
        let index = ((coord + self.xymax) / self.dxy) as i64;
        index.clamp(0, self.nsteps as i64 - 1) as usize
    }

    /// Physical coordinate of the center of cell `index`
    #[inline]
    pub fn cell_center(&self, index: usize) -> f64 {
        self.index_to_position(index as f64)
    }

    /// Convert a fractional index to a physical coordinate
    #[inline]
    pub fn index_to_position(&self, index: f64) -> f64 {
        (index + 0.5) * self.dxy - self.xymax
    }

    /// Fractional index of the physical origin
    pub fn center_index(&self) -> f64 {
        0.5 * (self.nsteps as f64 - 1.0)
    }
}
