//! Nucleon deposition rules
//!
//! A [`NucleonProfile`] tells the engine how much thickness a participant
//! deposits at a point and over which rectangle that contribution is nonzero.
//! The engine only ever evaluates the profile inside [`NucleonProfile::boundary`],
//! so the boundary must enclose the whole support.

use super::nucleon::Nucleon;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Rectangular support of a deposition, in fm
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Boundary {
    /// Square of half-width `radius` centered on `(x, y)`
    pub fn around(x: f64, y: f64, radius: f64) -> Self {
        Self {
            xmin: x - radius,
            xmax: x + radius,
            ymin: y - radius,
            ymax: y + radius,
        }
    }
}

/// Per-nucleon density deposition rule
///
/// Implementations must be pure: the same nucleon and query point always give
/// the same value. `thickness` is expected to be exactly zero outside
/// `boundary`.
pub trait NucleonProfile {
    /// Rectangle outside which the nucleon contributes nothing
    fn boundary(&self, nucleon: &Nucleon) -> Boundary;

    /// Thickness deposited by `nucleon` at `(x, y)` fm
    fn thickness(&self, nucleon: &Nucleon, x: f64, y: f64) -> f64;

    /// Largest transverse separation at which two nucleons can collide
    fn max_impact(&self) -> f64;
}

/// Number of Gaussian widths kept before the profile is truncated
const TRUNCATION_WIDTHS: f64 = 5.0;

/// Normalized 2D Gaussian profile truncated at five widths
///
/// T(r) = exp(-r² / 2w²) / (2π w²) for r ≤ 5w, zero beyond.
///
/// The default [`NucleonProfile::max_impact`] is `10w`, the separation at
/// which two truncated profiles stop overlapping. That is a loose upper bound
/// meant for geometric cuts. Callers counting binary collisions should set the
/// physical interaction distance, e.g. `sqrt(σ_NN / π)`, with
/// [`GaussianProfile::with_max_impact`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianProfile {
    width: f64,
    width_sq_x2: f64,
    prefactor: f64,
    trunc_radius: f64,
    trunc_radius_sq: f64,
    max_impact: f64,
}

impl GaussianProfile {
    /// Build a profile of Gaussian width `width` fm
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `width` is not a positive finite number.
    pub fn new(width: f64) -> Result<Self, ConfigError> {
        ConfigError::check_positive("nucleon-width", width)?;
        let trunc_radius = TRUNCATION_WIDTHS * width;
        Ok(Self {
            width,
            width_sq_x2: 2.0 * width * width,
            prefactor: 1.0 / (2.0 * PI * width * width),
            trunc_radius,
            trunc_radius_sq: trunc_radius * trunc_radius,
            max_impact: 2.0 * trunc_radius,
        })
    }

    /// Override the collision distance used for binary-collision density
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `max_impact` is not a positive finite number.
    pub fn with_max_impact(mut self, max_impact: f64) -> Result<Self, ConfigError> {
        ConfigError::check_positive("max-impact", max_impact)?;
        self.max_impact = max_impact;
        Ok(self)
    }

    pub fn width(&self) -> f64 {
        self.width
    }
}

impl NucleonProfile for GaussianProfile {
    fn boundary(&self, nucleon: &Nucleon) -> Boundary {
        Boundary::around(nucleon.x(), nucleon.y(), self.trunc_radius)
    }

    #[inline]
    fn thickness(&self, nucleon: &Nucleon, x: f64, y: f64) -> f64 {
        let dx = x - nucleon.x();
        let dy = y - nucleon.y();
        let distance_sq = dx * dx + dy * dy;
        if distance_sq > self.trunc_radius_sq {
            return 0.0;
        }
        self.prefactor * (-distance_sq / self.width_sq_x2).exp()
    }

    fn max_impact(&self) -> f64 {
        self.max_impact
    }
}
