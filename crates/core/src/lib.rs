//! Initial-condition core for heavy-ion collision events
//!
//! Builds per-event thickness fields from two nuclei of participant nucleons,
//! combines them into a reduced-thickness (entropy-density proxy) field with a
//! tunable generalized mean, and extracts scalar observables by moment
//! integration over that field:
//!
//! - participant and binary-collision counts
//! - multiplicity (integral of the reduced thickness) and centroid
//! - eccentricity magnitude, phase and radius for harmonic orders 2 through 5
//! - integrated entropy through a pluggable entropy-density mapping
//!
//! Nucleon sampling, nucleus geometry and output formats live with the host;
//! this crate only consumes nucleon positions and participant flags.

pub mod config;
pub mod core_types;
pub mod error;
pub mod event;
pub mod grid;

// Re-export core types
pub use config::EventConfig;
pub use core_types::{
    Boundary, EntropyDensity, GaussianProfile, Nucleon, NucleonProfile, PowerLawEntropy, Vec2,
};
pub use error::ConfigError;
pub use event::{Event, GeneralizedMean, HarmonicMoment, Harmonics, ObservableKind};
pub use grid::{GridGeometry, ScalarField};
