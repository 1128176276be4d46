//! Per-event grid engine
//!
//! An [`Event`] owns every grid it needs and is meant to be reused across many
//! collisions: grids are allocated once at construction and reset at the
//! start of each [`Event::compute`].
//!
//! Each call runs, in order:
//! 1. thickness of nucleus A and nucleus B (bounding-box deposition)
//! 2. optional binary-collision density
//! 3. reduced thickness via the configured generalized mean, plus centroid
//! 4. harmonic observables about that centroid
//!
//! # Example
//!
//! ```rust
//! use ic_sim_core::{Event, EventConfig, GaussianProfile, Nucleon};
//!
//! let config = EventConfig::default().with_reduced_thickness(0.0);
//! let mut event = Event::new(&config).unwrap();
//! let profile = GaussianProfile::new(0.5).unwrap();
//!
//! let a = [Nucleon::participant(-0.2, 0.0)];
//! let b = [Nucleon::participant(0.2, 0.0)];
//! event.compute(&a, &b, &profile);
//!
//! assert_eq!(event.npart(), 2);
//! assert!(event.multiplicity() > 0.0);
//! ```

mod collision;
mod mean;
mod observables;
mod reduced;
mod thickness;

pub use collision::compute_collision_density;
pub use mean::{geometric_mean, negative_pmean, positive_pmean, GeneralizedMean, MeanVisitor, TINY};
pub use observables::{
    compute_observables, HarmonicMoment, Harmonics, ObservableKind, MAX_ORDER, MIN_ORDER,
    NUM_ORDERS,
};
pub use reduced::{compute_reduced_thickness, ReducedSummary};
pub use thickness::{compute_nuclear_thickness, deposit_profile};

use crate::config::EventConfig;
use crate::core_types::{EntropyDensity, Nucleon, NucleonProfile, PowerLawEntropy, Vec2};
use crate::error::ConfigError;
use crate::grid::{GridGeometry, ScalarField};
use reduced::ReducedPass;
use tracing::{debug, trace};

/// Reusable per-event state: grids, counters and observables
pub struct Event {
    norm: f64,
    grid: GridGeometry,
    mean: GeneralizedMean,
    with_ncoll: bool,
    eos: Box<dyn EntropyDensity>,

    // Grids, all nsteps x nsteps
    thickness_a: ScalarField,
    thickness_b: ScalarField,
    reduced: ScalarField,
    collision: ScalarField,

    // Per-event results
    npart: usize,
    ncoll: usize,
    multiplicity: f64,
    collision_integral: f64,
    centroid: (f64, f64),
    harmonics: Harmonics,
}

impl Event {
    /// Build an event from a validated configuration
    ///
    /// Resolves the grid, allocates all fields and picks the generalized-mean
    /// family once for the lifetime of the event.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration fails
    /// [`EventConfig::validate`].
    pub fn new(config: &EventConfig) -> Result<Self, ConfigError> {
        let grid = config.validate()?;
        let mean = GeneralizedMean::from_exponent(config.reduced_thickness);
        let side = grid.nsteps();

        debug!(
            "Event grid {}x{} (step {} fm, half-width {} fm), {} mean, ncoll {}",
            side,
            side,
            grid.step(),
            grid.xymax(),
            mean,
            config.ncoll
        );

        let center = grid.center_index();
        Ok(Self {
            norm: config.normalization,
            grid,
            mean,
            with_ncoll: config.ncoll,
            eos: Box::new(PowerLawEntropy::default()),
            thickness_a: ScalarField::new(side),
            thickness_b: ScalarField::new(side),
            reduced: ScalarField::new(side),
            collision: ScalarField::new(side),
            npart: 0,
            ncoll: 0,
            multiplicity: 0.0,
            collision_integral: 0.0,
            centroid: (center, center),
            harmonics: Harmonics::default(),
        })
    }

    /// Replace the entropy-density mapping used for the entropy integral
    pub fn with_entropy_density<E>(mut self, eos: E) -> Self
    where
        E: EntropyDensity + 'static,
    {
        self.eos = Box::new(eos);
        self
    }

    /// Clear all grids and per-event results
    pub fn reset(&mut self) {
        self.thickness_a.fill(0.0);
        self.thickness_b.fill(0.0);
        self.reduced.fill(0.0);
        self.collision.fill(0.0);
        self.npart = 0;
        self.ncoll = 0;
        self.multiplicity = 0.0;
        self.collision_integral = 0.0;
        let center = self.grid.center_index();
        self.centroid = (center, center);
        self.harmonics = Harmonics::default();
    }

    /// Compute all grids and observables for one collision
    ///
    /// Previous results are discarded first, so the same instance can be
    /// reused for any number of events.
    pub fn compute<P>(&mut self, nucleus_a: &[Nucleon], nucleus_b: &[Nucleon], profile: &P)
    where
        P: NucleonProfile + ?Sized,
    {
        self.reset();

        self.npart += compute_nuclear_thickness(nucleus_a, profile, &self.grid, &mut self.thickness_a);
        self.npart += compute_nuclear_thickness(nucleus_b, profile, &self.grid, &mut self.thickness_b);

        if self.with_ncoll {
            self.ncoll = compute_collision_density(
                nucleus_a,
                nucleus_b,
                profile,
                &self.grid,
                &mut self.collision,
            );
            self.collision_integral = self.grid.cell_area() * self.collision.sum();
        }

        let summary = self.mean.dispatch(ReducedPass {
            norm: self.norm,
            thickness_a: &self.thickness_a,
            thickness_b: &self.thickness_b,
            grid: &self.grid,
            reduced: &mut self.reduced,
        });
        if summary.degenerate {
            debug!(
                "Reduced thickness vanishes (npart {}), centroid set to grid center",
                self.npart
            );
        }
        self.multiplicity = summary.multiplicity;
        self.centroid = summary.centroid;

        self.harmonics = compute_observables(&self.reduced, self.centroid, &self.grid, &*self.eos);

        trace!(
            "Event done: npart {}, ncoll {}, multiplicity {:.4}",
            self.npart,
            self.ncoll,
            self.multiplicity
        );
    }

    /// Number of participants in both nuclei
    pub fn npart(&self) -> usize {
        self.npart
    }

    /// Number of binary collisions; zero unless ncoll is enabled
    pub fn ncoll(&self) -> usize {
        self.ncoll
    }

    /// Integral of the reduced thickness
    pub fn multiplicity(&self) -> f64 {
        self.multiplicity
    }

    /// Integral of the binary-collision density
    pub fn collision_integral(&self) -> f64 {
        self.collision_integral
    }

    /// Centroid of the reduced thickness in grid-index units
    pub fn centroid(&self) -> (f64, f64) {
        self.centroid
    }

    /// Centroid of the reduced thickness in fm
    pub fn centroid_position(&self) -> Vec2 {
        Vec2::new(
            self.grid.index_to_position(self.centroid.0),
            self.grid.index_to_position(self.centroid.1),
        )
    }

    pub fn harmonics(&self) -> &Harmonics {
        &self.harmonics
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.grid
    }

    pub fn mean(&self) -> GeneralizedMean {
        self.mean
    }

    pub fn thickness_a(&self) -> &ScalarField {
        &self.thickness_a
    }

    pub fn thickness_b(&self) -> &ScalarField {
        &self.thickness_b
    }

    pub fn reduced_thickness(&self) -> &ScalarField {
        &self.reduced
    }

    pub fn collision_density(&self) -> &ScalarField {
        &self.collision
    }
}

impl std::fmt::Debug for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Event")
            .field("grid", &self.grid)
            .field("mean", &self.mean)
            .field("npart", &self.npart)
            .field("ncoll", &self.ncoll)
            .field("multiplicity", &self.multiplicity)
            .field("centroid", &self.centroid)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::GaussianProfile;
    use approx::assert_relative_eq;

    #[test]
    fn test_event_rejects_invalid_config() {
        let config = EventConfig::default().with_grid(0.0, 10.0);
        assert!(Event::new(&config).is_err());
    }

    #[test]
    fn test_fresh_event_is_empty() {
        let event = Event::new(&EventConfig::default()).unwrap();
        assert_eq!(event.npart(), 0);
        assert_eq!(event.multiplicity(), 0.0);
        assert_eq!(event.centroid(), (49.5, 49.5));
        assert!(event.centroid_position().norm() < 1e-12);
    }

    #[test]
    fn test_new_rejects_grid_without_cells() {
        let config = EventConfig::default().with_grid(1e300, 1e-300);
        assert!(matches!(Event::new(&config), Err(ConfigError::EmptyGrid { .. })));
    }

    #[test]
    fn test_reset_clears_state() {
        let mut event = Event::new(&EventConfig::default().with_ncoll(true)).unwrap();
        let profile = GaussianProfile::new(0.5).unwrap();
        let a = [Nucleon::participant(0.5, 0.0)];
        let b = [Nucleon::participant(0.0, 0.5)];
        event.compute(&a, &b, &profile);
        assert!(event.multiplicity() > 0.0);
        assert_eq!(event.ncoll(), 1);

        event.reset();
        assert_eq!(event.npart(), 0);
        assert_eq!(event.ncoll(), 0);
        assert_eq!(event.multiplicity(), 0.0);
        assert_eq!(event.reduced_thickness().sum(), 0.0);
        assert_eq!(event.collision_density().sum(), 0.0);
        assert_eq!(*event.harmonics(), Harmonics::default());
    }

    #[test]
    fn test_npart_counts_both_nuclei() {
        let mut event = Event::new(&EventConfig::default()).unwrap();
        let profile = GaussianProfile::new(0.5).unwrap();
        let a = [
            Nucleon::participant(0.0, 0.0),
            Nucleon::spectator(5.0, 0.0),
            Nucleon::participant(0.5, 0.5),
        ];
        let b = [Nucleon::participant(0.2, 0.0), Nucleon::spectator(-5.0, 0.0)];
        event.compute(&a, &b, &profile);
        assert_eq!(event.npart(), 3);

        // npart does not leak across events
        event.compute(&a, &b, &profile);
        assert_eq!(event.npart(), 3);
    }

    #[test]
    fn test_ncoll_disabled_leaves_collision_grid_empty() {
        let mut event = Event::new(&EventConfig::default()).unwrap();
        let profile = GaussianProfile::new(0.5).unwrap();
        let a = [Nucleon::participant(0.0, 0.0)];
        let b = [Nucleon::participant(0.0, 0.0)];
        event.compute(&a, &b, &profile);
        assert_eq!(event.ncoll(), 0);
        assert_eq!(event.collision_integral(), 0.0);
    }

    #[test]
    fn test_normalization_scales_multiplicity() {
        let profile = GaussianProfile::new(0.5).unwrap();
        let a = [Nucleon::participant(-0.3, 0.1)];
        let b = [Nucleon::participant(0.3, -0.1)];

        let mut unit = Event::new(&EventConfig::default()).unwrap();
        let mut scaled = Event::new(&EventConfig::default().with_normalization(16.0)).unwrap();
        unit.compute(&a, &b, &profile);
        scaled.compute(&a, &b, &profile);

        assert_relative_eq!(scaled.multiplicity(), 16.0 * unit.multiplicity(), max_relative = 1e-12);
        // Shape observables do not depend on the overall scale
        assert_relative_eq!(
            scaled.harmonics().eccentricity(2).unwrap(),
            unit.harmonics().eccentricity(2).unwrap(),
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_custom_entropy_density_is_used() {
        let profile = GaussianProfile::new(0.5).unwrap();
        let a = [Nucleon::participant(0.0, 0.0)];
        let b = [Nucleon::participant(0.0, 0.0)];

        let mut event = Event::new(&EventConfig::default())
            .unwrap()
            .with_entropy_density(|t: f64| t);
        event.compute(&a, &b, &profile);

        // Linear mapping: entropy integral equals the multiplicity over non-empty cells
        assert_relative_eq!(
            event.harmonics().entropy(),
            event.multiplicity(),
            max_relative = 1e-9
        );
    }
}
