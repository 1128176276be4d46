//! Eccentricity harmonics and integrated entropy of the reduced thickness
//!
//! The harmonics are weighted sums of r^n exp(i n φ) over the reduced
//! thickness, taken relative to its centroid. The naive way to evaluate
//! exp(i n φ) at a cell is
//!
//! ```text
//! φ    = atan2(y, x)
//! real = cos(n φ)
//! imag = sin(n φ)
//! ```
//!
//! which costs three transcendental calls per cell. Instead cos(n φ) and
//! sin(n φ) are written directly in x and y with the multiple-angle formulas,
//! e.g. r² sin(2φ) = 2xy. The r^n weight cancels the 1/r^n from cos and sin,
//! so each moment is a plain polynomial. Only the odd-order weights need one
//! `sqrt` per cell.

use super::mean::TINY;
use crate::core_types::EntropyDensity;
use crate::grid::{GridGeometry, ScalarField};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Lowest harmonic order reported
pub const MIN_ORDER: usize = 2;
/// Highest harmonic order reported
pub const MAX_ORDER: usize = 5;
/// Number of harmonic orders reported
pub const NUM_ORDERS: usize = MAX_ORDER - MIN_ORDER + 1;

/// Which per-order observable to read from [`Harmonics`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservableKind {
    /// |Σ t r^n e^{inφ}| / Σ t r^n
    Eccentricity,
    /// Phase of Σ t r^n e^{inφ}, in (-π, π]
    Angle,
    /// `dxy² · Σ t r^n / Σ t`
    Radius,
}

/// Observables of a single harmonic order
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HarmonicMoment {
    pub eccentricity: f64,
    pub angle: f64,
    pub radius: f64,
}

impl HarmonicMoment {
    pub fn get(&self, kind: ObservableKind) -> f64 {
        match kind {
            ObservableKind::Eccentricity => self.eccentricity,
            ObservableKind::Angle => self.angle,
            ObservableKind::Radius => self.radius,
        }
    }
}

/// Harmonic observables for orders 2 through 5 plus integrated entropy
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Harmonics {
    moments: [HarmonicMoment; NUM_ORDERS],
    entropy: f64,
}

impl Harmonics {
    /// Observables of order `n`, or `None` outside 2..=5
    pub fn order(&self, n: usize) -> Option<&HarmonicMoment> {
        n.checked_sub(MIN_ORDER).and_then(|i| self.moments.get(i))
    }

    /// One observable addressed by kind and order
    pub fn get(&self, kind: ObservableKind, n: usize) -> Option<f64> {
        self.order(n).map(|m| m.get(kind))
    }

    pub fn eccentricity(&self, n: usize) -> Option<f64> {
        self.get(ObservableKind::Eccentricity, n)
    }

    pub fn angle(&self, n: usize) -> Option<f64> {
        self.get(ObservableKind::Angle, n)
    }

    pub fn radius(&self, n: usize) -> Option<f64> {
        self.get(ObservableKind::Radius, n)
    }

    /// Participant-plane angle (phase + π) / n, in (0, 2π/n]
    pub fn participant_plane(&self, n: usize) -> Option<f64> {
        self.angle(n).map(|phase| (phase + PI) / n as f64)
    }

    /// `dxy² · Σ s(T_R)` over non-empty cells
    pub fn entropy(&self) -> f64 {
        self.entropy
    }

    /// Iterate `(order, moment)` pairs in increasing order
    pub fn orders(&self) -> impl Iterator<Item = (usize, &HarmonicMoment)> {
        self.moments
            .iter()
            .enumerate()
            .map(|(i, m)| (i + MIN_ORDER, m))
    }

    /// Flat layout for writers:
    /// `[entropy, ε2..ε5, angle2..angle5, R2..R5]`
    pub fn to_vec(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(1 + 3 * NUM_ORDERS);
        out.push(self.entropy);
        for kind in [
            ObservableKind::Eccentricity,
            ObservableKind::Angle,
            ObservableKind::Radius,
        ] {
            out.extend(self.moments.iter().map(|m| m.get(kind)));
        }
        out
    }
}

/// Running sums for one harmonic order
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct MomentAccumulator {
    /// Σ t r^n cos(nφ)
    pub re: f64,
    /// Σ t r^n sin(nφ)
    pub im: f64,
    /// Σ t r^n
    pub wt: f64,
}

impl MomentAccumulator {
    fn eccentricity(&self) -> f64 {
        self.re.hypot(self.im) / self.wt.max(TINY)
    }

    fn angle(&self) -> f64 {
        self.im.atan2(self.re)
    }

    fn radius(&self, cell_area: f64, total_weight: f64) -> f64 {
        cell_area * self.wt.max(TINY) / total_weight
    }
}

/// Raw sums from one pass over the reduced thickness
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct MomentSums {
    /// Indexed by order - 2
    pub orders: [MomentAccumulator; NUM_ORDERS],
    /// Σ s(t)
    pub entropy: f64,
    /// Σ t
    pub total_weight: f64,
}

impl MomentSums {
    /// Accumulate all moments in a single pass
    ///
    /// Cells below [`TINY`] are skipped entirely, including from the entropy
    /// and total-weight sums.
    pub fn accumulate<E>(reduced: &ScalarField, centroid: (f64, f64), eos: &E) -> Self
    where
        E: EntropyDensity + ?Sized,
    {
        let (ixcm, iycm) = centroid;
        let mut sums = Self::default();
        let [e2, e3, e4, e5] = &mut sums.orders;

        for (iy, row) in reduced.rows().enumerate() {
            let y = iy as f64 - iycm;
            let y2 = y * y;
            let y3 = y2 * y;
            let y4 = y2 * y2;

            for (ix, &t) in row.iter().enumerate() {
                if t < TINY {
                    continue;
                }

                // (x, y) relative to the centroid, with cached powers
                let x = ix as f64 - ixcm;
                let x2 = x * x;
                let x3 = x2 * x;
                let x4 = x2 * x2;

                let r2 = x2 + y2;
                let r = r2.sqrt();
                let r4 = r2 * r2;

                let xy = x * y;
                let x2y2 = x2 * y2;

                e2.re += t * (x2 - y2);
                e2.im += t * 2.0 * xy;
                e2.wt += t * r2;

                e3.re += t * (x3 - 3.0 * x * y2);
                e3.im += t * (3.0 * x2 * y - y3);
                e3.wt += t * r2 * r;

                e4.re += t * (x4 + y4 - 6.0 * x2y2);
                e4.im += t * 4.0 * xy * (x2 - y2);
                e4.wt += t * r4;

                e5.re += t * x * (x4 - 10.0 * x2y2 + 5.0 * y4);
                e5.im += t * y * (5.0 * x4 - 10.0 * x2y2 + y4);
                e5.wt += t * r4 * r;

                sums.entropy += eos.entropy_density(t);
                sums.total_weight += t;
            }
        }

        sums
    }

    /// Turn raw sums into observables; `cell_area` is `dxy²`
    pub fn finish(&self, cell_area: f64) -> Harmonics {
        // Nothing passed the cut: no shape to speak of
        if self.total_weight < TINY {
            return Harmonics::default();
        }

        let mut harmonics = Harmonics {
            entropy: cell_area * self.entropy,
            ..Harmonics::default()
        };
        for (moment, acc) in harmonics.moments.iter_mut().zip(&self.orders) {
            *moment = HarmonicMoment {
                eccentricity: acc.eccentricity(),
                angle: acc.angle(),
                radius: acc.radius(cell_area, self.total_weight),
            };
        }
        harmonics
    }
}

/// Compute harmonics of `reduced` about `centroid` (grid-index units)
pub fn compute_observables<E>(
    reduced: &ScalarField,
    centroid: (f64, f64),
    grid: &GridGeometry,
    eos: &E,
) -> Harmonics
where
    E: EntropyDensity + ?Sized,
{
    MomentSums::accumulate(reduced, centroid, eos).finish(grid.cell_area())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::PowerLawEntropy;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Fill a field with an anisotropic Gaussian rotated by `theta`
    fn gaussian_field(grid: &GridGeometry, sx: f64, sy: f64, theta: f64) -> ScalarField {
        let mut field = ScalarField::new(grid.nsteps());
        let (sin, cos) = theta.sin_cos();
        for iy in 0..grid.nsteps() {
            for ix in 0..grid.nsteps() {
                let x = grid.cell_center(ix);
                let y = grid.cell_center(iy);
                let u = cos * x + sin * y;
                let v = -sin * x + cos * y;
                let t = (-0.5 * (u * u / (sx * sx) + v * v / (sy * sy))).exp();
                field.set(ix, iy, t);
            }
        }
        field
    }

    #[test]
    fn test_trig_free_moments_match_naive() {
        let mut rng = StdRng::seed_from_u64(20151123);
        let side = 24;
        let mut field = ScalarField::new(side);
        for v in field.as_mut_slice() {
            // Leave some cells empty so the cut is exercised
            *v = if rng.random::<f64>() < 0.2 {
                0.0
            } else {
                rng.random_range(0.0..3.0)
            };
        }
        let centroid = (rng.random_range(5.0..18.0), rng.random_range(5.0..18.0));

        let sums = MomentSums::accumulate(&field, centroid, &PowerLawEntropy::default());

        for (i, acc) in sums.orders.iter().enumerate() {
            let n = (i + MIN_ORDER) as i32;
            let (mut re, mut im, mut wt) = (0.0, 0.0, 0.0);
            for iy in 0..side {
                for ix in 0..side {
                    let t = field.get(ix, iy);
                    if t < TINY {
                        continue;
                    }
                    let x = ix as f64 - centroid.0;
                    let y = iy as f64 - centroid.1;
                    let r = x.hypot(y);
                    let phi = y.atan2(x);
                    let rn = r.powi(n);
                    re += t * rn * (f64::from(n) * phi).cos();
                    im += t * rn * (f64::from(n) * phi).sin();
                    wt += t * rn;
                }
            }
            assert_relative_eq!(acc.re, re, epsilon = 1e-9 * wt);
            assert_relative_eq!(acc.im, im, epsilon = 1e-9 * wt);
            assert_relative_eq!(acc.wt, wt, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_circular_field_has_no_eccentricity() {
        let grid = GridGeometry::new(0.1, 8.0).unwrap();
        let field = gaussian_field(&grid, 1.0, 1.0, 0.0);
        let center = grid.center_index();

        let harmonics =
            compute_observables(&field, (center, center), &grid, &PowerLawEntropy::default());

        for n in MIN_ORDER..=MAX_ORDER {
            let ecc = harmonics.eccentricity(n).unwrap();
            assert!(ecc < 1e-6, "eps_{n} = {ecc}");
        }
    }

    #[test]
    fn test_elliptic_field_eccentricity_and_angle() {
        let grid = GridGeometry::new(0.1, 8.0).unwrap();
        let (sx, sy, theta) = (1.5, 1.0, 0.3);
        let field = gaussian_field(&grid, sx, sy, theta);
        let center = grid.center_index();

        let harmonics =
            compute_observables(&field, (center, center), &grid, &PowerLawEntropy::default());

        // For a Gaussian, eps_2 = (sx² - sy²) / (sx² + sy²)
        let expected = (sx * sx - sy * sy) / (sx * sx + sy * sy);
        assert_relative_eq!(harmonics.eccentricity(2).unwrap(), expected, epsilon = 1e-6);
        // Major axis at theta -> second-order phase at 2 theta
        assert_relative_eq!(harmonics.angle(2).unwrap(), 2.0 * theta, epsilon = 1e-6);
        assert_relative_eq!(
            harmonics.participant_plane(2).unwrap(),
            theta + PI / 2.0,
            epsilon = 1e-6
        );
        // Reflection symmetry kills odd orders
        assert!(harmonics.eccentricity(3).unwrap() < 1e-6);
        assert!(harmonics.eccentricity(5).unwrap() < 1e-6);
    }

    #[test]
    fn test_entropy_and_radius() {
        let grid = GridGeometry::new(0.5, 2.0).unwrap();
        let mut field = ScalarField::new(grid.nsteps());
        field.set(3, 4, 8.0);
        field.set(5, 4, 8.0);
        // Below the cut, ignored everywhere
        field.set(0, 0, 1e-13);

        let harmonics = compute_observables(&field, (4.0, 4.0), &grid, &PowerLawEntropy::default());

        // Two cells of 8^(4/3) = 16
        assert_relative_eq!(harmonics.entropy(), 0.25 * 32.0, epsilon = 1e-12);
        // Σ t r^n = 16 for all n since r = 1, Σ t = 16
        for n in MIN_ORDER..=MAX_ORDER {
            assert_relative_eq!(harmonics.radius(n).unwrap(), 0.25, epsilon = 1e-12);
        }
        // Two points on the x axis: eps_2 = 1, eps_3 = 0
        assert_relative_eq!(harmonics.eccentricity(2).unwrap(), 1.0, epsilon = 1e-12);
        assert!(harmonics.eccentricity(3).unwrap() < 1e-12);
    }

    #[test]
    fn test_custom_entropy_density() {
        let grid = GridGeometry::new(0.5, 2.0).unwrap();
        let mut field = ScalarField::new(grid.nsteps());
        field.set(1, 1, 3.0);
        let linear = |t: f64| t;

        let harmonics = compute_observables(&field, (1.0, 1.0), &grid, &linear);
        assert_relative_eq!(harmonics.entropy(), 0.25 * 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_field_is_all_zero() {
        let grid = GridGeometry::new(0.5, 2.0).unwrap();
        let field = ScalarField::new(grid.nsteps());
        let center = grid.center_index();

        let harmonics = compute_observables(&field, (center, center), &grid, &PowerLawEntropy::default());
        assert_eq!(harmonics, Harmonics::default());
        assert!(harmonics.to_vec().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_addressing_scheme() {
        let mut harmonics = Harmonics {
            entropy: 9.0,
            ..Harmonics::default()
        };
        for (i, m) in harmonics.moments.iter_mut().enumerate() {
            let n = (i + MIN_ORDER) as f64;
            *m = HarmonicMoment {
                eccentricity: n,
                angle: 10.0 + n,
                radius: 20.0 + n,
            };
        }

        assert_eq!(harmonics.get(ObservableKind::Eccentricity, 3), Some(3.0));
        assert_eq!(harmonics.get(ObservableKind::Angle, 5), Some(15.0));
        assert_eq!(harmonics.get(ObservableKind::Radius, 2), Some(22.0));
        assert_eq!(harmonics.get(ObservableKind::Radius, 1), None);
        assert_eq!(harmonics.get(ObservableKind::Radius, 6), None);
        assert_eq!(
            harmonics.to_vec(),
            vec![9.0, 2.0, 3.0, 4.0, 5.0, 12.0, 13.0, 14.0, 15.0, 22.0, 23.0, 24.0, 25.0]
        );
        assert_eq!(harmonics.orders().map(|(n, _)| n).collect::<Vec<_>>(), vec![2, 3, 4, 5]);
    }
}
