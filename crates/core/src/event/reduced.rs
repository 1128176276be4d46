//! Reduced thickness: cell-wise generalized mean of two thickness fields

use super::mean::{MeanVisitor, TINY};
use crate::grid::{GridGeometry, ScalarField};

/// Integral and centroid of a freshly computed reduced-thickness field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReducedSummary {
    /// `dxy² · Σ T_R`
    pub multiplicity: f64,
    /// Intensity-weighted centroid in grid-index units
    pub centroid: (f64, f64),
    /// Whether the field was empty and the centroid fell back to the grid center
    pub degenerate: bool,
}

/// Fill `reduced` with `norm · mean(TA, TB)` and summarize it in one pass
///
/// The centroid is kept in index units; the `dxy` factor would cancel in every
/// later use. When the field sums to less than [`TINY`] the centroid falls back
/// to the grid center instead of dividing by zero.
pub fn compute_reduced_thickness<F>(
    mean: F,
    norm: f64,
    thickness_a: &ScalarField,
    thickness_b: &ScalarField,
    grid: &GridGeometry,
    reduced: &mut ScalarField,
) -> ReducedSummary
where
    F: Fn(f64, f64) -> f64,
{
    let side = grid.nsteps();
    let mut sum = 0.0;
    let mut ixcm = 0.0;
    let mut iycm = 0.0;

    let rows = thickness_a
        .as_slice()
        .chunks_exact(side)
        .zip(thickness_b.as_slice().chunks_exact(side))
        .zip(reduced.as_mut_slice().chunks_exact_mut(side));

    for (iy, ((row_a, row_b), row_r)) in rows.enumerate() {
        let fy = iy as f64;
        for (ix, ((&ta, &tb), out)) in row_a.iter().zip(row_b).zip(row_r).enumerate() {
            let t = norm * mean(ta, tb);
            *out = t;
            sum += t;
            ixcm += t * ix as f64;
            iycm += t * fy;
        }
    }

    let multiplicity = grid.cell_area() * sum;
    if sum < TINY {
        let center = grid.center_index();
        return ReducedSummary {
            multiplicity,
            centroid: (center, center),
            degenerate: true,
        };
    }

    ReducedSummary {
        multiplicity,
        centroid: (ixcm / sum, iycm / sum),
        degenerate: false,
    }
}

/// [`MeanVisitor`] adapter so the mean family can be dispatched once per event
pub(crate) struct ReducedPass<'a> {
    pub norm: f64,
    pub thickness_a: &'a ScalarField,
    pub thickness_b: &'a ScalarField,
    pub grid: &'a GridGeometry,
    pub reduced: &'a mut ScalarField,
}

impl MeanVisitor for ReducedPass<'_> {
    type Output = ReducedSummary;

    fn visit<F: Fn(f64, f64) -> f64>(self, mean: F) -> ReducedSummary {
        compute_reduced_thickness(
            mean,
            self.norm,
            self.thickness_a,
            self.thickness_b,
            self.grid,
            self.reduced,
        )
    }
}
