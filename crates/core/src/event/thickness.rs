//! Nuclear thickness accumulation
//!
//! The thickness grid is built by looping over participants and adding each to
//! the small subgrid covered by its profile boundary. Compared to looping over
//! every cell for every participant, this bounds the work per nucleon by its
//! support area rather than the grid area.

use crate::core_types::{Nucleon, NucleonProfile};
use crate::grid::{GridGeometry, ScalarField};

/// Add one nucleon's profile into `field`, visiting only its bounding box
///
/// Box corners are converted to indices with `(coord + xymax) / dxy` and
/// clipped into the grid; both ends are inclusive.
#[inline]
pub fn deposit_profile<P>(
    nucleon: &Nucleon,
    profile: &P,
    grid: &GridGeometry,
    field: &mut ScalarField,
) where
    P: NucleonProfile + ?Sized,
{
    let boundary = profile.boundary(nucleon);
    let ixmin = grid.clipped_index(boundary.xmin);
    let ixmax = grid.clipped_index(boundary.xmax);
    let iymin = grid.clipped_index(boundary.ymin);
    let iymax = grid.clipped_index(boundary.ymax);

    for iy in iymin..=iymax {
        let y = grid.cell_center(iy);
        for ix in ixmin..=ixmax {
            let x = grid.cell_center(ix);
            field.add_at(ix, iy, profile.thickness(nucleon, x, y));
        }
    }
}

/// Rebuild `field` as the thickness of one nucleus
///
/// The field is zeroed first. Spectators are skipped. Returns the number of
/// participants deposited so the caller can accumulate `npart` across both
/// nuclei.
pub fn compute_nuclear_thickness<P>(
    nucleus: &[Nucleon],
    profile: &P,
    grid: &GridGeometry,
    field: &mut ScalarField,
) -> usize
where
    P: NucleonProfile + ?Sized,
{
    field.fill(0.0);

    let mut npart = 0;
    for nucleon in nucleus.iter().filter(|n| n.is_participant()) {
        npart += 1;
        deposit_profile(nucleon, profile, grid, field);
    }
    npart
}
