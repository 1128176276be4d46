//! Binary-collision density
//!
//! Every participant pair (one nucleon from each nucleus) closer than the
//! profile's collision distance counts as one binary collision. Each collision
//! deposits the profile of a virtual nucleon sitting at the pair midpoint,
//! using the same bounding-box rule as the thickness grids.

use super::thickness::deposit_profile;
use crate::core_types::{Nucleon, NucleonProfile};
use crate::grid::{GridGeometry, ScalarField};

/// Rebuild `field` as the collision density of two nuclei
///
/// The field is zeroed first. Returns the number of binary collisions.
pub fn compute_collision_density<P>(
    nucleus_a: &[Nucleon],
    nucleus_b: &[Nucleon],
    profile: &P,
    grid: &GridGeometry,
    field: &mut ScalarField,
) -> usize
where
    P: NucleonProfile + ?Sized,
{
    field.fill(0.0);

    let max_impact = profile.max_impact();
    let max_impact_sq = max_impact * max_impact;

    let mut ncoll = 0;
    for a in nucleus_a.iter().filter(|n| n.is_participant()) {
        for b in nucleus_b.iter().filter(|n| n.is_participant()) {
            if a.distance_sq(b) > max_impact_sq {
                continue;
            }
            ncoll += 1;
            deposit_profile(&a.midpoint(b), profile, grid, field);
        }
    }
    ncoll
}
