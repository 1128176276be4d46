//! Grid storage and geometry shared by every field in an event

mod field;
mod geometry;

pub use field::ScalarField;
pub use geometry::{GridGeometry, MAX_GRID_SIDE};
