//! Vector type alias for transverse-plane positions.

use nalgebra::Vector2;

/// 2D vector type for positions in the transverse plane.
///
/// This is a simple alias for `nalgebra::Vector2<f64>`, used for nucleon
/// positions and physical centroid coordinates (fm).
pub type Vec2 = Vector2<f64>;
