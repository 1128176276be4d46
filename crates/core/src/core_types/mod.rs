//! Core types shared by the event engine and its collaborators

pub mod entropy;
pub mod nucleon;
pub mod profile;
pub mod vec2;

pub use entropy::{EntropyDensity, PowerLawEntropy};
pub use nucleon::Nucleon;
pub use profile::{Boundary, GaussianProfile, NucleonProfile};
pub use vec2::Vec2;
