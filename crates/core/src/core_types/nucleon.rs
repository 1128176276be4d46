//! Nucleon data as seen by the event engine.
//!
//! Nucleon sampling and participant classification happen upstream; the engine
//! only reads a position and a participant flag.

use super::vec2::Vec2;
use serde::{Deserialize, Serialize};

/// A single nucleon in the transverse plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Nucleon {
    position: Vec2,
    participant: bool,
}

impl Nucleon {
    /// Create a nucleon at `(x, y)` fm
    pub fn new(x: f64, y: f64, participant: bool) -> Self {
        Self {
            position: Vec2::new(x, y),
            participant,
        }
    }

    /// Shorthand for a participating nucleon
    pub fn participant(x: f64, y: f64) -> Self {
        Self::new(x, y, true)
    }

    /// Shorthand for a spectator
    pub fn spectator(x: f64, y: f64) -> Self {
        Self::new(x, y, false)
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    /// Whether this nucleon interacted and therefore deposits thickness
    pub fn is_participant(&self) -> bool {
        self.participant
    }

    /// Mark this nucleon as a participant
    pub fn set_participant(&mut self) {
        self.participant = true;
    }

    /// Squared transverse distance to another nucleon
    pub fn distance_sq(&self, other: &Nucleon) -> f64 {
        (self.position - other.position).norm_squared()
    }

    /// Participant located halfway between two nucleons
    pub fn midpoint(&self, other: &Nucleon) -> Nucleon {
        let mid = (self.position + other.position) * 0.5;
        Self::participant(mid.x, mid.y)
    }
}
