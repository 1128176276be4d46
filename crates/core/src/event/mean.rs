//! Generalized means for combining two thickness values
//!
//! The reduced thickness is the generalized mean
//!
//! ```text
//! M_p(a, b) = (1/2 (a^p + b^p))^(1/p)
//! ```
//!
//! with the p → 0 limit being the geometric mean. The family is chosen once
//! when the event is built; the per-cell loop is then monomorphized over the
//! chosen function so it never branches on p.

/// Values below this are treated as zero throughout the engine
pub const TINY: f64 = 1e-12;

/// Generalized mean for p > 0
#[inline]
pub fn positive_pmean(p: f64, a: f64, b: f64) -> f64 {
    (0.5 * (a.powf(p) + b.powf(p))).powf(1.0 / p)
}

/// Generalized mean for p < 0
///
/// Same as [`positive_pmean`] but returns zero when either input vanishes,
/// which is also the correct limit.
#[inline]
pub fn negative_pmean(p: f64, a: f64, b: f64) -> f64 {
    if a < TINY || b < TINY {
        return 0.0;
    }
    positive_pmean(p, a, b)
}

/// Generalized mean for p = 0
#[inline]
pub fn geometric_mean(a: f64, b: f64) -> f64 {
    (a * b).sqrt()
}

/// Member of the generalized-mean family selected from the exponent p
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeneralizedMean {
    /// p = 0
    Geometric,
    /// p > 0
    Positive(f64),
    /// p < 0, with a guard against zero inputs
    Negative(f64),
}

impl GeneralizedMean {
    /// Pick the family member for exponent `p`
    pub fn from_exponent(p: f64) -> Self {
        if p.abs() < TINY {
            Self::Geometric
        } else if p > 0.0 {
            Self::Positive(p)
        } else {
            Self::Negative(p)
        }
    }

    /// The exponent this mean was built from
    pub fn exponent(&self) -> f64 {
        match *self {
            Self::Geometric => 0.0,
            Self::Positive(p) | Self::Negative(p) => p,
        }
    }

    /// Evaluate the mean for a single pair
    ///
    /// Convenient for one-off use; grid passes go through
    /// [`GeneralizedMean::dispatch`] instead.
    pub fn apply(&self, a: f64, b: f64) -> f64 {
        match *self {
            Self::Geometric => geometric_mean(a, b),
            Self::Positive(p) => positive_pmean(p, a, b),
            Self::Negative(p) => negative_pmean(p, a, b),
        }
    }

    /// Run `visitor` with the concrete mean function for this family member
    ///
    /// The match happens once per call; `visitor` sees a plain closure and
    /// can inline it into its inner loop.
    pub fn dispatch<V: MeanVisitor>(&self, visitor: V) -> V::Output {
        match *self {
            Self::Geometric => visitor.visit(geometric_mean),
            Self::Positive(p) => visitor.visit(move |a, b| positive_pmean(p, a, b)),
            Self::Negative(p) => visitor.visit(move |a, b| negative_pmean(p, a, b)),
        }
    }
}

impl std::fmt::Display for GeneralizedMean {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Geometric => write!(f, "geometric"),
            Self::Positive(p) => write!(f, "power (p = {p})"),
            Self::Negative(p) => write!(f, "guarded power (p = {p})"),
        }
    }
}

/// Consumer of a concrete mean function, see [`GeneralizedMean::dispatch`]
pub trait MeanVisitor {
    type Output;

    fn visit<F: Fn(f64, f64) -> f64>(self, mean: F) -> Self::Output;
}
