//! Mapping from reduced thickness to entropy density.

/// Equation-of-state stand-in used when integrating entropy
///
/// Must be a pure function of the reduced thickness.
pub trait EntropyDensity: Send + Sync {
    fn entropy_density(&self, reduced_thickness: f64) -> f64;
}

/// Power-law placeholder, `s = T_R^exponent`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerLawEntropy {
    pub exponent: f64,
}

impl Default for PowerLawEntropy {
    fn default() -> Self {
        Self {
            exponent: 4.0 / 3.0,
        }
    }
}

impl EntropyDensity for PowerLawEntropy {
    #[inline]
    fn entropy_density(&self, reduced_thickness: f64) -> f64 {
        reduced_thickness.powf(self.exponent)
    }
}

impl<F> EntropyDensity for F
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    #[inline]
    fn entropy_density(&self, reduced_thickness: f64) -> f64 {
        self(reduced_thickness)
    }
}
