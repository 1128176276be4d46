//! Square scalar field storage
//!
//! Stores a 2D field as a flat `Vec<f64>` in row-major order, indexed as
//! `(ix, iy)` with `iy` selecting the row. All thickness, entropy and
//! collision fields share this layout.

/// Square 2D field of `f64` values
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    /// Field values in row-major order (iy * side + ix)
    data: Vec<f64>,
    /// Cells per side
    side: usize,
}

impl ScalarField {
    /// Create a `side` x `side` field initialized to zero
    #[must_use]
    pub fn new(side: usize) -> Self {
        Self::with_value(side, 0.0)
    }

    /// Create a `side` x `side` field initialized to `value`
    #[must_use]
    pub fn with_value(side: usize, value: f64) -> Self {
        Self {
            data: vec![value; side * side],
            side,
        }
    }

    /// Cells per side
    pub fn side(&self) -> usize {
        self.side
    }

    /// Get reference to field data
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Get mutable reference to field data
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Iterate over rows in increasing `iy`
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks_exact(self.side.max(1))
    }

    /// Get value at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    #[must_use]
    pub fn get(&self, ix: usize, iy: usize) -> f64 {
        assert!(ix < self.side && iy < self.side, "Coordinates out of bounds");
        self.data[iy * self.side + ix]
    }

    /// Set value at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    pub fn set(&mut self, ix: usize, iy: usize, value: f64) {
        assert!(ix < self.side && iy < self.side, "Coordinates out of bounds");
        self.data[iy * self.side + ix] = value;
    }

    /// Add to the value at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn add_at(&mut self, ix: usize, iy: usize, value: f64) {
        assert!(ix < self.side && iy < self.side, "Coordinates out of bounds");
        self.data[iy * self.side + ix] += value;
    }

    /// Fill entire field with a value
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Plain sum of all cells
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }
}
