//! Precomputed DCT basis for the separable 2D transform.
//!
//! The basis and its transpose are built together in a single factory,
//! basis first. Handing both out as one immutable value makes it
//! impossible to apply the transform with a transpose derived from an
//! unconstructed basis, which would silently zero the result.

use super::matrix::Matrix;
use std::f64::consts::PI;

/// The orthogonal cosine basis for a fixed transform size, plus its
/// transpose. Immutable once built; shared across every frame.
#[derive(Debug, Clone)]
pub struct DctBasis {
    size: usize,
    forward: Matrix,
    transpose: Matrix,
}

impl DctBasis {
    /// Builds the basis for an `n × n` transform.
    ///
    /// `element(u, v) = sqrt(2/n) · cos(π/(2n) · v · (2u + 1))`.
    /// Deterministic, with no failure mode for `n ≥ 1`.
    pub fn new(n: usize) -> Self {
        assert!(n > 0, "transform size must be positive");
        let c1 = (2.0 / n as f64).sqrt();
        let forward = Matrix::from_fn(n, |u, v| {
            c1 * (PI / (2.0 * n as f64) * v as f64 * (2 * u + 1) as f64).cos()
        });
        let transpose = forward.transposed();
        Self {
            size: n,
            forward,
            transpose,
        }
    }

    /// Returns the transform size.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Applies the separable 2D transform: `forward × m × forwardᵀ`.
    ///
    /// Two O(n³) multiplies instead of the naive O(n⁴) 2D definition.
    /// The result places low-frequency energy at low indices (top-left).
    pub fn transform(&self, m: &Matrix) -> Matrix {
        assert_eq!(
            m.size(),
            self.size,
            "input matrix does not match transform size"
        );
        self.forward.mul(m).mul(&self.transpose)
    }
}
