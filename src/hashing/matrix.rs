//! Small square matrix type for the separable transform.
//!
//! Only the operations the hashing pipeline needs: construction,
//! element access, and the O(n³) multiply used twice per frame.

/// A square matrix of `f64` values in row-major order.
#[derive(Clone, PartialEq)]
pub struct Matrix {
    size: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Creates a zero-filled matrix of the given edge size.
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            data: vec![0.0; size * size],
        }
    }

    /// Builds a matrix by evaluating `f(row, col)` at every cell.
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                data.push(f(row, col));
            }
        }
        Self { size, data }
    }

    /// Returns the edge size.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the value at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        debug_assert!(row < self.size && col < self.size);
        self.data[row * self.size + col]
    }

    /// Sets the value at `(row, col)`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        debug_assert!(row < self.size && col < self.size);
        self.data[row * self.size + col] = value;
    }

    /// Returns the transposed matrix.
    pub fn transposed(&self) -> Self {
        Self::from_fn(self.size, |row, col| self.get(col, row))
    }

    /// Multiplies `self × rhs`.
    ///
    /// Both operands must share the same edge size; a mismatch is a
    /// configuration invariant violation, not a recoverable condition.
    pub fn mul(&self, rhs: &Matrix) -> Matrix {
        assert_eq!(
            self.size, rhs.size,
            "matrix multiply requires equal dimensions"
        );
        let n = self.size;
        let mut out = Matrix::zeros(n);
        for i in 0..n {
            for k in 0..n {
                let lhs = self.data[i * n + k];
                if lhs == 0.0 {
                    continue;
                }
                for j in 0..n {
                    out.data[i * n + j] += lhs * rhs.data[k * n + j];
                }
            }
        }
        out
    }
}

impl std::fmt::Debug for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matrix").field("size", &self.size).finish()
    }
}
