//! Dense integer matrices and the pairwise product used by the evaluator.
//!
//! Elements are `i64`. Products use plain integer arithmetic, so values that
//! exceed `i64` panic in debug builds and wrap in release builds; callers with
//! large entries or long chains should keep that in mind.

use std::fmt;

use crate::error::{ChainError, Result};

/// Dense row-major matrix with at least one row and one column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<i64>,
}

impl Matrix {
    /// All-zero matrix of the given shape.
    ///
    /// # Panics
    /// Panics if either dimension is zero or `rows * cols` overflows `usize`.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "matrix dimensions must be positive");
        let Some(len) = rows.checked_mul(cols) else {
            panic!("matrix shape {rows}x{cols} overflows usize");
        };
        Self {
            rows,
            cols,
            data: vec![0; len],
        }
    }

    /// Square identity matrix.
    pub fn identity(n: usize) -> Self {
        Self::from_fn(n, n, |i, j| i64::from(i == j))
    }

    /// Build a matrix by evaluating `f(row, col)` for every cell.
    ///
    /// # Panics
    /// Panics if either dimension is zero.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> i64,
    {
        let mut mat = Self::zeros(rows, cols);
        for i in 0..rows {
            for j in 0..cols {
                mat.data[i * cols + j] = f(i, j);
            }
        }
        mat
    }

    /// Build a matrix from nested rows, rejecting empty or ragged input.
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if cols == 0 {
            return Err(ChainError::EmptyMatrix);
        }
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(ChainError::RaggedMatrix {
                    row: idx,
                    expected: cols,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Build a matrix from a flat row-major buffer.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<i64>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(ChainError::EmptyMatrix);
        }
        let expected = rows
            .checked_mul(cols)
            .ok_or(ChainError::ShapeOverflow { rows, cols })?;
        if data.len() != expected {
            return Err(ChainError::BufferLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> i64 {
        self.data[i * self.cols + j]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, val: i64) {
        self.data[i * self.cols + j] = val;
    }

    /// Borrow row `i`.
    pub fn row(&self, i: usize) -> &[i64] {
        let start = i * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Iterate over rows as slices.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[i64]> {
        self.data.chunks_exact(self.cols)
    }

    /// Row-major element buffer.
    pub fn as_slice(&self) -> &[i64] {
        &self.data
    }

    /// Standard triple-loop product `self * rhs`.
    ///
    /// Fails with [`ChainError::DimensionMismatch`] when `self.cols() != rhs.rows()`;
    /// no partial result is produced in that case.
    pub fn multiply(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.cols != rhs.rows {
            return Err(ChainError::DimensionMismatch {
                left: self.shape(),
                right: rhs.shape(),
            });
        }
        let mut out = Matrix::zeros(self.rows, rhs.cols);
        for i in 0..self.rows {
            let row = self.row(i);
            for j in 0..rhs.cols {
                let mut sum = 0i64;
                for (k, &a) in row.iter().enumerate() {
                    sum += a * rhs.get(k, j);
                }
                out.data[i * rhs.cols + j] = sum;
            }
        }
        Ok(out)
    }
}

/// One row per line, elements separated by single spaces.
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.iter_rows().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            for (j, val) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{val}")?;
            }
        }
        Ok(())
    }
}
