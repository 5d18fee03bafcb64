//! Validated dimension vectors.

use crate::error::{ChainError, Result};
use crate::matrix::Matrix;

/// Dimension vector `p[0..=n]` for a chain of `n >= 1` matrices.
///
/// Matrix `i` has shape `p[i] x p[i+1]`. Every entry is positive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainDims {
    p: Vec<usize>,
}

impl ChainDims {
    /// Validate a raw dimension vector.
    ///
    /// ```
    /// use chain_dp::{ChainDims, ChainError};
    ///
    /// let dims = ChainDims::new(vec![1, 2, 3, 4]).unwrap();
    /// assert_eq!(dims.len(), 3);
    /// assert_eq!(dims.shape(1), (2, 3));
    /// assert_eq!(ChainDims::new(vec![5]), Err(ChainError::EmptyChain));
    /// ```
    pub fn new(p: Vec<usize>) -> Result<Self> {
        if p.len() < 2 {
            return Err(ChainError::EmptyChain);
        }
        if let Some(index) = p.iter().position(|&d| d == 0) {
            return Err(ChainError::ZeroDimension { index });
        }
        Ok(Self { p })
    }

    /// Derive the dimension vector of an existing matrix sequence.
    ///
    /// Fails at the first neighbouring pair whose inner dimensions disagree.
    pub fn from_matrices(matrices: &[Matrix]) -> Result<Self> {
        let first = matrices.first().ok_or(ChainError::EmptyChain)?;
        let mut p = Vec::with_capacity(matrices.len() + 1);
        p.push(first.rows());
        for pair in matrices.windows(2) {
            if pair[0].cols() != pair[1].rows() {
                return Err(ChainError::DimensionMismatch {
                    left: pair[0].shape(),
                    right: pair[1].shape(),
                });
            }
        }
        p.extend(matrices.iter().map(Matrix::cols));
        Ok(Self { p })
    }

    /// Number of matrices in the chain.
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.p.len() - 1
    }

    /// Declared shape of matrix `i`.
    #[inline]
    pub fn shape(&self, i: usize) -> (usize, usize) {
        (self.p[i], self.p[i + 1])
    }

    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.p
    }

    /// `p[i] * p[k+1] * p[j+1]`, the cost of joining `[i, k]` with `[k+1, j]`.
    #[inline]
    pub(crate) fn join_cost(&self, i: usize, k: usize, j: usize) -> u64 {
        (self.p[i] as u64)
            .saturating_mul(self.p[k + 1] as u64)
            .saturating_mul(self.p[j + 1] as u64)
    }
}
