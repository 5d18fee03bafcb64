//! Baselines that ignore the planner.
//!
//! Used to report how much the optimal order saves and to cross-check the
//! evaluator against the naive association.

use crate::dims::ChainDims;
use crate::error::{ChainError, Result};
use crate::matrix::Matrix;

/// Scalar multiplications spent by the left-to-right order `((A B) C) ...`.
#[inline]
pub fn left_to_right_cost(dims: &ChainDims) -> u64 {
    (1..dims.len()).fold(0u64, |acc, k| acc.saturating_add(dims.join_cost(0, k - 1, k)))
}

/// Product of the whole sequence, associated left to right.
pub fn multiply_left_to_right(matrices: &[Matrix]) -> Result<Matrix> {
    let (first, rest) = matrices.split_first().ok_or(ChainError::EmptyChain)?;
    rest.iter()
        .try_fold(first.clone(), |acc, next| acc.multiply(next))
}
