//! Chain engine: planning, reporting and evaluation behind one handle.
//!
//! The planner runs once, eagerly, in [`ChainEngine::new`]. Everything else
//! reads its tables:
//! 1. [`ChainEngine::parenthesization`] renders the split tree,
//! 2. [`ChainEngine::evaluate`] multiplies a matrix sequence in that order,
//! 3. [`ChainEngine::solve`] does both and keeps the cost and bracketing even
//!    when the product fails.

use crate::dims::ChainDims;
use crate::error::{ChainError, Result};
use crate::evaluator::ChainEvaluator;
use crate::matrix::Matrix;
use crate::plan::ChainPlan;
use crate::reporter::{LabelStyle, Parenthesizer};
use crate::utils::left_to_right_cost;

/// Planned matrix chain.
///
/// Typical usage:
/// ```
/// use chain_dp::{ChainDims, ChainEngine, Matrix};
///
/// let dims = ChainDims::new(vec![1, 2, 3, 4]).unwrap();
/// let engine = ChainEngine::new(dims);
/// assert_eq!(engine.min_cost(), 18);
/// assert_eq!(engine.parenthesization(), "((AB)C)");
///
/// let matrices = vec![
///     Matrix::from_fn(1, 2, |_, j| j as i64 + 1),
///     Matrix::from_fn(2, 3, |i, j| (i + j) as i64),
///     Matrix::from_fn(3, 4, |i, _| i as i64),
/// ];
/// let product = engine.evaluate(&matrices).unwrap();
/// assert_eq!(product.shape(), (1, 4));
/// ```
#[derive(Clone, Debug)]
pub struct ChainEngine {
    plan: ChainPlan,
    labels: LabelStyle,
    check_shapes: bool,
}

/// Everything reported for one chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// Minimum scalar multiplications.
    pub min_cost: u64,
    /// Scalar multiplications of the left-to-right order, for comparison.
    pub naive_cost: u64,
    /// Bracketing that the product below was computed with.
    pub parenthesization: String,
    /// Final product, or the error that stopped it.
    pub product: Result<Matrix>,
}

impl ChainEngine {
    /// Plan `dims` with default settings (letter labels, no shape check).
    pub fn new(dims: ChainDims) -> Self {
        Self::with_options(dims, LabelStyle::default(), false)
    }

    pub(crate) fn with_options(dims: ChainDims, labels: LabelStyle, check_shapes: bool) -> Self {
        Self {
            plan: ChainPlan::new(&dims),
            labels,
            check_shapes,
        }
    }

    #[inline]
    pub fn plan(&self) -> &ChainPlan {
        &self.plan
    }

    #[inline]
    pub fn dims(&self) -> &ChainDims {
        self.plan.dims()
    }

    #[inline]
    pub fn label_style(&self) -> LabelStyle {
        self.labels
    }

    #[inline]
    pub fn checks_shapes(&self) -> bool {
        self.check_shapes
    }

    /// Minimum scalar multiplications for the whole chain.
    #[inline]
    pub fn min_cost(&self) -> u64 {
        self.plan.min_cost()
    }

    /// Optimal bracketing in the configured label style.
    pub fn parenthesization(&self) -> String {
        Parenthesizer::render(&self.plan, self.labels)
    }

    /// Multiply `matrices` in the optimal order.
    ///
    /// Fails with [`ChainError::MatrixCount`] if the sequence length differs
    /// from the planned chain, with [`ChainError::ShapeMismatch`] if shape
    /// checking is enabled and a matrix disagrees with its declared shape, and
    /// with [`ChainError::DimensionMismatch`] if two operands turn out to be
    /// incompatible during the walk.
    pub fn evaluate(&self, matrices: &[Matrix]) -> Result<Matrix> {
        let n = self.plan.len();
        if matrices.len() != n {
            return Err(ChainError::MatrixCount {
                expected: n,
                actual: matrices.len(),
            });
        }
        if self.check_shapes {
            self.check_matrix_shapes(matrices)?;
        }
        ChainEvaluator::new(matrices)
            .evaluate_range(&self.plan, 0, n - 1)
            .map(|product| product.into_owned())
    }

    /// Cost, bracketing and product for one matrix sequence.
    ///
    /// The cost fields and the bracketing only depend on the dimension vector,
    /// so they are filled in even when the product fails.
    pub fn solve(&self, matrices: &[Matrix]) -> Solution {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("solve_chain", n = self.plan.len());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let product = self.evaluate(matrices);
        #[cfg(feature = "tracing")]
        {
            if let Err(err) = &product {
                tracing::warn!(%err, "chain evaluation failed");
            }
        }

        Solution {
            min_cost: self.min_cost(),
            naive_cost: left_to_right_cost(self.dims()),
            parenthesization: self.parenthesization(),
            product,
        }
    }

    fn check_matrix_shapes(&self, matrices: &[Matrix]) -> Result<()> {
        let dims = self.dims();
        for (index, m) in matrices.iter().enumerate() {
            let expected = dims.shape(index);
            if m.shape() != expected {
                return Err(ChainError::ShapeMismatch {
                    index,
                    expected,
                    actual: m.shape(),
                });
            }
        }
        Ok(())
    }
}
