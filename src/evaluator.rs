//! Chain evaluator: multiplies a matrix sequence in the planned order.

use std::borrow::Cow;

use crate::error::{ChainError, Result};
use crate::matrix::Matrix;
use crate::plan::ChainPlan;
use crate::traits::{Split, SplitFold};

/// Applies a [`ChainPlan`] to a concrete matrix sequence.
///
/// Leaves are borrowed from the sequence; only products are allocated.
/// A [`ChainError::DimensionMismatch`] from any pairwise multiply aborts the
/// walk and is returned unchanged.
#[derive(Clone, Copy, Debug)]
pub struct ChainEvaluator<'a> {
    matrices: &'a [Matrix],
}

impl<'a> ChainEvaluator<'a> {
    pub fn new(matrices: &'a [Matrix]) -> Self {
        Self { matrices }
    }

    /// Product of matrices `i..=j` following `plan`.
    ///
    /// # Panics
    /// Panics unless `i <= j < plan.len()` and the sequence holds at least
    /// `j + 1` matrices.
    pub fn evaluate_range(&self, plan: &ChainPlan, i: usize, j: usize) -> Result<Cow<'a, Matrix>> {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("evaluate_chain", i, j);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        self.walk(plan, i, j)
    }

    #[cfg(not(feature = "parallel"))]
    fn walk(&self, plan: &ChainPlan, i: usize, j: usize) -> Result<Cow<'a, Matrix>> {
        let mut folder = *self;
        plan.fold(&mut folder, i, j)
    }

    /// Same post-order as [`ChainPlan::fold`], with both operands of every
    /// split evaluated concurrently.
    #[cfg(feature = "parallel")]
    fn walk(&self, plan: &ChainPlan, i: usize, j: usize) -> Result<Cow<'a, Matrix>> {
        let mut folder = *self;
        match plan.split(i, j) {
            None => folder.leaf(i),
            Some(k) => {
                let (left, right) =
                    rayon::join(|| self.walk(plan, i, k), || self.walk(plan, k + 1, j));
                folder.combine(left?, right?, Split { i, j, k })
            }
        }
    }
}

impl<'a> SplitFold for ChainEvaluator<'a> {
    type Output = Cow<'a, Matrix>;
    type Error = ChainError;

    fn leaf(&mut self, index: usize) -> Result<Self::Output> {
        let matrices: &'a [Matrix] = self.matrices;
        Ok(Cow::Borrowed(&matrices[index]))
    }

    fn combine(
        &mut self,
        left: Self::Output,
        right: Self::Output,
        split: Split,
    ) -> Result<Self::Output> {
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!("multiply", i = split.i, k = split.k, j = split.j).entered();
        #[cfg(not(feature = "tracing"))]
        let _ = split;

        left.multiply(&right).map(Cow::Owned)
    }
}
