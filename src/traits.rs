//! Core trait for consumers of an optimal split table.
//!
//! Both the evaluator and the parenthesization reporter are folds over the
//! same binary tree: the split table recorded by the planner. Implement
//! [`SplitFold`] and hand it to [`ChainPlan::fold`](crate::plan::ChainPlan::fold)
//! to walk that tree.
//!
//! The walk is a left-to-right post-order traversal:
//! - every leaf `i` is visited exactly once, in increasing order of `i`,
//! - `combine` for a split `(i, j, k)` runs after both of its subtrees.

/// One recorded split decision: the product of matrices `i..=j` is formed as
/// `(i..=k) * (k+1..=j)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Split {
    pub i: usize,
    pub j: usize,
    pub k: usize,
}

impl Split {
    /// Inclusive index range of the left operand.
    #[inline]
    pub fn left(&self) -> (usize, usize) {
        (self.i, self.k)
    }

    /// Inclusive index range of the right operand.
    #[inline]
    pub fn right(&self) -> (usize, usize) {
        (self.k + 1, self.j)
    }
}

/// Leaf and combine actions for a walk over the split tree.
pub trait SplitFold {
    /// Value produced for every subtree.
    type Output;

    /// Error that aborts the walk. Use [`std::convert::Infallible`] for
    /// folds that cannot fail.
    type Error;

    /// Produce the value for matrix `index`.
    fn leaf(&mut self, index: usize) -> Result<Self::Output, Self::Error>;

    /// Combine the values of the two operands of `split`.
    fn combine(
        &mut self,
        left: Self::Output,
        right: Self::Output,
        split: Split,
    ) -> Result<Self::Output, Self::Error>;
}
