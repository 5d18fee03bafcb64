//! Chain-order planner.
//!
//! Classic interval DP over a dimension vector `p[0..=n]`:
//! - `cost[i][i] = 0`,
//! - `cost[i][j] = min_{i <= k < j} cost[i][k] + cost[k+1][j] + p[i] * p[k+1] * p[j+1]`.
//!
//! Sub-chains are filled by increasing length, so every cell only reads
//! shorter intervals. On ties the smallest `k` wins (strict `<` while
//! scanning `k` upwards); the resulting split table, and therefore the
//! reported parenthesization, is deterministic.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::dims::ChainDims;
use crate::traits::{Split, SplitFold};

/// Sentinel for cells not yet reached by any split.
const UNREACHED: u64 = u64::MAX;

/// Optimal cost and split tables for one dimension vector.
///
/// ```
/// use chain_dp::{ChainDims, ChainPlan};
///
/// let dims = ChainDims::new(vec![30, 35, 15, 5, 10, 20, 25]).unwrap();
/// let plan = ChainPlan::new(&dims);
/// assert_eq!(plan.min_cost(), 15125);
/// assert_eq!(plan.split(0, 5), Some(2));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainPlan {
    dims: ChainDims,
    costs: Vec<Vec<u64>>,
    splits: Vec<Vec<usize>>,
}

impl ChainPlan {
    /// Run the O(n^3) planner.
    pub fn new(dims: &ChainDims) -> Self {
        let n = dims.len();
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("plan_chain", n);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let mut costs = vec![vec![UNREACHED; n]; n];
        let mut splits = vec![vec![0usize; n]; n];
        for (i, row) in costs.iter_mut().enumerate() {
            row[i] = 0;
        }

        for len in 2..=n {
            #[cfg(feature = "tracing")]
            let _diag = tracing::trace_span!("fill_diagonal", len).entered();
            for (i, (cost, k)) in fill_diagonal(dims, &costs, len).into_iter().enumerate() {
                let j = i + len - 1;
                costs[i][j] = cost;
                splits[i][j] = k;
            }
        }

        Self {
            dims: dims.clone(),
            costs,
            splits,
        }
    }

    /// Number of matrices in the planned chain.
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.dims.len()
    }

    #[inline]
    pub fn dims(&self) -> &ChainDims {
        &self.dims
    }

    /// Minimum scalar multiplications for the whole chain.
    #[inline]
    pub fn min_cost(&self) -> u64 {
        self.costs[0][self.len() - 1]
    }

    /// Minimum scalar multiplications for matrices `i..=j`.
    ///
    /// # Panics
    /// Panics unless `i <= j < len()`.
    #[inline]
    pub fn cost(&self, i: usize, j: usize) -> u64 {
        assert!(i <= j, "cost is only defined for i <= j");
        self.costs[i][j]
    }

    /// Optimal split point for matrices `i..=j`, `None` for a single matrix.
    #[inline]
    pub fn split(&self, i: usize, j: usize) -> Option<usize> {
        (i < j).then(|| self.splits[i][j])
    }

    /// Split decisions of the optimal tree in pre-order.
    pub fn splits(&self) -> Vec<Split> {
        fn collect(plan: &ChainPlan, out: &mut Vec<Split>, i: usize, j: usize) {
            let Some(k) = plan.split(i, j) else {
                return;
            };
            out.push(Split { i, j, k });
            collect(plan, out, i, k);
            collect(plan, out, k + 1, j);
        }
        let mut out = Vec::with_capacity(self.len().saturating_sub(1));
        collect(self, &mut out, 0, self.len() - 1);
        out
    }

    /// Walk the optimal tree for matrices `i..=j` with `folder`.
    ///
    /// Leaves are visited left to right; a split is combined after both of
    /// its operands. The first error aborts the walk and is returned as is.
    ///
    /// # Panics
    /// Panics unless `i <= j < len()`.
    pub fn fold<F: SplitFold>(
        &self,
        folder: &mut F,
        i: usize,
        j: usize,
    ) -> Result<F::Output, F::Error> {
        assert!(i <= j && j < self.len(), "range {i}..={j} outside chain");
        match self.split(i, j) {
            None => folder.leaf(i),
            Some(k) => {
                let left = self.fold(folder, i, k)?;
                let right = self.fold(folder, k + 1, j)?;
                folder.combine(left, right, Split { i, j, k })
            }
        }
    }
}

/// Best `(cost, k)` for every start `i` of sub-chains with length `len`.
///
/// Only reads cells of shorter length, so the starts are independent.
#[cfg(not(feature = "parallel"))]
fn fill_diagonal(dims: &ChainDims, costs: &[Vec<u64>], len: usize) -> Vec<(u64, usize)> {
    let n = dims.len();
    (0..=n - len)
        .map(|i| best_split(dims, costs, i, i + len - 1))
        .collect()
}

#[cfg(feature = "parallel")]
fn fill_diagonal(dims: &ChainDims, costs: &[Vec<u64>], len: usize) -> Vec<(u64, usize)> {
    let n = dims.len();
    (0..=n - len)
        .into_par_iter()
        .map(|i| best_split(dims, costs, i, i + len - 1))
        .collect()
}

fn best_split(dims: &ChainDims, costs: &[Vec<u64>], i: usize, j: usize) -> (u64, usize) {
    let mut best = (UNREACHED, i);
    for k in i..j {
        let q = costs[i][k]
            .saturating_add(costs[k + 1][j])
            .saturating_add(dims.join_cost(i, k, j));
        if q < best.0 {
            best = (q, k);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    fn plan(p: &[usize]) -> ChainPlan {
        ChainPlan::new(&ChainDims::new(p.to_vec()).unwrap())
    }

    #[test]
    fn clrs_example_tables() {
        let plan = plan(&[30, 35, 15, 5, 10, 20, 25]);
        assert_eq!(plan.min_cost(), 15125);
        assert_eq!(plan.cost(1, 4), 7125);
        assert_eq!(plan.split(0, 5), Some(2));
        assert_eq!(plan.split(0, 2), Some(0));
        assert_eq!(plan.split(3, 5), Some(4));
    }

    #[test]
    fn small_edges() {
        // Single matrix -> cost 0, nothing to split
        let single = plan(&[10, 20]);
        assert_eq!(single.min_cost(), 0);
        assert_eq!(single.split(0, 0), None);
        assert!(single.splits().is_empty());

        // Two matrices -> one multiplication
        let pair = plan(&[10, 20, 30]);
        assert_eq!(pair.min_cost(), 10 * 20 * 30);
        assert_eq!(pair.splits(), vec![Split { i: 0, j: 1, k: 0 }]);
    }

    #[test]
    fn ties_keep_first_split() {
        let plan = plan(&[1, 1, 1, 1]);
        assert_eq!(plan.min_cost(), 2);
        assert_eq!(plan.split(0, 2), Some(0));
    }

    #[test]
    fn splits_are_preorder() {
        let plan = plan(&[30, 35, 15, 5, 10, 20, 25]);
        let order: Vec<(usize, usize)> = plan.splits().iter().map(|s| (s.i, s.j)).collect();
        assert_eq!(order, vec![(0, 5), (0, 2), (1, 2), (3, 5), (3, 4)]);
    }

    struct LeafOrder(Vec<usize>);

    impl SplitFold for LeafOrder {
        type Output = usize;
        type Error = Infallible;

        fn leaf(&mut self, index: usize) -> Result<usize, Infallible> {
            self.0.push(index);
            Ok(1)
        }

        fn combine(&mut self, left: usize, right: usize, _split: Split) -> Result<usize, Infallible> {
            Ok(left + right)
        }
    }

    #[test]
    fn fold_visits_leaves_left_to_right() {
        let plan = plan(&[30, 35, 15, 5, 10, 20, 25]);
        let mut order = LeafOrder(Vec::new());
        let count = plan.fold(&mut order, 0, 5).unwrap();
        assert_eq!(count, 6);
        assert_eq!(order.0, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    #[should_panic]
    fn fold_rejects_out_of_range() {
        let plan = plan(&[2, 3, 4]);
        let _ = plan.fold(&mut LeafOrder(Vec::new()), 0, 2);
    }
}
