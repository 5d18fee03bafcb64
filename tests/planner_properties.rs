use chain_dp::{ChainDims, ChainPlan};
use proptest::prelude::*;

/// Minimum over every bracketing, by plain recursion.
fn exhaustive_cost(p: &[usize], i: usize, j: usize) -> u64 {
    if i == j {
        return 0;
    }
    (i..j)
        .map(|k| {
            exhaustive_cost(p, i, k)
                + exhaustive_cost(p, k + 1, j)
                + (p[i] * p[k + 1] * p[j + 1]) as u64
        })
        .min()
        .unwrap()
}

fn dims_strategy(max_matrices: usize) -> impl Strategy<Value = Vec<usize>> {
    proptest::collection::vec(1usize..40, 2..=max_matrices + 1)
}

proptest! {
    #[test]
    fn optimum_matches_exhaustive_search(p in dims_strategy(8)) {
        let plan = ChainPlan::new(&ChainDims::new(p.clone()).unwrap());
        prop_assert_eq!(plan.min_cost(), exhaustive_cost(&p, 0, p.len() - 2));
    }

    #[test]
    fn planner_is_deterministic(p in dims_strategy(24)) {
        let dims = ChainDims::new(p).unwrap();
        prop_assert_eq!(ChainPlan::new(&dims), ChainPlan::new(&dims));
    }

    #[test]
    fn recorded_split_realises_cell_cost(p in dims_strategy(16)) {
        let plan = ChainPlan::new(&ChainDims::new(p.clone()).unwrap());
        let n = plan.len();
        for i in 0..n {
            prop_assert_eq!(plan.cost(i, i), 0);
            prop_assert_eq!(plan.split(i, i), None);
            for j in i + 1..n {
                let k = plan.split(i, j).unwrap();
                prop_assert!(i <= k && k < j);
                let parts = plan.cost(i, k) + plan.cost(k + 1, j);
                prop_assert!(plan.cost(i, j) >= parts);
                prop_assert_eq!(
                    plan.cost(i, j),
                    parts + (p[i] * p[k + 1] * p[j + 1]) as u64
                );
                // No split does strictly better, and none before k ties.
                for other in i..j {
                    let q = plan.cost(i, other)
                        + plan.cost(other + 1, j)
                        + (p[i] * p[other + 1] * p[j + 1]) as u64;
                    prop_assert!(q >= plan.cost(i, j));
                    if other < k {
                        prop_assert!(q > plan.cost(i, j));
                    }
                }
            }
        }
    }

    #[test]
    fn preorder_splits_cover_tree(p in dims_strategy(20)) {
        let plan = ChainPlan::new(&ChainDims::new(p).unwrap());
        let splits = plan.splits();
        prop_assert_eq!(splits.len(), plan.len() - 1);
        if let Some(root) = splits.first() {
            prop_assert_eq!((root.i, root.j), (0, plan.len() - 1));
        }
    }
}
