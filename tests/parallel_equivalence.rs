#![cfg(feature = "parallel")]

use chain_dp::utils::multiply_left_to_right;
use chain_dp::{ChainDims, ChainEngine, ChainPlan, Matrix};
use proptest::prelude::*;

/// Sequential reference planner, same scan order and tie-break.
fn sequential_tables(p: &[usize]) -> (Vec<Vec<u64>>, Vec<Vec<usize>>) {
    let n = p.len() - 1;
    let mut cost = vec![vec![u64::MAX; n]; n];
    let mut split = vec![vec![0usize; n]; n];
    for i in 0..n {
        cost[i][i] = 0;
    }
    for len in 2..=n {
        for i in 0..=n - len {
            let j = i + len - 1;
            for k in i..j {
                let q = cost[i][k] + cost[k + 1][j] + (p[i] * p[k + 1] * p[j + 1]) as u64;
                if q < cost[i][j] {
                    cost[i][j] = q;
                    split[i][j] = k;
                }
            }
        }
    }
    (cost, split)
}

proptest! {
    #[test]
    fn parallel_planner_matches_sequential(p in proptest::collection::vec(1usize..30, 2..40)) {
        let plan = ChainPlan::new(&ChainDims::new(p.clone()).unwrap());
        let (cost, split) = sequential_tables(&p);
        let n = plan.len();
        for i in 0..n {
            for j in i..n {
                prop_assert_eq!(plan.cost(i, j), cost[i][j]);
                if i < j {
                    prop_assert_eq!(plan.split(i, j), Some(split[i][j]));
                }
            }
        }
    }

    #[test]
    fn parallel_evaluation_matches_left_to_right(p in proptest::collection::vec(1usize..5, 2..10)) {
        let dims = ChainDims::new(p).unwrap();
        let matrices: Vec<Matrix> = (0..dims.len())
            .map(|m| {
                let (r, c) = dims.shape(m);
                Matrix::from_fn(r, c, |i, j| ((m + i * 2 + j) % 5) as i64 - 2)
            })
            .collect();
        let engine = ChainEngine::new(dims);
        prop_assert_eq!(
            engine.evaluate(&matrices).unwrap(),
            multiply_left_to_right(&matrices).unwrap()
        );
    }
}
