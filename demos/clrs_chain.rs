//! Example: plan and evaluate the CLRS matrix chain.
//!
//! Run with:
//! `cargo run --example clrs_chain`

use chain_dp::utils::left_to_right_cost;
use chain_dp::{ChainDims, ChainEngine, Matrix};

fn main() {
    // Matrices A1..A6 with dimensions:
    // 30x35, 35x15, 15x5, 5x10, 10x20, 20x25
    let dims = ChainDims::new(vec![30, 35, 15, 5, 10, 20, 25]).expect("valid dimensions");
    let engine = ChainEngine::new(dims.clone());

    println!("Optimal multiplication cost: {}", engine.min_cost());
    println!("Left-to-right cost: {}", left_to_right_cost(&dims));
    println!("Optimal parenthesization: {}", engine.parenthesization());
    println!("Split decisions (i,j,k):");
    for s in engine.plan().splits() {
        println!("  Split A[{}..{}] at {}", s.i, s.j, s.k);
    }

    let matrices: Vec<Matrix> = (0..dims.len())
        .map(|m| {
            let (rows, cols) = dims.shape(m);
            Matrix::from_fn(rows, cols, |i, j| ((i + j + m) % 3) as i64 - 1)
        })
        .collect();
    let solution = engine.solve(&matrices);
    match solution.product {
        Ok(product) => println!("Product shape: {:?}", product.shape()),
        Err(err) => eprintln!("evaluation failed: {err}"),
    }
}
