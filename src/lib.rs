//! Optimal matrix-chain multiplication.
//!
//! This crate plans the cheapest association order for a chain of matrices
//! `A_0 A_1 ... A_{n-1}` (matrix `i` has shape `p[i] x p[i+1]`) and then
//! executes the product in that order.
//!
//! ## Core idea
//! 1. Validate the dimension vector into a [`ChainDims`].
//! 2. Let [`ChainPlan`] fill the classic O(n^3) interval DP: minimum scalar
//!    multiplications and the optimal split for every sub-chain.
//! 3. Walk the split table with a [`SplitFold`]: the [`ChainEvaluator`]
//!    multiplies real matrices, the [`Parenthesizer`] renders the bracketing.
//!    Both walk the same tree, so the reported grouping is the executed one.
//!
//! ## Quick start
//! ```
//! use chain_dp::{ChainDims, ChainEngine};
//!
//! let dims = ChainDims::new(vec![30, 35, 15, 5, 10, 20, 25]).unwrap();
//! let engine = ChainEngine::new(dims);
//! assert_eq!(engine.min_cost(), 15125);
//! assert_eq!(engine.parenthesization(), "((A(BC))((DE)F))");
//! ```
//!
//! ## Features
//! - `parallel`: fill each DP diagonal and evaluate split operands with rayon.
//!   Results are identical to the sequential build.
//! - `tracing`: emit spans for planning, evaluation and every multiply.

pub mod builder;
pub mod dims;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod matrix;
pub mod plan;
pub mod reporter;
pub mod traits;
pub mod utils;

pub use crate::builder::ChainEngineBuilder;
pub use crate::dims::ChainDims;
pub use crate::engine::{ChainEngine, Solution};
pub use crate::error::{ChainError, Result};
pub use crate::evaluator::ChainEvaluator;
pub use crate::matrix::Matrix;
pub use crate::plan::ChainPlan;
pub use crate::reporter::{LabelGenerator, LabelStyle, Parenthesizer};
pub use crate::traits::{Split, SplitFold};
