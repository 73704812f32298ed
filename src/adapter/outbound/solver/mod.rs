//! Optimizer implementations for linear and mixed-integer programming.
//!
//! Implements the `port::Optimizer` trait with concrete backends.

pub mod highs;

pub use highs::HighsOptimizer;
