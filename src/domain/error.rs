//! Domain validation errors for graphs and formulations.
//!
//! Two error families live here:
//!
//! - [`DomainError`] - malformed input that never reaches a formulator
//!   (indices out of range, non-positive weights, self loops).
//! - [`ModelError`] - a well-formed graph that produces an ill-defined model
//!   (`s == t`, a required color with no nodes), plus the internal
//!   [`ModelError::LayoutMismatch`] defect class.
//!
//! Neither is the same thing as the optimizer reporting infeasibility, which
//! is a legitimate solve outcome and is carried by
//! [`Outcome`](crate::domain::solution::Outcome).
//!
//! # Examples
//!
//! ```
//! use colorpath::domain::error::DomainError;
//! use colorpath::domain::graph::{Edge, GraphModel};
//!
//! let result = GraphModel::new(vec![0, 1], vec![Edge::new(0, 2, 4)]);
//!
//! assert!(matches!(result, Err(DomainError::NodeOutOfRange { node: 2, .. })));
//! ```

use thiserror::Error;

use super::color::Color;

/// Errors raised when graph input violates structural rules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A graph must have at least one node.
    #[error("graph has no nodes")]
    EmptyGraph,

    /// A node index does not refer to an existing node.
    #[error("node {node} is out of range for a graph with {node_count} nodes")]
    NodeOutOfRange {
        /// The offending index.
        node: usize,
        /// Number of nodes in the graph.
        node_count: usize,
    },

    /// Edge weights must be strictly positive.
    #[error("edge ({from},{to}) has non-positive weight {weight}")]
    NonPositiveWeight {
        /// First endpoint.
        from: usize,
        /// Second endpoint.
        to: usize,
        /// The invalid weight.
        weight: i64,
    },

    /// An edge may not connect a node to itself.
    #[error("edge ({node},{node}) is a self loop")]
    SelfLoop {
        /// The node on both ends.
        node: usize,
    },

    /// The same unordered pair was listed twice.
    #[error("edge ({from},{to}) is listed more than once")]
    DuplicateEdge {
        /// First endpoint.
        from: usize,
        /// Second endpoint.
        to: usize,
    },

    /// A dense weight matrix does not match the node count.
    #[error("weight matrix must be {expected}x{expected}, found a row of length {found}")]
    MatrixShape {
        /// Number of nodes.
        expected: usize,
        /// Offending row length, or row count.
        found: usize,
    },
}

/// Errors raised when a well-formed graph cannot yield a well-defined model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Flow-balance rows for a node that is both source and target contradict.
    #[error("source and target are the same node ({node})")]
    SourceIsTarget {
        /// The shared node.
        node: usize,
    },

    /// A required color has no nodes, so its coverage row reads `0 >= 1`.
    #[error("required color {color} has no nodes")]
    EmptyColor {
        /// The uncovered color.
        color: Color,
    },

    /// The subtour constant must dominate every label difference.
    #[error("big-M constant {big_m} must be at least the node count {node_count}")]
    BigMTooSmall {
        /// The configured constant.
        big_m: u64,
        /// Number of nodes.
        node_count: usize,
    },

    /// Primal and dual index spaces disagree. Always a programming error.
    #[error("layout mismatch in {what}: expected {expected}, found {found}")]
    LayoutMismatch {
        /// Which count or index disagreed.
        what: &'static str,
        /// Value required by the layout.
        expected: usize,
        /// Value actually built.
        found: usize,
    },
}
