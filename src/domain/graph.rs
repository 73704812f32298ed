//! Colored, weighted graphs and the problem instances built on them.
//!
//! - [`GraphModel`] - node colors plus a dense table of edge weights
//! - [`Edge`] - an undirected weighted edge as supplied by callers
//! - [`DirectedArc`] - one traversal direction of an existing edge
//! - [`Instance`] - a graph with a chosen source, target and required colors
//!
//! # Examples
//!
//! ```
//! use colorpath::domain::graph::{Edge, GraphModel, Instance};
//!
//! let graph = GraphModel::new(
//!     vec![0, 1, 0, 1],
//!     vec![Edge::new(0, 1, 5), Edge::new(1, 2, 3), Edge::new(2, 3, 4), Edge::new(0, 3, 10)],
//! )
//! .unwrap();
//!
//! assert_eq!(graph.arc_count(), 8);
//! assert_eq!(graph.distinct_colors().len(), 2);
//!
//! let instance = Instance::new(graph, 0, 3).unwrap();
//! assert_eq!(instance.source(), 0);
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::error::{DomainError, ModelError};
use crate::error::Result;

/// An undirected edge between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// First endpoint.
    pub from: usize,
    /// Second endpoint.
    pub to: usize,
    /// Traversal cost; must be positive.
    pub weight: i64,
}

impl Edge {
    /// Create an edge between `from` and `to`.
    #[must_use]
    pub const fn new(from: usize, to: usize, weight: i64) -> Self {
        Self { from, to, weight }
    }
}

/// One direction of an existing edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DirectedArc {
    /// Tail node.
    pub from: usize,
    /// Head node.
    pub to: usize,
    /// Weight shared with the reverse arc.
    pub weight: u64,
}

/// Immutable colored graph.
///
/// Weights are stored as an `n x n` table where `None` means "no edge". Every
/// undirected edge occupies both `(i, j)` and `(j, i)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphModel {
    colors: Vec<Color>,
    weights: Vec<Option<u64>>,
}

impl GraphModel {
    /// Build a graph from node colors and an undirected edge list.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if there are no nodes, an endpoint is out of
    /// range, a weight is not positive, an edge is a self loop, or the same
    /// pair is listed twice.
    pub fn new(colors: Vec<i64>, edges: Vec<Edge>) -> std::result::Result<Self, DomainError> {
        let n = colors.len();
        if n == 0 {
            return Err(DomainError::EmptyGraph);
        }

        let mut weights = vec![None; n * n];
        for edge in edges {
            for node in [edge.from, edge.to] {
                if node >= n {
                    return Err(DomainError::NodeOutOfRange {
                        node,
                        node_count: n,
                    });
                }
            }
            if edge.from == edge.to {
                return Err(DomainError::SelfLoop { node: edge.from });
            }
            let weight = u64::try_from(edge.weight)
                .ok()
                .filter(|w| *w > 0)
                .ok_or(DomainError::NonPositiveWeight {
                    from: edge.from,
                    to: edge.to,
                    weight: edge.weight,
                })?;
            if weights[edge.from * n + edge.to].is_some() {
                return Err(DomainError::DuplicateEdge {
                    from: edge.from,
                    to: edge.to,
                });
            }
            weights[edge.from * n + edge.to] = Some(weight);
            weights[edge.to * n + edge.from] = Some(weight);
        }

        Ok(Self {
            colors: colors.into_iter().map(Color::new).collect(),
            weights,
        })
    }

    /// Build a graph from a dense signed weight matrix.
    ///
    /// Any entry `<= 0` means the arc does not exist. The matrix is taken as
    /// given, so an asymmetric matrix yields arcs in one direction only.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyGraph`] for zero nodes,
    /// [`DomainError::MatrixShape`] if the matrix is not `n x n`, and
    /// [`DomainError::SelfLoop`] for a positive diagonal entry.
    pub fn from_weight_matrix(
        colors: Vec<i64>,
        matrix: &[Vec<i64>],
    ) -> std::result::Result<Self, DomainError> {
        let n = colors.len();
        if n == 0 {
            return Err(DomainError::EmptyGraph);
        }
        if matrix.len() != n {
            return Err(DomainError::MatrixShape {
                expected: n,
                found: matrix.len(),
            });
        }

        let mut weights = Vec::with_capacity(n * n);
        for (i, row) in matrix.iter().enumerate() {
            if row.len() != n {
                return Err(DomainError::MatrixShape {
                    expected: n,
                    found: row.len(),
                });
            }
            for (j, &w) in row.iter().enumerate() {
                if i == j && w > 0 {
                    return Err(DomainError::SelfLoop { node: i });
                }
                weights.push(u64::try_from(w).ok().filter(|w| *w > 0));
            }
        }

        Ok(Self {
            colors: colors.into_iter().map(Color::new).collect(),
            weights,
        })
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.colors.len()
    }

    /// Color of every node, in node order.
    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Color of a single node.
    #[must_use]
    pub fn color(&self, node: usize) -> Option<Color> {
        self.colors.get(node).copied()
    }

    /// Distinct colors in ascending order.
    #[must_use]
    pub fn distinct_colors(&self) -> Vec<Color> {
        self.colors
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Nodes carrying `color`, in node order.
    pub fn nodes_with_color(&self, color: Color) -> impl Iterator<Item = usize> + '_ {
        self.colors
            .iter()
            .enumerate()
            .filter(move |(_, c)| **c == color)
            .map(|(i, _)| i)
    }

    /// Weight of arc `(from, to)`, if it exists.
    #[must_use]
    pub fn weight(&self, from: usize, to: usize) -> Option<u64> {
        let n = self.node_count();
        if from >= n || to >= n {
            return None;
        }
        self.weights[from * n + to]
    }

    /// Existing arcs in row-major `(from, to)` order.
    pub fn arcs(&self) -> impl Iterator<Item = DirectedArc> + '_ {
        let n = self.node_count();
        self.weights
            .iter()
            .enumerate()
            .filter_map(move |(cell, w)| {
                w.map(|weight| DirectedArc {
                    from: cell / n,
                    to: cell % n,
                    weight,
                })
            })
    }

    /// Number of existing directed arcs.
    #[must_use]
    pub fn arc_count(&self) -> usize {
        self.weights.iter().filter(|w| w.is_some()).count()
    }
}

/// A graph together with the path endpoints and the colors that must be visited.
#[derive(Debug, Clone)]
pub struct Instance {
    graph: GraphModel,
    source: usize,
    target: usize,
    palette: Vec<Color>,
}

impl Instance {
    /// Create an instance requiring every color present in the graph.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NodeOutOfRange`] if `source` or `target` is not
    /// a node, and [`ModelError::SourceIsTarget`] if they coincide.
    pub fn new(graph: GraphModel, source: usize, target: usize) -> Result<Self> {
        let node_count = graph.node_count();
        for node in [source, target] {
            if node >= node_count {
                return Err(DomainError::NodeOutOfRange { node, node_count }.into());
            }
        }
        if source == target {
            return Err(ModelError::SourceIsTarget { node: source }.into());
        }

        let palette = graph.distinct_colors();
        Ok(Self {
            graph,
            source,
            target,
            palette,
        })
    }

    /// Replace the required colors with an explicit palette.
    ///
    /// Duplicates are dropped and the palette is sorted, so coverage rows
    /// always follow ascending color order.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyColor`] if a palette color has no nodes.
    pub fn with_palette(mut self, palette: Vec<i64>) -> Result<Self> {
        let palette: Vec<Color> = palette
            .into_iter()
            .map(Color::new)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        if let Some(&color) = palette
            .iter()
            .find(|c| self.graph.nodes_with_color(**c).next().is_none())
        {
            return Err(ModelError::EmptyColor { color }.into());
        }

        self.palette = palette;
        Ok(self)
    }

    /// Underlying graph.
    #[must_use]
    pub fn graph(&self) -> &GraphModel {
        &self.graph
    }

    /// Path start.
    #[must_use]
    pub fn source(&self) -> usize {
        self.source
    }

    /// Path end.
    #[must_use]
    pub fn target(&self) -> usize {
        self.target
    }

    /// Colors the path must visit, ascending.
    #[must_use]
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }
}
