//! Flat index bookkeeping shared by the primal and dual formulators.
//!
//! Columns are laid out as `[arcs | nodes | labels]` and rows as
//! `[coverage | flow-out | flow-in | subtour]`. Arcs are numbered in row-major
//! `(from, to)` order over existing arcs only. Both formulators read every
//! position from the same [`IndexLayout`], which is what keeps the dual a
//! faithful transpose of the primal.

use std::collections::HashMap;

use super::color::Color;
use super::graph::{DirectedArc, Instance};

/// Deterministic column and row positions for one instance.
#[derive(Debug, Clone)]
pub struct IndexLayout {
    node_count: usize,
    palette: Vec<Color>,
    arcs: Vec<DirectedArc>,
    arc_positions: HashMap<(usize, usize), usize>,
}

impl IndexLayout {
    /// Compute the layout for an instance.
    #[must_use]
    pub fn new(instance: &Instance) -> Self {
        let arcs: Vec<DirectedArc> = instance.graph().arcs().collect();
        let arc_positions = arcs
            .iter()
            .enumerate()
            .map(|(position, arc)| ((arc.from, arc.to), position))
            .collect();

        Self {
            node_count: instance.graph().node_count(),
            palette: instance.palette().to_vec(),
            arcs,
            arc_positions,
        }
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of coverage rows.
    #[must_use]
    pub fn color_count(&self) -> usize {
        self.palette.len()
    }

    /// Number of existing directed arcs.
    #[must_use]
    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    /// Required colors in row order.
    #[must_use]
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// Existing arcs in column order.
    #[must_use]
    pub fn arcs(&self) -> &[DirectedArc] {
        &self.arcs
    }

    // Columns

    /// First arc column.
    #[must_use]
    pub const fn arcs_start(&self) -> usize {
        0
    }

    /// First node-selection column.
    #[must_use]
    pub fn nodes_start(&self) -> usize {
        self.arcs_start() + self.arc_count()
    }

    /// First label column.
    #[must_use]
    pub fn labels_start(&self) -> usize {
        self.nodes_start() + self.node_count
    }

    /// Total number of primal columns.
    #[must_use]
    pub fn variable_count(&self) -> usize {
        self.labels_start() + self.node_count
    }

    /// Column of arc `(from, to)`, or `None` if the arc does not exist.
    #[must_use]
    pub fn arc_index(&self, from: usize, to: usize) -> Option<usize> {
        self.arc_positions
            .get(&(from, to))
            .map(|position| self.arcs_start() + position)
    }

    /// Column of the node-selection variable for `node`.
    #[must_use]
    pub fn node_index(&self, node: usize) -> usize {
        debug_assert!(node < self.node_count);
        self.nodes_start() + node
    }

    /// Column of the label variable for `node`.
    #[must_use]
    pub fn label_index(&self, node: usize) -> usize {
        debug_assert!(node < self.node_count);
        self.labels_start() + node
    }

    // Rows

    /// First coverage row.
    #[must_use]
    pub const fn color_start(&self) -> usize {
        0
    }

    /// First flow-out row.
    #[must_use]
    pub fn flow_out_start(&self) -> usize {
        self.color_start() + self.color_count()
    }

    /// First flow-in row.
    #[must_use]
    pub fn flow_in_start(&self) -> usize {
        self.flow_out_start() + self.node_count
    }

    /// First subtour row.
    #[must_use]
    pub fn subtour_start(&self) -> usize {
        self.flow_in_start() + self.node_count
    }

    /// Total number of primal rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.subtour_start() + self.arc_count()
    }

    /// Coverage row of `color`, or `None` if it is not required.
    #[must_use]
    pub fn color_row(&self, color: Color) -> Option<usize> {
        self.palette
            .binary_search(&color)
            .ok()
            .map(|position| self.color_start() + position)
    }

    /// Flow-out row of `node`.
    #[must_use]
    pub fn flow_out_row(&self, node: usize) -> usize {
        self.flow_out_start() + node
    }

    /// Flow-in row of `node`.
    #[must_use]
    pub fn flow_in_row(&self, node: usize) -> usize {
        self.flow_in_start() + node
    }

    /// Subtour row of arc `(from, to)`, or `None` if the arc does not exist.
    #[must_use]
    pub fn subtour_row(&self, from: usize, to: usize) -> Option<usize> {
        self.arc_positions
            .get(&(from, to))
            .map(|position| self.subtour_start() + position)
    }
}
