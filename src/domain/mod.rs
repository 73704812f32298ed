//! Solver-agnostic model of the colored path problem.
//!
//! - [`graph`] - colored graphs and validated instances
//! - [`layout`] - flat column and row numbering
//! - [`primal`] / [`dual`] - the two formulators
//! - [`formulation`] / [`constraint`] - the records handed to an optimizer
//! - [`solution`] - what comes back

pub mod big_m;
pub mod color;
pub mod constraint;
pub mod dual;
pub mod error;
pub mod formulation;
pub mod graph;
pub mod layout;
pub mod primal;
pub mod solution;

pub use big_m::BigM;
pub use color::Color;
pub use constraint::{
    ColumnFamily, Constraint, Domain, Relation, RowFamily, Variable, VariableBounds,
};
pub use dual::{dual_relation, multiplier_bounds, DualFormulator};
pub use error::{DomainError, ModelError};
pub use formulation::{Formulation, ObjectiveSense, StandardForm};
pub use graph::{DirectedArc, Edge, GraphModel, Instance};
pub use layout::IndexLayout;
pub use primal::PrimalFormulator;
pub use solution::{Outcome, Solution, SolutionStatus};
