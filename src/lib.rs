//! Colorpath - shortest colored paths as a MILP and its LP dual.
//!
//! Given an undirected graph whose nodes carry colors, a source and a
//! target, the crate builds a mixed-integer program for the cheapest simple
//! path from source to target that visits at least one node of every
//! required color. It can also build the dual of that program's
//! non-negative relaxation, and hands either to an LP/MILP backend.
//!
//! # Architecture
//!
//! - [`domain`] - graphs, the shared index layout, both formulators and the
//!   solver-agnostic [`Formulation`](domain::formulation::Formulation) record
//! - [`port`] - the [`Optimizer`](port::Optimizer) trait
//! - [`adapter`] - HiGHS through `good_lp`, the graph file parser and the CLI
//! - [`application`] - the formulate-then-optimize workflow and its reports
//! - [`infrastructure`] - configuration, logging and component wiring
//! - [`error`] - error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use colorpath::application::model::ModelSettings;
//! use colorpath::domain::graph::{Edge, GraphModel, Instance};
//! use colorpath::infrastructure::factory::solver::build_solve_service;
//!
//! # fn main() -> colorpath::error::Result<()> {
//! let graph = GraphModel::new(
//!     vec![0, 1, 0, 1],
//!     vec![Edge::new(0, 1, 5), Edge::new(1, 2, 3), Edge::new(2, 3, 4), Edge::new(0, 3, 10)],
//! )?;
//! let instance = Instance::new(graph, 0, 3)?;
//!
//! let report = build_solve_service(ModelSettings::default()).solve(&instance)?;
//! assert_eq!(report.path, Some(vec![0, 3]));
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
