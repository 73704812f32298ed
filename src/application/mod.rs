//! Application layer: the solve workflow and its structured results.

pub mod model;
pub mod report;
pub mod service;

pub use model::{Integrality, ModelKind, ModelSettings};
pub use report::{FamilyCount, FormulationSummary, LayoutOffsets, SolveReport, VariableGroup, VariableValue};
pub use service::SolveService;
