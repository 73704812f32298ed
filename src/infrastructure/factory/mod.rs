//! Factory functions that wire concrete adapters behind ports.
//!
//! - [`solver`] - Optimizer and solve service construction

pub mod solver;
