//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Available Ports
//!
//! - [`Optimizer`] - LP/MILP optimization backend

pub mod outbound;

pub use outbound::solver::Optimizer;
