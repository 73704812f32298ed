//! Outbound adapters: concrete backends behind outbound ports.

pub mod solver;
