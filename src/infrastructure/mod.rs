//! Infrastructure layer.
//!
//! Technical concerns that support the application without containing
//! modeling logic.
//!
//! # Submodules
//!
//! - [`config`] - Configuration loading, validation and logging setup
//! - [`factory`] - Component factory functions

pub mod config;
pub mod factory;
