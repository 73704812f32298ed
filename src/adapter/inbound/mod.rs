//! Inbound adapters: how problems reach the application.

pub mod cli;
pub mod graph_file;
