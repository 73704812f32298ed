//! CLI module graph.

pub mod command;
pub mod config;
pub mod diagnostic;
pub mod input;
pub mod inspect;
pub mod output;
pub mod solve;
