use thiserror::Error;

pub use crate::domain::error::{DomainError, ModelError};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Graph text that could not be parsed.
///
/// Carries the byte span of the offending token so callers can point at it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct InputError {
    /// 1-based line number.
    pub line: usize,
    /// Byte offset of the offending token in the whole input.
    pub offset: usize,
    /// Length of the offending token in bytes.
    pub len: usize,
    /// What was wrong.
    pub message: String,
}

impl InputError {
    pub fn new(line: usize, offset: usize, len: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            offset,
            len,
            message: message.into(),
        }
    }
}

/// Optimizer backend failures.
///
/// Infeasible and unbounded verdicts are outcomes, not errors.
#[derive(Error, Debug, Clone)]
pub enum SolverError {
    #[error("{solver} failed: {reason}")]
    Backend { solver: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("malformed input: {0}")]
    Domain(#[from] DomainError),

    #[error("modeling error: {0}")]
    Model(#[from] ModelError),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error("parse error: {0}")]
    Input(#[from] InputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
