//! Which program to build and how strictly to solve it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::big_m::BigM;

/// Primal MILP or its dual LP.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// Path selection program.
    #[default]
    Primal,
    /// Transposed program with one multiplier per primal row.
    Dual,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Primal => "primal",
            Self::Dual => "dual",
        })
    }
}

/// Whether integrality requirements are enforced.
///
/// Only affects the primal; the dual is always continuous.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Integrality {
    /// Binary and integer columns stay integral.
    #[default]
    Integer,
    /// LP relaxation.
    Relaxed,
}

impl fmt::Display for Integrality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Integer => "integer",
            Self::Relaxed => "relaxed",
        })
    }
}

/// Model settings, as read from the `[model]` config section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSettings {
    /// Subtour-elimination constant.
    #[serde(default)]
    pub big_m: BigM,
    /// Program to build.
    #[serde(default)]
    pub kind: ModelKind,
    /// Integrality of the primal.
    #[serde(default)]
    pub integrality: Integrality,
}
