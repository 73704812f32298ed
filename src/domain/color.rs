//! Node color labels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Color label of a node - newtype for type safety.
///
/// Colors are plain integers and need not be contiguous; the set of distinct
/// colors is derived from the graph, never declared up front.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Color(i64);

impl Color {
    /// Create a new `Color` from its integer label.
    #[must_use]
    pub const fn new(label: i64) -> Self {
        Self(label)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Color {
    fn from(label: i64) -> Self {
        Self::new(label)
    }
}
