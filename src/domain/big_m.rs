//! The big-M constant used by subtour-elimination rows.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::ModelError;

/// Constant `N` in `label(j) - label(i) - (1+N) x(i,j) >= -N`.
///
/// `N` must be at least the node count so that the row is vacuous whenever
/// the arc is unused. Configuration accepts either an integer or the string
/// `"nodes"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BigM {
    /// A fixed constant.
    Fixed(u64),
    /// The number of nodes in the instance.
    NodeCount,
}

impl Default for BigM {
    fn default() -> Self {
        Self::Fixed(Self::DEFAULT)
    }
}

impl BigM {
    /// Default constant.
    pub const DEFAULT: u64 = 1_000_000;

    /// Resolve the constant for a graph with `node_count` nodes.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::BigMTooSmall`] when a fixed constant does not
    /// dominate the node count.
    pub fn resolve(self, node_count: usize) -> Result<u64, ModelError> {
        match self {
            Self::Fixed(big_m) if big_m < node_count as u64 => {
                Err(ModelError::BigMTooSmall { big_m, node_count })
            }
            Self::Fixed(big_m) => Ok(big_m),
            Self::NodeCount => Ok(node_count as u64),
        }
    }
}

impl fmt::Display for BigM {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(big_m) => write!(f, "{big_m}"),
            Self::NodeCount => f.write_str("nodes"),
        }
    }
}

impl std::str::FromStr for BigM {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("nodes") {
            return Ok(Self::NodeCount);
        }
        s.parse::<u64>()
            .map(Self::Fixed)
            .map_err(|_| format!("expected a positive integer or \"nodes\", got {s:?}"))
    }
}

/// Wire form: a bare integer or the keyword `nodes`.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum BigMRepr {
    Fixed(u64),
    Keyword(Keyword),
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Keyword {
    Nodes,
}

impl Serialize for BigM {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Self::Fixed(big_m) => BigMRepr::Fixed(big_m),
            Self::NodeCount => BigMRepr::Keyword(Keyword::Nodes),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BigM {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match BigMRepr::deserialize(deserializer)? {
            BigMRepr::Fixed(big_m) => Self::Fixed(big_m),
            BigMRepr::Keyword(Keyword::Nodes) => Self::NodeCount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_one_million() {
        assert_eq!(BigM::default(), BigM::Fixed(1_000_000));
        assert_eq!(BigM::default().resolve(50), Ok(1_000_000));
    }

    #[test]
    fn node_count_resolves_to_graph_size() {
        assert_eq!(BigM::NodeCount.resolve(17), Ok(17));
    }

    #[test]
    fn small_fixed_constant_is_rejected() {
        assert_eq!(
            BigM::Fixed(3).resolve(4),
            Err(ModelError::BigMTooSmall {
                big_m: 3,
                node_count: 4
            })
        );
    }

    #[test]
    fn parses_from_cli_text() {
        assert_eq!("nodes".parse::<BigM>(), Ok(BigM::NodeCount));
        assert_eq!("250".parse::<BigM>(), Ok(BigM::Fixed(250)));
        assert!("-1".parse::<BigM>().is_err());
    }

    #[test]
    fn reads_number_or_keyword() {
        let fixed: BigM = serde_json::from_str("500").unwrap();
        let nodes: BigM = serde_json::from_str("\"nodes\"").unwrap();
        assert_eq!(fixed, BigM::Fixed(500));
        assert_eq!(nodes, BigM::NodeCount);
        assert!(serde_json::from_str::<BigM>("\"many\"").is_err());
        assert!(serde_json::from_str::<BigM>("-2").is_err());
        assert_eq!(serde_json::to_string(&BigM::NodeCount).unwrap(), "\"nodes\"");
    }
}
