//! Variable and constraint primitives shared by every formulation.
//!
//! These types describe a single column or row of a linear program. They know
//! nothing about graphs; the formulators give them meaning.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single sparse linear constraint: `sum(coef * x[column]) {>=, <=, =} rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    /// Row name, e.g. `flow-out[2]`.
    pub name: String,
    /// Which family of rows this belongs to.
    pub family: RowFamily,
    /// `(column, coefficient)` pairs, columns ascending.
    pub terms: Vec<(usize, Decimal)>,
    /// Constraint relation (>=, <=, =).
    pub relation: Relation,
    /// Right-hand side value.
    pub rhs: Decimal,
}

impl Constraint {
    /// Create a >= constraint.
    #[must_use]
    pub fn geq(
        name: impl Into<String>,
        family: RowFamily,
        terms: Vec<(usize, Decimal)>,
        rhs: Decimal,
    ) -> Self {
        Self::new(name, family, terms, Relation::GreaterEqual, rhs)
    }

    /// Create a <= constraint.
    #[must_use]
    pub fn leq(
        name: impl Into<String>,
        family: RowFamily,
        terms: Vec<(usize, Decimal)>,
        rhs: Decimal,
    ) -> Self {
        Self::new(name, family, terms, Relation::LessEqual, rhs)
    }

    /// Create an = constraint.
    #[must_use]
    pub fn eq(
        name: impl Into<String>,
        family: RowFamily,
        terms: Vec<(usize, Decimal)>,
        rhs: Decimal,
    ) -> Self {
        Self::new(name, family, terms, Relation::Equal, rhs)
    }

    /// Create a constraint with an explicit relation.
    ///
    /// Terms are sorted by column so rows compare and print deterministically.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        family: RowFamily,
        mut terms: Vec<(usize, Decimal)>,
        relation: Relation,
        rhs: Decimal,
    ) -> Self {
        terms.sort_by_key(|(column, _)| *column);
        Self {
            name: name.into(),
            family,
            terms,
            relation,
            rhs,
        }
    }

    /// Coefficient of `column` in this row, zero if absent.
    #[must_use]
    pub fn coefficient(&self, column: usize) -> Decimal {
        self.terms
            .binary_search_by_key(&column, |(c, _)| *c)
            .map_or(Decimal::ZERO, |i| self.terms[i].1)
    }

    /// Left-hand side evaluated at a full assignment.
    #[must_use]
    pub fn activity(&self, values: &[Decimal]) -> Decimal {
        self.terms
            .iter()
            .map(|(column, c)| values.get(*column).map_or(Decimal::ZERO, |x| c * x))
            .sum()
    }

    /// How far `values` fall short of satisfying this row; zero when it holds.
    #[must_use]
    pub fn violation(&self, values: &[Decimal]) -> Decimal {
        let gap = self.activity(values) - self.rhs;
        match self.relation {
            Relation::GreaterEqual => (-gap).max(Decimal::ZERO),
            Relation::LessEqual => gap.max(Decimal::ZERO),
            Relation::Equal => gap.abs(),
        }
    }
}

/// Constraint relation (comparison operator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    /// Greater than or equal (>=).
    GreaterEqual,
    /// Less than or equal (<=).
    LessEqual,
    /// Equal (=).
    Equal,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::GreaterEqual => ">=",
            Self::LessEqual => "<=",
            Self::Equal => "=",
        })
    }
}

/// Bounds on a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VariableBounds {
    /// Lower bound (None = -infinity).
    pub lower: Option<Decimal>,
    /// Upper bound (None = +infinity).
    pub upper: Option<Decimal>,
}

impl Default for VariableBounds {
    fn default() -> Self {
        Self {
            lower: Some(Decimal::ZERO),
            upper: None,
        }
    }
}

impl VariableBounds {
    /// Binary variable bounds [0, 1].
    #[must_use]
    pub const fn binary() -> Self {
        Self {
            lower: Some(Decimal::ZERO),
            upper: Some(Decimal::ONE),
        }
    }

    /// Free variable (no bounds).
    #[must_use]
    pub const fn free() -> Self {
        Self {
            lower: None,
            upper: None,
        }
    }

    /// Non-negative variable [0, +inf).
    #[must_use]
    pub fn non_negative() -> Self {
        Self::default()
    }

    /// Non-positive variable (-inf, 0].
    #[must_use]
    pub const fn non_positive() -> Self {
        Self {
            lower: None,
            upper: Some(Decimal::ZERO),
        }
    }
}

/// Value domain of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    /// Integer in [0, 1].
    Binary,
    /// Any integer within bounds.
    Integer,
    /// Any real within bounds.
    Continuous,
}

impl Domain {
    /// Whether the optimizer must enforce integrality.
    #[must_use]
    pub const fn is_integral(self) -> bool {
        matches!(self, Self::Binary | Self::Integer)
    }
}

/// Semantic group of a column, used for reporting only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnFamily {
    /// Arc selection `x(i,j)`.
    Arc,
    /// Node selection `y(i)`.
    Node,
    /// Subtour label `u(i)`.
    Label,
    /// Dual multiplier of a primal row.
    Multiplier,
}

impl fmt::Display for ColumnFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Arc => "arcs",
            Self::Node => "nodes",
            Self::Label => "labels",
            Self::Multiplier => "multipliers",
        })
    }
}

/// Semantic group of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowFamily {
    /// At least one node of a color.
    Coverage,
    /// Outgoing flow balance of a node.
    FlowOut,
    /// Incoming flow balance of a node.
    FlowIn,
    /// Big-M label ordering along an arc.
    Subtour,
    /// Dual row for one primal column.
    DualFeasibility,
}

impl fmt::Display for RowFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Coverage => "coverage",
            Self::FlowOut => "flow-out",
            Self::FlowIn => "flow-in",
            Self::Subtour => "subtour",
            Self::DualFeasibility => "dual-feasibility",
        })
    }
}

/// A decision variable declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variable {
    /// Variable name, e.g. `arc[0,3]`.
    pub name: String,
    /// Reporting group.
    pub family: ColumnFamily,
    /// Lower and upper bounds.
    pub bounds: VariableBounds,
    /// Value domain.
    pub domain: Domain,
}

impl Variable {
    /// Binary variable in [0, 1].
    #[must_use]
    pub fn binary(name: impl Into<String>, family: ColumnFamily) -> Self {
        Self {
            name: name.into(),
            family,
            bounds: VariableBounds::binary(),
            domain: Domain::Binary,
        }
    }

    /// Continuous variable with the given bounds.
    #[must_use]
    pub fn continuous(
        name: impl Into<String>,
        family: ColumnFamily,
        bounds: VariableBounds,
    ) -> Self {
        Self {
            name: name.into(),
            family,
            bounds,
            domain: Domain::Continuous,
        }
    }

    /// Integer variable with the given bounds.
    #[must_use]
    pub fn integer(name: impl Into<String>, family: ColumnFamily, bounds: VariableBounds) -> Self {
        Self {
            name: name.into(),
            family,
            bounds,
            domain: Domain::Integer,
        }
    }
}
