//! Linear program records handed to an optimizer.
//!
//! A [`Formulation`] is the complete contract at the optimizer boundary:
//! variables with bounds and domains, an objective direction and coefficient
//! vector, and ordered sparse constraint rows. [`StandardForm`] is the same
//! program with its constraint matrix materialized for transposition.

use rust_decimal::Decimal;
use serde::Serialize;

use super::constraint::{ColumnFamily, Constraint, Domain, Relation, RowFamily, Variable, VariableBounds};
use super::error::ModelError;

/// Objective direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveSense {
    /// Minimize `c^T x`.
    Minimize,
    /// Maximize `c^T x`.
    Maximize,
}

/// A linear or mixed-integer program.
///
/// ```text
/// minimize|maximize  c^T x
/// subject to         rows
///                    bounds and domains on x
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Formulation {
    /// Objective direction.
    pub sense: ObjectiveSense,
    /// Column declarations in layout order.
    pub variables: Vec<Variable>,
    /// Objective coefficient per column.
    pub objective: Vec<Decimal>,
    /// Rows in layout order.
    pub constraints: Vec<Constraint>,
}

impl Formulation {
    /// Number of columns.
    #[must_use]
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.constraints.len()
    }

    /// Whether any column must take integer values.
    #[must_use]
    pub fn is_mixed_integer(&self) -> bool {
        self.variables.iter().any(|v| v.domain.is_integral())
    }

    /// Column indices belonging to `family`, ascending.
    pub fn columns_of(&self, family: ColumnFamily) -> impl Iterator<Item = usize> + '_ {
        self.variables
            .iter()
            .enumerate()
            .filter(move |(_, v)| v.family == family)
            .map(|(i, _)| i)
    }

    /// Rows belonging to `family`, in order.
    pub fn rows_of(&self, family: RowFamily) -> impl Iterator<Item = &Constraint> + '_ {
        self.constraints.iter().filter(move |c| c.family == family)
    }

    /// Evaluate `c^T x` for a full assignment.
    #[must_use]
    pub fn objective_value(&self, values: &[Decimal]) -> Decimal {
        self.objective
            .iter()
            .zip(values)
            .map(|(c, x)| c * x)
            .sum()
    }

    /// First row that `values` break by more than `tolerance`.
    #[must_use]
    pub fn violated_row(&self, values: &[Decimal], tolerance: Decimal) -> Option<&Constraint> {
        self.constraints
            .iter()
            .find(|row| row.violation(values) > tolerance)
    }

    /// Copy with every integrality requirement dropped.
    ///
    /// Bounds are kept, so binary columns stay in `[0, 1]`.
    #[must_use]
    pub fn relaxed(&self) -> Self {
        let mut relaxed = self.clone();
        for variable in &mut relaxed.variables {
            variable.domain = Domain::Continuous;
        }
        relaxed
    }

    /// Structural self-check.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::LayoutMismatch`] if the objective length differs
    /// from the column count, or a row references a column out of range or
    /// twice. Rows without terms are legal; they arise for label columns of
    /// isolated nodes once transposed.
    pub fn check(&self) -> Result<(), ModelError> {
        let columns = self.variable_count();
        if self.objective.len() != columns {
            return Err(ModelError::LayoutMismatch {
                what: "objective length",
                expected: columns,
                found: self.objective.len(),
            });
        }

        for row in &self.constraints {
            if let Some(&(column, _)) = row.terms.iter().find(|(c, _)| *c >= columns) {
                return Err(ModelError::LayoutMismatch {
                    what: "row column index",
                    expected: columns,
                    found: column,
                });
            }
            if let Some(pair) = row.terms.windows(2).find(|pair| pair[0].0 == pair[1].0) {
                return Err(ModelError::LayoutMismatch {
                    what: "distinct row columns",
                    expected: pair[0].0 + 1,
                    found: pair[1].0,
                });
            }
        }

        Ok(())
    }
}

/// A formulation with its constraint matrix materialized.
///
/// Holds `A`, the relation vector, `b`, `c` and the column bounds exactly as
/// the rows of the source [`Formulation`] define them.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardForm {
    /// Sparse rows of `A`, columns ascending within each row.
    pub rows: Vec<Vec<(usize, Decimal)>>,
    /// Relation of each row.
    pub relations: Vec<Relation>,
    /// Right-hand side `b`.
    pub rhs: Vec<Decimal>,
    /// Objective coefficients `c`.
    pub costs: Vec<Decimal>,
    /// Bounds of each column.
    pub bounds: Vec<VariableBounds>,
}

impl StandardForm {
    /// Materialize a formulation.
    #[must_use]
    pub fn from_formulation(formulation: &Formulation) -> Self {
        Self {
            rows: formulation
                .constraints
                .iter()
                .map(|c| c.terms.clone())
                .collect(),
            relations: formulation.constraints.iter().map(|c| c.relation).collect(),
            rhs: formulation.constraints.iter().map(|c| c.rhs).collect(),
            costs: formulation.objective.clone(),
            bounds: formulation.variables.iter().map(|v| v.bounds).collect(),
        }
    }

    /// Number of rows in `A`.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in `A`.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.costs.len()
    }

    /// Entry `A[row][column]`, zero when absent.
    #[must_use]
    pub fn entry(&self, row: usize, column: usize) -> Decimal {
        self.rows
            .get(row)
            .and_then(|terms| {
                terms
                    .binary_search_by_key(&column, |(c, _)| *c)
                    .ok()
                    .map(|i| terms[i].1)
            })
            .unwrap_or(Decimal::ZERO)
    }

    /// Columns of `A` as sparse `(row, coefficient)` lists, rows ascending.
    #[must_use]
    pub fn transpose(&self) -> Vec<Vec<(usize, Decimal)>> {
        let mut columns = vec![Vec::new(); self.column_count()];
        for (row, terms) in self.rows.iter().enumerate() {
            for &(column, coefficient) in terms {
                columns[column].push((row, coefficient));
            }
        }
        columns
    }
}
