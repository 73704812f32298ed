//! Dual LP of the primal formulation.
//!
//! The dual is built by transposing the materialized primal, never by
//! re-deriving rows per family. One multiplier per primal row, one dual row
//! per primal column:
//!
//! ```text
//! maximize    b^T y
//! subject to  A^T y  (<=|=|>=)  c      relation from each primal column's sign
//!             y[r] free / >= 0 / <= 0   from each primal row's relation
//! ```
//!
//! Only the sign restriction of a primal column is dualized. Finite upper
//! bounds such as the `1` on binary columns are not, so this is the dual of
//! the non-negative LP relaxation.

use rust_decimal::Decimal;
use tracing::debug;

use super::big_m::BigM;
use super::constraint::{ColumnFamily, Constraint, Relation, RowFamily, Variable, VariableBounds};
use super::error::ModelError;
use super::formulation::{Formulation, ObjectiveSense, StandardForm};
use super::graph::Instance;
use super::layout::IndexLayout;
use super::primal::{expect_count, PrimalFormulator};

/// Domain of the multiplier attached to a primal row of a minimization.
///
/// Equality rows yield free multipliers; inequality rows yield multipliers
/// whose sign follows the inequality.
#[must_use]
pub const fn multiplier_bounds(relation: Relation) -> VariableBounds {
    match relation {
        Relation::Equal => VariableBounds::free(),
        Relation::GreaterEqual => VariableBounds {
            lower: Some(Decimal::ZERO),
            upper: None,
        },
        Relation::LessEqual => VariableBounds::non_positive(),
    }
}

/// Relation of the dual row generated by a primal column of a minimization.
///
/// A column with a zero lower bound gives `<=`, a column with a zero upper
/// bound and no lower bound gives `>=`, anything else is treated as free and
/// gives `=`.
#[must_use]
pub fn dual_relation(bounds: VariableBounds) -> Relation {
    match (bounds.lower, bounds.upper) {
        (Some(lower), _) if lower.is_zero() => Relation::LessEqual,
        (None, Some(upper)) if upper.is_zero() => Relation::GreaterEqual,
        _ => Relation::Equal,
    }
}

/// Builds the dual LP of an [`Instance`] over the primal's [`IndexLayout`].
#[derive(Debug)]
pub struct DualFormulator<'a> {
    primal: PrimalFormulator<'a>,
}

impl<'a> DualFormulator<'a> {
    /// Prepare a formulator for `instance`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::BigMTooSmall`] if the big-M constant does not
    /// dominate the node count.
    pub fn new(instance: &'a Instance, big_m: BigM) -> Result<Self, ModelError> {
        Ok(Self {
            primal: PrimalFormulator::new(instance, big_m)?,
        })
    }

    /// Layout of the primal being dualized.
    #[must_use]
    pub fn layout(&self) -> &IndexLayout {
        self.primal.layout()
    }

    /// Primal formulator sharing this layout.
    #[must_use]
    pub fn primal(&self) -> &PrimalFormulator<'a> {
        &self.primal
    }

    /// Build the dual LP.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::LayoutMismatch`] if the dual's dimensions do not
    /// mirror the primal's.
    pub fn formulate(&self) -> Result<Formulation, ModelError> {
        let primal = self.primal.formulate()?;
        let standard = StandardForm::from_formulation(&primal);

        let variables: Vec<Variable> = primal
            .constraints
            .iter()
            .map(|row| {
                Variable::continuous(
                    format!("y[{}]", row.name),
                    ColumnFamily::Multiplier,
                    multiplier_bounds(row.relation),
                )
            })
            .collect();

        let constraints: Vec<Constraint> = standard
            .transpose()
            .into_iter()
            .zip(&primal.variables)
            .zip(&standard.costs)
            .map(|((terms, column), &cost)| {
                Constraint::new(
                    format!("dual[{}]", column.name),
                    RowFamily::DualFeasibility,
                    terms,
                    dual_relation(column.bounds),
                    cost,
                )
            })
            .collect();

        let dual = Formulation {
            sense: ObjectiveSense::Maximize,
            variables,
            objective: standard.rhs.clone(),
            constraints,
        };

        expect_count("dual columns", primal.row_count(), dual.variable_count())?;
        expect_count("dual rows", primal.variable_count(), dual.row_count())?;
        dual.check()?;

        debug!(
            columns = dual.variable_count(),
            rows = dual.row_count(),
            "Dual formulation built"
        );
        Ok(dual)
    }
}
