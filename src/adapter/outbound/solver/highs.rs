//! HiGHS optimizer implementation via good_lp.
//!
//! HiGHS is a high-performance open-source linear/mixed-integer programming solver.
//! This implementation wraps it using the good_lp crate for ergonomic Rust usage.

use std::time::Instant;

use good_lp::solvers::highs::highs;
use good_lp::{constraint, variable, variables, Expression, ResolutionError, SolverModel};
use good_lp::{Solution as _, Variable as LpVariable};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::domain::constraint::Relation;
use crate::domain::formulation::{Formulation, ObjectiveSense};
use crate::domain::solution::{Outcome, Solution};
use crate::error::{Result, SolverError};
use crate::port::outbound::solver::Optimizer;

/// Decimal places kept from continuous solver output.
const VALUE_SCALE: u32 = 9;

/// Feasibility and integrality tolerance handed to HiGHS.
///
/// The HiGHS default of 1e-6 admits binaries at `N / (N + 1)` under the
/// default big-M, which lets a disjoint cycle pass the subtour rows.
const FEASIBILITY_TOLERANCE: f64 = 1e-9;

/// Largest row violation accepted after integral columns are rounded.
const ROUNDED_ROW_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 6);

/// HiGHS-based LP/MILP optimizer.
#[derive(Debug, Default, Clone)]
pub struct HighsOptimizer;

impl HighsOptimizer {
    /// Create a new HiGHS optimizer instance.
    pub fn new() -> Self {
        Self
    }
}

impl Optimizer for HighsOptimizer {
    fn name(&self) -> &'static str {
        "highs"
    }

    fn optimize(&self, formulation: &Formulation) -> Result<Outcome> {
        let started = Instant::now();
        info!(
            optimizer = self.name(),
            columns = formulation.variable_count(),
            rows = formulation.row_count(),
            mixed_integer = formulation.is_mixed_integer(),
            "Optimization started"
        );

        let outcome = solve_with_good_lp(formulation)?;

        info!(
            optimizer = self.name(),
            status = %outcome.status(),
            objective = ?outcome.solution().map(|s| s.objective),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Optimization finished"
        );
        Ok(outcome)
    }
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Convert a backend value, rejecting NaN, infinities and out-of-range values.
fn to_decimal(column: &str, value: f64) -> Result<Decimal> {
    Decimal::try_from(value).map_err(|_| {
        SolverError::Backend {
            solver: "highs",
            reason: format!("value {value} of {column} is not representable"),
        }
        .into()
    })
}

/// Whether `0 relation rhs` holds, for rows with no terms.
fn trivially_holds(relation: Relation, rhs: Decimal) -> bool {
    match relation {
        Relation::GreaterEqual => Decimal::ZERO >= rhs,
        Relation::LessEqual => Decimal::ZERO <= rhs,
        Relation::Equal => rhs.is_zero(),
    }
}

/// Internal solver implementation using good_lp.
fn solve_with_good_lp(formulation: &Formulation) -> Result<Outcome> {
    // Handle empty problem
    if formulation.variable_count() == 0 {
        return Ok(Outcome::Optimal(Solution {
            values: vec![],
            objective: Decimal::ZERO,
        }));
    }

    // Rows without terms never reach the backend
    if let Some(row) = formulation
        .constraints
        .iter()
        .find(|row| row.terms.is_empty() && !trivially_holds(row.relation, row.rhs))
    {
        debug!(row = %row.name, "Empty row cannot be satisfied");
        return Ok(Outcome::Infeasible);
    }

    // Create variables
    let mut vars = variables!();
    let columns: Vec<LpVariable> = formulation
        .variables
        .iter()
        .map(|declared| {
            let mut v = variable().name(declared.name.clone());
            if let Some(lb) = declared.bounds.lower {
                v = v.min(to_f64(lb));
            }
            if let Some(ub) = declared.bounds.upper {
                v = v.max(to_f64(ub));
            }
            if declared.domain.is_integral() {
                v = v.integer();
            }
            vars.add(v)
        })
        .collect();

    // Build objective function
    let objective: Expression = columns
        .iter()
        .zip(&formulation.objective)
        .filter(|(_, c)| !c.is_zero())
        .map(|(v, c)| to_f64(*c) * *v)
        .sum();

    let unsolved = match formulation.sense {
        ObjectiveSense::Minimize => vars.minimise(objective),
        ObjectiveSense::Maximize => vars.maximise(objective),
    };
    let mut model = unsolved
        .using(highs)
        .set_option("mip_feasibility_tolerance", FEASIBILITY_TOLERANCE)
        .set_option("primal_feasibility_tolerance", FEASIBILITY_TOLERANCE);

    // Add constraints
    for row in formulation.constraints.iter().filter(|r| !r.terms.is_empty()) {
        let lhs: Expression = row
            .terms
            .iter()
            .map(|(column, c)| to_f64(*c) * columns[*column])
            .sum();
        let rhs = to_f64(row.rhs);

        model = match row.relation {
            Relation::GreaterEqual => model.with(constraint!(lhs >= rhs)),
            Relation::LessEqual => model.with(constraint!(lhs <= rhs)),
            Relation::Equal => model.with(constraint!(lhs == rhs)),
        };
    }

    // Solve
    match model.solve() {
        Ok(solution) => {
            let values = columns
                .iter()
                .zip(&formulation.variables)
                .map(|(v, declared)| {
                    let value = to_decimal(&declared.name, solution.value(*v))?;
                    Ok(if declared.domain.is_integral() {
                        value.round()
                    } else {
                        value.round_dp(VALUE_SCALE)
                    })
                })
                .collect::<Result<Vec<Decimal>>>()?;

            if formulation.is_mixed_integer() {
                if let Some(row) = formulation.violated_row(&values, ROUNDED_ROW_TOLERANCE) {
                    return Err(SolverError::Backend {
                        solver: "highs",
                        reason: format!(
                            "rounded solution violates row {} by {}",
                            row.name,
                            row.violation(&values)
                        ),
                    }
                    .into());
                }
            }

            // Re-evaluate objective with the reported values
            let objective = formulation.objective_value(&values);
            Ok(Outcome::Optimal(Solution { values, objective }))
        }
        Err(ResolutionError::Infeasible) => Ok(Outcome::Infeasible),
        Err(ResolutionError::Unbounded) => Ok(Outcome::Unbounded),
        Err(e) => Err(SolverError::Backend {
            solver: "highs",
            reason: e.to_string(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::constraint::{ColumnFamily, Constraint, RowFamily, Variable, VariableBounds};
    use rust_decimal_macros::dec;

    fn continuous(name: &str, bounds: VariableBounds) -> Variable {
        Variable::continuous(name, ColumnFamily::Multiplier, bounds)
    }

    #[test]
    fn test_optimizer_name() {
        let optimizer = HighsOptimizer::new();
        assert_eq!(optimizer.name(), "highs");
    }

    #[test]
    fn test_simple_lp() {
        // Minimize: x + y
        // Subject to: x + y >= 1
        //            x, y >= 0
        let formulation = Formulation {
            sense: ObjectiveSense::Minimize,
            variables: vec![
                continuous("x", VariableBounds::non_negative()),
                continuous("y", VariableBounds::non_negative()),
            ],
            objective: vec![dec!(1), dec!(1)],
            constraints: vec![Constraint::geq(
                "cover",
                RowFamily::Coverage,
                vec![(0, dec!(1)), (1, dec!(1))],
                dec!(1),
            )],
        };

        let outcome = HighsOptimizer::new().optimize(&formulation).unwrap();
        let solution = outcome.solution().expect("optimal");
        assert!(
            (solution.objective - dec!(1)).abs() < dec!(0.000001),
            "objective should be ~1, got {}",
            solution.objective
        );
    }

    #[test]
    fn test_binary_maximization() {
        // Maximize: x + y
        // Subject to: x + y <= 1
        //            x, y in {0, 1}
        let formulation = Formulation {
            sense: ObjectiveSense::Maximize,
            variables: vec![
                Variable::binary("x", ColumnFamily::Arc),
                Variable::binary("y", ColumnFamily::Arc),
            ],
            objective: vec![dec!(1), dec!(1)],
            constraints: vec![Constraint::leq(
                "pick-one",
                RowFamily::Coverage,
                vec![(0, dec!(1)), (1, dec!(1))],
                dec!(1),
            )],
        };

        let outcome = HighsOptimizer::new().optimize(&formulation).unwrap();
        let solution = outcome.solution().expect("optimal");
        assert_eq!(solution.objective, dec!(1));
        let sum: Decimal = solution.values.iter().sum();
        assert_eq!(sum, dec!(1));
    }

    #[test]
    fn test_equality_with_free_variable() {
        // Minimize: x
        // Subject to: x - y = -2
        //            x >= 0, y free, y <= 5 via row
        let formulation = Formulation {
            sense: ObjectiveSense::Minimize,
            variables: vec![
                continuous("x", VariableBounds::non_negative()),
                continuous("y", VariableBounds::free()),
            ],
            objective: vec![dec!(1), dec!(0)],
            constraints: vec![
                Constraint::eq(
                    "link",
                    RowFamily::FlowOut,
                    vec![(0, dec!(1)), (1, dec!(-1))],
                    dec!(-2),
                ),
                Constraint::leq("cap", RowFamily::FlowIn, vec![(1, dec!(1))], dec!(5)),
            ],
        };

        let outcome = HighsOptimizer::new().optimize(&formulation).unwrap();
        let solution = outcome.solution().expect("optimal");
        assert!(solution.values[0].abs() < dec!(0.000001));
        assert!((solution.values[1] - dec!(2)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_infeasible() {
        let formulation = Formulation {
            sense: ObjectiveSense::Minimize,
            variables: vec![Variable::binary("x", ColumnFamily::Node)],
            objective: vec![dec!(1)],
            constraints: vec![Constraint::geq(
                "too-much",
                RowFamily::Coverage,
                vec![(0, dec!(1))],
                dec!(2),
            )],
        };

        let outcome = HighsOptimizer::new().optimize(&formulation).unwrap();
        assert_eq!(outcome, Outcome::Infeasible);
    }

    #[test]
    fn test_unsatisfiable_empty_row() {
        let formulation = Formulation {
            sense: ObjectiveSense::Minimize,
            variables: vec![continuous("x", VariableBounds::non_negative())],
            objective: vec![dec!(1)],
            constraints: vec![Constraint::geq("empty", RowFamily::Coverage, vec![], dec!(1))],
        };

        let outcome = HighsOptimizer::new().optimize(&formulation).unwrap();
        assert_eq!(outcome, Outcome::Infeasible);
    }

    #[test]
    fn test_to_decimal_rejects_non_finite() {
        assert_eq!(to_decimal("x", 2.5).unwrap(), dec!(2.5));
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1e300] {
            let err = to_decimal("x", value).unwrap_err();
            assert!(
                matches!(err, crate::error::Error::Solver(SolverError::Backend { .. })),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn test_empty_problem() {
        let formulation = Formulation {
            sense: ObjectiveSense::Minimize,
            variables: vec![],
            objective: vec![],
            constraints: vec![],
        };
        let outcome = HighsOptimizer::new().optimize(&formulation).unwrap();
        assert_eq!(outcome.solution().map(|s| s.values.len()), Some(0));
    }
}
