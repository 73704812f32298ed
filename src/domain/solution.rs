//! What an optimizer hands back.

use rust_decimal::Decimal;
use serde::Serialize;

/// Values for every column plus the objective value.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// One value per column, in formulation order.
    pub values: Vec<Decimal>,
    /// Objective value at `values`.
    pub objective: Decimal,
}

/// Result of a solve attempt that reached a verdict.
///
/// Backend failures are errors, not outcomes.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// An optimal assignment was found.
    Optimal(Solution),
    /// No assignment satisfies every row.
    Infeasible,
    /// The objective can be improved without limit.
    Unbounded,
}

impl Outcome {
    /// Status label of this outcome.
    #[must_use]
    pub const fn status(&self) -> SolutionStatus {
        match self {
            Self::Optimal(_) => SolutionStatus::Optimal,
            Self::Infeasible => SolutionStatus::Infeasible,
            Self::Unbounded => SolutionStatus::Unbounded,
        }
    }

    /// The solution, if optimal.
    #[must_use]
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Self::Optimal(solution) => Some(solution),
            _ => None,
        }
    }
}

/// Termination status of an optimization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolutionStatus {
    /// Solver found a globally optimal solution.
    Optimal,
    /// No feasible solution exists.
    Infeasible,
    /// Objective function is unbounded.
    Unbounded,
}

impl std::fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Optimal => "optimal",
            Self::Infeasible => "infeasible",
            Self::Unbounded => "unbounded",
        })
    }
}
