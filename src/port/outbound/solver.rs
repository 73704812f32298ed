//! Optimizer port for linear and mixed-integer programs.
//!
//! The formulators stop at a [`Formulation`]; anything that can turn one into
//! an [`Outcome`] plugs in here.

use crate::domain::formulation::Formulation;
use crate::domain::solution::Outcome;
use crate::error::Result;

/// Linear and mixed-integer programming optimizer.
///
/// Implementations wrap specific solver backends (HiGHS, CBC, Gurobi, etc.)
/// and honor the full formulation: objective direction, per-column bounds
/// and domains, and every row.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`) so one optimizer can
/// serve several formulation runs.
///
/// # Implementation Notes
///
/// - Return [`Outcome::Infeasible`] / [`Outcome::Unbounded`] for those
///   verdicts; reserve errors for backend failures
/// - The call may block for a long time; there is no cancellation contract
pub trait Optimizer: Send + Sync {
    /// Return the optimizer name for logging and configuration.
    fn name(&self) -> &'static str;

    /// Optimize `formulation`.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError`](crate::error::SolverError) if the backend fails
    /// for reasons other than infeasibility or unboundedness.
    fn optimize(&self, formulation: &Formulation) -> Result<Outcome>;
}
