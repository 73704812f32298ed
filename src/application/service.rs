//! Formulate-then-optimize workflow.
//!
//! [`SolveService`] is the only place that sequences the formulators and the
//! optimizer. Every modeling error surfaces before the optimizer is called,
//! and an infeasible or unbounded verdict comes back inside the report rather
//! than as an error.

use std::sync::Arc;

use tracing::{debug, info};

use super::model::{Integrality, ModelKind, ModelSettings};
use super::report::{FormulationSummary, SolveReport};
use crate::domain::dual::DualFormulator;
use crate::domain::formulation::Formulation;
use crate::domain::graph::Instance;
use crate::domain::primal::PrimalFormulator;
use crate::error::Result;
use crate::port::outbound::solver::Optimizer;

/// Builds formulations for instances and hands them to an optimizer.
pub struct SolveService {
    optimizer: Arc<dyn Optimizer>,
    settings: ModelSettings,
}

impl SolveService {
    /// Create a service over `optimizer`.
    pub fn new(optimizer: Arc<dyn Optimizer>, settings: ModelSettings) -> Self {
        Self {
            optimizer,
            settings,
        }
    }

    /// Model settings in effect.
    #[must_use]
    pub fn settings(&self) -> ModelSettings {
        self.settings
    }

    /// Build the configured formulation without solving it.
    ///
    /// The dual is always continuous; `Integrality::Relaxed` only relaxes
    /// the primal.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`](crate::error::ModelError) if the instance
    /// cannot be modeled or the built program fails its structural check.
    pub fn formulate(&self, instance: &Instance) -> Result<Formulation> {
        let formulation = match self.settings.kind {
            ModelKind::Primal => {
                let primal = PrimalFormulator::new(instance, self.settings.big_m)?.formulate()?;
                match self.settings.integrality {
                    Integrality::Integer => primal,
                    Integrality::Relaxed => primal.relaxed(),
                }
            }
            ModelKind::Dual => DualFormulator::new(instance, self.settings.big_m)?.formulate()?,
        };
        Ok(formulation)
    }

    /// Describe the configured formulation.
    ///
    /// # Errors
    ///
    /// See [`formulate`](Self::formulate).
    pub fn summarize(&self, instance: &Instance) -> Result<FormulationSummary> {
        let primal = PrimalFormulator::new(instance, self.settings.big_m)?;
        let formulation = self.formulate(instance)?;
        Ok(FormulationSummary::new(
            self.settings.kind,
            primal.big_m(),
            primal.layout(),
            &formulation,
        ))
    }

    /// Formulate and optimize.
    ///
    /// # Errors
    ///
    /// Returns modeling errors before any optimizer call, and
    /// [`SolverError`](crate::error::SolverError) if the backend fails.
    pub fn solve(&self, instance: &Instance) -> Result<SolveReport> {
        let formulation = self.formulate(instance)?;
        let integrality = if formulation.is_mixed_integer() {
            Integrality::Integer
        } else {
            Integrality::Relaxed
        };

        debug!(
            model = %self.settings.kind,
            %integrality,
            columns = formulation.variable_count(),
            rows = formulation.row_count(),
            "Formulation ready"
        );

        let outcome = self.optimizer.optimize(&formulation)?;
        let report = SolveReport::new(
            instance,
            self.settings.kind,
            integrality,
            self.optimizer.name(),
            &formulation,
            &outcome,
        );

        info!(
            model = %report.model,
            status = %report.status,
            objective = ?report.objective,
            "Solve complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::domain::big_m::BigM;
    use crate::domain::graph::{Edge, GraphModel};
    use crate::domain::solution::{Outcome, SolutionStatus};
    use crate::error::{Error, ModelError};

    /// Records calls and always answers infeasible.
    #[derive(Default)]
    struct CountingOptimizer {
        calls: AtomicUsize,
    }

    impl Optimizer for CountingOptimizer {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn optimize(&self, _formulation: &Formulation) -> Result<Outcome> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Outcome::Infeasible)
        }
    }

    fn square() -> Instance {
        let graph = GraphModel::new(
            vec![0, 1, 0, 1],
            vec![
                Edge::new(0, 1, 5),
                Edge::new(1, 2, 3),
                Edge::new(2, 3, 4),
                Edge::new(0, 3, 10),
            ],
        )
        .unwrap();
        Instance::new(graph, 0, 3).unwrap()
    }

    fn service(settings: ModelSettings) -> (Arc<CountingOptimizer>, SolveService) {
        let optimizer = Arc::new(CountingOptimizer::default());
        let service = SolveService::new(optimizer.clone(), settings);
        (optimizer, service)
    }

    #[test]
    fn infeasibility_is_an_outcome_not_an_error() {
        let (optimizer, service) = service(ModelSettings::default());
        let report = service.solve(&square()).unwrap();
        assert_eq!(report.status, SolutionStatus::Infeasible);
        assert_eq!(report.optimizer, "counting");
        assert_eq!(optimizer.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn modeling_errors_stop_before_optimizer() {
        let (optimizer, service) = service(ModelSettings {
            big_m: BigM::Fixed(2),
            ..ModelSettings::default()
        });
        match service.solve(&square()) {
            Err(Error::Model(ModelError::BigMTooSmall { .. })) => {}
            other => panic!("expected BigMTooSmall, got {other:?}"),
        }
        assert_eq!(optimizer.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn relaxed_primal_is_continuous() {
        let (_, service) = service(ModelSettings {
            integrality: Integrality::Relaxed,
            ..ModelSettings::default()
        });
        let formulation = service.formulate(&square()).unwrap();
        assert!(!formulation.is_mixed_integer());

        let report = service.solve(&square()).unwrap();
        assert_eq!(report.integrality, Integrality::Relaxed);
    }

    #[test]
    fn dual_ignores_integrality() {
        let (_, service) = service(ModelSettings {
            kind: ModelKind::Dual,
            integrality: Integrality::Integer,
            ..ModelSettings::default()
        });
        let report = service.solve(&square()).unwrap();
        assert_eq!(report.model, ModelKind::Dual);
        assert_eq!(report.integrality, Integrality::Relaxed);
    }

    #[test]
    fn summary_of_dual_swaps_counts() {
        let (_, primal_service) = service(ModelSettings::default());
        let (_, dual_service) = service(ModelSettings {
            kind: ModelKind::Dual,
            ..ModelSettings::default()
        });
        let primal = primal_service.summarize(&square()).unwrap();
        let dual = dual_service.summarize(&square()).unwrap();
        assert_eq!(primal.column_count(), dual.row_count());
        assert_eq!(primal.row_count(), dual.column_count());
        assert_eq!(primal.offsets, dual.offsets);
        assert!(!dual.mixed_integer);
    }
}
