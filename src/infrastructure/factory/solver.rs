//! Solver factory.

use std::sync::Arc;

use crate::adapter::outbound::solver::HighsOptimizer;
use crate::application::model::ModelSettings;
use crate::application::service::SolveService;
use crate::port::outbound::solver::Optimizer;

/// Build the default optimizer, HiGHS through `good_lp`.
pub fn build_optimizer() -> Arc<dyn Optimizer> {
    Arc::new(HighsOptimizer::new())
}

/// Build a solve service over the default optimizer.
pub fn build_solve_service(settings: ModelSettings) -> SolveService {
    SolveService::new(build_optimizer(), settings)
}
