//! Handler for `solve`.

use rust_decimal::Decimal;
use serde_json::json;
use tabled::{Table, Tabled};

use super::command::ModelArgs;
use super::output;
use crate::application::report::{SolveReport, VariableGroup};
use crate::domain::graph::Instance;
use crate::domain::solution::SolutionStatus;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::factory::solver::build_solve_service;

#[derive(Tabled)]
struct ValueRow {
    #[tabled(rename = "Variable")]
    name: String,
    #[tabled(rename = "Value")]
    value: Decimal,
}

/// Execute `solve`.
///
/// Infeasible and unbounded results are printed, not returned as errors.
pub fn execute(args: &ModelArgs, config: &Config, instance: &Instance) -> Result<()> {
    let service = build_solve_service(args.settings(config.model));
    let report = service.solve(instance)?;

    if output::is_json() {
        output::json_output("solve", json!(report));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Model", report.model);
    output::field("Integrality", report.integrality);
    output::field("Optimizer", &report.optimizer);

    match report.status {
        SolutionStatus::Optimal => print_optimal(&report),
        SolutionStatus::Infeasible => {
            output::field("Status", output::negative(report.status));
            output::warning("no path from source to target visits every required color");
        }
        SolutionStatus::Unbounded => {
            output::field("Status", output::negative(report.status));
            output::warning("objective is unbounded");
        }
    }
    Ok(())
}

fn print_optimal(report: &SolveReport) {
    output::field("Status", output::positive(report.status));
    if let Some(objective) = report.objective {
        output::field("Objective", output::highlight(objective.normalize()));
    }
    if let Some(path) = &report.path {
        let nodes: Vec<String> = path.iter().map(ToString::to_string).collect();
        output::field("Path", nodes.join(" -> "));
        output::success("path visits every required color");
    }

    let show_all = output::verbosity() > 0;
    for group in &report.groups {
        let rows = value_rows(group, show_all);
        output::section(&format!("Values: {}", group.family));
        if rows.is_empty() {
            output::lines(&output::muted("(all zero)"));
        } else {
            output::lines(&Table::new(rows).to_string());
        }
    }
}

fn value_rows(group: &VariableGroup, show_all: bool) -> Vec<ValueRow> {
    group
        .values
        .iter()
        .filter(|v| show_all || !v.value.is_zero())
        .map(|v| ValueRow {
            name: v.name.clone(),
            value: v.value.normalize(),
        })
        .collect()
}
