//! Handler for `inspect`.

use serde_json::json;
use tabled::{Table, Tabled};

use super::command::ModelArgs;
use super::output;
use crate::application::report::FormulationSummary;
use crate::domain::constraint::Constraint;
use crate::domain::formulation::Formulation;
use crate::domain::graph::Instance;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::factory::solver::build_solve_service;

#[derive(Tabled)]
struct CountRow {
    #[tabled(rename = "Family")]
    family: String,
    #[tabled(rename = "Count")]
    count: usize,
}

#[derive(Tabled)]
struct RowLine {
    #[tabled(rename = "Row")]
    name: String,
    #[tabled(rename = "Expression")]
    expression: String,
}

/// Execute `inspect`.
pub fn execute(args: &ModelArgs, config: &Config, instance: &Instance) -> Result<()> {
    let service = build_solve_service(args.settings(config.model));
    let summary = service.summarize(instance)?;

    if output::is_json() {
        output::json_output("inspect", json!(summary));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    print_summary(&summary);

    if output::verbosity() > 0 {
        let formulation = service.formulate(instance)?;
        output::section("Rows");
        let rows: Vec<RowLine> = formulation
            .constraints
            .iter()
            .map(|c| RowLine {
                name: c.name.clone(),
                expression: render(&formulation, c),
            })
            .collect();
        output::lines(&Table::new(rows).to_string());
    }
    Ok(())
}

fn print_summary(summary: &FormulationSummary) {
    output::field("Model", summary.model);
    output::field("Big-M", summary.big_m);
    output::field("Integer", summary.mixed_integer);

    output::section(&format!("Columns ({})", summary.column_count()));
    output::lines(
        &Table::new(summary.columns.iter().map(|c| CountRow {
            family: c.family.to_string(),
            count: c.count,
        }))
        .to_string(),
    );

    output::section(&format!("Rows ({})", summary.row_count()));
    output::lines(
        &Table::new(summary.rows.iter().map(|r| CountRow {
            family: r.family.to_string(),
            count: r.count,
        }))
        .to_string(),
    );

    let offsets = &summary.offsets;
    output::section("Primal layout");
    output::field("arcs", offsets.arcs_start);
    output::field("nodes", offsets.nodes_start);
    output::field("labels", offsets.labels_start);
    output::field("coverage", offsets.color_start);
    output::field("flow-out", offsets.flow_out_start);
    output::field("flow-in", offsets.flow_in_start);
    output::field("subtour", offsets.subtour_start);
}

/// Render a row as `2 x + -1 y >= 0` using column names.
fn render(formulation: &Formulation, constraint: &Constraint) -> String {
    let lhs = if constraint.terms.is_empty() {
        "0".to_string()
    } else {
        constraint
            .terms
            .iter()
            .map(|(column, coefficient)| {
                let name = formulation
                    .variables
                    .get(*column)
                    .map_or("?", |v| v.name.as_str());
                format!("{} {name}", coefficient.normalize())
            })
            .collect::<Vec<_>>()
            .join(" + ")
    };
    format!(
        "{lhs} {} {}",
        constraint.relation,
        constraint.rhs.normalize()
    )
}
