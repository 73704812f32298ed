//! Structured results for display layers.
//!
//! Nothing here formats text. Reporters read a [`SolveReport`] or a
//! [`FormulationSummary`] and decide on presentation themselves.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use super::model::{Integrality, ModelKind};
use crate::domain::constraint::{ColumnFamily, RowFamily};
use crate::domain::formulation::Formulation;
use crate::domain::graph::Instance;
use crate::domain::layout::IndexLayout;
use crate::domain::solution::{Outcome, SolutionStatus};

/// Value of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableValue {
    /// Column name.
    pub name: String,
    /// Resolved value.
    pub value: Decimal,
}

/// Values of every column in one family, in layout order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableGroup {
    /// Column family.
    pub family: ColumnFamily,
    /// Column values.
    pub values: Vec<VariableValue>,
}

/// Read-only result of one solve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveReport {
    /// Which program was solved.
    pub model: ModelKind,
    /// Integrality of the program actually solved.
    pub integrality: Integrality,
    /// Optimizer that produced the outcome.
    pub optimizer: String,
    /// Termination status.
    pub status: SolutionStatus,
    /// Objective value when optimal.
    pub objective: Option<Decimal>,
    /// Column values grouped by family; empty unless optimal.
    pub groups: Vec<VariableGroup>,
    /// Node sequence from source to target for an optimal integer primal.
    pub path: Option<Vec<usize>>,
}

impl SolveReport {
    /// Build a report from a solved formulation.
    #[must_use]
    pub fn new(
        instance: &Instance,
        model: ModelKind,
        integrality: Integrality,
        optimizer: &str,
        formulation: &Formulation,
        outcome: &Outcome,
    ) -> Self {
        let Some(solution) = outcome.solution() else {
            return Self {
                model,
                integrality,
                optimizer: optimizer.to_string(),
                status: outcome.status(),
                objective: None,
                groups: Vec::new(),
                path: None,
            };
        };

        let mut groups: Vec<VariableGroup> = Vec::new();
        for (variable, value) in formulation.variables.iter().zip(&solution.values) {
            let entry = VariableValue {
                name: variable.name.clone(),
                value: *value,
            };
            match groups.last_mut() {
                Some(group) if group.family == variable.family => group.values.push(entry),
                _ => groups.push(VariableGroup {
                    family: variable.family,
                    values: vec![entry],
                }),
            }
        }

        let path = (model == ModelKind::Primal && integrality == Integrality::Integer)
            .then(|| trace_path(instance, &solution.values))
            .flatten();

        Self {
            model,
            integrality,
            optimizer: optimizer.to_string(),
            status: outcome.status(),
            objective: Some(solution.objective),
            groups,
            path,
        }
    }

    /// Values of one family, if present.
    #[must_use]
    pub fn group(&self, family: ColumnFamily) -> Option<&VariableGroup> {
        self.groups.iter().find(|g| g.family == family)
    }

    /// Names of columns in `family` whose value is at least one half.
    #[must_use]
    pub fn selected(&self, family: ColumnFamily) -> Vec<&str> {
        self.group(family)
            .map(|g| {
                g.values
                    .iter()
                    .filter(|v| v.value >= HALF)
                    .map(|v| v.name.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }
}

const HALF: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Follow selected arcs from the source until the target is reached.
fn trace_path(instance: &Instance, values: &[Decimal]) -> Option<Vec<usize>> {
    let layout = IndexLayout::new(instance);
    let mut path = vec![instance.source()];
    let mut current = instance.source();

    while current != instance.target() {
        let next = layout
            .arcs()
            .iter()
            .filter(|arc| arc.from == current)
            .find(|arc| {
                layout
                    .arc_index(arc.from, arc.to)
                    .and_then(|column| values.get(column))
                    .is_some_and(|v| *v >= HALF)
            })
            .map(|arc| arc.to);

        match next {
            Some(node) if path.len() < layout.node_count() => {
                path.push(node);
                current = node;
            }
            _ => {
                warn!(at = current, "Selected arcs do not form a source-target path");
                return None;
            }
        }
    }

    Some(path)
}

/// Number of rows or columns in one family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FamilyCount<F> {
    /// Family.
    pub family: F,
    /// How many.
    pub count: usize,
}

/// Start positions of every index range in the shared layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutOffsets {
    /// First arc column.
    pub arcs_start: usize,
    /// First node-visit column.
    pub nodes_start: usize,
    /// First MTZ label column.
    pub labels_start: usize,
    /// First coverage row.
    pub color_start: usize,
    /// First flow-out row.
    pub flow_out_start: usize,
    /// First flow-in row.
    pub flow_in_start: usize,
    /// First subtour row.
    pub subtour_start: usize,
}

impl From<&IndexLayout> for LayoutOffsets {
    fn from(layout: &IndexLayout) -> Self {
        Self {
            arcs_start: layout.arcs_start(),
            nodes_start: layout.nodes_start(),
            labels_start: layout.labels_start(),
            color_start: layout.color_start(),
            flow_out_start: layout.flow_out_start(),
            flow_in_start: layout.flow_in_start(),
            subtour_start: layout.subtour_start(),
        }
    }
}

/// Shape of a formulation, without solving it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormulationSummary {
    /// Which program was built.
    pub model: ModelKind,
    /// Resolved big-M constant.
    pub big_m: u64,
    /// Column counts by family, in layout order.
    pub columns: Vec<FamilyCount<ColumnFamily>>,
    /// Row counts by family, in layout order.
    pub rows: Vec<FamilyCount<RowFamily>>,
    /// Offsets of the primal layout.
    pub offsets: LayoutOffsets,
    /// Whether any column is integral.
    pub mixed_integer: bool,
}

impl FormulationSummary {
    /// Summarize a built formulation.
    #[must_use]
    pub fn new(model: ModelKind, big_m: u64, layout: &IndexLayout, formulation: &Formulation) -> Self {
        Self {
            model,
            big_m,
            columns: count_runs(formulation.variables.iter().map(|v| v.family)),
            rows: count_runs(formulation.constraints.iter().map(|c| c.family)),
            offsets: layout.into(),
            mixed_integer: formulation.is_mixed_integer(),
        }
    }

    /// Total number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.iter().map(|c| c.count).sum()
    }

    /// Total number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.iter().map(|r| r.count).sum()
    }
}

fn count_runs<F: PartialEq>(families: impl Iterator<Item = F>) -> Vec<FamilyCount<F>> {
    let mut counts: Vec<FamilyCount<F>> = Vec::new();
    for family in families {
        match counts.last_mut() {
            Some(last) if last.family == family => last.count += 1,
            _ => counts.push(FamilyCount { family, count: 1 }),
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::big_m::BigM;
    use crate::domain::graph::{Edge, GraphModel};
    use crate::domain::primal::PrimalFormulator;
    use crate::domain::solution::Solution;
    use rust_decimal_macros::dec;

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

    fn long_way(instance: &Instance) -> (Formulation, Outcome) {
        let primal = PrimalFormulator::new(instance, BigM::default()).unwrap();
        let formulation = primal.formulate().unwrap();
        let layout = primal.layout();
        let mut values = vec![Decimal::ZERO; formulation.variable_count()];
        for (from, to) in [(0, 1), (1, 2), (2, 3)] {
            values[layout.arc_index(from, to).unwrap()] = dec!(1);
        }
        for node in 0..4 {
            values[layout.node_index(node)] = dec!(1);
            values[layout.label_index(node)] = Decimal::from(node);
        }
        let objective = formulation.objective_value(&values);
        (formulation, Outcome::Optimal(Solution { values, objective }))
    }

    #[test]
    fn groups_follow_layout_order() {
        let instance = square();
        let (formulation, outcome) = long_way(&instance);
        let report = SolveReport::new(
            &instance,
            ModelKind::Primal,
            Integrality::Integer,
            "test",
            &formulation,
            &outcome,
        );

        let families: Vec<ColumnFamily> = report.groups.iter().map(|g| g.family).collect();
        assert_eq!(
            families,
            vec![ColumnFamily::Arc, ColumnFamily::Node, ColumnFamily::Label]
        );
        assert_eq!(report.group(ColumnFamily::Arc).unwrap().values.len(), 8);
        assert_eq!(report.objective, Some(dec!(12)));
        assert_eq!(
            report.selected(ColumnFamily::Arc),
            vec!["arc[0,1]", "arc[1,2]", "arc[2,3]"]
        );
    }

    #[test]
    fn path_is_traced_from_source() {
        let instance = square();
        let (formulation, outcome) = long_way(&instance);
        let report = SolveReport::new(
            &instance,
            ModelKind::Primal,
            Integrality::Integer,
            "test",
            &formulation,
            &outcome,
        );
        assert_eq!(report.path, Some(vec![0, 1, 2, 3]));
    }

    #[test]
    fn relaxed_reports_have_no_path() {
        let instance = square();
        let (formulation, outcome) = long_way(&instance);
        let report = SolveReport::new(
            &instance,
            ModelKind::Primal,
            Integrality::Relaxed,
            "test",
            &formulation,
            &outcome,
        );
        assert_eq!(report.path, None);
    }

    #[test]
    fn infeasible_report_is_empty() {
        let instance = square();
        let (formulation, _) = long_way(&instance);
        let report = SolveReport::new(
            &instance,
            ModelKind::Dual,
            Integrality::Relaxed,
            "test",
            &formulation,
            &Outcome::Infeasible,
        );
        assert_eq!(report.status, SolutionStatus::Infeasible);
        assert_eq!(report.objective, None);
        assert!(report.groups.is_empty());
    }

    #[test]
    fn summary_counts_families() {
        let instance = square();
        let primal = PrimalFormulator::new(&instance, BigM::default()).unwrap();
        let formulation = primal.formulate().unwrap();
        let summary = FormulationSummary::new(
            ModelKind::Primal,
            primal.big_m(),
            primal.layout(),
            &formulation,
        );

        assert_eq!(summary.column_count(), 16);
        assert_eq!(summary.row_count(), 18);
        assert_eq!(
            summary.rows,
            vec![
                FamilyCount { family: RowFamily::Coverage, count: 2 },
                FamilyCount { family: RowFamily::FlowOut, count: 4 },
                FamilyCount { family: RowFamily::FlowIn, count: 4 },
                FamilyCount { family: RowFamily::Subtour, count: 8 },
            ]
        );
        assert_eq!(summary.offsets.subtour_start, 10);
        assert!(summary.mixed_integer);
    }
}
