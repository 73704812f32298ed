//! Primal MILP for the colored traveling salesman path problem.
//!
//! Columns (see [`IndexLayout`]):
//!
//! - `arc[i,j]` binary, one per existing directed arc, cost `weight(i,j)`
//! - `node[i]` binary, one per node
//! - `label[i]` integer `>= 0`, one per node, used only to break subtours
//!
//! Rows:
//!
//! - `color-c`: `sum(node[i] : color(i) = c) >= 1`
//! - `flow-out[i]`: `node[i] - sum_j arc[i,j] = [i = t]`
//! - `flow-in[j]`: `node[j] - sum_i arc[i,j] = [j = s]`
//! - `subtour[i,j]`: `label[j] - label[i] - (1+N) arc[i,j] >= -N`

use rust_decimal::Decimal;
use tracing::debug;

use super::big_m::BigM;
use super::constraint::{ColumnFamily, Constraint, RowFamily, Variable, VariableBounds};
use super::error::ModelError;
use super::formulation::{Formulation, ObjectiveSense, StandardForm};
use super::graph::Instance;
use super::layout::IndexLayout;

/// Builds the primal formulation of an [`Instance`].
#[derive(Debug)]
pub struct PrimalFormulator<'a> {
    instance: &'a Instance,
    layout: IndexLayout,
    big_m: u64,
}

impl<'a> PrimalFormulator<'a> {
    /// Prepare a formulator for `instance`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::BigMTooSmall`] if the big-M constant does not
    /// dominate the node count.
    pub fn new(instance: &'a Instance, big_m: BigM) -> Result<Self, ModelError> {
        let big_m = big_m.resolve(instance.graph().node_count())?;
        let layout = IndexLayout::new(instance);

        debug!(
            arcs = layout.arc_count(),
            nodes = layout.node_count(),
            colors = layout.color_count(),
            nodes_start = layout.nodes_start(),
            labels_start = layout.labels_start(),
            flow_out_start = layout.flow_out_start(),
            flow_in_start = layout.flow_in_start(),
            subtour_start = layout.subtour_start(),
            big_m,
            "Primal layout computed"
        );

        Ok(Self {
            instance,
            layout,
            big_m,
        })
    }

    /// Shared index layout.
    #[must_use]
    pub fn layout(&self) -> &IndexLayout {
        &self.layout
    }

    /// Resolved big-M constant.
    #[must_use]
    pub fn big_m(&self) -> u64 {
        self.big_m
    }

    /// Column declarations in layout order.
    #[must_use]
    pub fn variables(&self) -> Vec<Variable> {
        let n = self.layout.node_count();
        let arcs = self
            .layout
            .arcs()
            .iter()
            .map(|arc| Variable::binary(format!("arc[{},{}]", arc.from, arc.to), ColumnFamily::Arc));
        let nodes = (0..n).map(|i| Variable::binary(format!("node[{i}]"), ColumnFamily::Node));
        let labels = (0..n).map(|i| {
            Variable::integer(
                format!("label[{i}]"),
                ColumnFamily::Label,
                VariableBounds::non_negative(),
            )
        });

        arcs.chain(nodes).chain(labels).collect()
    }

    /// Objective coefficients: arc weights, zero elsewhere.
    #[must_use]
    pub fn objective(&self) -> Vec<Decimal> {
        let mut objective = vec![Decimal::ZERO; self.layout.variable_count()];
        for (position, arc) in self.layout.arcs().iter().enumerate() {
            objective[self.layout.arcs_start() + position] = Decimal::from(arc.weight);
        }
        objective
    }

    /// All rows in layout order.
    #[must_use]
    pub fn constraints(&self) -> Vec<Constraint> {
        let mut rows = Vec::with_capacity(self.layout.row_count());
        rows.extend(self.coverage_rows());
        rows.extend(self.flow_out_rows());
        rows.extend(self.flow_in_rows());
        rows.extend(self.subtour_rows());
        rows
    }

    fn coverage_rows(&self) -> impl Iterator<Item = Constraint> + '_ {
        let graph = self.instance.graph();
        self.layout.palette().iter().map(move |&color| {
            let terms = graph
                .nodes_with_color(color)
                .map(|i| (self.layout.node_index(i), Decimal::ONE))
                .collect();
            Constraint::geq(format!("color-{color}"), RowFamily::Coverage, terms, Decimal::ONE)
        })
    }

    fn flow_out_rows(&self) -> impl Iterator<Item = Constraint> + '_ {
        let target = self.instance.target();
        (0..self.layout.node_count()).map(move |i| {
            let mut terms = vec![(self.layout.node_index(i), Decimal::ONE)];
            terms.extend(
                self.layout
                    .arcs()
                    .iter()
                    .filter(|arc| arc.from == i)
                    .filter_map(|arc| self.layout.arc_index(arc.from, arc.to))
                    .map(|column| (column, Decimal::NEGATIVE_ONE)),
            );
            let rhs = if i == target { Decimal::ONE } else { Decimal::ZERO };
            Constraint::eq(format!("flow-out[{i}]"), RowFamily::FlowOut, terms, rhs)
        })
    }

    fn flow_in_rows(&self) -> impl Iterator<Item = Constraint> + '_ {
        let source = self.instance.source();
        (0..self.layout.node_count()).map(move |j| {
            let mut terms = vec![(self.layout.node_index(j), Decimal::ONE)];
            terms.extend(
                self.layout
                    .arcs()
                    .iter()
                    .filter(|arc| arc.to == j)
                    .filter_map(|arc| self.layout.arc_index(arc.from, arc.to))
                    .map(|column| (column, Decimal::NEGATIVE_ONE)),
            );
            let rhs = if j == source { Decimal::ONE } else { Decimal::ZERO };
            Constraint::eq(format!("flow-in[{j}]"), RowFamily::FlowIn, terms, rhs)
        })
    }

    fn subtour_rows(&self) -> impl Iterator<Item = Constraint> + '_ {
        let big_m = Decimal::from(self.big_m);
        self.layout.arcs().iter().filter_map(move |arc| {
            let column = self.layout.arc_index(arc.from, arc.to)?;
            let terms = vec![
                (self.layout.label_index(arc.to), Decimal::ONE),
                (self.layout.label_index(arc.from), Decimal::NEGATIVE_ONE),
                (column, -(big_m + Decimal::ONE)),
            ];
            Some(Constraint::geq(
                format!("subtour[{},{}]", arc.from, arc.to),
                RowFamily::Subtour,
                terms,
                -big_m,
            ))
        })
    }

    /// Build the complete MILP.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::LayoutMismatch`] if the built columns or rows
    /// disagree with the layout.
    pub fn formulate(&self) -> Result<Formulation, ModelError> {
        let formulation = Formulation {
            sense: ObjectiveSense::Minimize,
            variables: self.variables(),
            objective: self.objective(),
            constraints: self.constraints(),
        };

        expect_count("primal columns", self.layout.variable_count(), formulation.variable_count())?;
        expect_count("primal rows", self.layout.row_count(), formulation.row_count())?;
        formulation.check()?;

        debug!(
            columns = formulation.variable_count(),
            rows = formulation.row_count(),
            "Primal formulation built"
        );
        Ok(formulation)
    }

    /// Build the MILP and materialize its constraint matrix.
    ///
    /// # Errors
    ///
    /// See [`formulate`](Self::formulate).
    pub fn standard_form(&self) -> Result<StandardForm, ModelError> {
        self.formulate().map(|f| StandardForm::from_formulation(&f))
    }
}

pub(crate) fn expect_count(
    what: &'static str,
    expected: usize,
    found: usize,
) -> Result<(), ModelError> {
    if expected == found {
        Ok(())
    } else {
        Err(ModelError::LayoutMismatch {
            what,
            expected,
            found,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::color::Color;
    use crate::domain::constraint::{Domain, Relation};
    use crate::domain::graph::{Edge, GraphModel};
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

    #[test]
    fn counts_match_layout() {
        let instance = square();
        let primal = PrimalFormulator::new(&instance, BigM::default()).unwrap();
        let f = primal.formulate().unwrap();
        assert_eq!(f.variable_count(), 8 + 4 + 4);
        assert_eq!(f.row_count(), 2 + 4 + 4 + 8);
        assert_eq!(f.sense, ObjectiveSense::Minimize);
    }

    #[test]
    fn domains_per_family() {
        let instance = square();
        let f = PrimalFormulator::new(&instance, BigM::default())
            .unwrap()
            .formulate()
            .unwrap();
        for column in f.columns_of(ColumnFamily::Arc).chain(f.columns_of(ColumnFamily::Node)) {
            assert_eq!(f.variables[column].domain, Domain::Binary);
            assert_eq!(f.variables[column].bounds, VariableBounds::binary());
        }
        for column in f.columns_of(ColumnFamily::Label) {
            assert_eq!(f.variables[column].domain, Domain::Integer);
            assert_eq!(f.variables[column].bounds.lower, Some(Decimal::ZERO));
            assert_eq!(f.variables[column].bounds.upper, None);
        }
    }

    #[test]
    fn objective_carries_weights_on_arcs_only() {
        let instance = square();
        let primal = PrimalFormulator::new(&instance, BigM::default()).unwrap();
        let objective = primal.objective();
        let layout = primal.layout();
        assert_eq!(objective[layout.arc_index(0, 3).unwrap()], dec!(10));
        assert_eq!(objective[layout.arc_index(3, 0).unwrap()], dec!(10));
        assert_eq!(objective[layout.arc_index(1, 2).unwrap()], dec!(3));
        assert!(objective[layout.nodes_start()..].iter().all(|c| c.is_zero()));
    }

    #[test]
    fn coverage_rows_hold_only_matching_nodes() {
        let instance = square();
        let primal = PrimalFormulator::new(&instance, BigM::default()).unwrap();
        let f = primal.formulate().unwrap();
        let layout = primal.layout();

        let rows: Vec<&Constraint> = f.rows_of(RowFamily::Coverage).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0].terms,
            vec![(layout.node_index(0), dec!(1)), (layout.node_index(2), dec!(1))]
        );
        assert_eq!(
            rows[1].terms,
            vec![(layout.node_index(1), dec!(1)), (layout.node_index(3), dec!(1))]
        );
        assert!(rows
            .iter()
            .all(|r| r.relation == Relation::GreaterEqual && r.rhs == dec!(1)));
    }

    #[test]
    fn flow_out_rows_mark_target() {
        let instance = square();
        let primal = PrimalFormulator::new(&instance, BigM::default()).unwrap();
        let f = primal.formulate().unwrap();
        let layout = primal.layout();

        let row = &f.constraints[layout.flow_out_row(1)];
        assert_eq!(row.relation, Relation::Equal);
        assert_eq!(row.rhs, dec!(0));
        assert_eq!(row.coefficient(layout.node_index(1)), dec!(1));
        assert_eq!(row.coefficient(layout.arc_index(1, 0).unwrap()), dec!(-1));
        assert_eq!(row.coefficient(layout.arc_index(1, 2).unwrap()), dec!(-1));
        assert_eq!(row.coefficient(layout.arc_index(0, 1).unwrap()), dec!(0));
        assert_eq!(row.terms.len(), 3);

        assert_eq!(f.constraints[layout.flow_out_row(3)].rhs, dec!(1));
    }

    #[test]
    fn flow_in_rows_mark_source() {
        let instance = square();
        let primal = PrimalFormulator::new(&instance, BigM::default()).unwrap();
        let f = primal.formulate().unwrap();
        let layout = primal.layout();

        let row = &f.constraints[layout.flow_in_row(0)];
        assert_eq!(row.rhs, dec!(1));
        assert_eq!(row.coefficient(layout.arc_index(1, 0).unwrap()), dec!(-1));
        assert_eq!(row.coefficient(layout.arc_index(3, 0).unwrap()), dec!(-1));
        assert_eq!(row.coefficient(layout.arc_index(0, 1).unwrap()), dec!(0));

        assert_eq!(f.constraints[layout.flow_in_row(2)].rhs, dec!(0));
    }

    #[test]
    fn subtour_row_uses_big_m() {
        let instance = square();
        let primal = PrimalFormulator::new(&instance, BigM::default()).unwrap();
        let f = primal.formulate().unwrap();
        let layout = primal.layout();

        let row = &f.constraints[layout.subtour_row(2, 3).unwrap()];
        assert_eq!(row.name, "subtour[2,3]");
        assert_eq!(row.relation, Relation::GreaterEqual);
        assert_eq!(row.rhs, dec!(-1000000));
        assert_eq!(row.coefficient(layout.label_index(3)), dec!(1));
        assert_eq!(row.coefficient(layout.label_index(2)), dec!(-1));
        assert_eq!(row.coefficient(layout.arc_index(2, 3).unwrap()), dec!(-1000001));
        assert_eq!(row.terms.len(), 3);
    }

    #[test]
    fn node_count_big_m() {
        let instance = square();
        let primal = PrimalFormulator::new(&instance, BigM::NodeCount).unwrap();
        assert_eq!(primal.big_m(), 4);
        let f = primal.formulate().unwrap();
        let row = &f.constraints[primal.layout().subtour_row(0, 1).unwrap()];
        assert_eq!(row.rhs, dec!(-4));
        assert_eq!(row.coefficient(primal.layout().arc_index(0, 1).unwrap()), dec!(-5));
    }

    #[test]
    fn rejects_small_big_m() {
        let instance = square();
        assert!(matches!(
            PrimalFormulator::new(&instance, BigM::Fixed(2)),
            Err(ModelError::BigMTooSmall { .. })
        ));
    }

    #[test]
    fn standard_form_matches_rows() {
        let instance = square();
        let primal = PrimalFormulator::new(&instance, BigM::default()).unwrap();
        let standard = primal.standard_form().unwrap();
        let layout = primal.layout();
        assert_eq!(standard.row_count(), layout.row_count());
        assert_eq!(standard.column_count(), layout.variable_count());
        assert_eq!(standard.rhs[layout.flow_in_row(0)], dec!(1));
        let blue = layout.color_row(Color::new(1)).unwrap();
        assert_eq!(standard.entry(blue, layout.node_index(3)), dec!(1));
    }
}
