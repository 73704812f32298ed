use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::Rng;

use colorpath::domain::graph::{Edge, GraphModel, Instance};

/// Text of the four-node square used across the CLI tests.
pub const SQUARE_TEXT: &str = "0 1 0 1\n(0,1,5);(1,2,3);(2,3,4);(0,3,10)\n0 3\n";

/// Four nodes colored `0 1 0 1` in a square with a heavy chord.
///
/// Cheapest colored path from 0 to 3 is the chord, cost 10.
pub fn square() -> Instance {
    let graph = GraphModel::new(
        vec![0, 1, 0, 1],
        vec![
            Edge::new(0, 1, 5),
            Edge::new(1, 2, 3),
            Edge::new(2, 3, 4),
            Edge::new(0, 3, 10),
        ],
    )
    .expect("square graph");
    Instance::new(graph, 0, 3).expect("square instance")
}

/// A line `0 - 1 - 2 - 3 - 4` where color 2 sits only on node 2.
pub fn line() -> Instance {
    let graph = GraphModel::new(
        vec![0, 1, 2, 1, 0],
        vec![
            Edge::new(0, 1, 1),
            Edge::new(1, 2, 1),
            Edge::new(2, 3, 1),
            Edge::new(3, 4, 1),
        ],
    )
    .expect("line graph");
    Instance::new(graph, 0, 4).expect("line instance")
}

/// Text of [`detached_cycle`].
pub const DETACHED_CYCLE_TEXT: &str = "0 0 1 0\n(0,1,1);(2,3,1);(0,2,50);(2,1,50)\n0 1\n";

/// Color 1 sits only on node 2, which the direct edge `0 - 1` skips.
///
/// The cycle `2 - 3 - 2` costs 2 and touches color 1 without connecting to
/// the path, so only the subtour rows keep the optimum at the detour
/// `0 -> 2 -> 1`, cost 100.
pub fn detached_cycle() -> Instance {
    let graph = GraphModel::new(
        vec![0, 0, 1, 0],
        vec![
            Edge::new(0, 1, 1),
            Edge::new(2, 3, 1),
            Edge::new(0, 2, 50),
            Edge::new(2, 1, 50),
        ],
    )
    .expect("detached cycle graph");
    Instance::new(graph, 0, 1).expect("detached cycle instance")
}

/// Two components; the target cannot be reached from the source.
pub fn disconnected() -> Instance {
    let graph = GraphModel::new(
        vec![0, 1, 0, 1],
        vec![Edge::new(0, 1, 2), Edge::new(2, 3, 2)],
    )
    .expect("disconnected graph");
    Instance::new(graph, 0, 3).expect("disconnected instance")
}

/// Random connected-ish graph with `nodes` nodes and up to `colors` colors.
///
/// A spanning chain `0 - 1 - ... - n-1` guarantees a source-target path;
/// extra edges are added with probability `density`.
pub fn random_instance(rng: &mut StdRng, nodes: usize, colors: i64, density: f64) -> Instance {
    let node_colors: Vec<i64> = (0..nodes).map(|_| rng.gen_range(0..colors)).collect();

    let mut pairs = BTreeSet::new();
    for i in 1..nodes {
        pairs.insert((i - 1, i));
    }
    for i in 0..nodes {
        for j in (i + 2)..nodes {
            if rng.gen_bool(density) {
                pairs.insert((i, j));
            }
        }
    }
    let edges = pairs
        .into_iter()
        .map(|(i, j)| Edge::new(i, j, rng.gen_range(1..=20)))
        .collect();

    let graph = GraphModel::new(node_colors, edges).expect("random graph");
    let source = rng.gen_range(0..nodes);
    let target = loop {
        let candidate = rng.gen_range(0..nodes);
        if candidate != source {
            break candidate;
        }
    };
    Instance::new(graph, source, target).expect("random instance")
}
