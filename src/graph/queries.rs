// src/graph/queries.rs
use std::collections::VecDeque;

use super::model::{NodeId, PackageGraph};

/// Share of all nodes a component must exceed to be accepted without search.
const DOMINANT_COMPONENT_SHARE: f64 = 0.9;

/// Nodes with no incident edge.
#[must_use]
pub fn isolated_nodes(graph: &PackageGraph) -> Vec<NodeId> {
    (0..graph.node_count())
        .filter(|&id| graph.out_degree(id) == 0 && graph.in_degree(id) == 0)
        .collect()
}

/// Weakly connected components, each sorted, in order of their smallest node.
#[must_use]
pub fn connected_components(graph: &PackageGraph) -> Vec<Vec<NodeId>> {
    let n = graph.node_count();
    let mut seen = vec![false; n];
    let mut components = Vec::new();

    for start in 0..n {
        if seen[start] {
            continue;
        }
        seen[start] = true;
        let mut component = Vec::new();
        let mut queue = VecDeque::from([start]);

        while let Some(id) = queue.pop_front() {
            component.push(id);
            let neighbours = graph
                .successors(id)
                .map(|(v, _)| v)
                .chain(graph.predecessors(id));
            for next in neighbours {
                if !seen[next] {
                    seen[next] = true;
                    queue.push_back(next);
                }
            }
        }

        component.sort_unstable();
        components.push(component);
    }

    components
}

/// The component that represents the connected core of the graph.
///
/// The first component holding more than 90% of all nodes wins; otherwise the
/// largest one is returned and a warning is logged.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn main_component(graph: &PackageGraph) -> Vec<NodeId> {
    let min_size = graph.node_count() as f64 * DOMINANT_COMPONENT_SHARE;
    let mut largest: Vec<NodeId> = Vec::new();

    for component in connected_components(graph) {
        if component.len() as f64 > min_size {
            return component;
        }
        tracing::warn!(
            "Component of {} nodes is smaller than the minimum size {min_size:.0}",
            component.len()
        );
        if component.len() > largest.len() {
            largest = component;
        }
    }

    largest
}

/// Packages (or other nodes) that point at `id`.
#[must_use]
pub fn dependents(graph: &PackageGraph, id: NodeId) -> Vec<NodeId> {
    let mut deps: Vec<_> = graph.predecessors(id).collect();
    deps.sort_unstable();
    deps
}
