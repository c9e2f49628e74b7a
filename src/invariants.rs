//! The invariant checker: recomputes the cycled-node and cycled-edge sets around the found path
//! for a candidate graph, and tests them for covering against the snapshot taken right after the
//! initial reduction.

use std::collections::HashSet;

use indexmap::IndexSet;
use petgraph::visit::EdgeRef;

use crate::cycles::simple_cycles;
use crate::graph::{NodeId, PairGraph};

/// An unordered edge of the found path, stored with its endpoints in ascending index order.
pub type FoundLink = (NodeId, NodeId);

pub fn ordered_link(a: NodeId, b: NodeId) -> FoundLink {
    if a.index() <= b.index() {
        (a, b)
    } else {
        (b, a)
    }
}

pub fn found_links(found_path: &[NodeId]) -> Vec<FoundLink> {
    found_path
        .windows(2)
        .map(|pair| ordered_link(pair[0], pair[1]))
        .collect()
}

/// Nodes that lie on some simple cycle of at most `cycle_length` edges touching an *interior*
/// found-path node (source and target themselves do not count), intersected with the found-path
/// node set itself.
///
/// Kept as an [`IndexSet`], the same insertion-ordered set `petgraph::algo::all_simple_paths`
/// itself uses internally, so that two runs over identical input enumerate and report this set
/// in the same order.
pub fn cycled_nodes(graph: &PairGraph, found_path: &[NodeId], cycle_length: usize) -> IndexSet<NodeId> {
    let interior: HashSet<NodeId> = if found_path.len() > 2 {
        found_path[1..found_path.len() - 1].iter().copied().collect()
    } else {
        HashSet::new()
    };

    let mut touched: IndexSet<NodeId> = IndexSet::new();
    for cycle in simple_cycles(graph, cycle_length) {
        if cycle.iter().any(|n| interior.contains(n)) {
            touched.extend(cycle);
        }
    }
    found_path
        .iter()
        .copied()
        .filter(|n| touched.contains(n))
        .collect()
}

/// Found-path links that are not bridges of `graph`.
pub fn cycled_edges(graph: &PairGraph, links: &[FoundLink]) -> IndexSet<FoundLink> {
    let bridges: HashSet<FoundLink> = petgraph::algo::bridges(graph)
        .map(|edge| ordered_link(edge.source(), edge.target()))
        .collect();
    links
        .iter()
        .copied()
        .filter(|link| !bridges.contains(link))
        .collect()
}

/// A snapshot of the sets used to judge whether later candidates still satisfy the node and
/// edge cycle-covering constraints.
#[derive(Debug, Clone)]
pub struct InvariantSnapshot {
    pub cycled_nodes: IndexSet<NodeId>,
    pub cycled_edges: IndexSet<FoundLink>,
}

impl InvariantSnapshot {
    pub fn capture(graph: &PairGraph, found_path: &[NodeId], cycle_length: usize) -> Self {
        let links = found_links(found_path);
        InvariantSnapshot {
            cycled_nodes: cycled_nodes(graph, found_path, cycle_length),
            cycled_edges: cycled_edges(graph, &links),
        }
    }

    fn node_covering_holds(&self, graph: &PairGraph, found_path: &[NodeId], cycle_length: usize) -> bool {
        let current = cycled_nodes(graph, found_path, cycle_length);
        self.cycled_nodes.is_subset(&current)
    }

    fn edge_covering_holds(&self, graph: &PairGraph, links: &[FoundLink]) -> bool {
        let current = cycled_edges(graph, links);
        self.cycled_edges.is_subset(&current)
    }

    /// Both coverings must hold, checked node-then-edge with short-circuit on failure.
    pub fn check(&self, graph: &PairGraph, found_path: &[NodeId], cycle_length: usize) -> bool {
        self.node_covering_holds(graph, found_path, cycle_length)
            && self.edge_covering_holds(graph, &found_links(found_path))
    }
}
