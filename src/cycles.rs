//! Bounded-length simple cycle enumeration.
//!
//! `petgraph::algo::cycle_basis` returns a *minimal* cycle basis, not every simple cycle, so it
//! cannot answer "does some cycle of length <= k touch this node". This module enumerates every
//! simple cycle directly, following the same backtracking-DFS-with-a-visited-set shape as
//! [`petgraph::algo::simple_paths::all_simple_paths`]: each cycle is anchored at its
//! lowest-index node and extended only through strictly larger indices, which visits every
//! simple cycle exactly twice (once per traversal direction) without needing to dedupe
//! rotations. The traversal directions collapse to the same node set, which is all callers here
//! ever need.

use std::collections::HashSet;

use crate::graph::{NodeId, PairGraph};

/// All simple cycles of at most `max_len` edges, each as its ordered sequence of nodes.
///
/// A triangle is the shortest possible simple cycle, so `max_len < 3` yields no cycles.
pub fn simple_cycles(graph: &PairGraph, max_len: usize) -> Vec<Vec<NodeId>> {
    let mut cycles = Vec::new();
    if max_len < 3 {
        return cycles;
    }
    for anchor in graph.node_indices() {
        let mut visited: HashSet<NodeId> = HashSet::new();
        visited.insert(anchor);
        let mut path = vec![anchor];
        extend(graph, anchor, &mut path, &mut visited, max_len, &mut cycles);
    }
    cycles
}

fn extend(
    graph: &PairGraph,
    anchor: NodeId,
    path: &mut Vec<NodeId>,
    visited: &mut HashSet<NodeId>,
    max_len: usize,
    cycles: &mut Vec<Vec<NodeId>>,
) {
    let current = *path.last().unwrap();
    for neighbor in graph.neighbors(current) {
        if neighbor == anchor {
            if path.len() >= 3 {
                cycles.push(path.clone());
            }
            continue;
        }
        if neighbor.index() < anchor.index() || visited.contains(&neighbor) {
            continue;
        }
        if path.len() + 1 > max_len {
            continue;
        }
        visited.insert(neighbor);
        path.push(neighbor);
        extend(graph, anchor, path, visited, max_len, cycles);
        path.pop();
        visited.remove(&neighbor);
    }
}
