//! Graph primitives: constructing the initial weighted graph from a score matrix, and
//! extracting subgraphs by reachability, cycle membership, and connected component.
//!
//! Every primitive here is pure: it returns a new graph and never mutates the one it is given.

use std::collections::HashSet;

use itertools::Itertools;
use petgraph::stable_graph::StableGraph;
use petgraph::visit::Bfs;
use petgraph::Undirected;

use crate::error::{InvalidGraphStage, PairMapError, Result};
use crate::intermediate::Intermediate;
use crate::score::ScoreMatrix;

/// Index type backing node and edge indices; `u32` is ample for any realistic intermediate set.
pub type Ix = u32;
pub type NodeId = petgraph::stable_graph::NodeIndex<Ix>;
pub type EdgeId = petgraph::stable_graph::EdgeIndex<Ix>;

/// Per-node data: the label shown to downstream consumers of the returned graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    pub label: String,
}

/// Per-edge data: the rounded similarity score and whether the edge lies on the found path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeData {
    pub score: f64,
    pub found_path: bool,
}

/// The pairmap graph type: undirected, with node indices stable across edge and node removal
/// (required so the pruner can track edges by node-index pair across the whole run).
pub type PairGraph = StableGraph<NodeData, EdgeData, Undirected, Ix>;

/// Builds the full graph at threshold `min_score`: a node for every intermediate regardless of
/// connectivity, and an edge `(u, v)` iff `round(score(u, v), 2) >= min_score`.
pub fn build_full_graph(
    intermediates: &[Intermediate],
    scores: &ScoreMatrix,
    min_score: f64,
) -> PairGraph {
    let n = intermediates.len();
    let mut graph: PairGraph = StableGraph::with_capacity(n, 0);
    let nodes: Vec<NodeId> = intermediates
        .iter()
        .enumerate()
        .map(|(i, im)| {
            graph.add_node(NodeData {
                label: im.label(i),
            })
        })
        .collect();
    for (u, v) in (0..n).tuple_combinations() {
        let rounded = scores.rounded_score(u, v);
        if rounded >= min_score {
            graph.add_edge(
                nodes[u],
                nodes[v],
                EdgeData {
                    score: rounded,
                    found_path: false,
                },
            );
        }
    }
    graph
}

/// The subgraph induced by `keep`, failing if any found-path node was left out.
///
/// This is the one place all three extraction primitives below funnel through: each computes
/// its own `keep` set and then asks for the same induced-subgraph-with-validation behavior.
fn induced_subgraph(
    graph: &PairGraph,
    keep: &HashSet<NodeId>,
    found_path: &[NodeId],
    stage: InvalidGraphStage,
) -> Result<PairGraph> {
    let mut candidate = graph.clone();
    candidate.retain_nodes(|_, n| keep.contains(&n));
    if found_path.iter().all(|n| candidate.contains_node(*n)) {
        Ok(candidate)
    } else {
        Err(PairMapError::InvalidGraph(stage))
    }
}

/// The subgraph induced by the found-path nodes plus every node on a simple source→target path
/// of at most `max_path_length` edges.
pub fn reachable_subgraph(
    graph: &PairGraph,
    found_path: &[NodeId],
    source: NodeId,
    target: NodeId,
    max_path_length: usize,
) -> Result<PairGraph> {
    let max_intermediate_nodes = max_path_length.saturating_sub(1);
    let mut keep: HashSet<NodeId> = found_path.iter().copied().collect();
    for path in petgraph::algo::all_simple_paths::<Vec<NodeId>, _>(
        graph,
        source,
        target,
        0,
        Some(max_intermediate_nodes),
    ) {
        keep.extend(path);
    }
    induced_subgraph(graph, &keep, found_path, InvalidGraphStage::Reachable)
}

/// The subgraph induced by the found-path nodes plus every node of a simple cycle of at most
/// `cycle_length` edges that touches the found path (any found-path node, not just interior).
pub fn cycle_subgraph(
    graph: &PairGraph,
    found_path: &[NodeId],
    cycle_length: usize,
) -> Result<PairGraph> {
    let found_set: HashSet<NodeId> = found_path.iter().copied().collect();
    let mut keep: HashSet<NodeId> = found_set.clone();
    for cycle in crate::cycles::simple_cycles(graph, cycle_length) {
        if cycle.iter().any(|n| found_set.contains(n)) {
            keep.extend(cycle);
        }
    }
    induced_subgraph(graph, &keep, found_path, InvalidGraphStage::Cycle)
}

/// Maps each live node to a small integer component id via breadth-first search, the same
/// `Bfs` traversal the crate re-exports from `petgraph::visit`.
fn component_ids(graph: &PairGraph) -> std::collections::HashMap<NodeId, usize> {
    let mut component = std::collections::HashMap::new();
    let mut next_id = 0usize;
    for start in graph.node_indices() {
        if component.contains_key(&start) {
            continue;
        }
        let mut bfs = Bfs::new(graph, start);
        while let Some(node) = bfs.next(graph) {
            component.insert(node, next_id);
        }
        next_id += 1;
    }
    component
}

/// The connected component containing every found-path node, failing if no single component
/// contains all of them.
pub fn main_subgraph(graph: &PairGraph, found_path: &[NodeId]) -> Result<PairGraph> {
    let component = component_ids(graph);
    let anchor = found_path
        .first()
        .and_then(|n| component.get(n).copied());
    let all_in_one = anchor.is_some()
        && found_path
            .iter()
            .all(|n| component.get(n).copied() == anchor);
    if !all_in_one {
        return Err(PairMapError::InvalidGraph(InvalidGraphStage::Main));
    }
    let anchor = anchor.unwrap();
    let keep: HashSet<NodeId> = component
        .into_iter()
        .filter(|(_, c)| *c == anchor)
        .map(|(n, _)| n)
        .collect();
    induced_subgraph(graph, &keep, found_path, InvalidGraphStage::Main)
}

/// Applies reachable → cycle → main in sequence, the reduction every initial graph and every
/// pruning candidate goes through.
pub fn reduce(
    graph: &PairGraph,
    found_path: &[NodeId],
    source: NodeId,
    target: NodeId,
    max_path_length: usize,
    cycle_length: usize,
) -> Result<PairGraph> {
    let reachable = reachable_subgraph(graph, found_path, source, target, max_path_length)?;
    let cycled = cycle_subgraph(&reachable, found_path, cycle_length)?;
    main_subgraph(&cycled, found_path)
}
