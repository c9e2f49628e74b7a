//! The optimal-path selector: picks the source→target path that anchors the map.

use petgraph::visit::EdgeRef;

use crate::config::PairMapConfig;
use crate::error::{PairMapError, Result};
use crate::graph::{build_full_graph, NodeId, PairGraph};
use crate::intermediate::Intermediate;
use crate::score::ScoreMatrix;

/// The selected optimal path and its derived ordered links.
#[derive(Debug, Clone)]
pub struct OptimalPath {
    pub nodes: Vec<NodeId>,
}

/// Advisory rough search: if a path scored above `rough_score_threshold` already exists within
/// `rough_max_path_length` edges, a pairmap is arguably unnecessary. Purely informational — it
/// never changes the path that gets selected.
fn rough_search_advisory(
    intermediates: &[Intermediate],
    scores: &ScoreMatrix,
    config: &PairMapConfig,
    source: NodeId,
    target: NodeId,
) {
    let rough_graph = build_full_graph(intermediates, scores, config.rough_score_threshold);
    let max_intermediate_nodes = config.rough_max_path_length.saturating_sub(1);
    let found = petgraph::algo::all_simple_paths::<Vec<NodeId>, _>(
        &rough_graph,
        source,
        target,
        0,
        Some(max_intermediate_nodes),
    )
    .next()
    .is_some();
    if found {
        log::info!(
            "found a path scoring above the rough threshold ({:.2}) within {} edges; a pairmap may be unnecessary",
            config.rough_score_threshold,
            config.rough_max_path_length
        );
    }
}

/// Selects the source→target path minimizing the sum of reciprocal edge scores, among all
/// simple paths of at most `max_optimal_path_length` edges in the graph built at
/// `min_score_threshold`.
pub fn find_optimal_path(
    intermediates: &[Intermediate],
    scores: &ScoreMatrix,
    config: &PairMapConfig,
) -> Result<OptimalPath> {
    let source = NodeId::new(config.source_node_index);
    let target = NodeId::new(config.target_node_index);

    rough_search_advisory(intermediates, scores, config, source, target);

    let graph = build_full_graph(intermediates, scores, config.min_score_threshold);
    let max_intermediate_nodes = config.max_optimal_path_length.saturating_sub(1);

    let mut best: Option<(f64, Vec<NodeId>)> = None;
    for path in petgraph::algo::all_simple_paths::<Vec<NodeId>, _>(
        &graph,
        source,
        target,
        0,
        Some(max_intermediate_nodes),
    ) {
        let sum_reciprocal = reciprocal_sum(&graph, &path);
        let better = match &best {
            None => true,
            Some((best_sum, _)) => sum_reciprocal < *best_sum,
        };
        if better {
            best = Some((sum_reciprocal, path));
        }
    }

    let (_, nodes) = best.ok_or(PairMapError::NoPathFound {
        source: config.source_node_index,
        target: config.target_node_index,
        max_length: config.max_optimal_path_length,
    })?;

    if config.verbose {
        log::debug!("found path: {:?}", nodes);
    }

    Ok(OptimalPath { nodes })
}

fn reciprocal_sum(graph: &PairGraph, path: &[NodeId]) -> f64 {
    path.windows(2)
        .map(|pair| {
            let edge = graph.find_edge(pair[0], pair[1]).expect("path edge must exist");
            1.0 / graph.edge_weight(edge).expect("edge must carry data").score
        })
        .sum()
}
