//! Builds a "pairmap": an undirected graph over a set of chemical intermediates in which edges
//! connect pairs judged similar enough to be usefully compared side-by-side, while the overall
//! graph stays small, connected, and structured for downstream analysis.
//!
//! Given a pairwise similarity score for every pair of intermediates, a distinguished source and
//! target, and a collection of structural constraints, [`build_map`] chooses a subset of edges
//! that contains a chosen "optimal" source-target path, preserves certain cycle coverings around
//! that path, and is minimal with respect to removable low-score edges.
//!
//! Computing the pairwise similarity score itself is out of scope: callers either supply a
//! precomputed [`ScoreMatrix`] via [`PairMapConfig::custom_score_matrix`] or implement
//! [`ScoreProvider`].

mod config;
mod cycles;
mod error;
mod graph;
mod intermediate;
mod invariants;
mod optimal_path;
mod pruner;
mod score;

pub use config::PairMapConfig;
pub use error::{InvalidGraphStage, PairMapError, Result};
pub use graph::{EdgeData, EdgeId, NodeData, NodeId, PairGraph};
pub use intermediate::Intermediate;
pub use optimal_path::OptimalPath;
pub use score::{ScoreMatrix, ScoreProvider};

use graph::build_full_graph;
use invariants::found_links;
use optimal_path::find_optimal_path;
use pruner::build_pruned_graph;

/// Builds a pairmap over `intermediates` under `config`.
///
/// Acquires the score matrix (either `config.custom_score_matrix` or `provider`), selects the
/// optimal source-target path, and — unless `config.optimal_path_mode` is set — runs the chunked
/// pruner down to the minimal constraint-preserving graph.
pub fn build_map(
    intermediates: &[Intermediate],
    provider: &dyn ScoreProvider,
    config: &PairMapConfig,
) -> Result<PairGraph> {
    let scores = acquire_scores(intermediates, provider, config)?;
    let optimal = find_optimal_path(intermediates, &scores, config)?;

    if config.optimal_path_mode {
        return Ok(found_path_graph(intermediates, &scores, &optimal));
    }

    build_pruned_graph(intermediates, &scores, config, &optimal)
}

fn acquire_scores(
    intermediates: &[Intermediate],
    provider: &dyn ScoreProvider,
    config: &PairMapConfig,
) -> Result<ScoreMatrix> {
    match &config.custom_score_matrix {
        Some(rows) => ScoreMatrix::from_rows(rows.clone(), intermediates.len()),
        None => ScoreMatrix::from_rows(
            provider.score_matrix(intermediates, config.jobs),
            intermediates.len(),
        ),
    }
}

/// The subgraph containing only the found path's nodes and links, each edge's `found_path` flag
/// set to `true`.
fn found_path_graph(
    intermediates: &[Intermediate],
    scores: &ScoreMatrix,
    optimal: &OptimalPath,
) -> PairGraph {
    let full = build_full_graph(intermediates, scores, f64::MIN);
    let links = found_links(&optimal.nodes);
    let mut path_graph: PairGraph = petgraph::stable_graph::StableGraph::default();
    let mut remapped = std::collections::HashMap::new();
    for &node in &optimal.nodes {
        let data = full.node_weight(node).expect("found-path node must exist").clone();
        remapped.insert(node, path_graph.add_node(data));
    }
    for (u, v) in links {
        let data = full
            .edge_weight(full.find_edge(u, v).expect("found-path link must exist"))
            .copied()
            .expect("found-path edge must carry data");
        path_graph.add_edge(remapped[&u], remapped[&v], EdgeData { found_path: true, ..data });
    }
    path_graph
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedScores(Vec<Vec<f64>>);

    impl ScoreProvider for FixedScores {
        fn score_matrix(&self, _intermediates: &[Intermediate], _jobs: usize) -> Vec<Vec<f64>> {
            self.0.clone()
        }
    }

    fn anon(n: usize) -> Vec<Intermediate> {
        (0..n).map(|_| Intermediate::anonymous()).collect()
    }

    #[test]
    fn optimal_path_mode_returns_only_the_found_path() {
        let scores = FixedScores(vec![
            vec![1.0, 0.9, 0.9],
            vec![0.9, 1.0, 0.3],
            vec![0.9, 0.3, 1.0],
        ]);
        let config = PairMapConfig {
            optimal_path_mode: true,
            source_node_index: 0,
            target_node_index: 2,
            max_optimal_path_length: 2,
            ..Default::default()
        };
        let graph = build_map(&anon(3), &scores, &config).unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn pruned_graph_keeps_the_found_path_and_respects_the_score_floor() {
        let scores = FixedScores(vec![
            vec![1.0, 0.95, 0.5, 0.2],
            vec![0.95, 1.0, 0.2, 0.9],
            vec![0.5, 0.2, 1.0, 0.5],
            vec![0.2, 0.9, 0.5, 1.0],
        ]);
        let config = PairMapConfig {
            source_node_index: 0,
            target_node_index: 3,
            max_path_length: 3,
            max_optimal_path_length: 3,
            cycle_length: 3,
            ..Default::default()
        };
        let graph = build_map(&anon(4), &scores, &config).unwrap();
        let found = graph
            .find_edge(NodeId::new(0), NodeId::new(1))
            .expect("the found path's first link must survive pruning");
        assert!(graph.edge_weight(found).unwrap().found_path);
        let found = graph
            .find_edge(NodeId::new(1), NodeId::new(3))
            .expect("the found path's second link must survive pruning");
        assert!(graph.edge_weight(found).unwrap().found_path);
        for edge in graph.edge_weights() {
            assert!(edge.score >= config.min_score_threshold);
        }
    }

    #[test]
    fn custom_score_matrix_shape_mismatch_is_rejected() {
        let scores = FixedScores(vec![vec![1.0, 0.5], vec![0.5, 1.0]]);
        let config = PairMapConfig {
            custom_score_matrix: Some(vec![vec![1.0, 0.5], vec![0.5, 1.0], vec![0.1, 0.1]]),
            ..Default::default()
        };
        let err = build_map(&anon(2), &scores, &config).unwrap_err();
        assert!(matches!(err, PairMapError::CustomMatrixShapeMismatch { .. }));
    }
}
