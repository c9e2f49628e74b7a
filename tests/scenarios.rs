//! Black-box scenario tests, one per example walked through in the design notes.

mod common;

use common::{anonymous_intermediates, FixedScores};
use pairmap::{build_map, NodeId, PairMapConfig, PairMapError};

fn matrix(rows: Vec<Vec<f64>>) -> FixedScores {
    FixedScores(rows)
}

#[test]
fn two_node_input_keeps_the_single_edge() {
    let scores = matrix(vec![vec![1.0, 0.9], vec![0.9, 1.0]]);
    let config = PairMapConfig {
        source_node_index: 0,
        target_node_index: 1,
        ..Default::default()
    };
    let graph = build_map(&anonymous_intermediates(2), &scores, &config).unwrap();

    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 1);
    let edge = graph.find_edge(NodeId::new(0), NodeId::new(1)).unwrap();
    let data = graph.edge_weight(edge).unwrap();
    assert_eq!(data.score, 0.9);
    assert!(data.found_path);
}

#[test]
fn optimal_path_mode_on_a_triangle_returns_only_the_path() {
    let scores = matrix(vec![
        vec![1.0, 0.8, 0.8],
        vec![0.8, 1.0, 0.8],
        vec![0.8, 0.8, 1.0],
    ]);
    let config = PairMapConfig {
        optimal_path_mode: true,
        source_node_index: 0,
        target_node_index: 1,
        ..Default::default()
    };
    let graph = build_map(&anonymous_intermediates(3), &scores, &config).unwrap();

    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn reciprocal_sum_prefers_the_higher_minimum_over_the_higher_mean() {
    // 0->1->3 has scores (0.9, 0.9): mean 0.9, reciprocal sum ~2.222.
    // 0->2->3 has scores (0.99, 0.5): mean 0.745 but a much lower minimum: reciprocal sum
    // 1/0.99 + 1/0.5 ~ 3.01, strictly worse despite the higher mean on one edge.
    let scores = matrix(vec![
        vec![1.0, 0.9, 0.99, 0.2],
        vec![0.9, 1.0, 0.2, 0.9],
        vec![0.99, 0.2, 1.0, 0.5],
        vec![0.2, 0.9, 0.5, 1.0],
    ]);
    let config = PairMapConfig {
        source_node_index: 0,
        target_node_index: 3,
        max_optimal_path_length: 3,
        min_score_threshold: 0.2,
        optimal_path_mode: true,
        ..Default::default()
    };
    let graph = build_map(&anonymous_intermediates(4), &scores, &config).unwrap();

    // found path is 0-1-3, not 0-2-3
    assert_eq!(graph.node_count(), 3);
    let mut labels: Vec<_> = graph.node_weights().map(|n| n.label.clone()).collect();
    labels.sort();
    assert_eq!(labels, vec!["intermediate-0000", "intermediate-0001", "intermediate-0003"]);
}

#[test]
fn no_path_found_is_reported_verbatim() {
    let scores = matrix(vec![
        vec![1.0, 0.1, 0.1],
        vec![0.1, 1.0, 0.1],
        vec![0.1, 0.1, 1.0],
    ]);
    let config = PairMapConfig {
        source_node_index: 0,
        target_node_index: 1,
        min_score_threshold: 0.2,
        ..Default::default()
    };
    let err = build_map(&anonymous_intermediates(3), &scores, &config).unwrap_err();
    assert_eq!(
        err,
        PairMapError::NoPathFound {
            source: 0,
            target: 1,
            max_length: config.max_optimal_path_length,
        }
    );
}

#[test]
fn a_strong_triangle_survives_pruning_of_its_weakly_attached_chords() {
    // Nodes 0 (source) and 1 (target) anchor a strongly scored 3-cycle with node 2. Nodes 3
    // and 4 are weakly attached chords that should be pruned away entirely.
    let scores = matrix(vec![
        vec![1.0, 0.9, 0.9, 0.21, 0.21],
        vec![0.9, 1.0, 0.9, 0.21, 0.21],
        vec![0.9, 0.9, 1.0, 0.21, 0.21],
        vec![0.21, 0.21, 0.21, 1.0, 0.21],
        vec![0.21, 0.21, 0.21, 0.21, 1.0],
    ]);
    let _ = env_logger::try_init();
    let config = PairMapConfig {
        source_node_index: 0,
        target_node_index: 1,
        max_path_length: 4,
        cycle_length: 3,
        max_optimal_path_length: 3,
        min_score_threshold: 0.2,
        verbose: true,
        ..Default::default()
    };
    let graph = build_map(&anonymous_intermediates(5), &scores, &config).unwrap();

    let n0 = NodeId::new(0);
    let n1 = NodeId::new(1);
    let n2 = NodeId::new(2);
    assert!(graph.find_edge(n0, n1).is_some());
    assert!(graph.find_edge(n0, n2).is_some());
    assert!(graph.find_edge(n1, n2).is_some());
    for edge in graph.edge_weights() {
        assert!(edge.score >= config.min_score_threshold);
    }
}

#[test]
fn custom_matrix_shape_mismatch_is_rejected() {
    let scores = matrix(vec![vec![1.0, 0.5], vec![0.5, 1.0]]);
    let config = PairMapConfig {
        custom_score_matrix: Some(vec![vec![1.0, 0.5], vec![0.5, 1.0], vec![0.1, 0.1]]),
        ..Default::default()
    };
    let err = build_map(&anonymous_intermediates(2), &scores, &config).unwrap_err();
    assert_eq!(
        err,
        PairMapError::CustomMatrixShapeMismatch {
            expected: 2,
            found_rows: 3,
            found_cols: 2,
        }
    );
}
