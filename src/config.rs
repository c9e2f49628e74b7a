/// Tunables for [`crate::build_map`].
///
/// Mirrors the recognized configuration surface of the original map generator: every threshold
/// and cap is a plain field with the documented default, and validation beyond shape-checking
/// the score matrix happens inside `build_map` itself rather than here.
#[derive(Debug, Clone, PartialEq)]
pub struct PairMapConfig {
    /// If true, `build_map` returns a graph containing only the found path and stops there.
    pub optimal_path_mode: bool,
    /// Cap on simple-path enumeration in reachable-subgraph extraction.
    pub max_path_length: usize,
    /// Cap on cycle enumeration, in edges.
    pub cycle_length: usize,
    /// Cap on candidate path edges during optimal-path selection.
    pub max_optimal_path_length: usize,
    /// Cap on path length (edges) for the advisory rough search.
    pub rough_max_path_length: usize,
    /// Score threshold for the advisory rough search.
    pub rough_score_threshold: f64,
    /// Minimum rounded score for any edge to exist.
    pub min_score_threshold: f64,
    /// Geometric base for chunk sizing in the pruner.
    pub chunk_scale: usize,
    /// Index of the source intermediate.
    pub source_node_index: usize,
    /// Index of the target intermediate.
    pub target_node_index: usize,
    /// Forwarded verbatim to the score-matrix collaborator; opaque to the core.
    pub jobs: usize,
    /// If supplied, used verbatim as the score matrix instead of calling the collaborator.
    pub custom_score_matrix: Option<Vec<Vec<f64>>>,
    /// Emits `debug!`-level progress diagnostics through the `log` facade.
    pub verbose: bool,
}

impl Default for PairMapConfig {
    fn default() -> Self {
        PairMapConfig {
            optimal_path_mode: false,
            max_path_length: 4,
            cycle_length: 3,
            max_optimal_path_length: 3,
            rough_max_path_length: 2,
            rough_score_threshold: 0.5,
            min_score_threshold: 0.2,
            chunk_scale: 10,
            source_node_index: 0,
            target_node_index: 1,
            jobs: 0,
            custom_score_matrix: None,
            verbose: false,
        }
    }
}
