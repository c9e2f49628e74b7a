use thiserror::Error;

/// Which reduction primitive observed a found-path node missing from its output.
///
/// [`InvalidGraphStage::InitialReduction`] is the one variant a caller can legitimately hit: the
/// pruner's initial reachable → cycle → main reduction (`build_pruned_graph`) maps any dropped
/// found-path node there, collapsing whichever of the three primitives actually failed into one
/// reported stage, matching SPEC_FULL §4.4's `InvalidInitialGraph`. The other three variants
/// name a reduction primitive called *after* that point, once the pruner already holds a subgraph
/// it forces found-path nodes into before testing it — they should never be reachable in a
/// correct build, and are still propagated as errors rather than asserted away, per the
/// no-exceptions-for-control-flow design.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidGraphStage {
    /// The initial graph did not survive the first reachable → cycle → main reduction.
    #[error("initial reduction")]
    InitialReduction,
    /// [`crate::graph::reachable_subgraph`] dropped a found-path node.
    #[error("reachable subgraph")]
    Reachable,
    /// [`crate::graph::cycle_subgraph`] dropped a found-path node.
    #[error("cycle subgraph")]
    Cycle,
    /// [`crate::graph::main_subgraph`] could not find a component containing every found-path node.
    #[error("main subgraph")]
    Main,
}

/// Errors surfaced by [`crate::build_map`].
///
/// All variants are fatal for the call that produced them; there is no retry policy. See the
/// module-level error handling design for the rationale behind each variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PairMapError {
    /// A `custom_score_matrix` was supplied whose shape does not match the intermediate list.
    #[error(
        "custom score matrix shape mismatch: expected {expected}x{expected}, found {found_rows}x{found_cols}"
    )]
    CustomMatrixShapeMismatch {
        expected: usize,
        found_rows: usize,
        found_cols: usize,
    },
    /// No source→target simple path of at most `max_length` edges exists at `minScoreThreshold`.
    #[error(
        "no path found from node {source} to node {target} within {max_length} edges at the minimum score threshold"
    )]
    NoPathFound {
        source: usize,
        target: usize,
        max_length: usize,
    },
    /// A reduction primitive dropped a found-path node; see [`InvalidGraphStage`].
    #[error("invalid graph after {0}: a found-path node was dropped")]
    InvalidGraph(InvalidGraphStage),
}

pub type Result<T> = std::result::Result<T, PairMapError>;
