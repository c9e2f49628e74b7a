//! The chunked pruner: the central algorithm. Removes edges in ascending score order, in
//! geometrically shrinking chunks, attempting bulk removal and recursively splitting on
//! failure, while keeping one mutable "current subgraph" as the source of truth.

use std::collections::HashSet;

use petgraph::visit::EdgeRef;

use crate::config::PairMapConfig;
use crate::error::{InvalidGraphStage, PairMapError, Result};
use crate::graph::{build_full_graph, main_subgraph, reduce, EdgeData, NodeId, PairGraph};
use crate::intermediate::Intermediate;
use crate::invariants::{found_links, ordered_link, FoundLink, InvariantSnapshot};
use crate::optimal_path::OptimalPath;
use crate::score::ScoreMatrix;

type Edge = (NodeId, NodeId, EdgeData);

struct PruneContext<'a> {
    found_path: Vec<NodeId>,
    source: NodeId,
    target: NodeId,
    config: &'a PairMapConfig,
    snapshot: InvariantSnapshot,
}

/// Runs the chunked pruner to completion and returns the final pairmap graph.
pub fn build_pruned_graph(
    intermediates: &[Intermediate],
    scores: &ScoreMatrix,
    config: &PairMapConfig,
    optimal: &OptimalPath,
) -> Result<PairGraph> {
    let source = NodeId::new(config.source_node_index);
    let target = NodeId::new(config.target_node_index);
    let found_path = optimal.nodes.clone();
    let links: HashSet<FoundLink> = found_links(&found_path).into_iter().collect();

    let mut initial = build_full_graph(intermediates, scores, config.min_score_threshold);
    mark_found_path(&mut initial, &links);

    let snapshot = InvariantSnapshot::capture(&initial, &found_path, config.cycle_length);

    let mut current = reduce(
        &initial,
        &found_path,
        source,
        target,
        config.max_path_length,
        config.cycle_length,
    )
    .map_err(|_| PairMapError::InvalidGraph(InvalidGraphStage::InitialReduction))?;

    let mut sorted_edges: Vec<Edge> = current
        .edge_references()
        .map(|e| (e.source(), e.target(), *e.weight()))
        .collect();
    sorted_edges.sort_by(|a, b| a.2.score.partial_cmp(&b.2.score).unwrap());

    let chunk_size = initial_chunk_size(sorted_edges.len(), config.chunk_scale);

    let ctx = PruneContext {
        found_path,
        source,
        target,
        config,
        snapshot,
    };

    let mut cursor = 0;
    while cursor < sorted_edges.len() {
        let mut chunk = Vec::new();
        while chunk.len() < chunk_size && cursor < sorted_edges.len() {
            let (u, v, data) = sorted_edges[cursor];
            if current.find_edge(u, v).is_some() {
                chunk.push((u, v, data));
            }
            cursor += 1;
        }
        chunk_process(&mut current, &ctx, &chunk, chunk_size)?;
    }

    final_sweep(&mut current, &ctx, &sorted_edges);

    main_subgraph(&current, &ctx.found_path)
}

fn mark_found_path(graph: &mut PairGraph, links: &HashSet<FoundLink>) {
    let edges: Vec<_> = graph.edge_indices().collect();
    for e in edges {
        let (a, b) = graph.edge_endpoints(e).expect("edge index must be live");
        if links.contains(&ordered_link(a, b)) {
            graph.edge_weight_mut(e).expect("edge must carry data").found_path = true;
        }
    }
}

/// The largest power of `chunk_scale` not exceeding `edge_count` (minimum 1).
fn initial_chunk_size(edge_count: usize, chunk_scale: usize) -> usize {
    if edge_count == 0 || chunk_scale < 2 {
        return 1;
    }
    let exponent = (edge_count as f64).ln() / (chunk_scale as f64).ln();
    (chunk_scale as f64).powi(exponent.floor() as i32).max(1.0) as usize
}

/// Attempts to remove `edges` as a single batch, splitting into geometrically smaller
/// sub-chunks on failure. Always returns `Ok(true)` once a split is attempted: the split itself
/// is treated as the "successful" structural step, per the observed (and spec-flagged) behavior
/// of the original algorithm — individual sub-chunk failures simply leave their edges intact.
fn chunk_process(
    current: &mut PairGraph,
    ctx: &PruneContext,
    edges: &[Edge],
    size: usize,
) -> Result<bool> {
    if check_chunk(current, ctx, edges)? {
        return Ok(true);
    }
    if size == 1 {
        return Ok(false);
    }

    let sub_size = (size / ctx.config.chunk_scale).max(1);
    if ctx.config.verbose {
        log::debug!(
            "split: #E={} chunk [{}..{}) -> sub-chunks of {}",
            current.edge_count(),
            0,
            edges.len(),
            sub_size
        );
    }

    let mut cursor = 0;
    while cursor < edges.len() {
        let mut sub_chunk = Vec::new();
        while sub_chunk.len() < sub_size && cursor < edges.len() {
            let (u, v, data) = edges[cursor];
            if current.find_edge(u, v).is_some() {
                sub_chunk.push((u, v, data));
            }
            cursor += 1;
        }
        let accepted = chunk_process(current, ctx, &sub_chunk, sub_size)?;
        if !accepted {
            let remaining: Vec<Edge> = edges[cursor..]
                .iter()
                .copied()
                .filter(|(u, v, _)| current.find_edge(*u, *v).is_some())
                .collect();
            if check_chunk(current, ctx, &remaining)? {
                break;
            }
        }
    }
    Ok(true)
}

/// The atomic removal test: either every edge in the chunk is removed as one batch and the
/// current subgraph is replaced by the reduced candidate, or nothing changes.
fn check_chunk(current: &mut PairGraph, ctx: &PruneContext, edges: &[Edge]) -> Result<bool> {
    let removable: Vec<bool> = edges
        .iter()
        .map(|(_, _, data)| data.score < 1.0 && !data.found_path)
        .collect();

    if !removable.iter().all(|&r| r) {
        if !removable.iter().any(|&r| r) {
            if ctx.config.verbose {
                log::debug!("skip (score=1.0 or found_path): {}", edges.len());
            }
            return Ok(true);
        }
        return Ok(false);
    }

    remove_all(current, edges);
    let candidate = reduce(
        current,
        &ctx.found_path,
        ctx.source,
        ctx.target,
        ctx.config.max_path_length,
        ctx.config.cycle_length,
    );
    let candidate = match candidate {
        Ok(g) => g,
        Err(_) => {
            reinsert_all(current, edges);
            return Ok(false);
        }
    };

    if !ctx
        .snapshot
        .check(&candidate, &ctx.found_path, ctx.config.cycle_length)
    {
        reinsert_all(current, edges);
        return Ok(false);
    }

    if ctx.config.verbose {
        log::debug!("removed: {}", edges.len());
    }
    *current = candidate;
    if ctx.config.verbose {
        log::debug!("#E={}, #N={}", current.edge_count(), current.node_count());
    }
    Ok(true)
}

fn remove_all(graph: &mut PairGraph, edges: &[Edge]) {
    for (u, v, _) in edges {
        if let Some(e) = graph.find_edge(*u, *v) {
            graph.remove_edge(e);
        }
    }
}

fn reinsert_all(graph: &mut PairGraph, edges: &[Edge]) {
    for (u, v, data) in edges {
        graph.add_edge(*u, *v, *data);
    }
}

/// One last pass over the edges the chunked phase left behind, one at a time, testing the
/// invariant covering alone (no reachable/cycle/main re-reduction).
fn final_sweep(current: &mut PairGraph, ctx: &PruneContext, sorted_edges: &[Edge]) {
    for (u, v, data) in sorted_edges {
        if data.found_path {
            continue;
        }
        let Some(edge_idx) = current.find_edge(*u, *v) else {
            continue;
        };
        current.remove_edge(edge_idx);
        let satisfied = ctx
            .snapshot
            .check(current, &ctx.found_path, ctx.config.cycle_length);
        if !satisfied {
            current.add_edge(*u, *v, *data);
        } else if ctx.config.verbose {
            log::debug!("final sweep removed ({:?}, {:?})", u, v);
        }
    }
}
