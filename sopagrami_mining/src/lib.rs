//! Frequent-subgraph mining in a single large graph.
//!
//! [`run_sopagrami`] enumerates every connected pattern whose minimum
//! image-based (MNI) support reaches `tau`. Patterns grow one edge at a time
//! along canonical DFS codes; each candidate's support is decided by a
//! constraint search over per-vertex image sets, and the growth is spread
//! over a fixed pool of worker threads.

pub mod candidates;
pub mod embedding;
mod error;
pub mod pattern;
mod results;
pub mod scheduler;
mod stats;
pub mod support;

pub use candidates::{Candidate, Seed};
pub use error::MiningError;
pub use pattern::{CanonicalKey, Pattern, PatternEdge};
pub use results::{FrequentPattern, MiningOutput, ResultCollector};
pub use scheduler::AbortHandle;
pub use stats::{MiningStats, MiningStatsSnapshot};
pub use support::Support;

use sopagrami_common::Params;
use sopagrami_graph::{DataGraph, MiningView};

/// Mines every frequent pattern of `graph`.
///
/// Mining is directed only if both `params.directed` and the graph are
/// directed. The returned patterns are ordered by `(edge count, key)`.
///
/// # Errors
///
/// Returns [`MiningError::InvalidParams`] before any work if `params` are
/// invalid, [`MiningError::ThreadPool`] if the workers cannot start and
/// [`MiningError::WorkerFailed`] if a worker panics.
pub fn run_sopagrami(graph: &DataGraph, params: &Params) -> Result<MiningOutput, MiningError> {
    run_sopagrami_with_abort(graph, params, &AbortHandle::new())
}

/// Like [`run_sopagrami`], but stops early when `abort` is triggered.
///
/// # Errors
///
/// Additionally returns [`MiningError::Aborted`] if the run was cancelled.
pub fn run_sopagrami_with_abort(
    graph: &DataGraph,
    params: &Params,
    abort: &AbortHandle,
) -> Result<MiningOutput, MiningError> {
    params.validate()?;
    if abort.is_aborted() {
        return Err(MiningError::Aborted);
    }

    let start = std::time::Instant::now();
    let view = MiningView::new(graph, params.directed);
    tracing::info!(
        "mining |V|={} |E|={} tau={} directed={} sorted_seeds={} threads={} full_support={}",
        graph.num_vertices(),
        graph.num_edges(),
        params.tau,
        view.is_directed(),
        params.sorted_seeds,
        params.num_threads,
        params.compute_full_support
    );

    let stats = MiningStats::new();
    let seeds = candidates::seeds(&view, params);
    let frequent_patterns = scheduler::run(&view, params, seeds, &stats, abort)?;
    let stats = stats.snapshot();

    tracing::info!(
        "found {} frequent patterns in {:?} ({} evaluated)",
        frequent_patterns.len(),
        start.elapsed(),
        stats.patterns_evaluated
    );

    Ok(MiningOutput {
        frequent_patterns,
        stats,
    })
}
