//! Seed patterns and rightmost-path extensions.
//!
//! Candidates are generated from the edge-type index of the [`MiningView`]
//! alone. Only canonical codes are emitted, so every pattern class is
//! produced along exactly one growth path.

use itertools::Itertools;
use sopagrami_common::Params;
use sopagrami_graph::{EdgeType, Label, MiningView};

use crate::pattern::{CanonicalKey, DfsCode, DfsEdge, Pattern, is_canonical};

/// A canonical DFS code together with its key and pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Minimal DFS code.
    pub code: DfsCode,
    /// Encoding of `code`.
    pub key: CanonicalKey,
    /// Pattern spelled by `code`.
    pub pattern: Pattern,
}

impl Candidate {
    /// Wraps a code that is known to be canonical.
    #[must_use]
    pub fn from_canonical(code: DfsCode) -> Self {
        debug_assert!(is_canonical(&code));
        let key = CanonicalKey::from_code(&code);
        let pattern = code.to_pattern();
        Self { code, key, pattern }
    }

    /// Number of pattern edges.
    #[must_use]
    pub const fn num_edges(&self) -> usize {
        self.code.len()
    }
}

/// A single-edge candidate with its support estimate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    /// The single-edge pattern.
    pub candidate: Candidate,
    /// `min(distinct sources, distinct targets)` over the matching host edges.
    pub upper_bound: usize,
}

const fn viable(edge_type: &EdgeType, tau: usize) -> bool {
    edge_type.mni_upper_bound() >= tau
}

/// One seed per distinct `(source label, edge label, direction, target label)`
/// that can still reach `tau`.
///
/// With `sorted_seeds` the seeds are ordered by ascending upper bound, ties
/// by key. Otherwise they are in key order.
#[must_use]
pub fn seeds(view: &MiningView<'_>, params: &Params) -> Vec<Seed> {
    let tau = params.threshold();
    let mut skipped = 0usize;
    let mut seeds = Vec::new();

    for label in (0..view.num_vertex_labels()).filter_map(|l| Label::try_from(l).ok()) {
        for edge_type in view.edge_types(label) {
            let code = DfsCode::single(
                label,
                edge_type.edge_label,
                edge_type.dir,
                edge_type.other_label,
            );
            // Each undirected pair is indexed from both ends; keep the minimal one.
            if !is_canonical(&code) {
                continue;
            }
            if !viable(edge_type, tau) {
                skipped += 1;
                continue;
            }
            seeds.push(Seed {
                candidate: Candidate::from_canonical(code),
                upper_bound: edge_type.mni_upper_bound(),
            });
        }
    }

    if params.sorted_seeds {
        seeds.sort_by(|a, b| {
            a.upper_bound
                .cmp(&b.upper_bound)
                .then_with(|| a.candidate.key.cmp(&b.candidate.key))
        });
    } else {
        seeds.sort_by(|a, b| a.candidate.key.cmp(&b.candidate.key));
    }

    tracing::debug!(
        "generated {} seeds ({} below the support bound)",
        seeds.len(),
        skipped
    );
    seeds
}

/// All canonical single-edge rightmost-path extensions of a canonical code.
///
/// Target labels with fewer than `tau` vertices and edge types whose
/// single-edge support bound is below `tau` are skipped, as are edges already
/// present in the pattern.
#[must_use]
pub fn extensions(view: &MiningView<'_>, params: &Params, code: &DfsCode) -> Vec<Candidate> {
    if code.is_empty() || !params.allows_extension(code.len()) {
        return Vec::new();
    }

    let tau = params.threshold();
    let labels = code.vertex_labels();
    let rightmost_path = code.rightmost_path();
    let rightmost = rightmost_path[0];
    let next = labels.len();
    let mut edges: Vec<DfsEdge> = Vec::new();

    for &to in &rightmost_path[1..] {
        for edge_type in view
            .edge_types(labels[rightmost])
            .iter()
            .filter(|t| t.other_label == labels[to] && viable(t, tau))
        {
            let edge = DfsEdge {
                from: rightmost,
                to,
                from_label: labels[rightmost],
                edge_label: edge_type.edge_label,
                dir: edge_type.dir,
                to_label: labels[to],
            };
            if !code.contains_connection(&edge) {
                edges.push(edge);
            }
        }
    }

    for &from in &rightmost_path {
        for edge_type in view
            .edge_types(labels[from])
            .iter()
            .filter(|t| view.label_frequency(t.other_label) >= tau && viable(t, tau))
        {
            edges.push(DfsEdge {
                from,
                to: next,
                from_label: labels[from],
                edge_label: edge_type.edge_label,
                dir: edge_type.dir,
                to_label: edge_type.other_label,
            });
        }
    }

    let proposed = edges.len();
    let children: Vec<Candidate> = edges
        .into_iter()
        .map(|edge| code.extended(edge))
        .filter(is_canonical)
        .map(Candidate::from_canonical)
        .unique_by(|candidate| candidate.key.clone())
        .collect();

    tracing::trace!(
        "{} extensions proposed, {} canonical",
        proposed,
        children.len()
    );
    children
}

#[cfg(test)]
mod tests {
    use super::*;
    use sopagrami_common::{CHAIN_ABC, CYCLE_ABAB, STAR_XYYY};
    use sopagrami_graph::DataGraph;

    fn graph(source: &str, directed: bool) -> DataGraph {
        DataGraph::from_lg_str(source, directed).unwrap()
    }

    #[test]
    fn test_undirected_seed_emitted_once() {
        let g = graph(CYCLE_ABAB.source, false);
        let view = MiningView::new(&g, false);
        let seeds = seeds(&view, &Params::builder().tau(1).build());
        assert_eq!(seeds.len(), 1);
        assert_eq!(seeds[0].upper_bound, 2);
    }

    #[test]
    fn test_seeds_below_bound_dropped() {
        let g = graph(STAR_XYYY.source, false);
        let view = MiningView::new(&g, false);
        assert_eq!(seeds(&view, &Params::builder().tau(1).build()).len(), 1);
        assert!(seeds(&view, &Params::builder().tau(2).build()).is_empty());
    }

    #[test]
    fn test_directed_chain_seeds_sorted() {
        let g = graph(CHAIN_ABC.source, true);
        let view = MiningView::new(&g, true);
        let sorted = seeds(&view, &Params::builder().tau(1).directed(true).build());
        let unsorted = seeds(
            &view,
            &Params::builder().tau(1).directed(true).sorted_seeds(false).build(),
        );
        assert_eq!(sorted.len(), 2);
        let keys = |s: &[Seed]| s.iter().map(|s| s.candidate.key.clone()).collect::<Vec<_>>();
        // Equal bounds, so both orders fall back to the key.
        assert_eq!(keys(&sorted), keys(&unsorted));
    }

    #[test]
    fn test_extensions_of_cycle_edge() {
        let g = graph(CYCLE_ABAB.source, false);
        let view = MiningView::new(&g, false);
        let params = Params::builder().tau(2).build();
        let seed = seeds(&view, &params).remove(0);
        let children = extensions(&view, &params, &seed.candidate.code);
        // A-B-A and B-A-B
        assert_eq!(children.len(), 2);
        assert!(children.iter().all(|c| c.num_edges() == 2));

        let bounded = Params::builder().tau(2).max_edges(Some(1)).build();
        assert!(extensions(&view, &bounded, &seed.candidate.code).is_empty());
    }
}
