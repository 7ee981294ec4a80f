#![allow(dead_code)]

//! Shared helpers for the mining integration tests: fixture loading and an
//! exhaustive MNI reference that enumerates every embedding.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use sopagrami_common::{Fixture, Params};
use sopagrami_graph::{DataGraph, EdgeDir, Label, MiningView, VertexId};
use sopagrami_mining::{CanonicalKey, MiningOutput, Pattern, PatternEdge, run_sopagrami};

pub fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    let _ = INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn load(fixture: &Fixture) -> DataGraph {
    DataGraph::from_lg_str(fixture.source, fixture.directed)
        .unwrap_or_else(|e| panic!("fixture {} does not parse: {e}", fixture.name))
}

pub fn mine(graph: &DataGraph, params: &Params) -> MiningOutput {
    run_sopagrami(graph, params).unwrap_or_else(|e| panic!("mining failed: {e}"))
}

/// Frequent patterns of a run as `key -> support`.
pub fn supports(output: &MiningOutput) -> BTreeMap<CanonicalKey, usize> {
    output
        .frequent_patterns
        .iter()
        .map(|p| (p.key.clone(), p.support))
        .collect()
}

/// Host connections as seen by the mining mode: `(u, v, label)` with
/// `u -> v` when directed, `u < v` otherwise.
pub fn connections(view: &MiningView<'_>) -> Vec<(VertexId, VertexId, Label)> {
    let dir = if view.is_directed() {
        EdgeDir::Forward
    } else {
        EdgeDir::Undirected
    };
    let mut edges = BTreeSet::new();
    for u in 0..view.num_vertices() as VertexId {
        for n in view.neighbors(u, dir) {
            if view.is_directed() || u < n.vertex {
                edges.insert((u, n.vertex, n.label));
            }
        }
    }
    edges.into_iter().collect()
}

/// The pattern spelled by a set of host connections.
pub fn pattern_of(view: &MiningView<'_>, edges: &[(VertexId, VertexId, Label)]) -> Pattern {
    let dir = if view.is_directed() {
        EdgeDir::Forward
    } else {
        EdgeDir::Undirected
    };
    let mut index: BTreeMap<VertexId, usize> = BTreeMap::new();
    let mut vlab = Vec::new();
    let mut slot = |v: VertexId| {
        *index.entry(v).or_insert_with(|| {
            vlab.push(view.label(v));
            vlab.len() - 1
        })
    };
    let pedges: Vec<PatternEdge> = edges
        .iter()
        .map(|&(u, v, label)| PatternEdge {
            a: slot(u),
            b: slot(v),
            label,
            dir,
        })
        .collect();
    Pattern::new(vlab, pedges)
}

fn is_connected(edges: &[(VertexId, VertexId, Label)]) -> bool {
    let Some(&(start, _, _)) = edges.first() else {
        return false;
    };
    let mut reached = BTreeSet::from([start]);
    loop {
        let before = reached.len();
        for &(u, v, _) in edges {
            if reached.contains(&u) || reached.contains(&v) {
                reached.insert(u);
                reached.insert(v);
            }
        }
        if reached.len() == before {
            break;
        }
    }
    edges
        .iter()
        .all(|(u, v, _)| reached.contains(u) && reached.contains(v))
}

/// Every connected, non-empty subset of `edges` with at most `max_edges` members.
pub fn connected_subsets(
    edges: &[(VertexId, VertexId, Label)],
    max_edges: usize,
) -> Vec<Vec<(VertexId, VertexId, Label)>> {
    assert!(edges.len() <= 16, "too many host edges for exhaustive enumeration");
    (1u32..(1 << edges.len()))
        .filter(|mask| mask.count_ones() as usize <= max_edges)
        .map(|mask| {
            edges
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, &e)| e)
                .collect::<Vec<_>>()
        })
        .filter(|subset| is_connected(subset))
        .collect()
}

fn extend(
    view: &MiningView<'_>,
    pattern: &Pattern,
    assignment: &mut Vec<VertexId>,
    images: &mut [BTreeSet<VertexId>],
) {
    let i = assignment.len();
    if i == pattern.num_vertices() {
        for (v, &x) in assignment.iter().enumerate() {
            images[v].insert(x);
        }
        return;
    }
    for &x in view.candidates(pattern.vlab[i]) {
        if assignment.contains(&x) {
            continue;
        }
        let consistent = pattern.pedges.iter().all(|e| {
            if e.a == i && e.b < i {
                view.has_edge(x, assignment[e.b], e.label, e.dir)
            } else if e.b == i && e.a < i {
                view.has_edge(assignment[e.a], x, e.label, e.dir)
            } else {
                true
            }
        });
        if consistent {
            assignment.push(x);
            extend(view, pattern, assignment, images);
            assignment.pop();
        }
    }
}

/// MNI support by enumerating every embedding.
pub fn brute_force_mni(view: &MiningView<'_>, pattern: &Pattern) -> usize {
    let mut images = vec![BTreeSet::new(); pattern.num_vertices()];
    extend(view, pattern, &mut Vec::new(), &mut images);
    images.iter().map(BTreeSet::len).min().unwrap_or(0)
}

/// Every pattern of at most `max_edges` edges with MNI support >= `tau`.
pub fn brute_force_frequent(
    view: &MiningView<'_>,
    tau: usize,
    max_edges: usize,
) -> BTreeMap<CanonicalKey, usize> {
    let mut all: BTreeMap<CanonicalKey, usize> = BTreeMap::new();
    for subset in connected_subsets(&connections(view), max_edges) {
        let pattern = pattern_of(view, &subset);
        all.entry(pattern.key())
            .or_insert_with(|| brute_force_mni(view, &pattern));
    }
    all.retain(|_, support| *support >= tau);
    all
}

/// Connected patterns obtained by deleting one edge (and a vertex left isolated).
pub fn one_edge_smaller(pattern: &Pattern) -> Vec<Pattern> {
    if pattern.num_edges() < 2 {
        return Vec::new();
    }
    let mut result = Vec::new();
    for skip in 0..pattern.num_edges() {
        let rest: Vec<PatternEdge> = pattern
            .pedges
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != skip)
            .map(|(_, &e)| e)
            .collect();
        let kept: Vec<usize> = (0..pattern.num_vertices())
            .filter(|&v| rest.iter().any(|e| e.a == v || e.b == v))
            .collect();
        let renumber = |v: usize| kept.iter().position(|&k| k == v).unwrap();
        let smaller = Pattern::new(
            kept.iter().map(|&v| pattern.vlab[v]).collect(),
            rest.iter()
                .map(|e| PatternEdge {
                    a: renumber(e.a),
                    b: renumber(e.b),
                    ..*e
                })
                .collect(),
        );
        if smaller.is_connected() {
            result.push(smaller);
        }
    }
    result
}
