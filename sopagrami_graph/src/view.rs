//! A graph paired with the effective mining mode.
//!
//! Pattern edges are mined either undirected or directed. The view hides
//! which neighbor lists answer a query in each mode, and indexes the
//! `(edge label, direction, other label)` edge types present around every
//! vertex label. The index drives seed generation, seed ordering and
//! pattern extension.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::graph::{DataGraph, Direction, Neighbor};
use crate::labels::{Label, VertexId};

/// Orientation of a pattern edge relative to the vertex it is seen from.
///
/// The derived order (`Undirected < Forward < Backward`) is part of the
/// canonical pattern ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EdgeDir {
    /// Edge without direction (undirected mining).
    Undirected,
    /// Edge leaving the vertex.
    Forward,
    /// Edge entering the vertex.
    Backward,
}

impl EdgeDir {
    /// The same edge seen from its other endpoint.
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Undirected => Self::Undirected,
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }

    /// Short tag used in canonical keys.
    #[must_use]
    pub const fn tag(self) -> char {
        match self {
            Self::Undirected => 'u',
            Self::Forward => 'f',
            Self::Backward => 'b',
        }
    }
}

/// Edge type around vertices of one label, with the distinct endpoint counts
/// that bound its support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeType {
    /// Edge label.
    pub edge_label: Label,
    /// Direction as seen from the labeled vertex.
    pub dir: EdgeDir,
    /// Label of the vertex at the other end.
    pub other_label: Label,
    /// Distinct vertices of the indexed label with such an edge.
    pub distinct_self: usize,
    /// Distinct vertices at the other end.
    pub distinct_other: usize,
}

impl EdgeType {
    /// Upper bound on the MNI support of the single-edge pattern of this type.
    #[must_use]
    pub const fn mni_upper_bound(&self) -> usize {
        if self.distinct_self < self.distinct_other {
            self.distinct_self
        } else {
            self.distinct_other
        }
    }
}

const UNDIRECTED_DIRS: &[EdgeDir] = &[EdgeDir::Undirected];
const DIRECTED_DIRS: &[EdgeDir] = &[EdgeDir::Forward, EdgeDir::Backward];

/// A read-only view of a [`DataGraph`] in one mining mode.
#[derive(Debug, Clone)]
pub struct MiningView<'g> {
    graph: &'g DataGraph,
    directed: bool,
    /// Edge types per vertex label, sorted by `(edge label, dir, other label)`
    edge_types: Vec<Vec<EdgeType>>,
}

impl<'g> MiningView<'g> {
    /// Builds the view. Mining is directed only if it is requested and the
    /// graph itself is directed.
    #[must_use]
    pub fn new(graph: &'g DataGraph, directed_requested: bool) -> Self {
        if directed_requested && !graph.is_directed() {
            tracing::warn!("directed mining requested on an undirected graph, mining undirected");
        }
        let directed = directed_requested && graph.is_directed();
        let start = std::time::Instant::now();
        let edge_types = Self::build_edge_types(graph, directed);
        tracing::debug!(
            "edge-type index built in {:?}: {} types over {} labels",
            start.elapsed(),
            edge_types.iter().map(Vec::len).sum::<usize>(),
            edge_types.len()
        );
        Self {
            graph,
            directed,
            edge_types,
        }
    }

    fn build_edge_types(graph: &DataGraph, directed: bool) -> Vec<Vec<EdgeType>> {
        let dirs = if directed { DIRECTED_DIRS } else { UNDIRECTED_DIRS };
        let mut counts: Vec<BTreeMap<(Label, EdgeDir, Label), usize>> =
            vec![BTreeMap::new(); graph.num_vertex_labels()];

        let mut local: Vec<(Label, EdgeDir, Label)> = Vec::new();
        for (v, &label) in (0..).zip(graph.vlabels()) {
            local.clear();
            for &dir in dirs {
                for n in Self::lookup(graph, directed, v, dir) {
                    local.push((n.label, dir, graph.label(n.vertex)));
                }
            }
            local.sort_unstable();
            local.dedup();
            let Some(per_label) = counts.get_mut(label as usize) else {
                continue;
            };
            for &key in &local {
                *per_label.entry(key).or_insert(0) += 1;
            }
        }

        // The distinct vertices at the other end of (L, el, d, M) are the
        // vertices of M that own the reversed type (M, el, d', L).
        let distinct_self = |label: Label, key: (Label, EdgeDir, Label)| -> usize {
            counts
                .get(label as usize)
                .and_then(|per_label| per_label.get(&key))
                .copied()
                .unwrap_or(0)
        };

        counts
            .iter()
            .zip(0..)
            .map(|(per_label, label): (_, Label)| {
                per_label
                    .iter()
                    .map(|(&(edge_label, dir, other_label), &distinct)| EdgeType {
                        edge_label,
                        dir,
                        other_label,
                        distinct_self: distinct,
                        distinct_other: distinct_self(
                            other_label,
                            (edge_label, dir.reverse(), label),
                        ),
                    })
                    .collect()
            })
            .collect()
    }

    fn lookup(graph: &DataGraph, directed: bool, v: VertexId, dir: EdgeDir) -> &[Neighbor] {
        let direction = match (directed, dir) {
            (true, EdgeDir::Forward) => Direction::Out,
            (true, EdgeDir::Backward) => Direction::In,
            _ => Direction::Any,
        };
        graph.neighbors(v, direction)
    }

    /// Underlying graph.
    #[must_use]
    pub const fn graph(&self) -> &'g DataGraph {
        self.graph
    }

    /// Effective mining mode.
    #[must_use]
    pub const fn is_directed(&self) -> bool {
        self.directed
    }

    /// Neighbors of `v` along `dir`, sorted by `(vertex, label)`.
    #[must_use]
    pub fn neighbors(&self, v: VertexId, dir: EdgeDir) -> &'g [Neighbor] {
        Self::lookup(self.graph, self.directed, v, dir)
    }

    /// Returns true if `v` is reached from `u` along `dir` by an edge labeled `label`.
    #[must_use]
    pub fn has_edge(&self, u: VertexId, v: VertexId, label: Label, dir: EdgeDir) -> bool {
        self.neighbors(u, dir)
            .binary_search(&Neighbor { vertex: v, label })
            .is_ok()
    }

    /// Number of neighbors of `v` along `dir` via `edge_label` carrying `other_label`.
    #[must_use]
    pub fn count_neighbors(&self, v: VertexId, edge_label: Label, dir: EdgeDir, other_label: Label) -> usize {
        self.neighbors(v, dir)
            .iter()
            .filter(|n| n.label == edge_label && self.graph.label(n.vertex) == other_label)
            .count()
    }

    /// Label of vertex `v`.
    #[must_use]
    pub fn label(&self, v: VertexId) -> Label {
        self.graph.label(v)
    }

    /// Vertices carrying `label`.
    #[must_use]
    pub fn candidates(&self, label: Label) -> &'g [VertexId] {
        self.graph.vertices_with_label(label)
    }

    /// Number of vertices carrying `label`.
    #[must_use]
    pub fn label_frequency(&self, label: Label) -> usize {
        self.candidates(label).len()
    }

    /// Number of vertices of the graph.
    #[must_use]
    pub const fn num_vertices(&self) -> usize {
        self.graph.num_vertices()
    }

    /// Number of distinct vertex labels.
    #[must_use]
    pub fn num_vertex_labels(&self) -> usize {
        self.edge_types.len()
    }

    /// Edge types around vertices of `label`.
    #[must_use]
    pub fn edge_types(&self, label: Label) -> &[EdgeType] {
        self.edge_types
            .get(label as usize)
            .map_or(&[], std::vec::Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::NO_LABEL;
    use sopagrami_common::{CHAIN_ABC, CYCLE_ABAB, NUMERIC_SMALL};

    fn load(source: &str, directed: bool) -> DataGraph {
        DataGraph::from_lg_str(source, directed).unwrap()
    }

    #[test]
    fn test_edge_types_undirected_cycle() {
        let graph = load(CYCLE_ABAB.source, false);
        let view = MiningView::new(&graph, false);
        let a = graph.vertex_labels().id("A").unwrap();
        let b = graph.vertex_labels().id("B").unwrap();
        let types = view.edge_types(a);
        assert_eq!(types.len(), 1);
        let t = types[0];
        assert_eq!((t.edge_label, t.dir, t.other_label), (NO_LABEL, EdgeDir::Undirected, b));
        assert_eq!(t.distinct_self, 2);
        assert_eq!(t.distinct_other, 2);
        assert_eq!(t.mni_upper_bound(), 2);
    }

    #[test]
    fn test_directed_view_distinguishes_direction() {
        let graph = load(CHAIN_ABC.source, true);
        let view = MiningView::new(&graph, true);
        assert!(view.is_directed());
        let b = graph.vertex_labels().id("B").unwrap();
        let dirs: Vec<EdgeDir> = view.edge_types(b).iter().map(|t| t.dir).collect();
        assert_eq!(dirs, vec![EdgeDir::Forward, EdgeDir::Backward]);
        assert!(view.has_edge(0, 1, NO_LABEL, EdgeDir::Forward));
        assert!(view.has_edge(1, 0, NO_LABEL, EdgeDir::Backward));
        assert!(!view.has_edge(1, 0, NO_LABEL, EdgeDir::Forward));
    }

    #[test]
    fn test_directed_graph_mined_undirected() {
        let graph = load(CHAIN_ABC.source, true);
        let view = MiningView::new(&graph, false);
        assert!(!view.is_directed());
        assert!(view.has_edge(1, 0, NO_LABEL, EdgeDir::Undirected));
        let b = graph.vertex_labels().id("B").unwrap();
        let dirs: Vec<EdgeDir> = view.edge_types(b).iter().map(|t| t.dir).collect();
        assert_eq!(dirs, vec![EdgeDir::Undirected, EdgeDir::Undirected]);
    }

    #[test]
    fn test_directed_request_on_undirected_graph_downgrades() {
        let graph = load(CYCLE_ABAB.source, false);
        let view = MiningView::new(&graph, true);
        assert!(!view.is_directed());
    }

    #[test]
    fn test_numeric_labels() {
        let graph = load(NUMERIC_SMALL.source, NUMERIC_SMALL.directed);
        let view = MiningView::new(&graph, false);
        let one = graph.vertex_labels().id("1").unwrap();
        let two = graph.vertex_labels().id("2").unwrap();
        let ten = graph.vertex_labels().id("10").unwrap();
        let five = graph.edge_labels().id("5").unwrap();
        let seven = graph.edge_labels().id("7").unwrap();
        assert!(one < two && two < ten);
        assert!(five < seven);
        let t = view
            .edge_types(ten)
            .iter()
            .find(|t| (t.edge_label, t.dir, t.other_label) == (seven, EdgeDir::Undirected, two))
            .unwrap();
        assert_eq!(t.distinct_self, 1);
        assert_eq!(t.distinct_other, 2);
        assert_eq!(t.mni_upper_bound(), 1);
        assert_eq!(view.count_neighbors(4, seven, EdgeDir::Undirected, two), 2);
        assert_eq!(view.label_frequency(one), 2);
    }
}
