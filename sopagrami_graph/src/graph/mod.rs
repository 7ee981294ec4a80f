//! The immutable host graph.
//!
//! Provides label lookups and per-vertex neighbor lists for directed and
//! undirected graphs.

mod connectivity;
mod label_registry;

use std::path::Path;

use connectivity::Connectivity;
pub(crate) use label_registry::LabelRegistry;

use crate::error::GraphError;
use crate::labels::{Label, LabelTable, VertexId};

/// One entry of a neighbor list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Neighbor {
    /// Adjacent vertex.
    pub vertex: VertexId,
    /// Label of the connecting edge.
    pub label: Label,
}

/// Which neighbor list to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Targets of edges leaving the vertex.
    Out,
    /// Sources of edges entering the vertex.
    In,
    /// Neighbors regardless of edge direction.
    Any,
}

/// A labeled host graph with dense vertex ids `0..n`.
///
/// On an undirected graph every [`Direction`] yields the same symmetric list.
#[derive(Clone, Debug)]
pub struct DataGraph {
    directed: bool,
    registry: LabelRegistry,
    edge_labels: LabelTable,
    connectivity: Connectivity,
    num_edges: usize,
}

impl DataGraph {
    /// Assembles a graph from validated parts. `edges` must be free of
    /// self-loops and duplicates.
    pub(crate) fn from_parts(
        directed: bool,
        registry: LabelRegistry,
        edge_labels: LabelTable,
        edges: &[(VertexId, VertexId, Label)],
    ) -> Self {
        let connectivity = Connectivity::build(registry.len(), edges, directed);
        Self {
            directed,
            registry,
            edge_labels,
            connectivity,
            num_edges: edges.len(),
        }
    }

    /// Loads a graph from a `.lg` file.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Io`] if the file cannot be read and a format
    /// error if its content is malformed.
    pub fn load_from_lg(path: impl AsRef<Path>, directed: bool) -> Result<Self, GraphError> {
        let path = path.as_ref();
        let start = std::time::Instant::now();
        let text = std::fs::read_to_string(path).map_err(|source| GraphError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let graph = Self::from_lg_str(&text, directed)?;
        tracing::info!(
            "loaded {} in {:?}: |V|={} |E|={} directed={}",
            path.display(),
            start.elapsed(),
            graph.num_vertices(),
            graph.num_edges(),
            directed
        );
        Ok(graph)
    }

    /// Parses a graph from `.lg` text.
    ///
    /// # Errors
    ///
    /// Returns a format error describing the first malformed record.
    pub fn from_lg_str(text: &str, directed: bool) -> Result<Self, GraphError> {
        crate::lg::parse(text, directed)?.build()
    }

    /// Whether edges carry a direction.
    #[must_use]
    pub const fn is_directed(&self) -> bool {
        self.directed
    }

    /// Number of vertices.
    #[must_use]
    pub const fn num_vertices(&self) -> usize {
        self.registry.len()
    }

    /// Number of distinct edges after self-loop removal and deduplication.
    #[must_use]
    pub const fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Label of vertex `v`.
    ///
    /// # Panics
    ///
    /// Panics if `v` is not a vertex of the graph.
    #[must_use]
    pub fn label(&self, v: VertexId) -> Label {
        self.registry.label(v)
    }

    /// Labels of all vertices, indexed by vertex id.
    #[must_use]
    pub fn vlabels(&self) -> &[Label] {
        self.registry.vlabels()
    }

    /// Vertices carrying `label`, ascending.
    #[must_use]
    pub fn vertices_with_label(&self, label: Label) -> &[VertexId] {
        self.registry.vertices_with_label(label)
    }

    /// Neighbor list of `v`, sorted by `(vertex, label)`.
    #[must_use]
    pub fn neighbors(&self, v: VertexId, direction: Direction) -> &[Neighbor] {
        match direction {
            Direction::Out => self.connectivity.out(v),
            Direction::In => self.connectivity.inc(v),
            Direction::Any => self.connectivity.any(v),
        }
    }

    /// Size of a neighbor list of `v`.
    #[must_use]
    pub fn degree(&self, v: VertexId, direction: Direction) -> usize {
        self.neighbors(v, direction).len()
    }

    /// Returns true if an edge `u -> v` (or `u - v` when undirected) labeled
    /// `label` exists.
    #[must_use]
    pub fn has_edge(&self, u: VertexId, v: VertexId, label: Label) -> bool {
        self.neighbors(u, Direction::Out)
            .binary_search(&Neighbor { vertex: v, label })
            .is_ok()
    }

    /// Interned vertex labels.
    #[must_use]
    pub const fn vertex_labels(&self) -> &LabelTable {
        self.registry.table()
    }

    /// Interned edge labels.
    #[must_use]
    pub const fn edge_labels(&self) -> &LabelTable {
        &self.edge_labels
    }

    /// Number of distinct vertex labels.
    #[must_use]
    pub fn num_vertex_labels(&self) -> usize {
        self.registry.table().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::NO_LABEL;

    #[test]
    fn test_directed_lists() {
        let graph = DataGraph::from_lg_str("v 0 A\nv 1 B\nv 2 B\ne 0 1\ne 2 0\n", true).unwrap();
        assert!(graph.is_directed());
        assert_eq!(graph.num_edges(), 2);
        let out: Vec<VertexId> = graph.neighbors(0, Direction::Out).iter().map(|n| n.vertex).collect();
        let inc: Vec<VertexId> = graph.neighbors(0, Direction::In).iter().map(|n| n.vertex).collect();
        let any: Vec<VertexId> = graph.neighbors(0, Direction::Any).iter().map(|n| n.vertex).collect();
        assert_eq!(out, vec![1]);
        assert_eq!(inc, vec![2]);
        assert_eq!(any, vec![1, 2]);
        assert!(graph.has_edge(0, 1, NO_LABEL));
        assert!(!graph.has_edge(1, 0, NO_LABEL));
        assert_eq!(graph.degree(0, Direction::Any), 2);
    }

    #[test]
    fn test_undirected_lists_are_symmetric() {
        let graph = DataGraph::from_lg_str("v 0 A\nv 1 B\ne 0 1 x\n", false).unwrap();
        assert!(!graph.is_directed());
        let x = graph.edge_labels().id("x").unwrap();
        assert!(graph.has_edge(0, 1, x));
        assert!(graph.has_edge(1, 0, x));
        assert_eq!(graph.neighbors(1, Direction::Out), graph.neighbors(1, Direction::In));
    }

    #[test]
    fn test_label_index() {
        let graph = DataGraph::from_lg_str("v 2 B\nv 0 A\nv 1 B\n", false).unwrap();
        let a = graph.vertex_labels().id("A").unwrap();
        let b = graph.vertex_labels().id("B").unwrap();
        assert_eq!(graph.vertices_with_label(a), &[0]);
        assert_eq!(graph.vertices_with_label(b), &[1, 2]);
        assert_eq!(graph.vlabels(), &[a, b, b]);
        assert_eq!(graph.num_vertex_labels(), 2);
        assert!(graph.vertices_with_label(7).is_empty());
    }
}
