//! Incremental construction of a [`DataGraph`].

use std::collections::HashMap;

use itertools::Itertools;

use crate::error::GraphError;
use crate::graph::{DataGraph, LabelRegistry};
use crate::labels::{Label, LabelTable, MixedLabelKinds, NO_LABEL, VertexId};

#[derive(Debug, Clone)]
struct PendingEdge {
    src: VertexId,
    dst: VertexId,
    label: Option<String>,
    line: Option<usize>,
}

/// Collects vertices and edges and validates them into a [`DataGraph`].
///
/// ```
/// use sopagrami_graph::GraphBuilder;
/// let mut builder = GraphBuilder::new(false);
/// builder.add_vertex(0, "A").unwrap();
/// builder.add_vertex(1, "B").unwrap();
/// builder.add_edge(0, 1, None);
/// let graph = builder.build().unwrap();
/// assert_eq!(graph.num_edges(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    directed: bool,
    /// Label token per declared vertex id.
    vertices: HashMap<VertexId, String>,
    edges: Vec<PendingEdge>,
}

impl GraphBuilder {
    /// Starts an empty graph.
    #[must_use]
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            vertices: HashMap::new(),
            edges: Vec::new(),
        }
    }

    /// Declares vertex `id` with a label token.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateVertex`] if `id` was already declared.
    pub fn add_vertex(&mut self, id: VertexId, label: impl Into<String>) -> Result<(), GraphError> {
        self.insert_vertex(id, label.into(), None)
    }

    /// Adds an edge. Endpoints are checked when the graph is built.
    pub fn add_edge(&mut self, src: VertexId, dst: VertexId, label: Option<&str>) {
        self.insert_edge(src, dst, label.map(str::to_string), None);
    }

    pub(crate) fn insert_vertex(
        &mut self,
        id: VertexId,
        label: String,
        line: Option<usize>,
    ) -> Result<(), GraphError> {
        if self.vertices.contains_key(&id) {
            return Err(GraphError::DuplicateVertex { id, line });
        }
        self.vertices.insert(id, label);
        Ok(())
    }

    pub(crate) fn insert_edge(
        &mut self,
        src: VertexId,
        dst: VertexId,
        label: Option<String>,
        line: Option<usize>,
    ) {
        self.edges.push(PendingEdge {
            src,
            dst,
            label,
            line,
        });
    }

    /// Number of declared vertices.
    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Validates the collected records and builds the graph.
    ///
    /// Self-loops are dropped with a warning and duplicate edges collapse into
    /// one. On an undirected graph `u v` and `v u` are the same edge.
    ///
    /// # Errors
    ///
    /// Returns an error for undeclared edge endpoints, vertex ids that do not
    /// form `0..n`, or label tables that mix integer and text tokens.
    pub fn build(self) -> Result<DataGraph, GraphError> {
        let count = self.vertices.len();
        if VertexId::try_from(count).is_err() {
            return Err(GraphError::TooManyVertices(count));
        }

        if let Some(edge) = self.edges.iter().find_map(|edge| {
            [edge.src, edge.dst]
                .into_iter()
                .find(|id| !self.vertices.contains_key(id))
                .map(|id| (id, edge.line))
        }) {
            return Err(GraphError::UndeclaredVertex {
                id: edge.0,
                line: edge.1,
            });
        }

        // Ids are distinct, so a gap in 0..count exists iff some id is out of range.
        if let Some(id) = (0..count)
            .filter_map(|id| VertexId::try_from(id).ok())
            .find(|id| !self.vertices.contains_key(id))
        {
            return Err(GraphError::MissingVertex { id, count });
        }

        let ordered: Vec<&str> = (0..count)
            .filter_map(|id| VertexId::try_from(id).ok())
            .filter_map(|id| self.vertices.get(&id).map(String::as_str))
            .collect();

        let vertex_table = LabelTable::from_tokens(ordered.iter().copied())
            .map_err(|err| inconsistent("vertex", err))?;
        let vlabels = ordered
            .iter()
            .map(|token| intern(&vertex_table, token))
            .collect();

        let edge_table = LabelTable::from_tokens(self.edges.iter().filter_map(|e| e.label.as_deref()))
            .map_err(|err| inconsistent("edge", err))?;

        let edges = self.collect_edges(&edge_table);
        let registry = LabelRegistry::build(vertex_table, vlabels);

        tracing::debug!(
            "built graph: |V|={} |E|={} ({} records) directed={}",
            count,
            edges.len(),
            self.edges.len(),
            self.directed
        );

        Ok(DataGraph::from_parts(self.directed, registry, edge_table, &edges))
    }

    fn collect_edges(&self, edge_table: &LabelTable) -> Vec<(VertexId, VertexId, Label)> {
        let mut loops = 0usize;
        let edges = self
            .edges
            .iter()
            .filter(|edge| {
                let is_loop = edge.src == edge.dst;
                if is_loop {
                    loops += 1;
                }
                !is_loop
            })
            .map(|edge| {
                let label = edge
                    .label
                    .as_deref()
                    .map_or(NO_LABEL, |token| intern(edge_table, token));
                if self.directed {
                    (edge.src, edge.dst, label)
                } else {
                    (edge.src.min(edge.dst), edge.src.max(edge.dst), label)
                }
            })
            .sorted_unstable()
            .dedup()
            .collect();

        if loops > 0 {
            tracing::warn!("dropped {} self-loop edge(s)", loops);
        }
        edges
    }
}

fn inconsistent(what: &'static str, err: MixedLabelKinds) -> GraphError {
    GraphError::InconsistentLabels {
        what,
        integer: err.integer,
        text: err.text,
    }
}

fn intern(table: &LabelTable, token: &str) -> Label {
    table
        .id(token)
        .expect("every token was interned when the table was built")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Direction;

    #[test]
    fn test_duplicate_vertex_rejected() {
        let mut builder = GraphBuilder::new(false);
        builder.add_vertex(0, "A").unwrap();
        let err = builder.add_vertex(0, "B").unwrap_err();
        assert!(matches!(err, GraphError::DuplicateVertex { id: 0, line: None }));
    }

    #[test]
    fn test_labels_follow_vertex_ids_not_declaration_order() {
        let mut builder = GraphBuilder::new(false);
        builder.add_vertex(2, "C").unwrap();
        builder.add_vertex(0, "B").unwrap();
        builder.add_vertex(1, "A").unwrap();
        let graph = builder.build().unwrap();
        let names: Vec<&str> = (0..3)
            .map(|v| graph.vertex_labels().name(graph.label(v)).unwrap())
            .collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_sparse_ids_rejected() {
        let mut builder = GraphBuilder::new(false);
        builder.add_vertex(0, "A").unwrap();
        builder.add_vertex(2, "A").unwrap();
        let err = builder.build().unwrap_err();
        assert!(matches!(err, GraphError::MissingVertex { id: 1, count: 2 }));
    }

    #[test]
    fn test_undeclared_endpoint_rejected() {
        let mut builder = GraphBuilder::new(true);
        builder.add_vertex(0, "A").unwrap();
        builder.add_edge(0, 5, None);
        let err = builder.build().unwrap_err();
        assert!(matches!(err, GraphError::UndeclaredVertex { id: 5, .. }));
    }

    #[test]
    fn test_self_loops_and_duplicates_collapse() {
        let mut builder = GraphBuilder::new(false);
        builder.add_vertex(0, "A").unwrap();
        builder.add_vertex(1, "B").unwrap();
        builder.add_edge(0, 0, None);
        builder.add_edge(0, 1, Some("x"));
        builder.add_edge(1, 0, Some("x"));
        builder.add_edge(0, 1, Some("y"));
        let graph = builder.build().unwrap();
        assert_eq!(graph.num_edges(), 2);
        assert_eq!(graph.degree(0, Direction::Any), 2);
    }

    #[test]
    fn test_directed_reverse_edges_are_distinct() {
        let mut builder = GraphBuilder::new(true);
        builder.add_vertex(0, "A").unwrap();
        builder.add_vertex(1, "A").unwrap();
        builder.add_edge(0, 1, None);
        builder.add_edge(1, 0, None);
        builder.add_edge(1, 0, None);
        let graph = builder.build().unwrap();
        assert_eq!(graph.num_edges(), 2);
        assert_eq!(graph.degree(0, Direction::Any), 1);
    }

    #[test]
    fn test_mixed_edge_labels_rejected() {
        let mut builder = GraphBuilder::new(false);
        builder.add_vertex(0, "A").unwrap();
        builder.add_vertex(1, "A").unwrap();
        builder.add_edge(0, 1, Some("3"));
        builder.add_edge(0, 1, Some("z"));
        let err = builder.build().unwrap_err();
        assert!(matches!(err, GraphError::InconsistentLabels { what: "edge", .. }));
    }
}
