//! Patterns, DFS codes and canonical keys.

mod canonical;
mod dfs_code;

pub use canonical::{CanonicalKey, canonical_code, is_canonical};
pub use dfs_code::{DfsCode, DfsEdge};

use serde::Serialize;
use sopagrami_graph::{EdgeDir, Label};

/// One pattern edge between pattern vertices `a` and `b`.
///
/// `dir` is [`EdgeDir::Forward`] for `a -> b`, [`EdgeDir::Backward`] for
/// `b -> a` and [`EdgeDir::Undirected`] when mining ignores direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PatternEdge {
    /// First endpoint.
    pub a: usize,
    /// Second endpoint.
    pub b: usize,
    /// Edge label.
    pub label: Label,
    /// Orientation relative to `a`.
    pub dir: EdgeDir,
}

/// Neighbor of a pattern vertex, as used by the embedding search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PatternNeighbor {
    /// Adjacent pattern vertex.
    pub vertex: usize,
    /// Edge label.
    pub label: Label,
    /// Orientation seen from the vertex owning the list.
    pub dir: EdgeDir,
}

/// A connected labeled pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Pattern {
    /// Vertex labels.
    pub vlab: Vec<Label>,
    /// Edges.
    pub pedges: Vec<PatternEdge>,
}

impl Pattern {
    /// Creates a pattern.
    ///
    /// # Panics
    ///
    /// Panics if an edge endpoint is out of range or an edge is a self-loop.
    #[must_use]
    pub fn new(vlab: Vec<Label>, pedges: Vec<PatternEdge>) -> Self {
        for edge in &pedges {
            assert!(
                edge.a < vlab.len() && edge.b < vlab.len() && edge.a != edge.b,
                "invalid pattern edge {edge:?} for {} vertices",
                vlab.len()
            );
        }
        Self { vlab, pedges }
    }

    /// Number of vertices.
    #[must_use]
    pub const fn num_vertices(&self) -> usize {
        self.vlab.len()
    }

    /// Number of edges.
    #[must_use]
    pub const fn num_edges(&self) -> usize {
        self.pedges.len()
    }

    /// Canonical key. Isomorphic patterns have identical keys.
    ///
    /// # Panics
    ///
    /// Panics if the pattern is disconnected.
    #[must_use]
    pub fn key(&self) -> CanonicalKey {
        CanonicalKey::from_code(&canonical_code(self))
    }

    /// Returns true if both patterns have the same canonical key.
    #[must_use]
    pub fn is_isomorphic(&self, other: &Self) -> bool {
        self.num_vertices() == other.num_vertices()
            && self.num_edges() == other.num_edges()
            && self.key() == other.key()
    }

    /// Returns true if every vertex is reachable from vertex 0.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        if self.vlab.is_empty() {
            return true;
        }
        let adjacency = self.adjacency();
        let mut seen = vec![false; self.num_vertices()];
        let mut stack = vec![0];
        seen[0] = true;
        while let Some(u) = stack.pop() {
            for n in &adjacency[u] {
                if !seen[n.vertex] {
                    seen[n.vertex] = true;
                    stack.push(n.vertex);
                }
            }
        }
        seen.into_iter().all(|s| s)
    }

    /// Per-vertex neighbor lists. Each edge appears once from each endpoint.
    #[must_use]
    pub fn adjacency(&self) -> Vec<Vec<PatternNeighbor>> {
        let mut adjacency = vec![Vec::new(); self.num_vertices()];
        for edge in &self.pedges {
            adjacency[edge.a].push(PatternNeighbor {
                vertex: edge.b,
                label: edge.label,
                dir: edge.dir,
            });
            adjacency[edge.b].push(PatternNeighbor {
                vertex: edge.a,
                label: edge.label,
                dir: edge.dir.reverse(),
            });
        }
        adjacency
    }
}
