use std::cmp::Ordering;

use sopagrami_graph::{EdgeDir, Label};

use crate::pattern::{Pattern, PatternEdge};

/// One edge of a DFS code.
///
/// `from` and `to` are discovery indices. `from < to` marks a forward edge
/// (it discovers `to`), `from > to` a backward edge. `dir` is the
/// orientation seen from `from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DfsEdge {
    /// Discovery index of the source vertex.
    pub from: usize,
    /// Discovery index of the target vertex.
    pub to: usize,
    /// Label of the source vertex.
    pub from_label: Label,
    /// Edge label.
    pub edge_label: Label,
    /// Orientation seen from the source vertex.
    pub dir: EdgeDir,
    /// Label of the target vertex.
    pub to_label: Label,
}

impl DfsEdge {
    /// Returns true if the edge discovers its target.
    #[must_use]
    pub const fn is_forward(&self) -> bool {
        self.from < self.to
    }

    const fn labels(&self) -> (Label, Label, EdgeDir, Label) {
        (self.from_label, self.edge_label, self.dir, self.to_label)
    }

    fn position_order(&self, other: &Self) -> Ordering {
        match (self.is_forward(), other.is_forward()) {
            (true, true) => self
                .to
                .cmp(&other.to)
                .then_with(|| other.from.cmp(&self.from)),
            (false, false) => self
                .from
                .cmp(&other.from)
                .then_with(|| self.to.cmp(&other.to)),
            (false, true) => {
                if self.from < other.to {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            }
            (true, false) => {
                if self.to <= other.from {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            }
        }
    }

    /// DFS-lexicographic edge order: positions first, then vertex label,
    /// edge label, direction and target label.
    ///
    /// Only edges that can follow the same code prefix are comparable in a
    /// meaningful way, which is how the ordering is used.
    #[must_use]
    pub fn dfs_cmp(&self, other: &Self) -> Ordering {
        self.position_order(other)
            .then_with(|| self.labels().cmp(&other.labels()))
    }

    /// Returns true if both edges connect the same pair the same way.
    #[must_use]
    pub fn same_connection(&self, other: &Self) -> bool {
        let oriented = |e: &Self, from: usize| {
            if e.from == from {
                e.dir
            } else {
                e.dir.reverse()
            }
        };
        let same_pair = (self.from == other.from && self.to == other.to)
            || (self.from == other.to && self.to == other.from);
        same_pair
            && self.edge_label == other.edge_label
            && oriented(self, self.from) == oriented(other, self.from)
    }
}

/// A sequence of DFS edges describing a connected pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DfsCode {
    edges: Vec<DfsEdge>,
}

impl DfsCode {
    /// Empty code.
    #[must_use]
    pub const fn new() -> Self {
        Self { edges: Vec::new() }
    }

    /// Single-edge code.
    #[must_use]
    pub fn single(from_label: Label, edge_label: Label, dir: EdgeDir, to_label: Label) -> Self {
        Self {
            edges: vec![DfsEdge {
                from: 0,
                to: 1,
                from_label,
                edge_label,
                dir,
                to_label,
            }],
        }
    }

    /// Edges in code order.
    #[must_use]
    pub fn edges(&self) -> &[DfsEdge] {
        &self.edges
    }

    /// Number of edges.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the code has no edge.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Number of discovered vertices.
    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.edges
            .iter()
            .map(|e| e.from.max(e.to) + 1)
            .max()
            .unwrap_or(0)
    }

    /// Appends an edge.
    pub fn push(&mut self, edge: DfsEdge) {
        self.edges.push(edge);
    }

    /// Returns a copy extended by `edge`.
    #[must_use]
    pub fn extended(&self, edge: DfsEdge) -> Self {
        let mut child = self.clone();
        child.push(edge);
        child
    }

    /// Labels of the discovered vertices, by discovery index.
    #[must_use]
    pub fn vertex_labels(&self) -> Vec<Label> {
        let mut labels = Vec::with_capacity(self.num_vertices());
        if let Some(first) = self.edges.first() {
            labels.push(first.from_label);
        }
        for edge in self.edges.iter().filter(|e| e.is_forward()) {
            labels.push(edge.to_label);
        }
        labels
    }

    /// Vertices on the path of forward edges from the root to the rightmost
    /// vertex, rightmost first.
    #[must_use]
    pub fn rightmost_path(&self) -> Vec<usize> {
        let vertices = self.num_vertices();
        if vertices == 0 {
            return Vec::new();
        }
        let mut path = vec![vertices - 1];
        let mut current = vertices - 1;
        for edge in self.edges.iter().rev() {
            if edge.is_forward() && edge.to == current {
                current = edge.from;
                path.push(current);
            }
        }
        path
    }

    /// Returns true if the code already holds an edge identical to `edge`.
    #[must_use]
    pub fn contains_connection(&self, edge: &DfsEdge) -> bool {
        self.edges.iter().any(|e| e.same_connection(edge))
    }

    /// Lexicographic comparison under the DFS edge order.
    #[must_use]
    pub fn dfs_cmp(&self, other: &Self) -> Ordering {
        for (a, b) in self.edges.iter().zip(&other.edges) {
            match a.dfs_cmp(b) {
                Ordering::Equal => {}
                unequal => return unequal,
            }
        }
        self.len().cmp(&other.len())
    }

    /// The pattern spelled by the code. Pattern vertices are numbered by
    /// discovery index.
    #[must_use]
    pub fn to_pattern(&self) -> Pattern {
        Pattern::new(
            self.vertex_labels(),
            self.edges
                .iter()
                .map(|e| PatternEdge {
                    a: e.from,
                    b: e.to,
                    label: e.edge_label,
                    dir: e.dir,
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(from: usize, to: usize, from_label: Label, to_label: Label) -> DfsEdge {
        DfsEdge {
            from,
            to,
            from_label,
            edge_label: 0,
            dir: EdgeDir::Undirected,
            to_label,
        }
    }

    #[test]
    fn test_backward_before_forward() {
        // After (0,1),(1,2): backward (2,0) precedes any forward edge.
        let backward = edge(2, 0, 0, 0);
        let deep_forward = edge(2, 3, 0, 0);
        let shallow_forward = edge(0, 3, 0, 0);
        assert_eq!(backward.dfs_cmp(&deep_forward), Ordering::Less);
        assert_eq!(deep_forward.dfs_cmp(&shallow_forward), Ordering::Less);
        assert_eq!(shallow_forward.dfs_cmp(&backward), Ordering::Greater);
    }

    #[test]
    fn test_labels_break_position_ties() {
        let a = edge(0, 1, 0, 1);
        let b = edge(0, 1, 0, 2);
        assert_eq!(a.dfs_cmp(&b), Ordering::Less);
        let mut forward = a;
        forward.dir = EdgeDir::Forward;
        let mut backward = a;
        backward.dir = EdgeDir::Backward;
        assert_eq!(forward.dfs_cmp(&backward), Ordering::Less);
    }

    #[test]
    fn test_rightmost_path_and_labels() {
        let mut code = DfsCode::single(0, 0, EdgeDir::Undirected, 1);
        code.push(edge(1, 2, 1, 2));
        code.push(edge(2, 0, 2, 0));
        code.push(edge(0, 3, 0, 3));
        assert_eq!(code.num_vertices(), 4);
        assert_eq!(code.vertex_labels(), vec![0, 1, 2, 3]);
        assert_eq!(code.rightmost_path(), vec![3, 0]);
    }

    #[test]
    fn test_same_connection_respects_orientation() {
        let mut forward = edge(0, 1, 0, 0);
        forward.dir = EdgeDir::Forward;
        let mut reverse_seen = edge(1, 0, 0, 0);
        reverse_seen.dir = EdgeDir::Backward;
        let mut opposite = edge(1, 0, 0, 0);
        opposite.dir = EdgeDir::Forward;
        assert!(forward.same_connection(&reverse_seen));
        assert!(!forward.same_connection(&opposite));
    }
}
