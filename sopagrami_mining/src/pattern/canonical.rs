//! Minimal DFS codes and canonical keys.
//!
//! The minimal code is grown one edge at a time. Every partial
//! self-embedding that spells the current prefix proposes its rightmost
//! extensions; the smallest proposal is appended and only the embeddings
//! realizing it survive. Two patterns are isomorphic exactly when their
//! minimal codes are equal.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;
use sopagrami_graph::NO_LABEL;

use crate::pattern::{DfsCode, DfsEdge, Pattern};

/// Text encoding of a minimal DFS code. Equal keys mean isomorphic patterns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    /// Encodes a (minimal) DFS code.
    #[must_use]
    pub fn from_code(code: &DfsCode) -> Self {
        let mut key = String::with_capacity(code.len() * 16);
        for edge in code.edges() {
            key.push('(');
            key.push_str(&edge.from.to_string());
            key.push(',');
            key.push_str(&edge.to.to_string());
            key.push(',');
            key.push_str(&edge.from_label.to_string());
            key.push(',');
            if edge.edge_label == NO_LABEL {
                key.push('-');
            } else {
                key.push_str(&edge.edge_label.to_string());
            }
            key.push(',');
            key.push(edge.dir.tag());
            key.push(',');
            key.push_str(&edge.to_label.to_string());
            key.push(')');
        }
        Self(key)
    }

    /// The encoded key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A partial self-embedding: code index to pattern vertex, plus used edges.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Partial {
    code_to_pattern: Vec<usize>,
    pattern_to_code: Vec<Option<usize>>,
    used: Vec<bool>,
}

/// Neighbor of a pattern vertex: `(edge index, other vertex)`.
type Incidence = (usize, usize);

struct MinCodeGrower<'p> {
    pattern: &'p Pattern,
    incidences: Vec<Vec<Incidence>>,
    states: Vec<Partial>,
    code: DfsCode,
}

impl<'p> MinCodeGrower<'p> {
    fn new(pattern: &'p Pattern) -> Self {
        let mut incidences = vec![Vec::new(); pattern.num_vertices()];
        for (index, edge) in pattern.pedges.iter().enumerate() {
            incidences[edge.a].push((index, edge.b));
            incidences[edge.b].push((index, edge.a));
        }
        Self {
            pattern,
            incidences,
            states: Vec::new(),
            code: DfsCode::new(),
        }
    }

    /// The edge `edge_index` as seen from pattern vertex `from`.
    fn oriented(&self, edge_index: usize, from: usize, from_code: usize, to_code: usize) -> DfsEdge {
        let edge = &self.pattern.pedges[edge_index];
        let (dir, to) = if edge.a == from {
            (edge.dir, edge.b)
        } else {
            (edge.dir.reverse(), edge.a)
        };
        DfsEdge {
            from: from_code,
            to: to_code,
            from_label: self.pattern.vlab[from],
            edge_label: edge.label,
            dir,
            to_label: self.pattern.vlab[to],
        }
    }

    /// Candidate next edges of one state, with the resulting state.
    fn proposals(&self, state: &Partial) -> Vec<(DfsEdge, Partial)> {
        let mut out = Vec::new();

        if self.code.is_empty() {
            for (index, edge) in self.pattern.pedges.iter().enumerate() {
                for (from, to) in [(edge.a, edge.b), (edge.b, edge.a)] {
                    let mut next = state.clone();
                    next.code_to_pattern = vec![from, to];
                    next.pattern_to_code[from] = Some(0);
                    next.pattern_to_code[to] = Some(1);
                    next.used[index] = true;
                    out.push((self.oriented(index, from, 0, 1), next));
                }
            }
            return out;
        }

        let rightmost_path = self.code.rightmost_path();
        let rightmost = rightmost_path[0];
        let next_index = state.code_to_pattern.len();

        let rightmost_vertex = state.code_to_pattern[rightmost];
        for &(index, other) in &self.incidences[rightmost_vertex] {
            if state.used[index] {
                continue;
            }
            let Some(other_code) = state.pattern_to_code[other] else {
                continue;
            };
            if other_code != rightmost && rightmost_path.contains(&other_code) {
                let mut next = state.clone();
                next.used[index] = true;
                out.push((self.oriented(index, rightmost_vertex, rightmost, other_code), next));
            }
        }

        for &from_code in &rightmost_path {
            let from = state.code_to_pattern[from_code];
            for &(index, other) in &self.incidences[from] {
                if state.used[index] || state.pattern_to_code[other].is_some() {
                    continue;
                }
                let mut next = state.clone();
                next.used[index] = true;
                next.code_to_pattern.push(other);
                next.pattern_to_code[other] = Some(next_index);
                out.push((self.oriented(index, from, from_code, next_index), next));
            }
        }

        out
    }

    /// Appends the smallest possible next edge. Returns `None` once every
    /// edge is placed.
    fn step(&mut self) -> Option<DfsEdge> {
        if self.code.len() == self.pattern.num_edges() {
            return None;
        }
        if self.code.is_empty() {
            self.states = vec![Partial {
                code_to_pattern: Vec::new(),
                pattern_to_code: vec![None; self.pattern.num_vertices()],
                used: vec![false; self.pattern.num_edges()],
            }];
        }

        let mut best: Option<DfsEdge> = None;
        let mut survivors: Vec<Partial> = Vec::new();
        for state in &self.states {
            for (edge, next) in self.proposals(state) {
                match best.as_ref().map(|b| edge.dfs_cmp(b)) {
                    None | Some(Ordering::Less) => {
                        best = Some(edge);
                        survivors.clear();
                        survivors.push(next);
                    }
                    Some(Ordering::Equal) => survivors.push(next),
                    Some(Ordering::Greater) => {}
                }
            }
        }

        let edge = best?;
        survivors.sort_unstable();
        survivors.dedup();
        self.states = survivors;
        self.code.push(edge);
        Some(edge)
    }
}

/// Computes the minimal DFS code of a connected pattern.
///
/// # Panics
///
/// Panics if the pattern is disconnected, since no DFS code then covers every edge.
#[must_use]
pub fn canonical_code(pattern: &Pattern) -> DfsCode {
    let mut grower = MinCodeGrower::new(pattern);
    while grower.step().is_some() {}
    assert_eq!(
        grower.code.len(),
        pattern.num_edges(),
        "pattern is not connected"
    );
    grower.code
}

/// Returns true if `code` is the minimal DFS code of the pattern it spells.
///
/// Stops at the first position where a smaller edge exists, so non-canonical
/// growth paths are usually rejected after a few steps.
#[must_use]
pub fn is_canonical(code: &DfsCode) -> bool {
    let pattern = code.to_pattern();
    let mut grower = MinCodeGrower::new(&pattern);
    for edge in code.edges() {
        let Some(min) = grower.step() else {
            return false;
        };
        match min.dfs_cmp(edge) {
            Ordering::Equal => {}
            Ordering::Less => return false,
            Ordering::Greater => {
                debug_assert!(false, "code is not a valid rightmost extension sequence");
                return false;
            }
        }
    }
    true
}
