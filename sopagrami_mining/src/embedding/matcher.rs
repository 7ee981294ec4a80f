use sopagrami_graph::{MiningView, VertexId, VertexSet};

use crate::embedding::state::SearchState;
use crate::pattern::PatternNeighbor;

/// One level of the explicit backtracking stack.
#[derive(Debug)]
struct Frame {
    /// Position in the matching order.
    position: usize,
    /// Candidates for the vertex at `position`, fixed when the frame is pushed.
    candidates: Vec<VertexId>,
    next: usize,
    /// Trail mark taken before the current candidate was mapped.
    mark: Option<usize>,
}

/// Finds single embeddings with one pattern vertex pinned to a host vertex.
pub(crate) struct Matcher<'a, 'g> {
    view: &'a MiningView<'g>,
    adjacency: &'a [Vec<PatternNeighbor>],
    state: SearchState,
}

impl<'a, 'g> Matcher<'a, 'g> {
    pub(crate) fn new(view: &'a MiningView<'g>, adjacency: &'a [Vec<PatternNeighbor>]) -> Self {
        Self {
            view,
            adjacency,
            state: SearchState::new(adjacency.len(), view.num_vertices()),
        }
    }

    /// Searches an embedding that maps `order[0]` to `root_value`.
    ///
    /// Returns the images indexed by pattern vertex. The internal state is
    /// empty again when this returns.
    pub(crate) fn find_embedding(
        &mut self,
        domains: &[VertexSet],
        order: &[usize],
        root_value: VertexId,
    ) -> Option<Vec<VertexId>> {
        debug_assert_eq!(self.state.mark(), 0);
        let found = self.search(domains, order, root_value);
        self.state.undo_to(0);
        found
    }

    fn search(&mut self, domains: &[VertexSet], order: &[usize], root_value: VertexId) -> Option<Vec<VertexId>> {
        let &root = order.first()?;
        if !domains[root].contains(root_value) || !self.try_map(domains, root, root_value) {
            return None;
        }
        if order.len() == 1 {
            return self.state.embedding();
        }

        let mut stack = vec![self.frame(domains, order, 1)];
        while let Some(frame) = stack.last_mut() {
            let u = order[frame.position];
            if let Some(mark) = frame.mark.take() {
                self.state.undo_to(mark);
            }

            let mut mapped = false;
            while frame.next < frame.candidates.len() {
                let x = frame.candidates[frame.next];
                frame.next += 1;
                if self.state.is_used(x) {
                    continue;
                }
                let mark = self.state.mark();
                if self.try_map(domains, u, x) {
                    frame.mark = Some(mark);
                    mapped = true;
                    break;
                }
            }

            if !mapped {
                stack.pop();
                continue;
            }

            let position = frame.position + 1;
            if position == order.len() {
                tracing::trace!("embedding found from root {} -> {}", root, root_value);
                return self.state.embedding();
            }
            let child = self.frame(domains, order, position);
            stack.push(child);
        }
        None
    }

    fn frame(&self, domains: &[VertexSet], order: &[usize], position: usize) -> Frame {
        let u = order[position];
        let candidates = self
            .state
            .live(u)
            .map_or_else(|| domains[u].to_vec(), <[VertexId]>::to_vec);
        Frame {
            position,
            candidates,
            next: 0,
            mark: None,
        }
    }

    /// Maps `u` to `x` and narrows the candidates of unmapped neighbors.
    /// Leaves the state untouched on failure.
    fn try_map(&mut self, domains: &[VertexSet], u: usize, x: VertexId) -> bool {
        let mark = self.state.mark();
        self.state.map(u, x);

        let adjacency = self.adjacency;
        for neighbor in &adjacency[u] {
            let w = neighbor.vertex;
            if self.state.is_mapped(w) {
                continue;
            }
            let allowed: Vec<VertexId> = self
                .view
                .neighbors(x, neighbor.dir)
                .iter()
                .filter(|m| {
                    m.label == neighbor.label
                        && domains[w].contains(m.vertex)
                        && !self.state.is_used(m.vertex)
                })
                .map(|m| m.vertex)
                .collect();
            let narrowed = match self.state.live(w) {
                Some(current) => intersect_sorted(current, &allowed),
                None => allowed,
            };
            if narrowed.is_empty() {
                self.state.undo_to(mark);
                return false;
            }
            self.state.narrow(w, narrowed);
        }
        true
    }
}

/// Intersection of two ascending lists.
fn intersect_sorted(a: &[VertexId], b: &[VertexId]) -> Vec<VertexId> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}
