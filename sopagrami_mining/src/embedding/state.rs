use sopagrami_graph::{VertexId, VertexSet};

#[derive(Debug, Clone)]
enum TrailEntry {
    /// A pattern vertex was mapped.
    Mapped(usize),
    /// The live candidate list of a pattern vertex was narrowed.
    Narrowed {
        vertex: usize,
        previous: Option<Vec<VertexId>>,
    },
}

/// Partial embedding with trail-based undo.
///
/// `live[w]` is `None` until some mapped neighbor constrains `w`; afterwards
/// it holds the ascending candidates still compatible with every mapped
/// neighbor.
#[derive(Debug, Clone)]
pub(crate) struct SearchState {
    assignment: Vec<Option<VertexId>>,
    used: VertexSet,
    live: Vec<Option<Vec<VertexId>>>,
    trail: Vec<TrailEntry>,
}

impl SearchState {
    pub(crate) fn new(pattern_vertices: usize, host_vertices: usize) -> Self {
        Self {
            assignment: vec![None; pattern_vertices],
            used: VertexSet::new(host_vertices),
            live: vec![None; pattern_vertices],
            trail: Vec::new(),
        }
    }

    pub(crate) fn is_mapped(&self, u: usize) -> bool {
        self.assignment[u].is_some()
    }

    pub(crate) fn is_used(&self, x: VertexId) -> bool {
        self.used.contains(x)
    }

    pub(crate) fn live(&self, w: usize) -> Option<&[VertexId]> {
        self.live[w].as_deref()
    }

    pub(crate) const fn mark(&self) -> usize {
        self.trail.len()
    }

    #[contracts::debug_requires(!self.is_mapped(u))]
    #[contracts::debug_requires(!self.is_used(x))]
    #[contracts::debug_ensures(self.is_mapped(u) && self.is_used(x))]
    pub(crate) fn map(&mut self, u: usize, x: VertexId) {
        self.assignment[u] = Some(x);
        self.used.insert(x);
        self.trail.push(TrailEntry::Mapped(u));
    }

    #[contracts::debug_requires(!self.is_mapped(w))]
    pub(crate) fn narrow(&mut self, w: usize, candidates: Vec<VertexId>) {
        let previous = self.live[w].replace(candidates);
        self.trail.push(TrailEntry::Narrowed { vertex: w, previous });
    }

    #[contracts::debug_requires(self.is_mapped(u))]
    #[contracts::debug_ensures(!self.is_mapped(u))]
    fn unmap(&mut self, u: usize) {
        if let Some(x) = self.assignment[u].take() {
            self.used.remove(x);
        }
    }

    /// Rolls back every change made after `mark`.
    #[contracts::debug_ensures(self.trail.len() == mark)]
    pub(crate) fn undo_to(&mut self, mark: usize) {
        while self.trail.len() > mark {
            match self.trail.pop() {
                Some(TrailEntry::Mapped(u)) => self.unmap(u),
                Some(TrailEntry::Narrowed { vertex, previous }) => self.live[vertex] = previous,
                None => break,
            }
        }
    }

    /// The complete mapping, if every pattern vertex is mapped.
    pub(crate) fn embedding(&self) -> Option<Vec<VertexId>> {
        self.assignment.iter().copied().collect()
    }
}
