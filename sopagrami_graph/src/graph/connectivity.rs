use crate::graph::Neighbor;
use crate::labels::{Label, VertexId};

/// Compressed per-vertex neighbor lists, each sorted by `(vertex, label)`.
#[derive(Clone, Debug, Default)]
struct Adjacency {
    offsets: Vec<usize>,
    entries: Vec<Neighbor>,
}

impl Adjacency {
    fn build(num_vertices: usize, mut pairs: Vec<(VertexId, Neighbor)>) -> Self {
        pairs.sort_unstable();
        pairs.dedup();

        let mut offsets = vec![0usize; num_vertices + 1];
        for &(v, _) in &pairs {
            offsets[v as usize + 1] += 1;
        }
        for i in 0..num_vertices {
            offsets[i + 1] += offsets[i];
        }

        Self {
            offsets,
            entries: pairs.into_iter().map(|(_, n)| n).collect(),
        }
    }

    fn get(&self, v: VertexId) -> &[Neighbor] {
        let v = v as usize;
        match (self.offsets.get(v), self.offsets.get(v + 1)) {
            (Some(&start), Some(&end)) => &self.entries[start..end],
            _ => &[],
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Connectivity {
    /// Neighbors regardless of direction (the only list of an undirected graph)
    any: Adjacency,
    /// Out- and in-neighbor lists, present only for directed graphs
    directed: Option<(Adjacency, Adjacency)>,
}

impl Connectivity {
    /// Builds the neighbor lists from deduplicated, loop-free edges.
    #[must_use]
    pub(crate) fn build(num_vertices: usize, edges: &[(VertexId, VertexId, Label)], directed: bool) -> Self {
        let any = Adjacency::build(num_vertices, Self::symmetric_pairs(edges));

        let directed = directed.then(|| {
            let out = edges
                .iter()
                .map(|&(u, v, label)| (u, Neighbor { vertex: v, label }))
                .collect();
            let inc = edges
                .iter()
                .map(|&(u, v, label)| (v, Neighbor { vertex: u, label }))
                .collect();
            (
                Adjacency::build(num_vertices, out),
                Adjacency::build(num_vertices, inc),
            )
        });

        Self { any, directed }
    }

    fn symmetric_pairs(edges: &[(VertexId, VertexId, Label)]) -> Vec<(VertexId, Neighbor)> {
        edges
            .iter()
            .flat_map(|&(u, v, label)| {
                [
                    (u, Neighbor { vertex: v, label }),
                    (v, Neighbor { vertex: u, label }),
                ]
            })
            .collect()
    }

    #[must_use]
    pub(crate) fn any(&self, v: VertexId) -> &[Neighbor] {
        self.any.get(v)
    }

    #[must_use]
    pub(crate) fn out(&self, v: VertexId) -> &[Neighbor] {
        self.directed
            .as_ref()
            .map_or_else(|| self.any.get(v), |(out, _)| out.get(v))
    }

    #[must_use]
    pub(crate) fn inc(&self, v: VertexId) -> &[Neighbor] {
        self.directed
            .as_ref()
            .map_or_else(|| self.any.get(v), |(_, inc)| inc.get(v))
    }
}
