use std::collections::BTreeMap;

use sopagrami_graph::{EdgeDir, Label, MiningView, VertexId, VertexSet};

use crate::pattern::{Pattern, PatternNeighbor};

type EdgeSignature = (Label, EdgeDir, Label);

/// Host vertices with the right label and at least as many neighbors of each
/// edge type as the pattern vertex needs.
pub(crate) fn initial_domains(
    view: &MiningView<'_>,
    pattern: &Pattern,
    adjacency: &[Vec<PatternNeighbor>],
) -> Vec<VertexSet> {
    adjacency
        .iter()
        .enumerate()
        .map(|(u, neighbors)| {
            let mut required: BTreeMap<EdgeSignature, usize> = BTreeMap::new();
            for n in neighbors {
                *required
                    .entry((n.label, n.dir, pattern.vlab[n.vertex]))
                    .or_default() += 1;
            }
            VertexSet::from_vertices(
                view.num_vertices(),
                view.candidates(pattern.vlab[u])
                    .iter()
                    .copied()
                    .filter(|&x| {
                        required.iter().all(|(&(label, dir, other), &count)| {
                            view.count_neighbors(x, label, dir, other) >= count
                        })
                    }),
            )
        })
        .collect()
}

/// Removes values without support along some pattern edge until nothing
/// changes. Returns the number of removed values.
pub(crate) fn arc_consistency(
    view: &MiningView<'_>,
    adjacency: &[Vec<PatternNeighbor>],
    domains: &mut [VertexSet],
) -> usize {
    let mut removed = 0;
    loop {
        let mut changed = false;
        for (u, neighbors) in adjacency.iter().enumerate() {
            for n in neighbors {
                let unsupported: Vec<VertexId> = domains[u]
                    .iter()
                    .filter(|&x| {
                        !view
                            .neighbors(x, n.dir)
                            .iter()
                            .any(|m| m.label == n.label && domains[n.vertex].contains(m.vertex))
                    })
                    .collect();
                for x in unsupported {
                    domains[u].remove(x);
                    removed += 1;
                    changed = true;
                }
            }
        }
        if !changed {
            return removed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::PatternEdge;
    use sopagrami_graph::{DataGraph, NO_LABEL};

    #[test]
    fn test_degree_filter_and_arc_consistency() {
        // Path A-B-A plus a dangling A: only A's adjacent to B survive.
        let graph = DataGraph::from_lg_str("v 0 A\nv 1 B\nv 2 A\nv 3 A\nv 4 B\ne 0 1\ne 1 2\ne 3 4\n", false).unwrap();
        let view = MiningView::new(&graph, false);
        let a = graph.vertex_labels().id("A").unwrap();
        let b = graph.vertex_labels().id("B").unwrap();
        let pattern = Pattern::new(
            vec![a, b, a],
            vec![
                PatternEdge { a: 0, b: 1, label: NO_LABEL, dir: EdgeDir::Undirected },
                PatternEdge { a: 1, b: 2, label: NO_LABEL, dir: EdgeDir::Undirected },
            ],
        );
        let adjacency = pattern.adjacency();
        let mut domains = initial_domains(&view, &pattern, &adjacency);
        // The center needs two A neighbors: vertex 4 fails the degree filter.
        assert_eq!(domains[1].to_vec(), vec![1]);
        assert_eq!(domains[0].to_vec(), vec![0, 2, 3]);

        let removed = arc_consistency(&view, &adjacency, &mut domains);
        assert_eq!(removed, 2);
        assert_eq!(domains[0].to_vec(), vec![0, 2]);
        assert_eq!(domains[2].to_vec(), vec![0, 2]);
    }
}
