use sopagrami_graph::VertexSet;

use crate::pattern::PatternNeighbor;

/// Matching order rooted at `root`.
///
/// After the root, repeatedly picks the unordered vertex with the most edges
/// into the ordered prefix. Ties go to the smaller domain, then the lower
/// index. The prefix stays connected, so every non-root vertex has a mapped
/// neighbor when its turn comes.
pub(crate) fn matching_order(
    root: usize,
    adjacency: &[Vec<PatternNeighbor>],
    domains: &[VertexSet],
) -> Vec<usize> {
    let n = adjacency.len();
    let mut order = Vec::with_capacity(n);
    let mut placed = vec![false; n];
    let mut links = vec![0usize; n];

    let place = |u: usize, order: &mut Vec<usize>, placed: &mut [bool], links: &mut [usize]| {
        order.push(u);
        placed[u] = true;
        for neighbor in &adjacency[u] {
            links[neighbor.vertex] += 1;
        }
    };
    place(root, &mut order, &mut placed, &mut links);

    while order.len() < n {
        let next = (0..n)
            .filter(|&u| !placed[u] && links[u] > 0)
            .min_by(|&a, &b| {
                // Primary: most links into the prefix
                links[b]
                    .cmp(&links[a])
                    // Secondary: smallest domain
                    .then_with(|| domains[a].len().cmp(&domains[b].len()))
                    .then_with(|| a.cmp(&b))
            });
        let Some(next) = next else {
            break;
        };
        place(next, &mut order, &mut placed, &mut links);
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{Pattern, PatternEdge};
    use sopagrami_graph::{EdgeDir, NO_LABEL};

    #[test]
    fn test_order_prefers_closing_vertices() {
        // 0-1, 1-2, 2-0, 2-3: after 0 and 1, vertex 2 closes the triangle.
        let edges = [(0, 1), (1, 2), (2, 0), (2, 3)]
            .iter()
            .map(|&(a, b)| PatternEdge { a, b, label: NO_LABEL, dir: EdgeDir::Undirected })
            .collect();
        let pattern = Pattern::new(vec![0; 4], edges);
        let domains = vec![VertexSet::from_vertices(8, [1, 2]); 4];
        let order = matching_order(0, &pattern.adjacency(), &domains);
        assert_eq!(order, vec![0, 1, 2, 3]);
        let order = matching_order(3, &pattern.adjacency(), &domains);
        assert_eq!(order, vec![3, 2, 0, 1]);
    }
}
