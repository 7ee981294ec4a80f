//! MNI support by constraint search.
//!
//! Every pattern vertex starts with a domain of plausible host vertices.
//! For each vertex `u` and each value `x` still in its domain, the search
//! looks for one embedding with `u -> x`. A hit marks every image of that
//! embedding as confirmed; a miss removes `x` from the domain for good.
//! Embeddings are never stored, only the per-vertex image sets.

mod domains;
mod heuristics;
mod matcher;
mod state;

use sopagrami_graph::{MiningView, VertexSet};

use crate::pattern::Pattern;
use domains::{arc_consistency, initial_domains};
use heuristics::matching_order;
use matcher::Matcher;

/// Result of one support computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Confirmed distinct images per pattern vertex.
    pub image_counts: Vec<usize>,
    /// Every image count reached the threshold.
    pub frequent: bool,
    /// Every domain value was decided, so the counts are the exact MNI terms.
    pub exact: bool,
    /// Embeddings found.
    pub embeddings: u64,
    /// Domain values removed by filtering or failed searches.
    pub pruned: u64,
}

impl SearchOutcome {
    /// Smallest image count.
    #[must_use]
    pub fn support(&self) -> usize {
        self.image_counts.iter().copied().min().unwrap_or(0)
    }

    fn infrequent(images: &[VertexSet], embeddings: u64, pruned: u64) -> Self {
        Self {
            image_counts: images.iter().map(VertexSet::len).collect(),
            frequent: false,
            exact: false,
            embeddings,
            pruned,
        }
    }
}

/// Support computation against one mining view.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddingSearch<'a, 'g> {
    view: &'a MiningView<'g>,
    tau: usize,
    full: bool,
}

impl<'a, 'g> EmbeddingSearch<'a, 'g> {
    /// `full` requests exact support. Otherwise the search stops as soon as
    /// every pattern vertex has `tau` confirmed images.
    #[must_use]
    pub const fn new(view: &'a MiningView<'g>, tau: usize, full: bool) -> Self {
        Self { view, tau, full }
    }

    /// Computes the MNI support of `pattern`, or stops once it is known to be
    /// below the threshold.
    #[must_use]
    pub fn run(&self, pattern: &Pattern) -> SearchOutcome {
        let n = pattern.num_vertices();
        let tau = self.tau;
        let adjacency = pattern.adjacency();
        let mut images = vec![VertexSet::new(self.view.num_vertices()); n];

        let mut domains = initial_domains(self.view, pattern, &adjacency);
        let initial: usize = domains.iter().map(VertexSet::len).sum();
        if domains.iter().any(|d| d.len() < tau) {
            return SearchOutcome::infrequent(&images, 0, 0);
        }
        let mut pruned = arc_consistency(self.view, &adjacency, &mut domains) as u64;
        if domains.iter().any(|d| d.len() < tau) {
            return SearchOutcome::infrequent(&images, 0, pruned);
        }
        tracing::trace!(
            "domains: {} values, {} removed by arc consistency",
            initial,
            pruned
        );

        let orders: Vec<Vec<usize>> = (0..n)
            .map(|root| matching_order(root, &adjacency, &domains))
            .collect();
        let mut visit: Vec<usize> = (0..n).collect();
        visit.sort_by_key(|&u| (domains[u].len(), u));

        let mut matcher = Matcher::new(self.view, &adjacency);
        let mut embeddings = 0u64;
        let mut decided_all = true;

        'vertices: for &u in &visit {
            for x in domains[u].to_vec() {
                if !self.full {
                    if images.iter().all(|s| s.len() >= tau) {
                        decided_all = false;
                        break 'vertices;
                    }
                    if images[u].len() >= tau {
                        decided_all = false;
                        break;
                    }
                }
                if images[u].contains(x) {
                    continue;
                }

                if let Some(embedding) = matcher.find_embedding(&domains, &orders[u], x) {
                    embeddings += 1;
                    for (v, &y) in embedding.iter().enumerate() {
                        images[v].insert(y);
                    }
                } else {
                    domains[u].remove(x);
                    pruned += 1;
                    if domains[u].len() < tau {
                        return SearchOutcome::infrequent(&images, embeddings, pruned);
                    }
                }
            }
        }

        let image_counts: Vec<usize> = images.iter().map(VertexSet::len).collect();
        let frequent = image_counts.iter().all(|&c| c >= tau);
        SearchOutcome {
            image_counts,
            frequent,
            exact: decided_all,
            embeddings,
            pruned,
        }
    }
}
