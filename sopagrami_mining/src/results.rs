//! Collected output of a mining run.

use std::sync::Mutex;

use serde::Serialize;

use crate::pattern::{CanonicalKey, Pattern};
use crate::stats::MiningStatsSnapshot;

/// A pattern whose MNI support reached the threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequentPattern {
    /// The pattern, numbered in canonical discovery order.
    pub pattern: Pattern,
    /// Canonical key of `pattern`.
    pub key: CanonicalKey,
    /// MNI support: exact if `full_support`, otherwise a lower bound that is
    /// at least the threshold.
    pub support: usize,
    /// Whether `support` is the exact MNI value.
    pub full_support: bool,
}

impl FrequentPattern {
    /// Canonical key.
    #[must_use]
    pub const fn key(&self) -> &CanonicalKey {
        &self.key
    }

    /// Number of pattern vertices.
    #[must_use]
    pub const fn num_vertices(&self) -> usize {
        self.pattern.num_vertices()
    }

    /// Number of pattern edges.
    #[must_use]
    pub const fn num_edges(&self) -> usize {
        self.pattern.num_edges()
    }
}

/// Result of [`run_sopagrami`](crate::run_sopagrami).
#[derive(Debug, Clone, Default, Serialize)]
pub struct MiningOutput {
    /// Frequent patterns ordered by `(edge count, key)`.
    pub frequent_patterns: Vec<FrequentPattern>,
    /// Counters of the run.
    pub stats: MiningStatsSnapshot,
}

/// Thread-safe sink for frequent patterns.
#[derive(Debug, Default)]
pub struct ResultCollector {
    patterns: Mutex<Vec<FrequentPattern>>,
}

impl ResultCollector {
    /// Empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one pattern.
    pub fn push(&self, pattern: FrequentPattern) {
        self.patterns
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(pattern);
    }

    /// Number of collected patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Returns true if nothing was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deterministically ordered patterns, independent of thread timing.
    #[must_use]
    pub fn finish(self) -> Vec<FrequentPattern> {
        let mut patterns = self
            .patterns
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        patterns.sort_by(|a, b| {
            a.num_edges()
                .cmp(&b.num_edges())
                .then_with(|| a.key.cmp(&b.key))
        });
        patterns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{DfsCode, canonical_code};
    use sopagrami_graph::{EdgeDir, NO_LABEL};

    fn frequent(code: &DfsCode, support: usize) -> FrequentPattern {
        let pattern = code.to_pattern();
        FrequentPattern {
            key: CanonicalKey::from_code(&canonical_code(&pattern)),
            pattern,
            support,
            full_support: true,
        }
    }

    #[test]
    fn test_finish_orders_by_size_then_key() {
        let single_b = DfsCode::single(1, NO_LABEL, EdgeDir::Undirected, 1);
        let single_a = DfsCode::single(0, NO_LABEL, EdgeDir::Undirected, 1);
        let mut double = single_a.clone();
        double.push(crate::pattern::DfsEdge {
            from: 0,
            to: 2,
            from_label: 0,
            edge_label: NO_LABEL,
            dir: EdgeDir::Undirected,
            to_label: 1,
        });

        let collector = ResultCollector::new();
        collector.push(frequent(&double, 2));
        collector.push(frequent(&single_b, 3));
        collector.push(frequent(&single_a, 2));
        assert_eq!(collector.len(), 3);

        let edges: Vec<usize> = collector.finish().iter().map(FrequentPattern::num_edges).collect();
        assert_eq!(edges, vec![1, 1, 2]);
    }
}
