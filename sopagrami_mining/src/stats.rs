use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Run-wide counters, updated concurrently by the workers.
#[derive(Debug, Default)]
pub struct MiningStats {
    seeds: AtomicU64,
    patterns_evaluated: AtomicU64,
    frequent: AtomicU64,
    infrequent: AtomicU64,
    duplicates_skipped: AtomicU64,
    embeddings_found: AtomicU64,
    domain_values_pruned: AtomicU64,
}

/// A point-in-time copy of [`MiningStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MiningStatsSnapshot {
    /// Single-edge seeds dispatched.
    pub seeds: u64,
    /// Patterns whose support was computed.
    pub patterns_evaluated: u64,
    /// Patterns found frequent.
    pub frequent: u64,
    /// Patterns found infrequent.
    pub infrequent: u64,
    /// Extensions dropped because their key was already seen.
    pub duplicates_skipped: u64,
    /// Embeddings found by the support search.
    pub embeddings_found: u64,
    /// Domain values removed by the support search.
    pub domain_values_pruned: u64,
}

impl MiningStats {
    /// Creates counters starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add to the number of dispatched seeds.
    pub fn add_seeds(&self, count: u64) {
        self.seeds.fetch_add(count, Ordering::Relaxed);
    }

    /// Record one support evaluation.
    pub fn record_evaluation(&self, frequent: bool, embeddings: u64, pruned: u64) {
        self.patterns_evaluated.fetch_add(1, Ordering::Relaxed);
        if frequent {
            self.frequent.fetch_add(1, Ordering::Relaxed);
        } else {
            self.infrequent.fetch_add(1, Ordering::Relaxed);
        }
        self.embeddings_found.fetch_add(embeddings, Ordering::Relaxed);
        self.domain_values_pruned.fetch_add(pruned, Ordering::Relaxed);
    }

    /// Increment the number of extensions skipped as already seen.
    pub fn inc_duplicates(&self, by: u64) {
        self.duplicates_skipped.fetch_add(by, Ordering::Relaxed);
    }

    /// Read the counters for display/reporting.
    #[must_use]
    pub fn snapshot(&self) -> MiningStatsSnapshot {
        MiningStatsSnapshot {
            seeds: self.seeds.load(Ordering::Relaxed),
            patterns_evaluated: self.patterns_evaluated.load(Ordering::Relaxed),
            frequent: self.frequent.load(Ordering::Relaxed),
            infrequent: self.infrequent.load(Ordering::Relaxed),
            duplicates_skipped: self.duplicates_skipped.load(Ordering::Relaxed),
            embeddings_found: self.embeddings_found.load(Ordering::Relaxed),
            domain_values_pruned: self.domain_values_pruned.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_at_zero() {
        assert_eq!(MiningStats::new().snapshot(), MiningStatsSnapshot::default());
    }

    #[test]
    fn test_snapshot_reflects_updates() {
        let stats = MiningStats::new();
        stats.add_seeds(3);
        stats.record_evaluation(true, 5, 2);
        stats.record_evaluation(false, 1, 0);
        stats.inc_duplicates(4);
        let snapshot = stats.snapshot();
        assert_eq!(snapshot.seeds, 3);
        assert_eq!(snapshot.patterns_evaluated, 2);
        assert_eq!((snapshot.frequent, snapshot.infrequent), (1, 1));
        assert_eq!(snapshot.duplicates_skipped, 4);
        assert_eq!(snapshot.embeddings_found, 6);
        assert_eq!(snapshot.domain_values_pruned, 2);
    }
}
