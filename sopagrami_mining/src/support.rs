//! Frequency decisions on top of the embedding search.

use sopagrami_common::Params;
use sopagrami_graph::MiningView;

use crate::embedding::EmbeddingSearch;
use crate::pattern::{CanonicalKey, Pattern};
use crate::results::FrequentPattern;
use crate::stats::MiningStats;

/// Support decision for one pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Support {
    /// The pattern reaches the threshold.
    Frequent {
        /// MNI support (exact when `exact`, otherwise at least the threshold).
        support: usize,
        /// Whether every candidate image was decided.
        exact: bool,
    },
    /// The pattern cannot reach the threshold.
    Infrequent,
}

impl Support {
    /// Returns true for [`Support::Frequent`].
    #[must_use]
    pub const fn is_frequent(&self) -> bool {
        matches!(self, Self::Frequent { .. })
    }
}

/// Decides frequency of patterns against one view.
#[derive(Debug, Clone, Copy)]
pub struct SupportOracle<'a, 'g> {
    search: EmbeddingSearch<'a, 'g>,
    stats: &'a MiningStats,
}

impl<'a, 'g> SupportOracle<'a, 'g> {
    /// Builds an oracle for the threshold and support mode of `params`.
    #[must_use]
    pub const fn new(view: &'a MiningView<'g>, params: &Params, stats: &'a MiningStats) -> Self {
        Self {
            search: EmbeddingSearch::new(view, params.threshold(), params.compute_full_support),
            stats,
        }
    }

    /// Evaluates the MNI support of `pattern`.
    #[must_use]
    pub fn evaluate(&self, pattern: &Pattern) -> Support {
        let outcome = self.search.run(pattern);
        self.stats
            .record_evaluation(outcome.frequent, outcome.embeddings, outcome.pruned);
        if outcome.frequent {
            Support::Frequent {
                support: outcome.support(),
                exact: outcome.exact,
            }
        } else {
            Support::Infrequent
        }
    }
}

/// Turns a frequent decision into a result record.
#[must_use]
pub fn record(pattern: Pattern, key: CanonicalKey, outcome: Support) -> Option<FrequentPattern> {
    match outcome {
        Support::Frequent { support, exact } => Some(FrequentPattern {
            pattern,
            key,
            support,
            full_support: exact,
        }),
        Support::Infrequent => None,
    }
}
