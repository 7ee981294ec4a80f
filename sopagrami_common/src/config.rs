//! Parameters for a frequent-subgraph mining run.
//!
//! The parameter set mirrors the options recognized by the engine:
//! - tau: minimum MNI support a pattern needs to be reported.
//! - directed: whether pattern edges carry a direction.
//! - sorted_seeds: order single-edge seeds by estimated support before dispatch.
//! - num_threads: size of the worker pool.
//! - compute_full_support: compute exact MNI support instead of stopping once
//!   the threshold is confirmed.
//! - max_edges: optional upper bound on the number of edges of a pattern.
//!
//! Quick examples
//!
//! Defaults of the command-line tool (tau = 2, undirected, sorted seeds, 4 threads):
//! ```
//! use sopagrami_common::Params;
//! let params = Params::default();
//! assert_eq!(params.tau, 2);
//! ```
//!
//! Directed mining with threshold-only support on 8 threads:
//! ```
//! use sopagrami_common::Params;
//! let params = Params::builder()
//!     .tau(15)
//!     .directed(true)
//!     .num_threads(8)
//!     .compute_full_support(false)
//!     .build();
//! assert!(params.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default minimum support.
pub const DEFAULT_TAU: u32 = 2;
/// Default worker pool size.
pub const DEFAULT_NUM_THREADS: usize = 4;

/// Errors raised when a parameter set is rejected before mining starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamsError {
    /// The support threshold must be at least one.
    #[error("tau must be >= 1, got {0}")]
    InvalidTau(u32),

    /// The worker pool needs at least one thread.
    #[error("num_threads must be >= 1, got {0}")]
    InvalidThreads(usize),

    /// A pattern needs at least one edge.
    #[error("max_edges must be >= 1 when set, got {0}")]
    InvalidMaxEdges(usize),
}

/// Mining parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Params {
    /// Minimum MNI support threshold.
    pub tau: u32,
    /// Treat edges as directed.
    pub directed: bool,
    /// Order seed patterns by estimated support before dispatch.
    pub sorted_seeds: bool,
    /// Worker pool size.
    pub num_threads: usize,
    /// Compute the exact MNI support of every reported pattern.
    pub compute_full_support: bool,
    /// Largest number of edges a reported pattern may have.
    pub max_edges: Option<usize>,
}

impl Default for Params {
    /// Defaults mirror the command-line tool.
    fn default() -> Self {
        Self {
            tau: DEFAULT_TAU,
            directed: false,
            sorted_seeds: true,
            num_threads: DEFAULT_NUM_THREADS,
            compute_full_support: true,
            max_edges: None,
        }
    }
}

impl Params {
    /// Starts a builder from the default parameter set.
    #[must_use]
    pub fn builder() -> ParamsBuilder {
        ParamsBuilder::default()
    }

    /// Checks the parameter set before any mining work begins.
    ///
    /// # Errors
    ///
    /// Returns a [`ParamsError`] when `tau < 1`, `num_threads < 1` or
    /// `max_edges == Some(0)`.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.tau < 1 {
            return Err(ParamsError::InvalidTau(self.tau));
        }
        if self.num_threads < 1 {
            return Err(ParamsError::InvalidThreads(self.num_threads));
        }
        if let Some(0) = self.max_edges {
            return Err(ParamsError::InvalidMaxEdges(0));
        }
        Ok(())
    }

    /// Support threshold as a count.
    #[must_use]
    pub const fn threshold(&self) -> usize {
        self.tau as usize
    }

    /// Returns true if a pattern with `edges` edges may still be extended.
    #[must_use]
    pub fn allows_extension(&self, edges: usize) -> bool {
        self.max_edges.is_none_or(|max| edges < max)
    }
}

/// Fluent builder for [`Params`].
#[derive(Debug, Clone, Default)]
pub struct ParamsBuilder {
    params: Params,
}

impl ParamsBuilder {
    /// Sets the minimum support threshold.
    #[must_use]
    pub const fn tau(mut self, tau: u32) -> Self {
        self.params.tau = tau;
        self
    }

    /// Sets directed mining.
    #[must_use]
    pub const fn directed(mut self, directed: bool) -> Self {
        self.params.directed = directed;
        self
    }

    /// Enables or disables seed ordering.
    #[must_use]
    pub const fn sorted_seeds(mut self, sorted_seeds: bool) -> Self {
        self.params.sorted_seeds = sorted_seeds;
        self
    }

    /// Sets the worker pool size.
    #[must_use]
    pub const fn num_threads(mut self, num_threads: usize) -> Self {
        self.params.num_threads = num_threads;
        self
    }

    /// Enables or disables exact support computation.
    #[must_use]
    pub const fn compute_full_support(mut self, full: bool) -> Self {
        self.params.compute_full_support = full;
        self
    }

    /// Bounds the number of edges of reported patterns.
    #[must_use]
    pub const fn max_edges(mut self, max_edges: Option<usize>) -> Self {
        self.params.max_edges = max_edges;
        self
    }

    /// Finishes the builder. Validation happens when mining starts.
    #[must_use]
    pub fn build(self) -> Params {
        self.params
    }
}
