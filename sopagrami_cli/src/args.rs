use std::path::PathBuf;

use clap::Parser;
use sopagrami_common::{DEFAULT_NUM_THREADS, DEFAULT_TAU, Params};

/// SoPaGraMi - frequent subgraph mining on a single large graph
#[derive(Parser, Debug)]
#[command(name = "sopagrami")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input graph in `.lg` format
    pub graph: PathBuf,

    /// Minimum MNI support of a reported pattern
    #[arg(short = 't', long, default_value_t = DEFAULT_TAU)]
    pub tau: u32,

    /// Mine directed patterns (requires a directed input)
    #[arg(short = 'd', long, default_value_t = false)]
    pub directed: bool,

    /// Dispatch seeds in key order instead of by estimated support
    #[arg(long, default_value_t = false)]
    pub unsorted: bool,

    /// Worker threads, 0 for all available cores
    #[arg(short = 'j', long, default_value_t = DEFAULT_NUM_THREADS)]
    pub threads: usize,

    /// Stop counting images once a pattern is known to be frequent
    #[arg(long, default_value_t = false)]
    pub threshold_only: bool,

    /// Largest number of edges of a reported pattern
    #[arg(long)]
    pub max_edges: Option<usize>,

    /// Print the result as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Print at most this many patterns
    #[arg(long)]
    pub limit: Option<usize>,
}

impl Args {
    /// Convert command-line arguments into mining parameters
    pub fn to_params(&self) -> Params {
        Params::builder()
            .tau(self.tau)
            .directed(self.directed)
            .sorted_seeds(!self.unsorted)
            .num_threads(self.num_threads())
            .compute_full_support(!self.threshold_only)
            .max_edges(self.max_edges)
            .build()
    }

    fn num_threads(&self) -> usize {
        if self.threads > 0 {
            return self.threads;
        }
        std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
    }
}
