//! SoPaGraMi command-line tool
//!
//! Loads a `.lg` graph, mines every pattern whose MNI support reaches the
//! threshold and prints them one per line (or as JSON).

#[global_allocator]
/// Global allocator using jemalloc for better performance in parallel workloads.
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

mod args;

use clap::Parser;
use sopagrami_graph::DataGraph;
use sopagrami_mining::{FrequentPattern, MiningOutput, run_sopagrami};
use tracing::info;

use args::Args;

/// One result line: vertex count, edge count, support and canonical key.
fn pattern_line(pattern: &FrequentPattern) -> String {
    format!(
        "k={} |E|={} support={} full={} key={}",
        pattern.num_vertices(),
        pattern.num_edges(),
        pattern.support,
        pattern.full_support,
        pattern.key
    )
}

fn print_text(output: &MiningOutput, limit: usize) {
    println!("Frequent patterns: {}", output.frequent_patterns.len());
    for pattern in output.frequent_patterns.iter().take(limit) {
        println!("{}", pattern_line(pattern));
    }
    if output.frequent_patterns.len() > limit {
        println!("... {} more", output.frequent_patterns.len() - limit);
    }
}

fn print_json(output: &MiningOutput, limit: usize) -> Result<(), serde_json::Error> {
    let shown = MiningOutput {
        frequent_patterns: output.frequent_patterns.iter().take(limit).cloned().collect(),
        stats: output.stats,
    };
    println!("{}", serde_json::to_string_pretty(&shown)?);
    Ok(())
}

/// Runs the miner.
///
/// 1. Initializes logging
/// 2. Parses command-line arguments
/// 3. Loads the graph
/// 4. Mines and prints the frequent patterns
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_thread_ids(true)
        .init();

    let args = Args::parse();
    let params = args.to_params();

    info!("Loading graph: {}", args.graph.display());
    let graph = DataGraph::load_from_lg(&args.graph, params.directed)?;
    let limit = args.limit.unwrap_or(usize::MAX);

    if !args.json {
        println!(
            "Graph loaded: |V|={}, |E|={}",
            graph.num_vertices(),
            graph.num_edges()
        );
        println!(
            "Settings: tau={} directed={} sorted={} threads={} full_support={}",
            params.tau,
            params.directed && graph.is_directed(),
            params.sorted_seeds,
            params.num_threads,
            params.compute_full_support
        );
    }

    let output = run_sopagrami(&graph, &params)?;

    if args.json {
        print_json(&output, limit)?;
    } else {
        print_text(&output, limit);
    }

    Ok(())
}
