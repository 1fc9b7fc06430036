use anyhow::Context;
use atomicwrites::{AllowOverwrite, AtomicFile};
use clap::Parser;
use peerprice::{
    EngineConfig, Listing, PricingAggregator, SimilarityEngine,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Competitor similarity and price recommendation engine
#[derive(Parser, Debug)]
#[command(name = "peerprice")]
#[command(about = "Rank listing competitors and recommend prices", long_about = None)]
struct Args {
    /// Path to the listings JSON file (an array of listing records)
    input: PathBuf,

    /// Directory for the output relations
    #[arg(short, long, default_value = "./out")]
    out_dir: PathBuf,

    /// Competitors retained per listing
    #[arg(long, default_value_t = 25)]
    top_k: usize,

    /// Only compare listings within the same location cluster
    /// (pre-filter; changes the candidate set, not the scoring)
    #[arg(long)]
    same_cluster_only: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting peerprice v{}", env!("CARGO_PKG_VERSION"));
    info!("Input: {:?}", args.input);
    info!("Output directory: {:?}", args.out_dir);

    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("reading listings from {:?}", args.input))?;
    let listings: Vec<Listing> =
        serde_json::from_str(&raw).context("parsing listings JSON")?;
    info!("Loaded {} listings", listings.len());

    let engine = SimilarityEngine::new(EngineConfig {
        top_k: args.top_k,
        same_cluster_only: args.same_cluster_only,
    });

    let ranking = engine.run(&listings);
    info!(
        "Calculated {} competitor relationships ({} listings skipped)",
        ranking.edges.len(),
        ranking.skipped.len()
    );

    let analyses = PricingAggregator::new().analyze(&listings, &ranking.edges);

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {:?}", args.out_dir))?;

    // Each relation is written as a complete replacement set: a partial run
    // never leaves a mix of old and new rows on disk.
    write_relation(&args.out_dir.join("competitor_edges.json"), &ranking.edges)?;
    write_relation(&args.out_dir.join("pricing_analysis.json"), &analyses)?;

    info!("Run complete");
    Ok(())
}

fn write_relation<T: Serialize>(path: &Path, rows: &[T]) -> anyhow::Result<()> {
    AtomicFile::new(path, AllowOverwrite)
        .write(|f| serde_json::to_writer_pretty(f, rows))
        .with_context(|| format!("writing {:?}", path))?;
    info!("Wrote {} rows to {:?}", rows.len(), path);
    Ok(())
}
