//! Archivist datastore smoke test.
//!
//! Writes a marker document to a collection, reads the collection back and
//! prints a pass/fail report. Credentials come from the same environment
//! variables the app uses (`ARCHIVIST_DATASTORE_*`).
//!
//! # Usage
//!
//! ```bash
//! # Round trip against the configured Firestore project
//! archivist-smoke
//!
//! # Different collection, machine-readable output
//! archivist-smoke --collection smoke --json
//!
//! # Dry run without touching the network
//! archivist-smoke --in-memory
//! ```

mod output;

use anyhow::Result;
use archivist_core::config::ServiceConfig;
use archivist_core::datastore::{Datastore, FirestoreDatastore, InMemoryDatastore};
use archivist_core::smoke::{run_round_trip, DEFAULT_COLLECTION};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Archivist datastore smoke test.
///
/// Performs a write-then-read round trip and reports whether the datastore
/// is reachable with the configured credentials.
#[derive(Parser)]
#[command(name = "archivist-smoke", version, about)]
struct Cli {
    /// Collection to write the marker document into
    #[arg(short, long, default_value = DEFAULT_COLLECTION)]
    collection: String,

    /// Output the report as JSON
    #[arg(long)]
    json: bool,

    /// Run against a throwaway in-memory store instead of Firestore
    #[arg(long)]
    in_memory: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let store: Box<dyn Datastore> = if cli.in_memory {
        Box::new(InMemoryDatastore::new())
    } else {
        let config = ServiceConfig::from_env();
        tracing::info!(config = ?config.datastore, "loaded datastore configuration");
        Box::new(
            FirestoreDatastore::new(config.datastore).with_probe_collection(&cli.collection),
        )
    };

    if !cli.json {
        println!("{}", output::banner());
    }

    let report = run_round_trip(store.as_ref(), &cli.collection).await;

    let rendered = if cli.json {
        output::format_json(&report)?
    } else {
        output::format_human(&report)
    };
    println!("{}", rendered);

    if !report.passed() {
        std::process::exit(1);
    }
    Ok(())
}
