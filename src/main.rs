// ==============================================================================
// main.rs - Subtype Reconciler Entry Point
// ==============================================================================
// Description: Main entry point for subtype reconciliation reporting
// Author: Matt Barham
// Created: 2026-02-09
// Modified: 2026-02-16
// Version: 1.0.0
// ==============================================================================

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod aggregator;
mod arbiter;
mod models;
mod output;
mod parsers;
mod processor;
mod sample_id;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Region input tables (matched to PRRT/INT/ENV by filename) followed
    /// by the output path for the unified report
    #[arg(required = true, num_args = 2..)]
    paths: Vec<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "subtype_reconciler=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Subtype Reconciler starting...");

    // Parse command line arguments
    let args = Args::parse();

    // Last path is the report destination, everything before it is input
    let (output_path, inputs) = args
        .paths
        .split_last()
        .ok_or_else(|| anyhow::anyhow!("Expected input paths followed by an output path"))?;

    // Create processor
    let processor = processor::ReconcileProcessor::new(inputs.to_vec(), output_path.clone());

    // Reconcile and report
    match processor.process() {
        Ok(result_path) => {
            info!("Reconciliation completed successfully: {:?}", result_path);
            Ok(())
        }
        Err(e) => {
            warn!("Reconciliation failed: {}", e);
            Err(e)
        }
    }
}
