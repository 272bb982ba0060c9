//! Project every household in a CSV of form rows
//!
//! Writes one summary row per household plus a status tally

use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use retirement_projection::inputs::load_inputs;
use retirement_projection::report::{format_currency, write_batch_summary_csv};
use retirement_projection::ScenarioRunner;

#[derive(Debug, Parser)]
#[command(about = "Run projections for a CSV of households")]
struct Args {
    /// CSV with camelCase form columns and an optional `name` column
    input: PathBuf,

    /// Summary CSV to write
    #[arg(short, long, default_value = "batch_projection_output.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    println!("Loading households from {}...", args.input.display());
    let households = load_inputs(&args.input)
        .with_context(|| format!("loading households from {}", args.input.display()))?;
    println!("Loaded {} households in {:?}", households.len(), start.elapsed());

    println!("Running projections...");
    let proj_start = Instant::now();
    let runner = ScenarioRunner::new();
    let results = runner.run_named_batch(&households);
    println!("Projections complete in {:?}", proj_start.elapsed());

    let file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    write_batch_summary_csv(&results, file)?;

    let on_track = results.iter().filter(|(_, r)| r.status.is_on_track()).count();
    let total_shortfall: f64 = results
        .iter()
        .filter(|(_, r)| !r.status.is_on_track())
        .map(|(_, r)| r.status.gap().abs())
        .sum();

    println!("\n=== Batch Summary ===");
    println!("Households: {}", results.len());
    println!("On track: {}", on_track);
    println!("Shortfall: {}", results.len() - on_track);
    println!("Combined shortfall: {}", format_currency(total_shortfall, 0));
    println!("\nOutput written to: {}", args.output.display());
    println!("Total time: {:?}", start.elapsed());

    Ok(())
}
