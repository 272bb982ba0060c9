//! Project one household under each named rate scenario in a CSV

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use retirement_projection::assumptions::load_named_rates;
use retirement_projection::inputs::load_input_json;
use retirement_projection::report::{format_currency, write_batch_summary_csv};
use retirement_projection::{Input, ScenarioRunner};

#[derive(Debug, Parser)]
#[command(about = "Compare one household across rate scenarios")]
struct Args {
    /// Scenario CSV: name,pre_retirement_return,post_retirement_return,inflation,income_increase
    rates: PathBuf,

    /// Household JSON; the default household is used when omitted
    #[arg(long)]
    input: Option<PathBuf>,

    /// Write the scenario summaries to this CSV instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let input = match &args.input {
        Some(path) => load_input_json(path)
            .with_context(|| format!("reading input from {}", path.display()))?,
        None => Input::default(),
    };
    let scenarios = load_named_rates(&args.rates)
        .with_context(|| format!("loading rate scenarios from {}", args.rates.display()))?;

    let runner = ScenarioRunner::new();
    let results = runner.run_scenarios(&input, &scenarios);

    match &args.output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            write_batch_summary_csv(&results, file)?;
            println!("Wrote {} scenarios to {}", results.len(), path.display());
        }
        None => {
            println!(
                "{:<20} {:>16} {:>16} {:>12}",
                "Scenario", "Will have", "Will need", "Status"
            );
            println!("{}", "-".repeat(67));
            for (name, result) in &results {
                println!(
                    "{:<20} {:>16} {:>16} {:>12}",
                    name,
                    format_currency(result.what_you_will_have, 0),
                    format_currency(result.what_you_will_need, 0),
                    result.status.label()
                );
            }
        }
    }

    Ok(())
}
