//! Retirement Projection CLI
//!
//! Projects one household, from flags or a JSON input file, and prints the
//! summary view.

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use retirement_projection::inputs::load_input_json;
use retirement_projection::report::{render_summary, write_trajectories_csv};
use retirement_projection::{compute_projection, AmountKind, FieldValue, Input, RateAssumptions};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Amount,
    Percent,
}

impl From<Kind> for AmountKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Amount => AmountKind::Amount,
            Kind::Percent => AmountKind::PercentOfIncome,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "retirement", about = "Project retirement savings against what you'll need")]
struct Cli {
    /// Read the household from a JSON file instead of the flags below
    #[arg(long)]
    input: Option<PathBuf>,

    #[arg(long, default_value_t = 45)]
    current_age: u32,

    #[arg(long, default_value_t = 150_000.0)]
    annual_income: f64,

    #[arg(long, default_value_t = 30_000.0)]
    current_savings: f64,

    /// Monthly contribution, read per --contribution-type ("$500", "4%", "1,250")
    #[arg(long, default_value = "500")]
    monthly_contribution: String,

    #[arg(long, value_enum, default_value_t = Kind::Amount)]
    contribution_type: Kind,

    /// Monthly retirement budget, read per --budget-type
    #[arg(long, default_value = "70")]
    monthly_budget: String,

    #[arg(long, value_enum, default_value_t = Kind::Percent)]
    budget_type: Kind,

    /// Annual income in retirement from pensions and other sources
    #[arg(long, default_value_t = 0.0)]
    other_income: f64,

    #[arg(long, default_value_t = 67)]
    retirement_age: u32,

    #[arg(long, default_value_t = 95)]
    life_expectancy: u32,

    /// Pre-retirement rate of return in percent
    #[arg(long, default_value_t = 6.0, allow_hyphen_values = true)]
    pre_return: f64,

    /// Post-retirement rate of return in percent
    #[arg(long, default_value_t = 5.0, allow_hyphen_values = true)]
    post_return: f64,

    /// Inflation rate in percent
    #[arg(long, default_value_t = 3.0, allow_hyphen_values = true)]
    inflation: f64,

    /// Annual income increase in percent
    #[arg(long, default_value_t = 2.0, allow_hyphen_values = true)]
    income_increase: f64,

    /// Write both trajectories to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the full result as JSON instead of the summary
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn to_input(&self) -> Result<Input> {
        if let Some(path) = &self.input {
            return load_input_json(path)
                .with_context(|| format!("reading input from {}", path.display()));
        }

        let contribution_type: AmountKind = self.contribution_type.into();
        let budget_type: AmountKind = self.budget_type.into();

        Ok(Input {
            current_age: self.current_age,
            annual_pre_tax_income: self.annual_income,
            current_retirement_savings: self.current_savings,
            monthly_contribution: FieldValue::parse(&self.monthly_contribution, contribution_type),
            contribution_type,
            monthly_budget_in_retirement: FieldValue::parse(&self.monthly_budget, budget_type),
            budget_type,
            other_retirement_income: self.other_income,
            retirement_age: self.retirement_age,
            life_expectancy: self.life_expectancy,
            assumptions: RateAssumptions {
                pre_retirement_rate_of_return: self.pre_return,
                post_retirement_rate_of_return: self.post_return,
                inflation_rate: self.inflation,
                annual_income_increase: self.income_increase,
            },
        })
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let input = cli.to_input()?;
    let result = compute_projection(&input);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_summary(&result));
        println!("\nAssumptions:");
        println!("  Pre-retirement rate of return: {}%", input.assumptions.pre_retirement_rate_of_return);
        println!("  Post-retirement rate of return: {}%", input.assumptions.post_retirement_rate_of_return);
        println!("  Annual income increase: {}%", input.assumptions.annual_income_increase);
        println!("  Inflation rate: {}%", input.assumptions.inflation_rate);
    }

    if let Some(path) = &cli.csv {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        write_trajectories_csv(&result, file)
            .with_context(|| format!("writing trajectories to {}", path.display()))?;
        eprintln!("Trajectories written to {}", path.display());
    }

    Ok(())
}
