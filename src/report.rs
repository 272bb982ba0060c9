//! CSV export and console formatting for projection results

use std::collections::BTreeMap;
use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::projection::{ProjectionResult, RetirementStatus};

/// One chart row: both trajectories at a single age
#[derive(Debug, Serialize)]
struct TrajectoryRow {
    age: u32,
    what_you_will_have: Option<f64>,
    what_you_will_need: Option<f64>,
}

/// Write both trajectories side by side, one row per age
///
/// Ages present in only one trajectory leave the other cell blank.
pub fn write_trajectories_csv<W: Write>(result: &ProjectionResult, writer: W) -> Result<()> {
    let mut by_age: BTreeMap<u32, (Option<f64>, Option<f64>)> = BTreeMap::new();
    for point in &result.savings_growth_trajectory {
        by_age.entry(point.age).or_default().0 = Some(point.value);
    }
    for point in &result.target_savings_trajectory {
        by_age.entry(point.age).or_default().1 = Some(point.value);
    }

    let mut csv_writer = csv::Writer::from_writer(writer);
    for (age, (have, need)) in by_age {
        csv_writer.serialize(TrajectoryRow {
            age,
            what_you_will_have: have,
            what_you_will_need: need,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Headline figures for one labelled projection
#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    name: &'a str,
    retirement_age: u32,
    what_you_will_have: f64,
    what_you_will_need: f64,
    status: &'static str,
    gap: f64,
    years_in_retirement: u32,
    first_year_withdrawal: f64,
    final_balance: f64,
}

/// Write one summary row per labelled projection
pub fn write_batch_summary_csv<W: Write>(results: &[(String, ProjectionResult)], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (name, result) in results {
        let summary = result.summary();
        csv_writer.serialize(SummaryRow {
            name,
            retirement_age: summary.retirement_age,
            what_you_will_have: summary.what_you_will_have,
            what_you_will_need: summary.what_you_will_need,
            status: summary.status,
            gap: summary.gap,
            years_in_retirement: summary.years_in_retirement,
            first_year_withdrawal: summary.first_year_withdrawal,
            final_balance: summary.final_balance,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Format as US dollars with thousands separators, e.g. `$1,234,568`
///
/// Non-finite values format as zero.
pub fn format_currency(value: f64, decimals: usize) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let formatted = format!("{:.*}", decimals, value.abs());
    let (whole, fraction) = match formatted.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let negative = value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };
    match fraction {
        Some(fraction) => format!("{sign}${grouped}.{fraction}"),
        None => format!("{sign}${grouped}"),
    }
}

/// Multi-line console report mirroring the summary view
pub fn render_summary(result: &ProjectionResult) -> String {
    let mut out = String::new();
    let line = |out: &mut String, label: &str, value: String| {
        out.push_str(&format!("  {:<46} {:>16}\n", label, value));
    };

    out.push_str(&format!("Retirement savings at age {}\n", result.retirement_age));
    line(&mut out, "What you'll have", format_currency(result.what_you_will_have, 0));
    line(&mut out, "What you'll need", format_currency(result.what_you_will_need, 0));
    out.push('\n');
    line(&mut out, "Current age", result.current_age.to_string());
    line(&mut out, "Retirement age", result.retirement_age.to_string());
    line(&mut out, "Life expectancy", result.life_expectancy.to_string());
    line(&mut out, "Years until retirement", result.years_until_retirement.to_string());
    line(&mut out, "Retirement span (years)", result.years_in_retirement.to_string());
    out.push('\n');
    line(&mut out, "Initial current savings", format_currency(result.initial_savings, 0));
    line(&mut out, "Total contributions", format_currency(result.total_contributions_made, 0));
    line(
        &mut out,
        "Total investment growth (pre-retirement)",
        format_currency(result.total_investment_growth, 0),
    );
    out.push('\n');
    line(
        &mut out,
        "Projected pre-tax income at retirement",
        format_currency(result.income_at_retirement, 0),
    );
    line(
        &mut out,
        "Monthly budget in retirement",
        format!(
            "{} ({:.1}%)",
            format_currency(result.monthly_budget_at_retirement, 0),
            result.budget_percent_of_retirement_income
        ),
    );
    line(
        &mut out,
        "Desired first year withdrawal",
        format_currency(result.first_year_withdrawal, 0),
    );
    line(
        &mut out,
        "Monthly contribution",
        format!(
            "{} ({:.1}%)",
            format_currency(result.monthly_contribution_amount, 0),
            result.contribution_percent_of_income
        ),
    );
    out.push('\n');
    let status = match result.status {
        RetirementStatus::OnTrack { surplus } => {
            format!("On Track (Surplus of {})", format_currency(surplus, 0))
        }
        RetirementStatus::Shortfall { amount } => {
            format!("Shortfall of {}", format_currency(amount, 0))
        }
    };
    out.push_str(&format!("  Status: {}\n", status));
    out
}
