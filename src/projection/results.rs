//! Projection output structures

use serde::{Deserialize, Serialize};

use super::trajectory::Trajectory;

/// Whether projected savings cover the lump sum needed at retirement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum RetirementStatus {
    /// Savings meet or exceed the need
    OnTrack { surplus: f64 },
    /// Savings fall short of the need
    Shortfall { amount: f64 },
}

impl RetirementStatus {
    pub fn from_figures(what_you_will_have: f64, what_you_will_need: f64) -> Self {
        if what_you_will_have >= what_you_will_need {
            RetirementStatus::OnTrack {
                surplus: what_you_will_have - what_you_will_need,
            }
        } else {
            RetirementStatus::Shortfall {
                amount: what_you_will_need - what_you_will_have,
            }
        }
    }

    pub fn is_on_track(&self) -> bool {
        matches!(self, RetirementStatus::OnTrack { .. })
    }

    /// Surplus as a positive number, shortfall as a negative one
    pub fn gap(&self) -> f64 {
        match self {
            RetirementStatus::OnTrack { surplus } => *surplus,
            RetirementStatus::Shortfall { amount } => -amount,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RetirementStatus::OnTrack { .. } => "On Track",
            RetirementStatus::Shortfall { .. } => "Shortfall",
        }
    }
}

/// Complete projection result
///
/// Every field is derived from the `Input`; scalars are always finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    /// Projected balance at retirement age
    pub what_you_will_have: f64,

    /// Lump sum required at retirement age
    pub what_you_will_need: f64,

    /// Projected balance from current age through life expectancy
    pub savings_growth_trajectory: Trajectory,

    /// Balance needed to be on track, current age through life expectancy
    pub target_savings_trajectory: Trajectory,

    /// Nominal annual income in the year of retirement
    pub income_at_retirement: f64,

    /// Desired annual retirement income before other income sources
    pub desired_annual_retirement_income: f64,

    /// Flat annual contribution times years to retirement
    pub total_contributions_made: f64,

    /// Growth on savings and contributions before retirement
    pub total_investment_growth: f64,

    pub years_in_retirement: u32,

    /// Net withdrawal from savings in the first retirement year
    pub first_year_withdrawal: f64,

    // Summary view figures
    pub current_age: u32,
    pub retirement_age: u32,
    pub life_expectancy: u32,
    pub years_until_retirement: u32,
    pub initial_savings: f64,
    pub monthly_contribution_amount: f64,
    pub contribution_percent_of_income: f64,
    pub monthly_budget_at_retirement: f64,
    pub budget_percent_of_retirement_income: f64,
    pub status: RetirementStatus,
}

impl ProjectionResult {
    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        ProjectionSummary {
            retirement_age: self.retirement_age,
            what_you_will_have: self.what_you_will_have,
            what_you_will_need: self.what_you_will_need,
            status: self.status.label(),
            gap: self.status.gap(),
            years_in_retirement: self.years_in_retirement,
            first_year_withdrawal: self.first_year_withdrawal,
            final_balance: self
                .savings_growth_trajectory
                .last()
                .map(|p| p.value)
                .unwrap_or(0.0),
        }
    }
}

/// Flat headline figures for a projection, one row per household in reports
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionSummary {
    pub retirement_age: u32,
    pub what_you_will_have: f64,
    pub what_you_will_need: f64,
    pub status: &'static str,
    pub gap: f64,
    pub years_in_retirement: u32,
    pub first_year_withdrawal: f64,
    /// Projected balance left at life expectancy
    pub final_balance: f64,
}
