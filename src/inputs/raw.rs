//! Raw form input and its normalization into an `Input`
//!
//! Every field arrives as optional text, exactly as a form or spreadsheet row
//! would deliver it. `normalize` is the single boundary where text becomes
//! numbers; after it the engine only ever sees resolved values.

use serde::{Deserialize, Serialize};

use super::data::{parse_number, AmountKind, FieldValue, Input};
use crate::assumptions::RateAssumptions;
use crate::error::Result;

/// Unparsed form fields, named after the form's inputs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawInput {
    pub current_age: Option<String>,
    pub annual_pre_tax_income: Option<String>,
    pub current_retirement_savings: Option<String>,
    pub monthly_contribution: Option<String>,
    pub contribution_type: Option<String>,
    pub monthly_budget_in_retirement: Option<String>,
    pub budget_type: Option<String>,
    pub other_retirement_income: Option<String>,
    pub retirement_age: Option<String>,
    pub life_expectancy: Option<String>,
    pub pre_retirement_rate_of_return: Option<String>,
    pub post_retirement_rate_of_return: Option<String>,
    pub inflation_rate: Option<String>,
    pub annual_income_increase: Option<String>,
}

impl RawInput {
    /// Resolve every field to its numeric form
    ///
    /// Unparseable numbers become 0, except percentage contribution/budget
    /// figures which keep their text as `FieldValue::Unresolved`. An unknown
    /// `$`/`%` tag is the only error.
    pub fn normalize(&self) -> Result<Input> {
        let contribution_type = match non_blank(&self.contribution_type) {
            Some(tag) => AmountKind::from_tag("contributionType", tag)?,
            None => AmountKind::Amount,
        };
        let budget_type = match non_blank(&self.budget_type) {
            Some(tag) => AmountKind::from_tag("budgetType", tag)?,
            None => AmountKind::PercentOfIncome,
        };

        Ok(Input {
            current_age: age(&self.current_age),
            annual_pre_tax_income: number(&self.annual_pre_tax_income),
            current_retirement_savings: number(&self.current_retirement_savings),
            monthly_contribution: figure(&self.monthly_contribution, contribution_type),
            contribution_type,
            monthly_budget_in_retirement: figure(&self.monthly_budget_in_retirement, budget_type),
            budget_type,
            other_retirement_income: number(&self.other_retirement_income),
            retirement_age: age(&self.retirement_age),
            life_expectancy: age(&self.life_expectancy),
            assumptions: RateAssumptions {
                pre_retirement_rate_of_return: number(&self.pre_retirement_rate_of_return),
                post_retirement_rate_of_return: number(&self.post_retirement_rate_of_return),
                inflation_rate: number(&self.inflation_rate),
                annual_income_increase: number(&self.annual_income_increase),
            },
        })
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn number(field: &Option<String>) -> f64 {
    field.as_deref().and_then(parse_number).unwrap_or(0.0)
}

fn age(field: &Option<String>) -> u32 {
    let years = number(field);
    if years <= 0.0 {
        0
    } else {
        years.trunc().min(u32::MAX as f64) as u32
    }
}

fn figure(field: &Option<String>, kind: AmountKind) -> FieldValue {
    match field.as_deref() {
        Some(raw) => FieldValue::parse(raw, kind),
        None => FieldValue::Resolved(0.0),
    }
}
