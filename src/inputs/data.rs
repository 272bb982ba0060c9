//! Household input record consumed by the projection engine

use serde::{Deserialize, Serialize};

use crate::assumptions::RateAssumptions;
use crate::error::{Error, Result};

/// How a monthly contribution or budget figure is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AmountKind {
    /// Literal currency amount per month
    #[serde(alias = "$")]
    Amount,
    /// Percentage of the relevant monthly income
    #[serde(alias = "%")]
    PercentOfIncome,
}

impl AmountKind {
    /// Parse a form tag: `$`/`amount` or `%`/`percent`, case-insensitive
    pub fn from_tag(field: &'static str, tag: &str) -> Result<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "$" | "amount" => Ok(AmountKind::Amount),
            "%" | "percent" | "percentofincome" => Ok(AmountKind::PercentOfIncome),
            _ => Err(Error::UnknownAmountKind {
                field,
                tag: tag.to_string(),
            }),
        }
    }

    pub fn is_percent(&self) -> bool {
        matches!(self, AmountKind::PercentOfIncome)
    }
}

/// A numeric form field that may still hold partially typed text
///
/// Percentage fields keep their raw text when it does not parse so it can be
/// shown back to the user. For computation an `Unresolved` value counts as 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged, from = "FieldRepr")]
pub enum FieldValue {
    Resolved(f64),
    Unresolved(String),
}

impl FieldValue {
    /// Resolve form text for a field of the given kind
    ///
    /// Blank text is 0. Text that does not parse stays `Unresolved` for
    /// percentage fields and becomes 0 for amount fields.
    pub fn parse(raw: &str, kind: AmountKind) -> Self {
        if raw.trim().is_empty() {
            return FieldValue::Resolved(0.0);
        }
        match parse_number(raw) {
            Some(value) => FieldValue::Resolved(value),
            None if kind.is_percent() => FieldValue::Unresolved(raw.to_string()),
            None => FieldValue::Resolved(0.0),
        }
    }

    /// Numeric value used by the engine
    pub fn value(&self) -> f64 {
        match self {
            FieldValue::Resolved(value) if value.is_finite() => *value,
            FieldValue::Resolved(_) => 0.0,
            FieldValue::Unresolved(raw) => {
                log::warn!("Unresolved field value {:?} treated as 0", raw);
                0.0
            }
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, FieldValue::Resolved(_))
    }

    /// Text to redisplay in the form
    pub fn display_text(&self) -> String {
        match self {
            FieldValue::Resolved(value) => value.to_string(),
            FieldValue::Unresolved(raw) => raw.clone(),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Resolved(value)
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Resolved(0.0)
    }
}

/// Wire shape accepted for a `FieldValue`: a JSON number or a string
#[derive(Deserialize)]
#[serde(untagged)]
enum FieldRepr {
    Number(f64),
    Text(String),
}

impl From<FieldRepr> for FieldValue {
    fn from(repr: FieldRepr) -> Self {
        match repr {
            FieldRepr::Number(value) => FieldValue::Resolved(value),
            FieldRepr::Text(text) if text.trim().is_empty() => FieldValue::Resolved(0.0),
            FieldRepr::Text(text) => match parse_number(&text) {
                Some(value) => FieldValue::Resolved(value),
                None => FieldValue::Unresolved(text),
            },
        }
    }
}

/// Parse form text into a finite number
///
/// Accepts a leading `$`, a trailing `%` and thousands separators.
/// `NaN` and infinities are rejected.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed);
    let cleaned: String = trimmed.chars().filter(|c| *c != ',').collect();
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Current financial facts plus rate assumptions for one projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Input {
    pub current_age: u32,

    /// Gross annual income today
    pub annual_pre_tax_income: f64,

    pub current_retirement_savings: f64,

    /// Monthly contribution, read per `contribution_type`
    pub monthly_contribution: FieldValue,
    pub contribution_type: AmountKind,

    /// Monthly retirement budget, read per `budget_type`
    pub monthly_budget_in_retirement: FieldValue,
    pub budget_type: AmountKind,

    /// Annual income in retirement from other sources (pensions etc.)
    pub other_retirement_income: f64,

    pub retirement_age: u32,
    pub life_expectancy: u32,

    #[serde(flatten)]
    pub assumptions: RateAssumptions,
}

impl Input {
    /// Years of accumulation, zero when already at or past retirement age
    pub fn years_to_retirement(&self) -> u32 {
        self.retirement_age.saturating_sub(self.current_age)
    }

    /// Years of drawdown, zero when life expectancy is not past retirement age
    pub fn years_in_retirement(&self) -> u32 {
        self.life_expectancy.saturating_sub(self.retirement_age)
    }

    pub fn monthly_income(&self) -> f64 {
        self.annual_pre_tax_income / 12.0
    }

    /// Resolved monthly contribution in currency
    pub fn monthly_contribution_amount(&self) -> f64 {
        let figure = self.monthly_contribution.value();
        match self.contribution_type {
            AmountKind::Amount => figure,
            AmountKind::PercentOfIncome => self.monthly_income() * (figure / 100.0),
        }
    }

    /// Contribution for a full year; level across the accumulation phase
    pub fn annual_contribution(&self) -> f64 {
        self.monthly_contribution_amount() * 12.0
    }

    /// Ages that cannot describe a real plan (retire before now, die before retiring)
    pub fn has_inconsistent_ages(&self) -> bool {
        self.retirement_age < self.current_age || self.life_expectancy < self.retirement_age
    }

    /// Same household under different rate assumptions
    pub fn with_assumptions(&self, assumptions: RateAssumptions) -> Self {
        Self {
            assumptions,
            ..self.clone()
        }
    }
}

impl Default for Input {
    /// The calculator's starting form
    fn default() -> Self {
        Self {
            current_age: 45,
            annual_pre_tax_income: 150_000.0,
            current_retirement_savings: 30_000.0,
            monthly_contribution: FieldValue::Resolved(500.0),
            contribution_type: AmountKind::Amount,
            monthly_budget_in_retirement: FieldValue::Resolved(70.0),
            budget_type: AmountKind::PercentOfIncome,
            other_retirement_income: 0.0,
            retirement_age: 67,
            life_expectancy: 95,
            assumptions: RateAssumptions::default_planning(),
        }
    }
}
