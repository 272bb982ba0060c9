//! Rate assumptions driving a projection: investment returns, inflation, raises

pub mod loader;

pub use loader::{load_named_rates, load_named_rates_from_reader, NamedRates};

use serde::{Deserialize, Serialize};

/// Annualized rate assumptions, stored as whole-number percentages (6.0 = 6%)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RateAssumptions {
    /// Return earned on savings before retirement
    pub pre_retirement_rate_of_return: f64,

    /// Return earned on the remaining balance during retirement
    pub post_retirement_rate_of_return: f64,

    /// Inflation; also the growth rate of retirement withdrawals
    pub inflation_rate: f64,

    /// Expected annual raise on pre-tax income
    pub annual_income_increase: f64,
}

impl RateAssumptions {
    /// Planning defaults: 6% pre-retirement, 5% post-retirement, 3% inflation, 2% raises
    pub fn default_planning() -> Self {
        Self {
            pre_retirement_rate_of_return: 6.0,
            post_retirement_rate_of_return: 5.0,
            inflation_rate: 3.0,
            annual_income_increase: 2.0,
        }
    }

    /// Convert every percentage to a decimal fraction for use in formulas
    pub fn decimals(&self) -> DecimalRates {
        DecimalRates {
            pre_retirement_return: percent_to_decimal(self.pre_retirement_rate_of_return),
            post_retirement_return: percent_to_decimal(self.post_retirement_rate_of_return),
            inflation: percent_to_decimal(self.inflation_rate),
            income_increase: percent_to_decimal(self.annual_income_increase),
        }
    }
}

impl Default for RateAssumptions {
    fn default() -> Self {
        Self::default_planning()
    }
}

/// Rate assumptions as decimal fractions (0.06 = 6%)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecimalRates {
    pub pre_retirement_return: f64,
    pub post_retirement_return: f64,
    pub inflation: f64,
    pub income_increase: f64,
}

/// Whole-number percentage to decimal fraction
pub fn percent_to_decimal(percent: f64) -> f64 {
    percent / 100.0
}
