//! CSV-based loader for named rate scenarios
//!
//! Expected columns: `name,pre_retirement_return,post_retirement_return,inflation,income_increase`
//! with every rate given as a whole-number percentage.

use std::io::Read;
use std::path::Path;

use csv::Reader;
use serde::{Deserialize, Serialize};

use super::RateAssumptions;
use crate::error::Result;

/// A labelled set of rate assumptions, e.g. "conservative" or "aggressive"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedRates {
    pub name: String,
    pub rates: RateAssumptions,
}

impl NamedRates {
    pub fn new(name: impl Into<String>, rates: RateAssumptions) -> Self {
        Self {
            name: name.into(),
            rates,
        }
    }
}

/// Raw CSV row matching the rate scenario columns
#[derive(Debug, Deserialize)]
struct CsvRow {
    name: String,
    pre_retirement_return: f64,
    post_retirement_return: f64,
    inflation: f64,
    income_increase: f64,
}

impl CsvRow {
    fn into_named(self) -> NamedRates {
        NamedRates {
            name: self.name,
            rates: RateAssumptions {
                pre_retirement_rate_of_return: self.pre_retirement_return,
                post_retirement_rate_of_return: self.post_retirement_return,
                inflation_rate: self.inflation,
                annual_income_increase: self.income_increase,
            },
        }
    }
}

/// Load rate scenarios from a CSV file
pub fn load_named_rates<P: AsRef<Path>>(path: P) -> Result<Vec<NamedRates>> {
    let file = std::fs::File::open(path)?;
    load_named_rates_from_reader(file)
}

/// Load rate scenarios from any reader (e.g., string buffer)
pub fn load_named_rates_from_reader<R: Read>(reader: R) -> Result<Vec<NamedRates>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut scenarios = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        scenarios.push(row.into_named());
    }

    log::info!("Loaded {} rate scenarios", scenarios.len());
    Ok(scenarios)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SAMPLE: &str = "\
name,pre_retirement_return,post_retirement_return,inflation,income_increase
conservative,4,3,3,1.5
moderate,6,5,3,2
aggressive,8,6,2.5,3
";

    #[test]
    fn test_load_named_rates() {
        let scenarios = load_named_rates_from_reader(SAMPLE.as_bytes()).expect("valid csv");
        assert_eq!(scenarios.len(), 3);
        assert_eq!(scenarios[0].name, "conservative");
        assert_relative_eq!(scenarios[0].rates.annual_income_increase, 1.5);
        assert_eq!(scenarios[1].rates, RateAssumptions::default_planning());
        assert_relative_eq!(scenarios[2].rates.inflation_rate, 2.5);
    }

    #[test]
    fn test_malformed_rate_is_an_error() {
        let bad = "name,pre_retirement_return,post_retirement_return,inflation,income_increase\nx,six,5,3,2\n";
        assert!(load_named_rates_from_reader(bad.as_bytes()).is_err());
    }
}
