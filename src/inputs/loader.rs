//! Load household inputs from CSV form exports or JSON files

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::Reader;

use super::{Input, RawInput};
use crate::error::{Error, Result};

/// An input tagged with the label it was loaded under
#[derive(Debug, Clone, PartialEq)]
pub struct NamedInput {
    pub name: String,
    pub input: Input,
}

/// Load every household in a CSV file
pub fn load_inputs<P: AsRef<Path>>(path: P) -> Result<Vec<NamedInput>> {
    let file = File::open(path)?;
    load_inputs_from_reader(file)
}

/// Load households from any reader (e.g., string buffer, network stream)
///
/// Columns are the form's camelCase field names plus an optional `name`.
/// Rows without a name are labelled by their 1-based row number.
pub fn load_inputs_from_reader<R: Read>(reader: R) -> Result<Vec<NamedInput>> {
    let mut csv_reader = Reader::from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for required in ["currentAge", "retirementAge", "lifeExpectancy"] {
        if !headers.iter().any(|h| h == required) {
            return Err(Error::MissingColumn(required.to_string()));
        }
    }
    let name_column = headers.iter().position(|h| h == "name");

    let mut inputs = Vec::new();
    for (index, result) in csv_reader.records().enumerate() {
        let record = result?;
        let raw: RawInput = record.deserialize(Some(&headers))?;
        let name = name_column
            .and_then(|column| record.get(column))
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("row {}", index + 1));
        inputs.push(NamedInput {
            name,
            input: raw.normalize()?,
        });
    }

    log::info!("Loaded {} household inputs", inputs.len());
    Ok(inputs)
}

/// Load a single `Input` from a JSON file
pub fn load_input_json<P: AsRef<Path>>(path: P) -> Result<Input> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
