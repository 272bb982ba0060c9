//! Household inputs and form-text normalization

mod data;
mod raw;
pub mod loader;

pub use data::{parse_number, AmountKind, FieldValue, Input};
pub use raw::RawInput;
pub use loader::{load_input_json, load_inputs, load_inputs_from_reader, NamedInput};
