//! Retirement Projection - savings trajectory versus retirement need
//!
//! This library provides:
//! - Accumulation of current savings and contributions up to retirement
//! - The lump sum needed at retirement to fund an inflation-indexed budget
//! - Year-by-year trajectories of both, consolidated to one point per age
//! - Form-text normalization, CSV/JSON loading and batch scenario runs

pub mod error;
pub mod inputs;
pub mod assumptions;
pub mod projection;
pub mod scenario;
pub mod report;

// Re-export commonly used types
pub use error::Error;
pub use inputs::{AmountKind, FieldValue, Input, RawInput};
pub use assumptions::{NamedRates, RateAssumptions};
pub use projection::{compute_projection, DataPoint, ProjectionResult, RetirementStatus, Trajectory};
pub use scenario::ScenarioRunner;
