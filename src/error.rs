//! Error type for loading inputs and writing reports
//!
//! The projection engine itself is total and never returns an error; only the
//! surfaces that touch files, CSV or JSON do.

use thiserror::Error;

/// Errors raised while loading inputs or exporting results
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A `$`/`%` style kind tag that is neither an amount nor a percentage
    #[error("unknown amount kind {tag:?} for field {field}")]
    UnknownAmountKind { field: &'static str, tag: String },

    #[error("missing column {0:?}")]
    MissingColumn(String),
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
