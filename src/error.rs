//! Error types for wearvar

use thiserror::Error;

/// Errors that can occur while importing or analyzing sensor data
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("line {line}: expected {expected} columns, found {found}")]
    Schema {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: invalid timestamp {value:?} for format {format:?}")]
    TimestampParse {
        line: usize,
        value: String,
        format: String,
    },

    #[error("line {line}: invalid sensor value {value:?}")]
    ValueParse { line: usize, value: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
