//! Errors raised at the engine boundary (loading data and configuration).
//!
//! Rendering itself never fails; degenerate input is drawn as an empty or
//! minimal chart instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("failed to parse chart JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("chart data must be a JSON array of records, got {0}")]
    NotAnArray(&'static str),

    #[error("invalid chart {axis}: {value}")]
    InvalidDimension { axis: &'static str, value: f64 },
}

pub type Result<T> = std::result::Result<T, ChartError>;
