//! Error handling for quality control runs.
//!
//! Numeric edge cases (NaN samples, flat windows, repeated timestamps) are
//! never errors; they are skipped inside each check. The variants here cover
//! lookup failures, unusable configuration and malformed report documents.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QcError {
    #[error("Unknown check: {name}")]
    UnknownCheck { name: String },

    #[error("Variable not found in dataset: {variable}")]
    VariableNotFound { variable: String },

    #[error("Invalid value {value} for '{key}' in check '{check}': {reason}")]
    InvalidParameter {
        check: String,
        key: String,
        value: f64,
        reason: String,
    },

    #[error(
        "Length mismatch for variable {variable}: {values} values against {times} timestamps"
    )]
    LengthMismatch {
        variable: String,
        values: usize,
        times: usize,
    },

    #[error("Invalid dataset: {message}")]
    InvalidDataset { message: String },

    #[error("Invalid report document: {message}")]
    InvalidReport { message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

impl QcError {
    pub fn invalid_parameter(
        check: impl Into<String>,
        key: impl Into<String>,
        value: f64,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            check: check.into(),
            key: key.into(),
            value,
            reason: reason.into(),
        }
    }

    pub fn invalid_dataset(message: impl Into<String>) -> Self {
        Self::InvalidDataset {
            message: message.into(),
        }
    }

    pub fn invalid_report(message: impl Into<String>) -> Self {
        Self::InvalidReport {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, QcError>;
