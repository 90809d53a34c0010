//! Errors for the loading, export and service surfaces
//!
//! The calculation functions themselves are total and never return these.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CashflowError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {field} - {reason}")]
    InvalidInput { field: String, reason: String },
}

impl CashflowError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CashflowError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CashflowError>;
