//! Core error types for the Worthview engine.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage
//! layer before they reach the engine.

use thiserror::Error;

use crate::fx::FxError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the engine.
///
/// Missing rates and prices are NOT errors: the read path reports them as
/// `None` and the valuation pipeline omits the affected contribution. This
/// enum covers caller mistakes and storage failures on the write path.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Fx error: {0}")]
    Fx(#[from] FxError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Validation errors for engine inputs.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Account name must not be empty")]
    EmptyAccountName,

    #[error("Invalid date range: start {start} is after end {end}")]
    InvertedDateRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },
}
