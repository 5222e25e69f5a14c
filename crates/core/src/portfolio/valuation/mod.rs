//! Valuation & conversion pipeline - pricing and currency-normalizing
//! reconstructed series.

mod valuation_pipeline;

pub use valuation_pipeline::{merge_account_series, value_series};
