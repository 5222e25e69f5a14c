use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::fx_errors::FxError;

/// One row of the rate table: 1 unit of `base_currency` equals `rate` units
/// of `target_currency` on `date`.
///
/// Storage is not guaranteed symmetric: the reverse pair may be absent, in
/// which case lookups fall back to the reciprocal of this row.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRate {
    pub date: NaiveDate,
    pub base_currency: String,
    pub target_currency: String,
    pub rate: Decimal,
}

/// Normalizes a currency code: trims whitespace and uppercases.
pub fn normalize_currency_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Validates that a code looks like an ISO currency code (three letters).
pub fn validate_currency_code(code: &str) -> Result<(), FxError> {
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(FxError::InvalidCurrencyCode(code.to_string()));
    }
    Ok(())
}
