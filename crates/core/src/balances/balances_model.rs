//! Balance record domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};
use crate::fx::{normalize_currency_code, validate_currency_code};

/// One observed balance data point.
///
/// `balance` is a cash amount when `ticker` is `None`, or a security unit
/// count priced separately by the price table when `ticker` is set. At most
/// one record exists per (account_name, date, currency, ticker, user_id), but
/// the engine tolerates duplicates and sums them (re-imported sub-lots).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceRecord {
    pub account_name: String,
    pub date: NaiveDate,
    pub balance: Decimal,
    pub currency: String,
    pub ticker: Option<String>,
    pub user_id: String,
}

/// Input model for ingesting a balance record.
///
/// Mirrors the raw import row: `ticker` may be an empty string, currency may
/// be lowercase, names may carry spreadsheet whitespace.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBalanceRecord {
    pub account_name: String,
    pub date: NaiveDate,
    pub balance: Decimal,
    pub currency: String,
    #[serde(default)]
    pub ticker: Option<String>,
    pub user_id: String,
}

impl NewBalanceRecord {
    /// Validates and normalizes the input into a storable record.
    ///
    /// Trims names, uppercases the currency, and collapses an empty or
    /// whitespace ticker to `None`.
    pub fn into_record(self) -> Result<BalanceRecord> {
        let account_name = self.account_name.trim().to_string();
        if account_name.is_empty() {
            return Err(ValidationError::EmptyAccountName.into());
        }

        let currency = normalize_currency_code(&self.currency);
        validate_currency_code(&currency)?;

        let ticker = self
            .ticker
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Ok(BalanceRecord {
            account_name,
            date: self.date,
            balance: self.balance,
            currency,
            ticker,
            user_id: self.user_id,
        })
    }
}

/// Identity of one independently-reconstructed balance history.
///
/// A single account may carry several concurrent series (a cash sub-balance
/// and a stock holding, say) whose reconstructed daily values are summed into
/// the account's daily total.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeriesKey {
    pub account_name: String,
    pub currency: String,
    pub ticker: Option<String>,
}

impl SeriesKey {
    pub fn of(record: &BalanceRecord) -> Self {
        Self {
            account_name: record.account_name.clone(),
            currency: record.currency.clone(),
            ticker: record.ticker.clone(),
        }
    }

    /// Whether the series counts security units rather than cash.
    pub fn has_ticker(&self) -> bool {
        self.ticker.is_some()
    }
}
