use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};
use crate::fx::validate_currency_code;
use crate::portfolio::reconstruction::DailySeries;

/// One balances-endpoint request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    pub user_id: String,
    /// Inclusive range start.
    pub start: NaiveDate,
    /// Inclusive range end.
    pub end: NaiveDate,
    /// Restrict to these accounts; `None` means every account the user owns.
    #[serde(default)]
    pub accounts: Option<Vec<String>>,
    pub target_currency: String,
}

impl HistoryQuery {
    pub fn validate(&self) -> Result<()> {
        if self.start > self.end {
            return Err(ValidationError::InvertedDateRange {
                start: self.start,
                end: self.end,
            }
            .into());
        }
        validate_currency_code(self.target_currency.trim())?;
        Ok(())
    }
}

/// Account and group names mapped to dense daily series in the target
/// currency. Serializes to `{ name: { "YYYY-MM-DD": value } }` for the
/// charting client.
pub type HistoryResponse = BTreeMap<String, DailySeries>;
