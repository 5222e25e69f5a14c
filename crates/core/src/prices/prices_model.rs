use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the price table: the closing price of `symbol` on `date`.
///
/// Sparse per symbol: only trading days or update days are recorded.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SecurityPrice {
    pub date: NaiveDate,
    pub symbol: String,
    pub price: Decimal,
}
