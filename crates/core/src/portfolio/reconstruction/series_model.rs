use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::balances::{BalanceRecord, SeriesKey};

/// Dense daily values, one entry per calendar day.
pub type DailySeries = std::collections::BTreeMap<NaiveDate, Decimal>;

/// Sparse raw observations for one series, keyed by date.
pub type Observations = std::collections::BTreeMap<NaiveDate, Decimal>;

/// Splits raw records into per-series observation maps.
///
/// Duplicate records at the same (series key, date) are summed, never
/// overwritten: multiple ingested rows can represent sub-lots of the same
/// holding.
pub fn split_into_series(records: &[BalanceRecord]) -> HashMap<SeriesKey, Observations> {
    let mut series: HashMap<SeriesKey, Observations> = HashMap::new();
    for record in records {
        let observations = series.entry(SeriesKey::of(record)).or_default();
        *observations.entry(record.date).or_insert(Decimal::ZERO) += record.balance;
    }
    series
}
