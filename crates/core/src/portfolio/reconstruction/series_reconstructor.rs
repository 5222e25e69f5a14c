use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::series_model::{DailySeries, Observations};
use crate::balances::SeriesKey;
use crate::utils::time_utils::get_days_between;

/// How values between two observations are filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMethod {
    /// Cash-like series: interpolate linearly by elapsed-day fraction.
    Linear,
    /// Unit-count series: hold the previous observation. Holdings only change
    /// on a recorded transaction; price movement is valued separately.
    Step,
}

impl FillMethod {
    pub fn for_series(key: &SeriesKey) -> Self {
        if key.has_ticker() {
            FillMethod::Step
        } else {
            FillMethod::Linear
        }
    }
}

/// Raw series value at one date, per the fill policy.
///
/// - exact observation: used verbatim;
/// - between two observations: linear or step per `method`;
/// - after the last observation: the last value (forward-fill);
/// - before the first observation: the first value (backward-fill);
/// - empty series: `None`.
pub fn value_at(
    observations: &Observations,
    method: FillMethod,
    date: NaiveDate,
) -> Option<Decimal> {
    let prev = observations.range(..=date).next_back();
    let next = observations.range(date..).next();

    match (prev, next) {
        (None, None) => None,
        (Some((&prev_date, &prev_value)), Some((&next_date, &next_value))) => {
            if prev_date == date {
                return Some(prev_value);
            }
            match method {
                FillMethod::Step => Some(prev_value),
                FillMethod::Linear => {
                    let days_between = (next_date - prev_date).num_days();
                    let days_since = (date - prev_date).num_days();
                    Some(
                        prev_value
                            + (next_value - prev_value) * Decimal::from(days_since)
                                / Decimal::from(days_between),
                    )
                }
            }
        }
        (Some((_, &prev_value)), None) => Some(prev_value),
        (None, Some((_, &next_value))) => Some(next_value),
    }
}

/// Expands one series over the inclusive range [start, end]: one value per
/// calendar day, strictly increasing, no gaps.
///
/// Emission starts at the first observation even when the range starts
/// earlier: the backward-filled value exists (see [`value_at`]) but is never
/// emitted, so a chart cannot imply net worth existed before data collection
/// began. Forward-fill past the last observation IS emitted.
pub fn reconstruct(
    observations: &Observations,
    method: FillMethod,
    start: NaiveDate,
    end: NaiveDate,
) -> DailySeries {
    let Some((&first_known, _)) = observations.iter().next() else {
        return DailySeries::new();
    };

    let mut out = DailySeries::new();
    for day in get_days_between(start.max(first_known), end) {
        if let Some(value) = value_at(observations, method, day) {
            out.insert(day, value);
        }
    }
    out
}
