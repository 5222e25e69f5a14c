use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::fx_model::normalize_currency_code;
use super::rate_lookup::RateLookupService;

/// Request-scoped memo over [`RateLookupService`].
///
/// A multi-year daily reconstruction asks for the same (date, pair) thousands
/// of times; this cache guarantees one repository round-trip per key for the
/// lifetime of a single request. Negative results are memoized too.
pub struct RateCache {
    lookup: RateLookupService,
    memo: HashMap<(NaiveDate, String, String), Option<Decimal>>,
}

impl RateCache {
    pub fn new(lookup: RateLookupService) -> Self {
        Self {
            lookup,
            memo: HashMap::new(),
        }
    }

    /// Memoized equivalent of [`RateLookupService::rate_for_date`].
    pub async fn rate_for_date(
        &mut self,
        date: NaiveDate,
        base: &str,
        target: &str,
    ) -> Option<Decimal> {
        let key = (
            date,
            normalize_currency_code(base),
            normalize_currency_code(target),
        );
        if let Some(cached) = self.memo.get(&key) {
            return *cached;
        }
        let resolved = self.lookup.rate_for_date(date, &key.1, &key.2).await;
        self.memo.insert(key, resolved);
        resolved
    }
}
