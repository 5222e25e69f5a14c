use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::prices_service::PriceLookupService;

/// Request-scoped memo over [`PriceLookupService`], mirroring
/// [`crate::fx::RateCache`]. Negative results are memoized too.
pub struct PriceCache {
    lookup: PriceLookupService,
    memo: HashMap<(NaiveDate, String), Option<Decimal>>,
}

impl PriceCache {
    pub fn new(lookup: PriceLookupService) -> Self {
        Self {
            lookup,
            memo: HashMap::new(),
        }
    }

    /// Memoized equivalent of [`PriceLookupService::price_as_of`].
    pub async fn price_as_of(&mut self, date: NaiveDate, symbol: &str) -> Option<Decimal> {
        let key = (date, symbol.to_string());
        if let Some(cached) = self.memo.get(&key) {
            return *cached;
        }
        let resolved = self.lookup.price_as_of(date, symbol).await;
        self.memo.insert(key, resolved);
        resolved
    }
}
