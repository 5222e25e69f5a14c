use std::sync::Arc;

use chrono::NaiveDate;
use log::warn;
use rust_decimal::Decimal;

use super::prices_traits::PriceRepositoryTrait;

/// Resolves security prices with a strict no-look-ahead contract.
///
/// The valuation for a date must never be influenced by a price observed
/// later: if a symbol has no recorded price at or before the requested date,
/// the price is unknown (`None`), not the earliest future price and not zero.
#[derive(Clone)]
pub struct PriceLookupService {
    repository: Arc<dyn PriceRepositoryTrait>,
}

impl PriceLookupService {
    pub fn new(repository: Arc<dyn PriceRepositoryTrait>) -> Self {
        Self { repository }
    }

    /// Most recent known price of `symbol` at or before `date`.
    pub async fn price_as_of(&self, date: NaiveDate, symbol: &str) -> Option<Decimal> {
        match self.repository.latest_price_on_or_before(date, symbol).await {
            Ok(price) => price,
            Err(e) => {
                warn!(
                    "Price lookup failed for {} on {}: {}. Treating as not found.",
                    symbol, date, e
                );
                None
            }
        }
    }
}
