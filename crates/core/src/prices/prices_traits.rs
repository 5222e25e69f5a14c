use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::Result;

/// Trait defining the contract for price-table read access.
#[async_trait]
pub trait PriceRepositoryTrait: Send + Sync {
    /// Price at the latest recorded date at or before `date` for `symbol`.
    async fn latest_price_on_or_before(
        &self,
        date: NaiveDate,
        symbol: &str,
    ) -> Result<Option<Decimal>>;
}
