use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::Result;

/// Trait defining the contract for rate-table read access.
///
/// Implementations query whatever store holds the rate table. All methods
/// look up the stored direction only; reciprocal fallback is the lookup
/// service's responsibility.
#[async_trait]
pub trait FxRepositoryTrait: Send + Sync {
    /// Rate recorded exactly on `date` for (base -> target), if any.
    async fn rate_on(&self, date: NaiveDate, base: &str, target: &str)
        -> Result<Option<Decimal>>;

    /// Rate at the nearest date at or before `date` for (base -> target).
    async fn nearest_rate_before(
        &self,
        date: NaiveDate,
        base: &str,
        target: &str,
    ) -> Result<Option<Decimal>>;

    /// Rate at the nearest date at or after `date` for (base -> target).
    async fn nearest_rate_after(
        &self,
        date: NaiveDate,
        base: &str,
        target: &str,
    ) -> Result<Option<Decimal>>;
}
