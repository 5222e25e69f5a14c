use std::sync::Arc;

use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;

use super::fx_model::normalize_currency_code;
use super::fx_traits::FxRepositoryTrait;
use crate::constants::PIVOT_CURRENCY;

/// One step of the rate-resolution chain. Strategies are tried in order and
/// the first hit wins; `*Inverse` variants query the reverse pair and invert.
#[derive(Debug, Clone, Copy)]
enum LookupStrategy {
    Exact,
    ExactInverse,
    Prior,
    PriorInverse,
    Next,
    NextInverse,
}

const STRATEGIES: [LookupStrategy; 6] = [
    LookupStrategy::Exact,
    LookupStrategy::ExactInverse,
    LookupStrategy::Prior,
    LookupStrategy::PriorInverse,
    LookupStrategy::Next,
    LookupStrategy::NextInverse,
];

/// Resolves conversion multipliers against the rate table.
///
/// Pairs touching the pivot currency resolve directly; any other pair is
/// composed from two pivot legs (base -> pivot, pivot -> target) and fails as
/// a whole when either leg is missing. A missing rate is `None`, never an
/// error; repository failures degrade to `None` as well.
#[derive(Clone)]
pub struct RateLookupService {
    repository: Arc<dyn FxRepositoryTrait>,
}

impl RateLookupService {
    pub fn new(repository: Arc<dyn FxRepositoryTrait>) -> Self {
        Self { repository }
    }

    /// Conversion multiplier from `base` to `target` on `date`.
    pub async fn rate_for_date(
        &self,
        date: NaiveDate,
        base: &str,
        target: &str,
    ) -> Option<Decimal> {
        let base = normalize_currency_code(base);
        let target = normalize_currency_code(target);

        if base == target {
            return Some(Decimal::ONE);
        }

        if base == PIVOT_CURRENCY || target == PIVOT_CURRENCY {
            return self.direct_or_nearest(date, &base, &target).await;
        }

        // Neither side is the pivot: bridge through it.
        let to_pivot = self.direct_or_nearest(date, &base, PIVOT_CURRENCY).await?;
        let from_pivot = self.direct_or_nearest(date, PIVOT_CURRENCY, &target).await?;
        Some(to_pivot * from_pivot)
    }

    /// Runs the strategy chain for one pair, short-circuiting on first success.
    async fn direct_or_nearest(
        &self,
        date: NaiveDate,
        base: &str,
        target: &str,
    ) -> Option<Decimal> {
        for strategy in STRATEGIES {
            if let Some(rate) = self.try_strategy(strategy, date, base, target).await {
                return Some(rate);
            }
        }
        debug!("No rate for {}->{} on or near {}", base, target, date);
        None
    }

    async fn try_strategy(
        &self,
        strategy: LookupStrategy,
        date: NaiveDate,
        base: &str,
        target: &str,
    ) -> Option<Decimal> {
        let (stored, invert) = match strategy {
            LookupStrategy::Exact => (self.repository.rate_on(date, base, target).await, false),
            LookupStrategy::ExactInverse => {
                (self.repository.rate_on(date, target, base).await, true)
            }
            LookupStrategy::Prior => (
                self.repository.nearest_rate_before(date, base, target).await,
                false,
            ),
            LookupStrategy::PriorInverse => (
                self.repository.nearest_rate_before(date, target, base).await,
                true,
            ),
            LookupStrategy::Next => (
                self.repository.nearest_rate_after(date, base, target).await,
                false,
            ),
            LookupStrategy::NextInverse => (
                self.repository.nearest_rate_after(date, target, base).await,
                true,
            ),
        };

        let stored = stored.unwrap_or_else(|e| {
            warn!(
                "Rate lookup ({:?}) failed for {}->{} on {}: {}. Treating as not found.",
                strategy, base, target, date, e
            );
            None
        });

        match stored {
            // A zero stored rate cannot be inverted; skip to the next strategy.
            Some(rate) if invert => {
                if rate.is_zero() {
                    None
                } else {
                    Some(Decimal::ONE / rate)
                }
            }
            other => other,
        }
    }
}
