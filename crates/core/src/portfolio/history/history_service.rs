use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::history_cache::{HistoryCache, HistoryCacheKey};
use super::history_model::{HistoryQuery, HistoryResponse};
use super::history_traits::BalanceHistoryServiceTrait;
use crate::balances::BalanceRepositoryTrait;
use crate::constants::DECIMAL_PRECISION;
use crate::errors::Result;
use crate::fx::{normalize_currency_code, RateCache, RateLookupService};
use crate::portfolio::groups::{aggregate_groups, GroupConfig};
use crate::portfolio::reconstruction::{reconstruct, split_into_series, DailySeries, FillMethod};
use crate::portfolio::valuation::{merge_account_series, value_series};
use crate::prices::{PriceCache, PriceLookupService};

/// The reconstruction engine behind the balances endpoint.
///
/// One call reconstructs every requested series over the full range, values
/// and converts each daily point, sums series into accounts and accounts into
/// groups, and memoizes the result until the user's next ingestion.
pub struct BalanceHistoryService {
    balance_repository: Arc<dyn BalanceRepositoryTrait>,
    rate_lookup: RateLookupService,
    price_lookup: PriceLookupService,
    cache: Arc<HistoryCache>,
}

impl BalanceHistoryService {
    pub fn new(
        balance_repository: Arc<dyn BalanceRepositoryTrait>,
        rate_lookup: RateLookupService,
        price_lookup: PriceLookupService,
        cache: Arc<HistoryCache>,
    ) -> Self {
        Self {
            balance_repository,
            rate_lookup,
            price_lookup,
            cache,
        }
    }
}

#[async_trait]
impl BalanceHistoryServiceTrait for BalanceHistoryService {
    async fn history(
        &self,
        query: &HistoryQuery,
        group_config: &GroupConfig,
    ) -> Result<Arc<HistoryResponse>> {
        query.validate()?;

        let cache_key = HistoryCacheKey::for_query(query);
        if let Some(hit) = self.cache.get(&cache_key) {
            debug!(
                "History cache hit for user '{}' ({}..{})",
                query.user_id, query.start, query.end
            );
            return Ok(hit);
        }

        let target_currency = normalize_currency_code(&query.target_currency);
        let records = self
            .balance_repository
            .records_for_accounts(&query.user_id, query.accounts.as_deref())
            .await?;

        if records.is_empty() {
            debug!("No balance records for user '{}'", query.user_id);
            return Ok(self.cache.insert(cache_key, HistoryResponse::new()));
        }

        debug!(
            "Reconstructing {} records for user '{}' over {}..{} into {}",
            records.len(),
            query.user_id,
            query.start,
            query.end,
            target_currency
        );

        // Request-scoped memos: thousands of daily points resolve against a
        // handful of (date, pair) and (date, symbol) keys.
        let mut rates = RateCache::new(self.rate_lookup.clone());
        let mut prices = PriceCache::new(self.price_lookup.clone());

        let mut accounts: BTreeMap<String, DailySeries> = BTreeMap::new();
        for (series_key, observations) in split_into_series(&records) {
            let raw = reconstruct(
                &observations,
                FillMethod::for_series(&series_key),
                query.start,
                query.end,
            );
            let valued =
                value_series(&series_key, &raw, &target_currency, &mut rates, &mut prices).await;
            merge_account_series(&mut accounts, &series_key.account_name, valued);
        }

        let groups = aggregate_groups(&accounts, group_config);

        let mut response: HistoryResponse = accounts;
        // On a name collision the derived group series wins, matching the
        // merge order of the original dashboard.
        response.extend(groups);

        for series in response.values_mut() {
            for value in series.values_mut() {
                *value = value.round_dp(DECIMAL_PRECISION);
            }
        }

        Ok(self.cache.insert(cache_key, response))
    }
}
