use std::sync::Arc;

use chrono::NaiveDate;
use dashmap::DashMap;

use super::history_model::{HistoryQuery, HistoryResponse};
use crate::fx::normalize_currency_code;

/// Cache identity of one reconstruction result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HistoryCacheKey {
    user_id: String,
    start: NaiveDate,
    end: NaiveDate,
    /// Sorted so filter order does not fragment the cache.
    accounts: Option<Vec<String>>,
    target_currency: String,
}

impl HistoryCacheKey {
    pub fn for_query(query: &HistoryQuery) -> Self {
        let accounts = query.accounts.clone().map(|mut accounts| {
            accounts.sort();
            accounts
        });
        Self {
            user_id: query.user_id.clone(),
            start: query.start,
            end: query.end,
            accounts,
            target_currency: normalize_currency_code(&query.target_currency),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

/// Memoizes reconstruction results until the next ingestion.
///
/// Entries are inserted and removed atomically, so a read racing an
/// invalidation can at worst serve one stale result; it can never observe a
/// torn value. Invalidation is deliberately coarse: any write for a user
/// drops all of that user's entries.
#[derive(Default)]
pub struct HistoryCache {
    entries: DashMap<HistoryCacheKey, Arc<HistoryResponse>>,
}

impl HistoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &HistoryCacheKey) -> Option<Arc<HistoryResponse>> {
        self.entries.get(key).map(|entry| Arc::clone(entry.value()))
    }

    /// Stores a result and returns the shared handle the caller hands out.
    pub fn insert(&self, key: HistoryCacheKey, response: HistoryResponse) -> Arc<HistoryResponse> {
        let shared = Arc::new(response);
        self.entries.insert(key, Arc::clone(&shared));
        shared
    }

    /// Drops every cached result owned by `user_id`.
    pub fn invalidate_user(&self, user_id: &str) {
        self.entries.retain(|key, _| key.user_id() != user_id);
    }
}
