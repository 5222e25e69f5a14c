use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::balances_model::{BalanceRecord, NewBalanceRecord};
use super::balances_traits::{BalanceRepositoryTrait, BalanceServiceTrait};
use crate::errors::Result;
use crate::portfolio::history::HistoryCache;

/// Service for ingesting balance records.
///
/// Every successful write invalidates the owning user's result cache:
/// derived daily values are a pure function of the stored records, so a
/// stale reconstruction must never outlive an ingestion.
pub struct BalanceService {
    repository: Arc<dyn BalanceRepositoryTrait>,
    cache: Arc<HistoryCache>,
}

impl BalanceService {
    pub fn new(repository: Arc<dyn BalanceRepositoryTrait>, cache: Arc<HistoryCache>) -> Self {
        Self { repository, cache }
    }
}

#[async_trait]
impl BalanceServiceTrait for BalanceService {
    async fn add_balance(&self, new_record: NewBalanceRecord) -> Result<BalanceRecord> {
        let record = new_record.into_record()?;
        let stored = self.repository.insert(record).await?;
        self.cache.invalidate_user(&stored.user_id);
        Ok(stored)
    }

    async fn add_balances(&self, new_records: Vec<NewBalanceRecord>) -> Result<usize> {
        let mut records = Vec::with_capacity(new_records.len());
        for new_record in new_records {
            records.push(new_record.into_record()?);
        }

        let users: HashSet<String> = records.iter().map(|r| r.user_id.clone()).collect();
        let inserted = self.repository.insert_batch(records).await?;

        for user_id in &users {
            self.cache.invalidate_user(user_id);
        }
        debug!(
            "Ingested {} balance records for {} user(s)",
            inserted,
            users.len()
        );
        Ok(inserted)
    }

    async fn list_account_names(&self, user_id: &str) -> Result<Vec<String>> {
        self.repository.list_account_names(user_id).await
    }
}
