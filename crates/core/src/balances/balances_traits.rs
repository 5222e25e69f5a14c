use async_trait::async_trait;

use super::balances_model::{BalanceRecord, NewBalanceRecord};
use crate::errors::Result;

/// Trait defining the contract for balance-record storage.
#[async_trait]
pub trait BalanceRepositoryTrait: Send + Sync {
    /// Persists one record.
    async fn insert(&self, record: BalanceRecord) -> Result<BalanceRecord>;

    /// Persists a batch of records; returns the number inserted.
    async fn insert_batch(&self, records: Vec<BalanceRecord>) -> Result<usize>;

    /// All records for the user, optionally restricted to an account filter.
    ///
    /// No date filter on purpose: reconstruction needs observations outside
    /// the requested range for interpolation and edge extrapolation.
    async fn records_for_accounts(
        &self,
        user_id: &str,
        accounts: Option<&[String]>,
    ) -> Result<Vec<BalanceRecord>>;

    /// Distinct account names the user has records for, sorted.
    async fn list_account_names(&self, user_id: &str) -> Result<Vec<String>>;
}

/// Trait defining the contract for balance ingestion operations.
#[async_trait]
pub trait BalanceServiceTrait: Send + Sync {
    /// Validates, normalizes, and stores one record, then invalidates the
    /// user's cached reconstructions.
    async fn add_balance(&self, new_record: NewBalanceRecord) -> Result<BalanceRecord>;

    /// Batch form used by importers; one cache invalidation per user at the
    /// end. Returns the number of records stored.
    async fn add_balances(&self, new_records: Vec<NewBalanceRecord>) -> Result<usize>;

    /// Distinct account names the user has records for.
    async fn list_account_names(&self, user_id: &str) -> Result<Vec<String>>;
}
