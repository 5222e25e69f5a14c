use std::sync::Arc;

use async_trait::async_trait;

use super::history_model::{HistoryQuery, HistoryResponse};
use crate::errors::Result;
use crate::portfolio::groups::GroupConfig;

/// Trait defining the contract of the balances endpoint's engine.
#[async_trait]
pub trait BalanceHistoryServiceTrait: Send + Sync {
    /// Reconstructs dense daily series for the query's accounts and the
    /// configured groups, converted into the target currency.
    ///
    /// `group_config` is passed explicitly per call; the engine never reads
    /// ambient group state. Results are shared out of the cache, so the
    /// response is handed back behind an `Arc`.
    async fn history(
        &self,
        query: &HistoryQuery,
        group_config: &GroupConfig,
    ) -> Result<Arc<HistoryResponse>>;
}
