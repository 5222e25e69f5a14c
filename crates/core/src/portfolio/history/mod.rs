//! Engine facade - query model, result cache, and the orchestration service
//! behind the balances endpoint.

mod history_cache;
mod history_model;
mod history_service;
mod history_traits;

#[cfg(test)]
mod history_service_tests;

pub use history_cache::{HistoryCache, HistoryCacheKey};
pub use history_model::{HistoryQuery, HistoryResponse};
pub use history_service::BalanceHistoryService;
pub use history_traits::BalanceHistoryServiceTrait;
