//! Balances module - balance record model, ingestion service, and traits.

mod balances_model;
mod balances_service;
mod balances_traits;


pub use balances_model::{BalanceRecord, NewBalanceRecord, SeriesKey};
pub use balances_service::BalanceService;
pub use balances_traits::{BalanceRepositoryTrait, BalanceServiceTrait};
