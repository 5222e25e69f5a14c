//! FX (Foreign Exchange) module - rate table model, lookup service, and traits.

mod fx_errors;
mod fx_model;
mod fx_traits;
mod rate_cache;
mod rate_lookup;

pub use fx_errors::FxError;
pub use fx_model::{normalize_currency_code, validate_currency_code, ExchangeRate};
pub use fx_traits::FxRepositoryTrait;
pub use rate_cache::RateCache;
pub use rate_lookup::RateLookupService;
