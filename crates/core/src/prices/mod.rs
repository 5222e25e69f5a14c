//! Security price module - price table model, as-of lookup, and traits.

mod price_cache;
mod prices_model;
mod prices_service;
mod prices_traits;

pub use price_cache::PriceCache;
pub use prices_model::SecurityPrice;
pub use prices_service::PriceLookupService;
pub use prices_traits::PriceRepositoryTrait;
