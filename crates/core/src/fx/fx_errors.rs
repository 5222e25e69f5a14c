use thiserror::Error;

/// Errors raised by FX validation on write paths.
///
/// The read path never raises `RateNotFound` to callers: a missing rate is
/// reported as `None` by [`super::RateLookupService`] and handled by the
/// valuation pipeline.
#[derive(Error, Debug)]
pub enum FxError {
    #[error("Exchange rate not found: {0}")]
    RateNotFound(String),

    #[error("Invalid currency code: {0}")]
    InvalidCurrencyCode(String),
}
