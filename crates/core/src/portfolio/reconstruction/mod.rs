//! Balance series reconstruction - turning sparse observations into dense
//! daily series.

mod series_model;
mod series_reconstructor;


pub use series_model::{split_into_series, DailySeries, Observations};
pub use series_reconstructor::{reconstruct, value_at, FillMethod};
