//! Yahoo Finance data providers.

pub mod prices;
pub mod series;

pub use prices::YahooPriceProvider;
pub use series::{PricePoint, PriceSeries};
