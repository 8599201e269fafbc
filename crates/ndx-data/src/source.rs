//! Traits for the external data the dashboard depends on.

use crate::error::Result;
use crate::table::ConstituentTable;
use crate::yahoo::PriceSeries;
use async_trait::async_trait;

/// Source of the index constituent table.
#[async_trait]
pub trait ConstituentSource: Send + Sync {
    /// Retrieve and parse the constituent table.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::SourceUnavailable`](crate::DataError::SourceUnavailable)
    /// if the table cannot be retrieved or located.
    async fn load(&self) -> Result<ConstituentTable>;
}

/// Provider of year-to-date daily closing prices.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Fetch year-to-date series for every ticker in the batch.
    ///
    /// Tickers for which the provider returns no data, including unknown or
    /// delisted symbols, are left out of the result. An empty batch yields an
    /// empty series without any request.
    ///
    /// # Errors
    ///
    /// Any other provider failure fails the whole batch with
    /// [`DataError::DataProvider`](crate::DataError::DataProvider).
    async fn fetch_ytd(&self, tickers: &[String]) -> Result<PriceSeries>;
}
