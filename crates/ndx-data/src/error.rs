//! Error types for data operations.

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur during data operations.
#[derive(Debug, Error)]
pub enum DataError {
    /// The constituent page could not be retrieved, or it does not hold the
    /// expected table.
    #[error("Constituent source unavailable: {0}")]
    SourceUnavailable(String),

    /// Price provider failure for a ticker in the batch.
    #[error("Data provider error for {ticker}: {reason}")]
    DataProvider {
        /// Ticker being fetched when the provider failed
        ticker: String,
        /// Provider error message
        reason: String,
    },

    /// A required column is absent from the table header.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// Yahoo Finance connector error
    #[error("Yahoo Finance API error: {0}")]
    YahooApi(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Time conversion error
    #[error("Time conversion error: {0}")]
    TimeConversion(String),

    /// Invalid symbol
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),
}

impl From<yahoo_finance_api::YahooError> for DataError {
    fn from(err: yahoo_finance_api::YahooError) -> Self {
        Self::YahooApi(err.to_string())
    }
}
