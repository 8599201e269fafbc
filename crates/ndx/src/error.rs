//! Error type for the dashboard pipeline.

use ndx_data::DataError;
use ndx_output::ExportError;
use thiserror::Error;

/// Result type for dashboard operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the dashboard.
///
/// None of these are recovered inside the pipeline; a failing render
/// produces no view.
#[derive(Debug, Error)]
pub enum Error {
    /// Constituent or price data failure.
    #[error(transparent)]
    Data(#[from] DataError),

    /// Export or chart failure.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Sector name not present in the loaded table.
    #[error("Unknown sector: {name} (available: {available})")]
    UnknownSector {
        /// Name as given
        name: String,
        /// Sectors of the loaded table
        available: String,
    },
}

impl Error {
    /// Whether the error is a chart request for a ticker without prices.
    pub const fn is_missing_series(&self) -> bool {
        matches!(self, Self::Export(ExportError::MissingSeries(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_missing_series() {
        let missing = Error::from(ExportError::MissingSeries("AMGN".to_string()));
        assert!(missing.is_missing_series());
        assert_eq!(missing.to_string(), ExportError::MissingSeries("AMGN".to_string()).to_string());

        let provider = Error::from(DataError::DataProvider {
            ticker: "AMGN".to_string(),
            reason: "HTTP 429".to_string(),
        });
        assert!(!provider.is_missing_series());

        let sector = Error::UnknownSector {
            name: "Crypto".to_string(),
            available: "Energy".to_string(),
        };
        assert!(!sector.is_missing_series());
    }
}
