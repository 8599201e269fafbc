//! Constituent table scraped from the Nasdaq-100 reference page.

use crate::error::{DataError, Result};
use serde::{Deserialize, Serialize};

/// Header of the ticker column.
pub const TICKER_COLUMN: &str = "Ticker";

/// Header of the GICS sector column.
pub const SECTOR_COLUMN: &str = "GICS Sector";

/// Headers tried, in order, for the company name column.
pub const COMPANY_COLUMNS: [&str; 3] = ["Company", "Security", "Name"];

/// One company of the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstituentRow {
    /// Company name.
    pub company: String,
    /// Exchange ticker.
    pub ticker: String,
    /// GICS sector label.
    pub sector: String,
    /// Every cell of the row, in table column order.
    pub fields: Vec<String>,
}

/// Ordered constituent table.
///
/// Rows keep the order they were scraped in. Columns keep the header order of
/// the source page, and every row carries one field per column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstituentTable {
    columns: Vec<String>,
    rows: Vec<ConstituentRow>,
}

/// Column positions resolved from a header.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    company: usize,
    ticker: usize,
    sector: usize,
}

impl ColumnIndex {
    fn resolve(columns: &[String]) -> Result<Self> {
        let ticker = find_column(columns, TICKER_COLUMN)
            .ok_or_else(|| DataError::MissingColumn(TICKER_COLUMN.to_string()))?;
        let sector = find_column(columns, SECTOR_COLUMN)
            .ok_or_else(|| DataError::MissingColumn(SECTOR_COLUMN.to_string()))?;
        // Fall back to the first column when no company header is present.
        let company = COMPANY_COLUMNS
            .iter()
            .find_map(|name| find_column(columns, name))
            .unwrap_or(0);

        Ok(Self {
            company,
            ticker,
            sector,
        })
    }
}

/// Case-insensitive header lookup.
pub fn find_column(columns: &[String], name: &str) -> Option<usize> {
    columns.iter().position(|c| c.eq_ignore_ascii_case(name))
}

impl ConstituentTable {
    /// Build a table from a header and raw records.
    ///
    /// Short records are padded with empty fields and long records are
    /// truncated to the header width.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::MissingColumn`] if the header lacks a ticker or
    /// GICS sector column.
    pub fn from_records(columns: Vec<String>, records: Vec<Vec<String>>) -> Result<Self> {
        let index = ColumnIndex::resolve(&columns)?;
        let width = columns.len();

        let rows = records
            .into_iter()
            .map(|mut fields| {
                fields.resize(width, String::new());
                ConstituentRow {
                    company: fields[index.company].clone(),
                    ticker: fields[index.ticker].clone(),
                    sector: fields[index.sector].clone(),
                    fields,
                }
            })
            .collect();

        Ok(Self { columns, rows })
    }

    /// Table with the same columns and the given rows.
    pub fn with_rows(&self, rows: Vec<ConstituentRow>) -> Self {
        Self {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in order.
    pub fn rows(&self) -> &[ConstituentRow] {
        &self.rows
    }

    /// Number of rows.
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns.
    pub const fn width(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, columns)`.
    pub const fn shape(&self) -> (usize, usize) {
        (self.len(), self.width())
    }

    /// Tickers in row order.
    pub fn tickers(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.ticker.clone()).collect()
    }

    /// Look up a row by ticker (case-insensitive).
    pub fn row(&self, ticker: &str) -> Option<&ConstituentRow> {
        self.rows
            .iter()
            .find(|r| r.ticker.eq_ignore_ascii_case(ticker))
    }
}
