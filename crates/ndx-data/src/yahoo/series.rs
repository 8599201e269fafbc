//! Closing price series keyed by ticker.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Trading day.
    pub date: NaiveDate,
    /// Closing price.
    pub close: f64,
}

impl PricePoint {
    /// Create a new price point.
    pub const fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Closing price series per ticker, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    entries: Vec<(String, Vec<PricePoint>)>,
}

impl PriceSeries {
    /// Create an empty series.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert the points for a ticker, replacing any earlier entry.
    ///
    /// Points are sorted by date.
    pub fn insert(&mut self, ticker: impl Into<String>, mut points: Vec<PricePoint>) {
        let ticker = ticker.into();
        points.sort_by_key(|p| p.date);

        match self.entries.iter_mut().find(|(t, _)| *t == ticker) {
            Some((_, existing)) => *existing = points,
            None => self.entries.push((ticker, points)),
        }
    }

    /// Points for a ticker.
    pub fn get(&self, ticker: &str) -> Option<&[PricePoint]> {
        self.entries
            .iter()
            .find(|(t, _)| t == ticker)
            .map(|(_, points)| points.as_slice())
    }

    /// Whether a series exists for the ticker.
    pub fn contains(&self, ticker: &str) -> bool {
        self.get(ticker).is_some()
    }

    /// Tickers in insertion order.
    pub fn tickers(&self) -> Vec<&str> {
        self.entries.iter().map(|(t, _)| t.as_str()).collect()
    }

    /// Number of tickers.
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no ticker has a series.
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(ticker, points)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PricePoint])> {
        self.entries
            .iter()
            .map(|(t, points)| (t.as_str(), points.as_slice()))
    }
}
