//! Year-to-date closing prices from Yahoo Finance.

use crate::error::{DataError, Result};
use crate::source::PriceProvider;
use crate::yahoo::series::{PricePoint, PriceSeries};
use async_trait::async_trait;
use chrono::DateTime;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::fmt::Display;
use tracing::{debug, info, warn};
use yahoo_finance_api as yahoo;

/// Yahoo range keyword for year-to-date.
pub const YTD_RANGE: &str = "ytd";

/// Yahoo interval keyword for daily bars.
pub const DAILY_INTERVAL: &str = "1d";

/// Default number of concurrent ticker requests within a batch.
const DEFAULT_CONCURRENCY: usize = 5;

/// Yahoo Finance year-to-date price provider.
pub struct YahooPriceProvider {
    provider: yahoo::YahooConnector,
    concurrency: usize,
}

impl std::fmt::Debug for YahooPriceProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooPriceProvider")
            .field("concurrency", &self.concurrency)
            .finish_non_exhaustive()
    }
}

impl YahooPriceProvider {
    /// Create a new provider.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::YahooApi`] if the connector cannot be built.
    pub fn new() -> Result<Self> {
        Ok(Self {
            provider: yahoo::YahooConnector::new()?,
            concurrency: DEFAULT_CONCURRENCY,
        })
    }

    /// Set how many tickers of a batch are requested at once.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Fetch the year-to-date daily closes of one ticker.
    ///
    /// An empty vector means the provider has no data for the ticker, either
    /// an empty result or a "Not Found" answer for a delisted symbol.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::InvalidSymbol`] for a blank ticker and
    /// [`DataError::DataProvider`] for any other provider failure.
    pub async fn fetch_ticker(&self, ticker: &str) -> Result<Vec<PricePoint>> {
        if ticker.trim().is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        debug!(ticker, "requesting year-to-date quotes");
        let quotes = match self
            .provider
            .get_quote_range(ticker, DAILY_INTERVAL, YTD_RANGE)
            .await
            .and_then(|response| response.quotes())
        {
            Ok(quotes) => quotes,
            Err(e) if is_no_data(&e) => {
                debug!(ticker, error = %e, "no quotes for ticker");
                return Ok(Vec::new());
            }
            Err(e) => return Err(provider_error(ticker, e)),
        };

        quotes
            .iter()
            .filter_map(|q| price_point(q.timestamp, q.close).transpose())
            .collect()
    }
}

#[async_trait]
impl PriceProvider for YahooPriceProvider {
    async fn fetch_ytd(&self, tickers: &[String]) -> Result<PriceSeries> {
        if tickers.is_empty() {
            return Ok(PriceSeries::new());
        }

        info!(count = tickers.len(), "fetching year-to-date prices");

        // `buffered` keeps results in batch order.
        let fetched: Vec<(String, Vec<PricePoint>)> = stream::iter(tickers.iter().cloned())
            .map(|ticker| async move {
                let points = self.fetch_ticker(&ticker).await?;
                Ok::<_, DataError>((ticker, points))
            })
            .buffered(self.concurrency)
            .try_collect()
            .await?;

        Ok(assemble(fetched))
    }
}

/// Collect fetched series in batch order, leaving out tickers without prices.
fn assemble(fetched: Vec<(String, Vec<PricePoint>)>) -> PriceSeries {
    let mut series = PriceSeries::new();
    for (ticker, points) in fetched {
        if points.is_empty() {
            warn!(%ticker, "provider returned no prices");
            continue;
        }
        series.insert(ticker, points);
    }
    series
}

/// Whether the provider answered that it holds no data for the symbol.
///
/// Yahoo reports unknown and delisted symbols as a chart error with code
/// `Not Found`; a successful response may also carry no quotes at all.
fn is_no_data(err: &yahoo::YahooError) -> bool {
    match err {
        yahoo::YahooError::NoResult | yahoo::YahooError::NoQuotes => true,
        yahoo::YahooError::ApiError(msg) => is_not_found(msg.code.as_deref()),
        _ => false,
    }
}

fn is_not_found(code: Option<&str>) -> bool {
    code.is_some_and(|code| code.eq_ignore_ascii_case("not found"))
}

fn provider_error(ticker: &str, err: yahoo::YahooError) -> DataError {
    DataError::DataProvider {
        ticker: ticker.to_string(),
        reason: err.to_string(),
    }
}

/// Convert a quote timestamp (seconds since the epoch) and close into a point.
///
/// Non-finite closes, which Yahoo reports for halted sessions, yield `None`.
fn price_point<T>(timestamp: T, close: f64) -> Result<Option<PricePoint>>
where
    T: TryInto<i64>,
    <T as TryInto<i64>>::Error: Display,
{
    if !close.is_finite() {
        return Ok(None);
    }

    let secs: i64 = timestamp
        .try_into()
        .map_err(|e| DataError::TimeConversion(e.to_string()))?;
    let date = DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| DataError::TimeConversion(format!("timestamp out of range: {secs}")))?
        .date_naive();

    Ok(Some(PricePoint::new(date, close)))
}
