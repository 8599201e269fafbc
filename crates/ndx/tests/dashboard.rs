//! End-to-end render passes over in-memory sources.

use async_trait::async_trait;
use chrono::NaiveDate;
use ndx::data::{
    ConstituentSource, ConstituentTable, DataError, PricePoint, PriceProvider, PriceSeries,
};
use ndx::output::{Exporter, ExportFormat};
use ndx::{Dashboard, DashboardConfig, DashboardState, Error, Phase};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Source serving a fixed table, counting loads.
struct MemorySource {
    table: Option<ConstituentTable>,
    loads: AtomicUsize,
}

impl MemorySource {
    fn new(table: ConstituentTable) -> Self {
        Self {
            table: Some(table),
            loads: AtomicUsize::new(0),
        }
    }

    /// A page without a constituent table.
    fn unparsable() -> Self {
        Self {
            table: None,
            loads: AtomicUsize::new(0),
        }
    }

    fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<'a> ConstituentSource for &'a MemorySource {
    async fn load(&self) -> ndx::data::Result<ConstituentTable> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.table
            .clone()
            .ok_or_else(|| DataError::SourceUnavailable("no constituent table".to_string()))
    }
}

/// Provider returning a short rising series per ticker and recording batches.
#[derive(Default)]
struct RecordingProvider {
    batches: Mutex<Vec<Vec<String>>>,
    without_data: Vec<String>,
    fail: bool,
}

impl RecordingProvider {
    fn batches(&self) -> Vec<Vec<String>> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl<'a> PriceProvider for &'a RecordingProvider {
    async fn fetch_ytd(&self, tickers: &[String]) -> ndx::data::Result<PriceSeries> {
        self.batches.lock().unwrap().push(tickers.to_vec());
        if self.fail {
            return Err(DataError::DataProvider {
                ticker: tickers[0].clone(),
                reason: "HTTP 429".to_string(),
            });
        }

        let mut series = PriceSeries::new();
        for ticker in tickers.iter().filter(|t| !self.without_data.contains(*t)) {
            let points = (2..6)
                .map(|d| {
                    let date = NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
                    PricePoint::new(date, 100.0 + f64::from(d))
                })
                .collect();
            series.insert(ticker.as_str(), points);
        }
        Ok(series)
    }
}

fn table(rows: &[(&str, &str)]) -> ConstituentTable {
    let columns = ["Company", "Ticker", "GICS Sector", "GICS Sub-Industry"]
        .map(String::from)
        .to_vec();
    let records = rows
        .iter()
        .map(|(ticker, sector)| {
            vec![
                format!("{ticker} Inc."),
                (*ticker).to_string(),
                (*sector).to_string(),
                String::new(),
            ]
        })
        .collect();
    ConstituentTable::from_records(columns, records).unwrap()
}

fn technology_and_health() -> ConstituentTable {
    table(&[
        ("AAPL", "Technology"),
        ("AMGN", "Health Care"),
        ("MSFT", "Technology"),
        ("GILD", "Health Care"),
        ("NVDA", "Technology"),
        ("ADBE", "Technology"),
        ("ISRG", "Health Care"),
        ("AMD", "Technology"),
    ])
}

fn twenty_rows() -> ConstituentTable {
    let tickers: Vec<String> = (0..20).map(|i| format!("T{i:02}")).collect();
    let rows: Vec<(&str, &str)> = tickers.iter().map(|t| (t.as_str(), "Energy")).collect();
    table(&rows)
}

#[tokio::test]
async fn test_default_render_selects_everything() {
    let source = MemorySource::new(technology_and_health());
    let provider = RecordingProvider::default();
    let mut dashboard = Dashboard::new(&source, &provider);

    let state = DashboardState::default();
    assert_eq!(state.phase(), Phase::Idle);
    let view = dashboard.render(&state).await.unwrap();

    assert_eq!(view.sectors, vec!["Health Care", "Technology"]);
    assert_eq!(view.selected.len(), 2);
    assert_eq!(view.table.len(), 8);
    assert_eq!(view.shape, "8 rows × 4 columns");
    assert!(view.fetched_tickers.is_empty());
    assert!(!view.has_charts());
    assert!(provider.batches().is_empty());
}

#[tokio::test]
async fn test_technology_only() {
    let source = MemorySource::new(technology_and_health());
    let provider = RecordingProvider::default();
    let mut dashboard = Dashboard::new(&source, &provider);

    let state = DashboardState::default().select_sectors(["Technology"]);
    let view = dashboard.render(&state).await.unwrap();

    assert_eq!(view.table.len(), 5);
    assert!(view.table.rows().iter().all(|r| r.sector == "Technology"));

    let csv = String::from_utf8(view.download.payload.clone()).unwrap();
    assert_eq!(csv.lines().count(), 6);
    assert_eq!(
        view.download.payload,
        view.table.export_to_bytes(ExportFormat::Csv).unwrap()
    );
}

#[tokio::test]
async fn test_empty_selection_renders_empty_table() {
    let source = MemorySource::new(technology_and_health());
    let provider = RecordingProvider::default();
    let mut dashboard = Dashboard::new(&source, &provider);

    let state = DashboardState::default()
        .select_sectors(Vec::<String>::new())
        .request_charts();
    let view = dashboard.render(&state).await.unwrap();

    assert!(view.table.is_empty());
    assert_eq!(view.shape, "0 rows × 4 columns");
    assert!(view.charts.is_empty());
    assert_eq!(provider.batches(), vec![Vec::<String>::new()]);
}

#[tokio::test]
async fn test_fetch_batch_is_first_fifteen() {
    let source = MemorySource::new(twenty_rows());
    let provider = RecordingProvider::default();
    let mut dashboard = Dashboard::new(&source, &provider);

    let state = DashboardState::default().with_chart_count(3).request_charts();
    let view = dashboard.render(&state).await.unwrap();

    let expected: Vec<String> = (0..15).map(|i| format!("T{i:02}")).collect();
    assert_eq!(provider.batches(), vec![expected.clone()]);
    assert_eq!(view.fetched_tickers, expected);

    assert_eq!(
        view.chart_titles(),
        vec![
            "T00 Stock Price Chart",
            "T01 Stock Price Chart",
            "T02 Stock Price Chart"
        ]
    );
}

#[tokio::test]
async fn test_chart_count_limited_by_batch() {
    let source = MemorySource::new(technology_and_health());
    let provider = RecordingProvider::default();
    let mut dashboard = Dashboard::new(&source, &provider);

    let state = DashboardState::default()
        .select_sectors(["Health Care"])
        .with_chart_count(10)
        .request_charts();
    let view = dashboard.render(&state).await.unwrap();

    assert_eq!(view.fetched_tickers, vec!["AMGN", "GILD", "ISRG"]);
    assert_eq!(view.charts.len(), 3);
}

#[tokio::test]
async fn test_custom_fetch_limit() {
    let source = MemorySource::new(twenty_rows());
    let provider = RecordingProvider::default();
    let config = DashboardConfig {
        fetch_limit: 4,
        ..DashboardConfig::default()
    };
    let mut dashboard = Dashboard::with_config(&source, &provider, config);

    let state = DashboardState::default().with_chart_count(10).request_charts();
    let view = dashboard.render(&state).await.unwrap();

    assert_eq!(view.fetched_tickers.len(), 4);
    assert_eq!(view.charts.len(), 4);
}

#[tokio::test]
async fn test_unparsable_source_renders_nothing() {
    let source = MemorySource::unparsable();
    let provider = RecordingProvider::default();
    let mut dashboard = Dashboard::new(&source, &provider);

    let result = dashboard.render(&DashboardState::default()).await;

    assert!(matches!(
        result,
        Err(Error::Data(DataError::SourceUnavailable(_)))
    ));
    assert!(dashboard.cache().cached().is_none());
}

#[tokio::test]
async fn test_provider_failure_aborts_render() {
    let source = MemorySource::new(technology_and_health());
    let provider = RecordingProvider {
        fail: true,
        ..RecordingProvider::default()
    };
    let mut dashboard = Dashboard::new(&source, &provider);

    let result = dashboard
        .render(&DashboardState::default().request_charts())
        .await;
    assert!(matches!(
        result,
        Err(Error::Data(DataError::DataProvider { .. }))
    ));
}

#[tokio::test]
async fn test_ticker_without_prices_is_missing_series() {
    let source = MemorySource::new(technology_and_health());
    let provider = RecordingProvider {
        without_data: vec!["AMGN".to_string()],
        ..RecordingProvider::default()
    };
    let mut dashboard = Dashboard::new(&source, &provider);

    // AMGN is second in table order.
    let result = dashboard
        .render(&DashboardState::default().with_chart_count(2).request_charts())
        .await;
    let err = result.unwrap_err();
    assert!(err.is_missing_series());
    assert!(err.to_string().contains("AMGN"));

    // Charting only the first ticker never touches AMGN.
    let view = dashboard
        .render(&DashboardState::default().with_chart_count(1).request_charts())
        .await
        .unwrap();
    assert_eq!(view.chart_titles(), vec!["AAPL Stock Price Chart"]);
}

#[tokio::test]
async fn test_table_loaded_once_across_renders() {
    let source = MemorySource::new(technology_and_health());
    let provider = RecordingProvider::default();
    let mut dashboard = Dashboard::new(&source, &provider);

    dashboard.render(&DashboardState::default()).await.unwrap();
    dashboard
        .render(&DashboardState::default().select_sectors(["Technology"]))
        .await
        .unwrap();
    dashboard
        .render(&DashboardState::default().request_charts())
        .await
        .unwrap();

    assert_eq!(source.loads(), 1);
    assert_eq!(provider.batches().len(), 1);

    dashboard.reload().await.unwrap();
    assert_eq!(source.loads(), 2);
    assert_eq!(dashboard.cache().loads(), 2);
}

#[tokio::test]
async fn test_render_is_repeatable() {
    let source = MemorySource::new(technology_and_health());
    let provider = RecordingProvider::default();
    let mut dashboard = Dashboard::new(&source, &provider);

    let state = DashboardState::default().select_sectors(["Technology", "Health Care"]);
    let first = dashboard.render(&state).await.unwrap();
    let second = dashboard.render(&state).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.table, technology_and_health());
}
