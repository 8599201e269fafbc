//! Render pipeline of the dashboard.
//!
//! Every interaction re-runs [`Dashboard::render`] from the top: the
//! constituent table comes from the cache, everything after it is derived
//! again from the given [`DashboardState`].

pub mod state;
pub mod view;

pub use state::{DashboardState, MAX_CHART_COUNT, Phase, Selection};
pub use view::ViewModel;

use crate::error::Result;
use crate::universe::{ConstituentCache, distinct_sectors, filter};
use ndx_data::{ConstituentSource, ConstituentTable, PriceProvider};
use ndx_output::{Chart, ChartRenderer, DownloadLink, shape_readout};
use tracing::{debug, info};

/// Default number of tickers sent to the price provider.
pub const DEFAULT_FETCH_LIMIT: usize = 15;

/// Dashboard limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Tickers, from the front of the filtered table, fetched per chart request.
    pub fetch_limit: usize,
    /// Upper bound on rendered charts.
    pub max_charts: u8,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            fetch_limit: DEFAULT_FETCH_LIMIT,
            max_charts: MAX_CHART_COUNT,
        }
    }
}

/// First `min(limit, rows)` tickers of a table.
pub fn price_batch(table: &ConstituentTable, limit: usize) -> Vec<String> {
    table
        .rows()
        .iter()
        .take(limit)
        .map(|row| row.ticker.clone())
        .collect()
}

/// Number of charts to render for a batch.
pub fn chart_count(requested: u8, max: u8, batch_len: usize) -> usize {
    usize::from(requested.clamp(1, max.max(1))).min(batch_len)
}

/// Constituent dashboard over a table source and a price provider.
#[derive(Debug)]
pub struct Dashboard<S, P> {
    source: S,
    provider: P,
    cache: ConstituentCache,
    renderer: ChartRenderer,
    config: DashboardConfig,
}

impl<S, P> Dashboard<S, P>
where
    S: ConstituentSource,
    P: PriceProvider,
{
    /// Create a dashboard with default limits and chart style.
    pub fn new(source: S, provider: P) -> Self {
        Self::with_config(source, provider, DashboardConfig::default())
    }

    /// Create a dashboard with custom limits.
    pub fn with_config(source: S, provider: P, config: DashboardConfig) -> Self {
        Self {
            source,
            provider,
            cache: ConstituentCache::new(),
            renderer: ChartRenderer::new(),
            config,
        }
    }

    /// Replace the chart renderer.
    pub fn with_renderer(mut self, renderer: ChartRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Dashboard limits.
    pub const fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Constituent cache.
    pub const fn cache(&self) -> &ConstituentCache {
        &self.cache
    }

    /// Full constituent table, loaded on first access.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be loaded.
    pub async fn table(&mut self) -> Result<&ConstituentTable> {
        Ok(self.cache.get_or_load(&self.source).await?)
    }

    /// Load the constituent table again.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be loaded; the cached table is
    /// kept in that case.
    pub async fn reload(&mut self) -> Result<&ConstituentTable> {
        Ok(self.cache.reload(&self.source).await?)
    }

    /// Run one render pass.
    ///
    /// # Errors
    ///
    /// Any loader, export, price or chart failure aborts the pass and no view
    /// is produced.
    pub async fn render(&mut self, state: &DashboardState) -> Result<ViewModel> {
        debug!(phase = ?state.phase(), "rendering dashboard");

        let table = self.cache.get_or_load(&self.source).await?;
        let sectors = distinct_sectors(table);
        let selected = state.selection.resolve(&sectors);
        let filtered = filter(table, &selected);

        let shape = shape_readout(&filtered);
        let download = DownloadLink::csv(&filtered)?;

        let (fetched_tickers, charts) = if state.charts_requested {
            self.charts(&filtered, state.chart_count).await?
        } else {
            (Vec::new(), Vec::new())
        };

        Ok(ViewModel {
            sectors,
            selected,
            table: filtered,
            shape,
            download,
            fetched_tickers,
            charts,
        })
    }

    async fn charts(
        &self,
        table: &ConstituentTable,
        requested: u8,
    ) -> Result<(Vec<String>, Vec<Chart>)> {
        let batch = price_batch(table, self.config.fetch_limit);
        let count = chart_count(requested, self.config.max_charts, batch.len());
        info!(batch = batch.len(), charts = count, "fetching prices for charts");

        let series = self.provider.fetch_ytd(&batch).await?;

        let charts = batch
            .iter()
            .take(count)
            .map(|ticker| self.renderer.render(ticker, &series))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok((batch, charts))
    }
}
