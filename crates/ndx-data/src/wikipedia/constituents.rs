//! Nasdaq-100 constituent table from Wikipedia.
//!
//! The page carries several tables. The constituent table is the first one
//! whose header names both a `Ticker` and a `GICS Sector` column; its position
//! on the page is not relied on. This is a fragile external contract, covered
//! by contract tests against a fixture snapshot of the page.

use crate::error::{DataError, Result};
use crate::source::ConstituentSource;
use crate::table::{ConstituentTable, SECTOR_COLUMN, TICKER_COLUMN, find_column};
use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default constituent page.
pub const DEFAULT_URL: &str = "https://en.wikipedia.org/wiki/Nasdaq-100";

/// Default user agent sent with page requests.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)";

/// Configuration for the constituent loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Page holding the constituent table.
    pub url: String,
    /// User agent header.
    pub user_agent: String,
}

impl LoaderConfig {
    /// Default configuration pointed at another page.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Constituent source backed by the Wikipedia page.
#[derive(Debug)]
pub struct WikipediaConstituentSource {
    client: reqwest::Client,
    config: LoaderConfig,
}

impl WikipediaConstituentSource {
    /// Create a source for the default page.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Network`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        Self::with_config(LoaderConfig::default())
    }

    /// Create a source with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Network`] if the HTTP client cannot be built.
    pub fn with_config(config: LoaderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client, config })
    }

    /// Loader configuration.
    pub const fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Download the raw page.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::SourceUnavailable`] on transport failure or a
    /// non-success status.
    pub async fn fetch_html(&self) -> Result<String> {
        debug!(url = %self.config.url, "fetching constituent page");

        let response = self
            .client
            .get(&self.config.url)
            .send()
            .await
            .map_err(unavailable)?
            .error_for_status()
            .map_err(unavailable)?;

        response.text().await.map_err(unavailable)
    }
}

#[async_trait]
impl ConstituentSource for WikipediaConstituentSource {
    async fn load(&self) -> Result<ConstituentTable> {
        let html = self.fetch_html().await?;
        parse_constituents(&html)
    }
}

/// Constituent source reading a saved copy of the page.
#[derive(Debug, Clone)]
pub struct HtmlFileSource {
    path: PathBuf,
}

impl HtmlFileSource {
    /// Read the page from `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl ConstituentSource for HtmlFileSource {
    async fn load(&self) -> Result<ConstituentTable> {
        debug!(path = %self.path.display(), "reading constituent page");
        let html = std::fs::read_to_string(&self.path).map_err(|e| {
            DataError::SourceUnavailable(format!("{}: {}", self.path.display(), e))
        })?;
        parse_constituents(&html)
    }
}

fn unavailable(err: reqwest::Error) -> DataError {
    DataError::SourceUnavailable(err.to_string())
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| DataError::SourceUnavailable(format!("invalid selector {css}: {e:?}")))
}

/// Parse the constituent table out of the page HTML.
///
/// # Errors
///
/// Returns [`DataError::SourceUnavailable`] if no table with `Ticker` and
/// `GICS Sector` columns and at least one data row exists.
pub fn parse_constituents(html: &str) -> Result<ConstituentTable> {
    let document = Html::parse_document(html);
    let tables = selector("table")?;
    let rows = selector("tr")?;

    for (position, table) in document.select(&tables).enumerate() {
        let mut header: Option<Vec<String>> = None;
        let mut records: Vec<Vec<String>> = Vec::new();

        for cells in expanded_rows(table, &rows) {
            if cells.is_empty() {
                continue;
            }

            if header.is_none() {
                if cells.iter().all(|c| c.header) {
                    header = Some(cells.iter().map(Cell::header_text).collect());
                }
            } else if cells.iter().any(|c| !c.header) {
                records.push(cells.iter().map(Cell::data_text).collect());
            }
        }

        let Some(columns) = header else {
            continue;
        };
        if find_column(&columns, TICKER_COLUMN).is_none()
            || find_column(&columns, SECTOR_COLUMN).is_none()
        {
            continue;
        }
        if records.is_empty() {
            debug!(position, "constituent table has no data rows, skipping");
            continue;
        }

        debug!(position, rows = records.len(), "found constituent table");
        return ConstituentTable::from_records(columns, records);
    }

    Err(DataError::SourceUnavailable(format!(
        "no table with `{TICKER_COLUMN}` and `{SECTOR_COLUMN}` columns found"
    )))
}

/// Largest `colspan` browsers honour.
const MAX_COLSPAN: usize = 1000;

/// Largest `rowspan` browsers honour.
const MAX_ROWSPAN: usize = 65534;

/// Table cell with its raw text.
#[derive(Debug, Clone)]
struct Cell {
    text: String,
    header: bool,
}

impl Cell {
    fn new(element: ElementRef<'_>) -> Self {
        Self {
            text: element.text().collect(),
            header: element.value().name() == "th",
        }
    }

    fn data_text(&self) -> String {
        normalize_ws(&self.text)
    }

    fn header_text(&self) -> String {
        normalize_ws(&strip_footnotes(&self.text))
    }
}

/// Rows of `table` on a grid, with merged cells repeated into every slot
/// they cover.
///
/// A cell with `colspan="n"` fills `n` columns of its row; one with
/// `rowspan="n"` fills the same columns of the next `n - 1` rows.
fn expanded_rows(table: ElementRef<'_>, rows: &Selector) -> Vec<Vec<Cell>> {
    // Cell still spanning down into column `i`, with the rows it has left.
    let mut carried: Vec<Option<(Cell, usize)>> = Vec::new();
    let mut out = Vec::new();

    for row in table.select(rows) {
        let mut own = row_cells(row).into_iter();
        let mut cells = Vec::new();

        loop {
            let col = cells.len();
            if let Some((cell, left)) = carried.get_mut(col).and_then(Option::take) {
                if left > 1 {
                    carried[col] = Some((cell.clone(), left - 1));
                }
                cells.push(cell);
                continue;
            }

            let Some(element) = own.next() else {
                break;
            };
            let cell = Cell::new(element);
            let colspan = span(element, "colspan", MAX_COLSPAN);
            let rowspan = span(element, "rowspan", MAX_ROWSPAN);

            for _ in 0..colspan {
                if rowspan > 1 {
                    let col = cells.len();
                    if carried.len() <= col {
                        carried.resize(col + 1, None);
                    }
                    carried[col] = Some((cell.clone(), rowspan - 1));
                }
                cells.push(cell.clone());
            }
        }

        out.push(cells);
    }

    out
}

/// Span attribute of a cell; missing, zero or malformed values count as 1.
fn span(cell: ElementRef<'_>, name: &str, max: usize) -> usize {
    cell.value()
        .attr(name)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .map_or(1, |n| n.clamp(1, max))
}

/// Direct `th`/`td` children of a row.
fn row_cells(row: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|c| matches!(c.value().name(), "th" | "td"))
        .collect()
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drop footnote markers such as `[1]` or `[note 2]`.
fn strip_footnotes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(open) = rest.find('[') {
        out.push_str(&rest[..open]);
        match rest[open..].find(']') {
            Some(close) => rest = &rest[open + close + 1..],
            None => {
                rest = &rest[open..];
                break;
            }
        }
    }
    out.push_str(rest);
    out
}
