//! Output of one render pass.

use ndx_data::ConstituentTable;
use ndx_output::{Chart, DownloadLink};
use std::collections::BTreeSet;

/// Everything the shell displays after a render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    /// Sorted sector labels of the loaded table.
    pub sectors: Vec<String>,
    /// Labels selected for this pass.
    pub selected: BTreeSet<String>,
    /// Filtered table.
    pub table: ConstituentTable,
    /// Row and column count readout.
    pub shape: String,
    /// CSV download of the filtered table.
    pub download: DownloadLink,
    /// Tickers sent to the price provider. Empty unless charts were requested.
    pub fetched_tickers: Vec<String>,
    /// Rendered charts, in table order.
    pub charts: Vec<Chart>,
}

impl ViewModel {
    /// Whether any chart was rendered.
    pub fn has_charts(&self) -> bool {
        !self.charts.is_empty()
    }

    /// Chart titles in render order.
    pub fn chart_titles(&self) -> Vec<&str> {
        self.charts.iter().map(|c| c.title.as_str()).collect()
    }
}
