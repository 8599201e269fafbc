//! Closing price line charts.

use crate::export::ExportError;
use chrono::{Duration, NaiveDate};
use ndx_data::{PricePoint, PriceSeries};
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Chart title for a ticker.
pub fn chart_title(ticker: &str) -> String {
    format!("{ticker} Stock Price Chart")
}

/// Chart dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartStyle {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        // 7 x 5 inches at 100 dpi
        Self {
            width: 700,
            height: 500,
        }
    }
}

/// Rendered chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chart {
    /// Ticker charted.
    pub ticker: String,
    /// Chart title.
    pub title: String,
    /// SVG document.
    pub svg: String,
}

impl Chart {
    /// Write the chart into `dir` as `<ticker>.svg`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let path = dir.join(format!("{}.svg", self.ticker));
        std::fs::write(&path, &self.svg)?;
        Ok(path)
    }
}

/// Line chart renderer: date on the x axis, closing price on the y axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartRenderer {
    style: ChartStyle,
}

impl ChartRenderer {
    /// Create a renderer with the default style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with a custom style.
    pub const fn with_style(style: ChartStyle) -> Self {
        Self { style }
    }

    /// Renderer style.
    pub const fn style(&self) -> ChartStyle {
        self.style
    }

    /// Render the closing price chart of `ticker`.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::MissingSeries`] if `series` has no points for
    /// the ticker, or [`ExportError::Chart`] if drawing fails.
    pub fn render(&self, ticker: &str, series: &PriceSeries) -> Result<Chart, ExportError> {
        let points = series
            .get(ticker)
            .filter(|points| !points.is_empty())
            .ok_or_else(|| ExportError::MissingSeries(ticker.to_string()))?;

        let title = chart_title(ticker);
        let svg = self.draw(&title, points).map_err(ExportError::Chart)?;
        debug!(ticker, points = points.len(), "rendered chart");

        Ok(Chart {
            ticker: ticker.to_string(),
            title,
            svg,
        })
    }

    fn draw(&self, title: &str, points: &[PricePoint]) -> Result<String, String> {
        let (dates, closes) = bounds(points);
        let mut svg = String::new();

        {
            let root = SVGBackend::with_string(&mut svg, (self.style.width, self.style.height))
                .into_drawing_area();
            root.fill(&WHITE).map_err(|e| e.to_string())?;

            let mut chart = ChartBuilder::on(&root)
                .caption(title, ("sans-serif", 20))
                .margin(10)
                .x_label_area_size(40)
                .y_label_area_size(60)
                .build_cartesian_2d(dates, closes)
                .map_err(|e| e.to_string())?;

            chart
                .configure_mesh()
                .x_desc("Date")
                .y_desc("Closing Price")
                .x_labels(6)
                .x_label_formatter(&|d: &NaiveDate| d.format("%b %d").to_string())
                .draw()
                .map_err(|e| e.to_string())?;

            chart
                .draw_series(LineSeries::new(
                    points.iter().map(|p| (p.date, p.close)),
                    &BLUE,
                ))
                .map_err(|e| e.to_string())?;

            root.present().map_err(|e| e.to_string())?;
        }

        Ok(svg)
    }
}

/// Axis ranges for a non-empty, date-sorted series.
///
/// Degenerate ranges (a single day, a flat price) are widened so the axes
/// stay drawable.
fn bounds(points: &[PricePoint]) -> (std::ops::Range<NaiveDate>, std::ops::Range<f64>) {
    let first = points[0].date;
    let mut last = points[points.len() - 1].date;
    if last <= first {
        last = first + Duration::days(1);
    }

    let (mut low, mut high) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.close), hi.max(p.close))
        });
    let pad = (high - low).abs() * 0.05;
    if pad == 0.0 {
        low -= 1.0;
        high += 1.0;
    } else {
        low -= pad;
        high += pad;
    }

    (first..last, low..high)
}
