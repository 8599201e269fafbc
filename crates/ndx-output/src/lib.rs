#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ndx/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod chart;
pub mod export;

pub use chart::{Chart, ChartRenderer, ChartStyle, chart_title};
pub use export::{
    CSV_FILENAME, CSV_MIME, DownloadLink, ExportError, ExportFormat, Exporter, shape_readout,
};
