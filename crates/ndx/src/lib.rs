#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ndx/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod dashboard;
pub mod error;
pub mod universe;

// Re-export sub-crates
pub use ndx_data as data;
pub use ndx_output as output;

pub use dashboard::{
    Dashboard, DashboardConfig, DashboardState, Phase, Selection, ViewModel, price_batch,
};
pub use error::{Error, Result};
pub use universe::{
    ConstituentCache, GicsSector, distinct_sectors, filter, resolve_sectors, sector_counts,
};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
