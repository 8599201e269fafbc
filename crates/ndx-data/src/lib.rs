#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ndx/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod source;
pub mod table;
pub mod wikipedia;
pub mod yahoo;

pub use error::{DataError, Result};
pub use source::{ConstituentSource, PriceProvider};
pub use table::{ConstituentRow, ConstituentTable};
pub use yahoo::{PricePoint, PriceSeries};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
