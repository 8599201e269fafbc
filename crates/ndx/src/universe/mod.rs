//! Constituent universe: sectors, filtering and the memoized table.
//!
//! Sector labels are taken from the loaded table, never from a fixed list.
//! [`GicsSector`] only adds canonical names, codes and shorthand parsing on
//! top of them.

pub mod cache;
pub mod gics;
pub mod sectors;

pub use cache::ConstituentCache;
pub use gics::GicsSector;
pub use sectors::{distinct_sectors, filter, resolve_sectors, sector_counts};
