//! Memoized constituent table.

use ndx_data::{ConstituentSource, ConstituentTable, Result};
use tracing::{debug, info, warn};

/// Holds the constituent table once it has been loaded.
///
/// The table is loaded on first access and then reused until
/// [`reload`](Self::reload) or [`invalidate`](Self::invalidate) is called.
#[derive(Debug, Default)]
pub struct ConstituentCache {
    table: Option<ConstituentTable>,
    loads: usize,
}

impl ConstituentCache {
    /// Create an empty cache.
    pub const fn new() -> Self {
        Self {
            table: None,
            loads: 0,
        }
    }

    /// Cached table, if any.
    pub const fn cached(&self) -> Option<&ConstituentTable> {
        self.table.as_ref()
    }

    /// Number of successful loads from a source.
    pub const fn loads(&self) -> usize {
        self.loads
    }

    /// Cached table, loading it from `source` on first access.
    ///
    /// # Errors
    ///
    /// Propagates the source error; the cache stays empty.
    pub async fn get_or_load<S>(&mut self, source: &S) -> Result<&ConstituentTable>
    where
        S: ConstituentSource + ?Sized,
    {
        let table = match self.table.take() {
            Some(table) => {
                debug!("using cached constituent table");
                table
            }
            None => self.load(source).await?,
        };
        Ok(self.table.insert(table))
    }

    /// Load the table again, replacing the cached one.
    ///
    /// # Errors
    ///
    /// Propagates the source error and keeps the previously cached table.
    pub async fn reload<S>(&mut self, source: &S) -> Result<&ConstituentTable>
    where
        S: ConstituentSource + ?Sized,
    {
        match self.load(source).await {
            Ok(table) => Ok(self.table.insert(table)),
            Err(e) => {
                warn!(error = %e, "reload failed, keeping cached table");
                Err(e)
            }
        }
    }

    /// Drop the cached table.
    pub fn invalidate(&mut self) {
        self.table = None;
    }

    async fn load<S>(&mut self, source: &S) -> Result<ConstituentTable>
    where
        S: ConstituentSource + ?Sized,
    {
        let table = source.load().await?;
        self.loads += 1;
        info!(rows = table.len(), columns = table.width(), "loaded constituent table");
        Ok(table)
    }
}
