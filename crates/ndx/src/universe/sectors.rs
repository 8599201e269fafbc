//! Sector set derivation and sector filtering.

use crate::error::{Error, Result};
use crate::universe::gics::GicsSector;
use ndx_data::ConstituentTable;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Distinct sector labels of a table, sorted ascending.
pub fn distinct_sectors(table: &ConstituentTable) -> Vec<String> {
    table
        .rows()
        .iter()
        .map(|row| row.sector.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Rows whose sector is in `selected`, in table order.
///
/// An empty selection yields an empty table, not the full one. Columns are
/// kept either way.
pub fn filter(table: &ConstituentTable, selected: &BTreeSet<String>) -> ConstituentTable {
    let rows: Vec<_> = table
        .rows()
        .iter()
        .filter(|row| selected.contains(&row.sector))
        .cloned()
        .collect();
    debug!(
        selected = selected.len(),
        kept = rows.len(),
        total = table.len(),
        "filtered constituents"
    );
    table.with_rows(rows)
}

/// Row count per sector.
pub fn sector_counts(table: &ConstituentTable) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for row in table.rows() {
        *counts.entry(row.sector.clone()).or_insert(0) += 1;
    }
    counts
}

/// Resolve user-supplied sector names against the sectors of a table.
///
/// Names match case-insensitively; GICS shorthand (`tech`, `health`, `45`)
/// is accepted when its canonical label is one of `sectors`.
///
/// # Errors
///
/// Returns [`Error::UnknownSector`] for the first name that matches nothing.
pub fn resolve_sectors<I, S>(inputs: I, sectors: &[String]) -> Result<BTreeSet<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    inputs
        .into_iter()
        .map(|input| resolve_one(input.as_ref(), sectors))
        .collect()
}

fn resolve_one(input: &str, sectors: &[String]) -> Result<String> {
    let name = input.trim();
    if let Some(found) = sectors.iter().find(|s| s.eq_ignore_ascii_case(name)) {
        return Ok(found.clone());
    }

    name.parse::<GicsSector>()
        .ok()
        .and_then(|gics| sectors.iter().find(|s| s.eq_ignore_ascii_case(gics.name())))
        .cloned()
        .ok_or_else(|| Error::UnknownSector {
            name: name.to_string(),
            available: sectors.join(", "),
        })
}
