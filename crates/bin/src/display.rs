//! Plain-text rendering for terminal output.

use ndx_data::ConstituentTable;
use std::collections::BTreeMap;

/// Boxed banner line in the width used by every command.
pub(crate) fn banner(title: &str) -> String {
    format!(
        "╔══════════════════════════════════════════════════════════════╗\n\
         ║{title:^62}║\n\
         ╚══════════════════════════════════════════════════════════════╝"
    )
}

/// Column-aligned table with a header rule.
pub(crate) fn table(table: &ConstituentTable) -> String {
    let mut widths: Vec<usize> = table.columns().iter().map(|c| c.chars().count()).collect();
    for row in table.rows() {
        for (width, field) in widths.iter_mut().zip(&row.fields) {
            *width = (*width).max(field.chars().count());
        }
    }

    let mut out = line(table.columns(), &widths);
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in table.rows() {
        out.push('\n');
        out.push_str(&line(&row.fields, &widths));
    }
    out
}

fn line(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Sector breakdown with row counts and a total.
pub(crate) fn sector_counts(counts: &BTreeMap<String, usize>) -> String {
    let width = counts.keys().map(|s| s.chars().count()).max().unwrap_or(0);
    let total: usize = counts.values().sum();

    let mut out = String::new();
    for (sector, count) in counts {
        out.push_str(&format!("  {sector:<width$}  {count:>3}\n"));
    }
    out.push_str(&format!("  {:<width$}  {total:>3}", "Total"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ConstituentTable {
        let columns = ["Ticker", "Company", "GICS Sector"].map(String::from).to_vec();
        let records = vec![
            vec!["AAPL".to_string(), "Apple Inc.".to_string(), "Information Technology".to_string()],
            vec!["PEP".to_string(), "PepsiCo".to_string(), "Consumer Staples".to_string()],
        ];
        ConstituentTable::from_records(columns, records).unwrap()
    }

    #[test]
    fn test_table_aligns_columns() {
        let text = table(&sample());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Ticker  Company     GICS Sector");
        assert_eq!(lines[2], "AAPL    Apple Inc.  Information Technology");
        assert_eq!(lines[3], "PEP     PepsiCo     Consumer Staples");
    }

    #[test]
    fn test_empty_table_keeps_header() {
        let empty = sample().with_rows(Vec::new());
        assert_eq!(table(&empty).lines().count(), 2);
    }

    #[test]
    fn test_sector_counts_total() {
        let counts = BTreeMap::from([("Energy".to_string(), 2), ("Utilities".to_string(), 3)]);
        let text = sector_counts(&counts);
        assert!(text.contains("Utilities    3"));
        assert!(text.ends_with("Total        5"));
    }

    #[test]
    fn test_banner_width() {
        let text = banner("NASDAQ-100");
        assert!(text.lines().all(|l| l.chars().count() == 64));
    }
}
