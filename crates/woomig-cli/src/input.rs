//! CSV export loading.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use woomig_core::SourceRow;

/// Reads a WooCommerce product export into all-string rows.
///
/// Every cell keeps its raw string form; interpretation happens downstream.
/// Line numbers are 1-based file positions, so with the header on line 1 the
/// first data row is line 2 — these numbers end up in the side logs, where an
/// operator matches them against the spreadsheet.
pub(crate) fn load_rows(path: &Path) -> anyhow::Result<Vec<SourceRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("cannot open CSV export {}", path.display()))?;
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record =
            record.with_context(|| format!("malformed CSV record in {}", path.display()))?;
        let columns: HashMap<String, String> = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.to_string(), value.to_string()))
            .collect();
        rows.push(SourceRow::new(index as u64 + 2, columns));
    }

    Ok(rows)
}
