use std::collections::HashMap;

/// One record of the source CSV: a column-name → string-value map plus the
/// 1-based line number it came from.
///
/// All values are strings; the empty string means "absent". Dynamic
/// `Attribute <N> …` columns live here alongside the fixed ones and are
/// discovered by the attribute classifier, not hard-coded.
#[derive(Debug, Clone, Default)]
pub struct SourceRow {
    line: u64,
    columns: HashMap<String, String>,
}

impl SourceRow {
    #[must_use]
    pub fn new(line: u64, columns: HashMap<String, String>) -> Self {
        SourceRow { line, columns }
    }

    /// Source line number (1-based, counting the header as line 1).
    #[must_use]
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Returns the trimmed value of `column`, or `""` when the column is
    /// missing or empty.
    #[must_use]
    pub fn get(&self, column: &str) -> &str {
        self.columns.get(column).map_or("", |v| v.trim())
    }

    /// Iterates over all column names present in this row.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }
}
