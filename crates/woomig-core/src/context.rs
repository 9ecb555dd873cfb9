use std::collections::BTreeSet;

/// A dimension string that matched none of the known shapes, queued for the
/// side log (non-fatal; the product is still created without dimensions).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnparsedDimension {
    pub line: u64,
    pub sku: String,
    pub name: String,
    pub raw: String,
}

/// Mutable state shared across one migration run.
///
/// Passed explicitly through assembly rather than living in a global so runs
/// can be composed and tested in isolation. The category set is append-only
/// for the duration of a run and is consumed by the final collection pass in
/// sorted order.
#[derive(Debug, Default)]
pub struct MigrationContext {
    categories: BTreeSet<String>,
    unparsed_dimensions: Vec<UnparsedDimension>,
}

impl MigrationContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a category tag for the collection pass. Empty strings are
    /// ignored.
    pub fn add_category(&mut self, tag: &str) {
        if !tag.is_empty() {
            self.categories.insert(tag.to_string());
        }
    }

    /// All distinct categories seen so far, in sorted order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(String::as_str)
    }

    #[must_use]
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn record_unparsed_dimension(&mut self, record: UnparsedDimension) {
        self.unparsed_dimensions.push(record);
    }

    /// Removes and returns all queued unparsed-dimension records. The runner
    /// drains this after each row and appends the records to the side log.
    pub fn drain_unparsed_dimensions(&mut self) -> Vec<UnparsedDimension> {
        std::mem::take(&mut self.unparsed_dimensions)
    }
}
