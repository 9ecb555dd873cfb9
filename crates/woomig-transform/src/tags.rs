//! Category-path processing and tag reconciliation.

use woomig_core::MigrationContext;

use crate::decade::normalize_decade;

/// Title-cases a tag: for each whitespace-separated word, the first
/// character is uppercased and the rest lowercased. Words starting with a
/// digit are left alone apart from the lowercasing, so decade tags like
/// `1950s` pass through unchanged.
#[must_use]
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;
    for c in value.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            at_word_start = false;
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// Splits a raw `Categories` string into candidate tags and extracts a
/// designer name.
///
/// The raw value is a comma-separated list of `>`-delimited breadcrumb
/// paths. Every path segment becomes a candidate tag. A path whose first
/// segment is `Designers` (case-insensitive) names the designer in its
/// second segment; the literal `Designers` tag itself is replaced by a
/// trailing `Designer`. All resulting tags are recorded in the context's
/// category accumulator for the collection pass.
#[must_use]
pub fn process_categories(
    categories: &str,
    ctx: &mut MigrationContext,
) -> (Vec<String>, Option<String>) {
    if categories.trim().is_empty() {
        return (Vec::new(), None);
    }

    let mut all_tags: Vec<String> = Vec::new();
    let mut designer: Option<String> = None;

    for category in categories.split(',') {
        let parts: Vec<&str> = category
            .split('>')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        if parts.len() > 1 && parts[0].eq_ignore_ascii_case("designers") {
            designer = Some(parts[1].to_string());
        }

        all_tags.extend(parts.into_iter().map(str::to_owned));
    }

    let mut unique_tags: Vec<String> = Vec::new();
    for tag in all_tags {
        if !tag.is_empty() && !unique_tags.contains(&tag) {
            unique_tags.push(tag);
        }
    }

    if let Some(pos) = unique_tags.iter().position(|t| t == "Designers") {
        unique_tags.remove(pos);
        unique_tags.push("Designer".to_string());
    }

    for tag in &unique_tags {
        ctx.add_category(tag);
    }

    (unique_tags, designer)
}

/// Merges category-derived and attribute-derived tags into one deduplicated,
/// title-cased list.
///
/// Category tags come first. Each candidate is transformed before
/// deduplication: decade-shaped values are normalized via
/// [`normalize_decade`], everything else is title-cased, and the degenerate
/// `"[]"` value is suppressed. Returns `None` when nothing survives, so
/// callers omit the tags field entirely instead of sending an empty list.
#[must_use]
pub fn reconcile_tags(category_tags: &[String], attr_tags: &[String]) -> Option<Vec<String>> {
    let mut unique_tags: Vec<String> = Vec::new();

    for tag in category_tags.iter().chain(attr_tags) {
        if tag.is_empty() {
            continue;
        }
        let transformed = match normalize_decade(tag) {
            Some(decade) => title_case(&decade),
            None => title_case(tag),
        };
        if transformed == "[]" {
            continue;
        }
        if !unique_tags.contains(&transformed) {
            unique_tags.push(transformed);
        }
    }

    // Attribute-derived tags can reintroduce the raw category label; the
    // singular form replaces it here as well.
    if let Some(pos) = unique_tags.iter().position(|t| t == "Designers") {
        unique_tags.remove(pos);
        if !unique_tags.contains(&"Designer".to_string()) {
            unique_tags.push("Designer".to_string());
        }
    }

    if unique_tags.is_empty() {
        None
    } else {
        Some(unique_tags)
    }
}
