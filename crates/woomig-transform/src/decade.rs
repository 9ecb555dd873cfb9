//! Canonicalization of free-text decade and year strings.
//!
//! Source data writes decades every way imaginable — `1950s`, `1950S`,
//! `1950's`, `1950`, `50s`, `50's`, bare `1953` — and they must all collapse
//! to a single tag so deduplication and smart collections work.

use std::sync::LazyLock;

use regex::Regex;

/// Four-digit year, optionally followed by `s`, `S`, or `'s`.
static FULL_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})(?:'?[sS])?$").expect("valid regex"));

/// Two-digit year, optionally followed by `s`, `S`, or `'s`.
static SHORT_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2})(?:'?[sS])?$").expect("valid regex"));

/// Parses a decade-shaped string into the canonical `"<decade>s"` token.
///
/// The matched year is floored to its decade (`1953` → `"1950s"`). Two-digit
/// years resolve their century at 50: `50s` → `"1950s"`, `05s` → `"2000s"`.
///
/// Returns `None` when the input is not decade-shaped. Callers must treat
/// that as "not a decade", never as a parse failure.
#[must_use]
pub fn normalize_decade(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let year: u32 = if let Some(caps) = FULL_YEAR_RE.captures(value) {
        caps[1].parse().ok()?
    } else if let Some(caps) = SHORT_YEAR_RE.captures(value) {
        let short: u32 = caps[1].parse().ok()?;
        if short >= 50 {
            1900 + short
        } else {
            2000 + short
        }
    } else {
        return None;
    };

    let decade = (year / 10) * 10;
    Some(format!("{decade}s"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_year_variants_all_collapse() {
        for input in ["1950", "1950s", "1950S", "1950's"] {
            assert_eq!(
                normalize_decade(input).as_deref(),
                Some("1950s"),
                "input: {input}"
            );
        }
    }

    #[test]
    fn mid_decade_year_floors() {
        assert_eq!(normalize_decade("1953").as_deref(), Some("1950s"));
        assert_eq!(normalize_decade("1967").as_deref(), Some("1960s"));
    }

    #[test]
    fn two_digit_variants_resolve_century() {
        for input in ["50s", "50S", "50's"] {
            assert_eq!(
                normalize_decade(input).as_deref(),
                Some("1950s"),
                "input: {input}"
            );
        }
        assert_eq!(normalize_decade("05s").as_deref(), Some("2000s"));
        assert_eq!(normalize_decade("49s").as_deref(), Some("2040s"));
    }

    #[test]
    fn bare_two_digit_number_resolves_century() {
        assert_eq!(normalize_decade("50").as_deref(), Some("1950s"));
        assert_eq!(normalize_decade("05").as_deref(), Some("2000s"));
    }

    #[test]
    fn idempotent_on_canonical_output() {
        let once = normalize_decade("1950's").unwrap();
        assert_eq!(normalize_decade(&once), Some(once.clone()));
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        assert_eq!(normalize_decade("  1950s  ").as_deref(), Some("1950s"));
    }

    #[test]
    fn non_decade_strings_return_none() {
        for input in ["", "Chairs", "195", "19501", "mid-century", "'s"] {
            assert!(normalize_decade(input).is_none(), "input: {input:?}");
        }
    }
}
