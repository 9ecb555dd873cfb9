//! Parsing of free-text physical-dimension strings.
//!
//! The source data mixes several formats (`80cm x 80cm x 45.5(h)cm`,
//! `134cm - 239cm x 85cm x 72cm(h)`, `29.5cm(h)`, …). Matching is a fixed,
//! priority-ordered list of patterns — the first match wins, so the stricter
//! shapes must sit ahead of the looser ones that would otherwise swallow
//! their inputs.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Parsed physical dimensions, all in centimetres. Axes the source string
/// does not mention are zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

struct Matcher {
    re: Regex,
    extract: fn(&Captures<'_>) -> Option<Dimensions>,
}

const NUM: &str = r"(\d+(?:\.\d+)?)";

fn group(caps: &Captures<'_>, idx: usize) -> Option<f64> {
    caps.get(idx)?.as_str().parse().ok()
}

/// The pattern list, in priority order. Each pattern is anchored at the
/// start of the normalized input; without the anchor the range shape would
/// never be reached, because its tail also satisfies the plain
/// `W x D x H (h)` pattern.
static MATCHERS: LazyLock<Vec<Matcher>> = LazyLock::new(|| {
    vec![
        // "80cm x 80cm x 45.5(h)cm" / "80cm x 80cm x 45.5cm(h)"
        Matcher {
            re: Regex::new(&format!(r"^{NUM}cmx{NUM}cmx{NUM}(?:cm)?\(h\)")).expect("valid regex"),
            extract: |caps| {
                Some(Dimensions {
                    width: group(caps, 1)?,
                    depth: group(caps, 2)?,
                    height: group(caps, 3)?,
                })
            },
        },
        // "134cm - 239cm x 85cm x 72cm(h)" — width is the mean of the range
        Matcher {
            re: Regex::new(&format!(r"^{NUM}cm-{NUM}cmx{NUM}cmx{NUM}(?:cm)?\(h\)"))
                .expect("valid regex"),
            extract: |caps| {
                Some(Dimensions {
                    width: (group(caps, 1)? + group(caps, 2)?) / 2.0,
                    depth: group(caps, 3)?,
                    height: group(caps, 4)?,
                })
            },
        },
        // "29.5cm(h)" — height only
        Matcher {
            re: Regex::new(&format!(r"^{NUM}(?:cm)?\(h\)")).expect("valid regex"),
            extract: |caps| {
                Some(Dimensions {
                    width: 0.0,
                    depth: 0.0,
                    height: group(caps, 1)?,
                })
            },
        },
        // "160cm x 105cm(h)" — width and height
        Matcher {
            re: Regex::new(&format!(r"^{NUM}cmx{NUM}(?:cm)?\(h\)")).expect("valid regex"),
            extract: |caps| {
                Some(Dimensions {
                    width: group(caps, 1)?,
                    depth: 0.0,
                    height: group(caps, 2)?,
                })
            },
        },
        // "70cm x 70cm x 47.5cm" — no explicit height marker; last value is height
        Matcher {
            re: Regex::new(&format!(r"^{NUM}cmx{NUM}cmx{NUM}cm")).expect("valid regex"),
            extract: |caps| {
                Some(Dimensions {
                    width: group(caps, 1)?,
                    depth: group(caps, 2)?,
                    height: group(caps, 3)?,
                })
            },
        },
    ]
});

/// Parses a free-text dimension string into width/height/depth centimetres.
///
/// Input is lowercased and stripped of all whitespace before matching.
/// Returns `None` when no pattern matches; the caller records the raw string
/// to the side log — an unparsed dimension never blocks product creation.
#[must_use]
pub fn parse_dimensions(text: &str) -> Option<Dimensions> {
    if text.trim().is_empty() {
        return None;
    }

    let normalized: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    MATCHERS
        .iter()
        .find_map(|m| m.re.captures(&normalized).and_then(|caps| (m.extract)(&caps)))
}
