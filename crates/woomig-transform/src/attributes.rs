//! Classification of a row's dynamic `Attribute <N>` columns.
//!
//! The export carries an unbounded set of `Attribute <N> name` /
//! `Attribute <N> visible` / `Attribute <N> value(s)` columns. Discovery is
//! by pattern-matching column names, never hard-coded field access, so the
//! column count can vary between exports.

use std::sync::LazyLock;

use regex::Regex;
use woomig_core::{CanonicalProduct, Metafield, ProductRole, SourceRow};

use crate::dimensions::parse_dimensions;

static ATTR_NAME_COL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Attribute (\d+) name$").expect("valid regex"));

/// One discovered attribute triple, ordered by its column number.
#[derive(Debug, Clone, PartialEq, Eq)]
struct AttributeTriple {
    name: String,
    visible: String,
    value: String,
}

/// Everything the attribute classifier extracts from one row.
#[derive(Debug, Default)]
pub struct ClassifiedAttributes {
    /// Tag candidates from free attributes; `None` when nothing was
    /// collected (downstream branches on presence, not emptiness).
    pub free_tags: Option<Vec<String>>,
    /// Width/height/depth metafields when the dimensions attribute parsed.
    pub dimension_metafields: Option<Vec<Metafield>>,
    /// Designer name from a `Designer` attribute; overrides the
    /// category-derived vendor.
    pub designer: Option<String>,
    /// Display attributes (name → value) for description rendering, in
    /// column order.
    pub product_attributes: Vec<(String, String)>,
    /// Option-defining attributes; `None` when nothing was collected.
    pub variant_attributes: Option<Vec<(String, String)>>,
    /// A dimensions value that matched no known shape; the caller records it
    /// to the side log.
    pub unparsed_dimension: Option<String>,
}

/// Discovers `Attribute <N>` triples in ascending N order.
fn discover_attributes(row: &SourceRow) -> Vec<AttributeTriple> {
    let mut numbers: Vec<u32> = row
        .column_names()
        .filter_map(|col| ATTR_NAME_COL_RE.captures(col))
        .filter_map(|caps| caps[1].parse().ok())
        .collect();
    numbers.sort_unstable();
    numbers.dedup();

    numbers
        .into_iter()
        .map(|n| AttributeTriple {
            name: row.get(&format!("Attribute {n} name")).to_string(),
            visible: row.get(&format!("Attribute {n} visible")).to_string(),
            value: row.get(&format!("Attribute {n} value(s)")).to_string(),
        })
        .collect()
}

/// Partitions a row's attributes into option definitions, display
/// attributes, and tag candidates.
///
/// Routing rules, per attribute with a non-empty name:
/// - parent row + `visible == "0"`: the attribute defines a variant option
///   and is excluded from tags and display attributes;
/// - variant row + the name is one of the parent's option names: the value
///   is this row's position on that option axis, likewise excluded;
/// - otherwise the value becomes a display attribute, and additionally a
///   tag candidate (comma-split), unless the attribute is `Dimensions`
///   (routed to the dimension parser) or `Designer` (captured as the
///   designer name).
///
/// A variant attribute whose name is NOT in the parent's option schema falls
/// through to display attributes and tags — it does not grow the variant's
/// own option set. That asymmetry is inherited source behavior and is pinned
/// by tests.
#[must_use]
pub fn classify_attributes(
    row: &SourceRow,
    parent: Option<&CanonicalProduct>,
) -> ClassifiedAttributes {
    let role = ProductRole::from_type(row.get("Type"));

    let mut out = ClassifiedAttributes::default();
    let mut free_tags: Vec<String> = Vec::new();
    let mut variant_attributes: Vec<(String, String)> = Vec::new();

    for attr in discover_attributes(row) {
        if attr.name.is_empty() {
            continue;
        }

        if role == ProductRole::Parent && attr.visible == "0" {
            variant_attributes.push((attr.name, attr.value));
            continue;
        }

        if role == ProductRole::Variant {
            let parent_has_option =
                parent.is_some_and(|p| p.variant_attribute(&attr.name).is_some());
            if parent_has_option {
                variant_attributes.push((attr.name, attr.value));
                continue;
            }
        }

        if !attr.value.is_empty() {
            out.product_attributes
                .push((attr.name.clone(), attr.value.clone()));
        }

        if attr.name.eq_ignore_ascii_case("dimensions") {
            match parse_dimensions(&attr.value) {
                Some(dims) => {
                    out.dimension_metafields = Some(vec![
                        Metafield::single_line("width", dims.width.to_string()),
                        Metafield::single_line("height", dims.height.to_string()),
                        Metafield::single_line("depth", dims.depth.to_string()),
                    ]);
                }
                None if !attr.value.is_empty() => {
                    out.unparsed_dimension = Some(attr.value);
                }
                None => {}
            }
        } else if attr.name.eq_ignore_ascii_case("designer") {
            if !attr.value.is_empty() {
                out.designer = Some(attr.value);
            }
        } else if attr.value.contains(',') {
            free_tags.extend(
                attr.value
                    .split(',')
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(str::to_owned),
            );
        } else if !attr.value.is_empty() {
            free_tags.push(attr.value);
        }
    }

    if !free_tags.is_empty() {
        out.free_tags = Some(free_tags);
    }
    if !variant_attributes.is_empty() {
        out.variant_attributes = Some(variant_attributes);
    }

    out
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use woomig_core::ProductStatus;

    use super::*;

    fn row_with(pairs: &[(&str, &str)]) -> SourceRow {
        let columns: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        SourceRow::new(2, columns)
    }

    fn parent_with_options(options: &[(&str, &str)]) -> CanonicalProduct {
        CanonicalProduct {
            sku: "P1".to_string(),
            title: "Parent".to_string(),
            description_html: String::new(),
            vendor: "Acme".to_string(),
            product_type: "variable".to_string(),
            price: "0.00".to_string(),
            inventory_quantity: "0".to_string(),
            status: ProductStatus::Draft,
            role: ProductRole::Parent,
            tags: None,
            product_attributes: vec![],
            variant_attributes: Some(
                options
                    .iter()
                    .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                    .collect(),
            ),
            metafields: None,
            images: String::new(),
            existing_remote_id: None,
            parent_remote_id: None,
        }
    }

    #[test]
    fn discovery_orders_by_attribute_number() {
        let row = row_with(&[
            ("Attribute 10 name", "Material"),
            ("Attribute 10 value(s)", "Teak"),
            ("Attribute 2 name", "Style"),
            ("Attribute 2 value(s)", "Danish"),
            ("Type", "simple"),
        ]);
        let classified = classify_attributes(&row, None);
        assert_eq!(
            classified.product_attributes,
            vec![
                ("Style".to_string(), "Danish".to_string()),
                ("Material".to_string(), "Teak".to_string()),
            ]
        );
    }

    #[test]
    fn empty_attribute_name_is_skipped() {
        let row = row_with(&[
            ("Attribute 1 name", ""),
            ("Attribute 1 value(s)", "orphan value"),
            ("Type", "simple"),
        ]);
        let classified = classify_attributes(&row, None);
        assert!(classified.free_tags.is_none());
        assert!(classified.product_attributes.is_empty());
    }

    #[test]
    fn parent_invisible_attribute_becomes_option_definition() {
        let row = row_with(&[
            ("Type", "variable"),
            ("Attribute 1 name", "Colour"),
            ("Attribute 1 visible", "0"),
            ("Attribute 1 value(s)", "Red, Blue"),
        ]);
        let classified = classify_attributes(&row, None);
        assert_eq!(
            classified.variant_attributes,
            Some(vec![("Colour".to_string(), "Red, Blue".to_string())])
        );
        assert!(classified.free_tags.is_none());
        assert!(classified.product_attributes.is_empty());
    }

    #[test]
    fn parent_visible_attribute_stays_display_and_tag() {
        let row = row_with(&[
            ("Type", "variable"),
            ("Attribute 1 name", "Material"),
            ("Attribute 1 visible", "1"),
            ("Attribute 1 value(s)", "Teak"),
        ]);
        let classified = classify_attributes(&row, None);
        assert!(classified.variant_attributes.is_none());
        assert_eq!(classified.free_tags, Some(vec!["Teak".to_string()]));
    }

    #[test]
    fn variant_attribute_matching_parent_option_is_recorded_as_option_value() {
        let parent = parent_with_options(&[("Colour", "Red, Blue")]);
        let row = row_with(&[
            ("Type", "variation"),
            ("Attribute 1 name", "Colour"),
            ("Attribute 1 value(s)", "Red"),
        ]);
        let classified = classify_attributes(&row, Some(&parent));
        assert_eq!(
            classified.variant_attributes,
            Some(vec![("Colour".to_string(), "Red".to_string())])
        );
        assert!(classified.free_tags.is_none());
    }

    #[test]
    fn variant_attribute_outside_parent_schema_falls_through_to_display() {
        // Inherited source behavior: the attribute does NOT join the
        // variant's own option set — it is demoted to a display attribute
        // and a tag.
        let parent = parent_with_options(&[("Colour", "Red, Blue")]);
        let row = row_with(&[
            ("Type", "variation"),
            ("Attribute 1 name", "Finish"),
            ("Attribute 1 value(s)", "Matte"),
        ]);
        let classified = classify_attributes(&row, Some(&parent));
        assert!(classified.variant_attributes.is_none());
        assert_eq!(
            classified.product_attributes,
            vec![("Finish".to_string(), "Matte".to_string())]
        );
        assert_eq!(classified.free_tags, Some(vec!["Matte".to_string()]));
    }

    #[test]
    fn comma_separated_values_split_into_multiple_tags() {
        let row = row_with(&[
            ("Type", "simple"),
            ("Attribute 1 name", "Material"),
            ("Attribute 1 value(s)", "Teak, Oak , "),
        ]);
        let classified = classify_attributes(&row, None);
        assert_eq!(
            classified.free_tags,
            Some(vec!["Teak".to_string(), "Oak".to_string()])
        );
    }

    #[test]
    fn dimensions_attribute_routes_to_parser_not_tags() {
        let row = row_with(&[
            ("Type", "simple"),
            ("Attribute 1 name", "Dimensions"),
            ("Attribute 1 value(s)", "80cm x 80cm x 45.5(h)cm"),
        ]);
        let classified = classify_attributes(&row, None);
        assert!(classified.free_tags.is_none());
        let metafields = classified.dimension_metafields.unwrap();
        let keys: Vec<&str> = metafields.iter().map(|m| m.key.as_str()).collect();
        assert_eq!(keys, vec!["width", "height", "depth"]);
        assert_eq!(metafields[0].value, "80");
        assert_eq!(metafields[1].value, "45.5");
        // Still rendered in the description table.
        assert_eq!(classified.product_attributes.len(), 1);
    }

    #[test]
    fn unparsable_dimensions_are_surfaced_for_logging() {
        let row = row_with(&[
            ("Type", "simple"),
            ("Attribute 1 name", "Dimensions"),
            ("Attribute 1 value(s)", "roughly chair-sized"),
        ]);
        let classified = classify_attributes(&row, None);
        assert!(classified.dimension_metafields.is_none());
        assert_eq!(
            classified.unparsed_dimension.as_deref(),
            Some("roughly chair-sized")
        );
    }

    #[test]
    fn designer_attribute_captured_not_tagged() {
        let row = row_with(&[
            ("Type", "simple"),
            ("Attribute 1 name", "Designer"),
            ("Attribute 1 value(s)", "Hans Wegner"),
        ]);
        let classified = classify_attributes(&row, None);
        assert_eq!(classified.designer.as_deref(), Some("Hans Wegner"));
        assert!(classified.free_tags.is_none());
        // The designer still shows in the attribute table.
        assert_eq!(
            classified.product_attributes,
            vec![("Designer".to_string(), "Hans Wegner".to_string())]
        );
    }

    #[test]
    fn no_attributes_yields_absent_collections() {
        let row = row_with(&[("Type", "simple"), ("SKU", "VV-1")]);
        let classified = classify_attributes(&row, None);
        assert!(classified.free_tags.is_none());
        assert!(classified.variant_attributes.is_none());
        assert!(classified.product_attributes.is_empty());
    }
}
