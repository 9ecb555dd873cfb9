//! Row classification and canonical product assembly.

use woomig_core::{
    CanonicalProduct, MigrationContext, ProductRole, ProductStatus, SourceRow, UnparsedDimension,
};

use crate::attributes::classify_attributes;
use crate::describe::format_description;
use crate::tags::{process_categories, reconcile_tags};

/// Classifies a row by its `Type` column. Pure; evaluated once per row.
#[must_use]
pub fn classify_row(row: &SourceRow) -> ProductRole {
    ProductRole::from_type(row.get("Type"))
}

/// The migration key for a row: its SKU, or `id:<ID>` for parent rows
/// exported without one.
#[must_use]
pub fn row_sku(row: &SourceRow) -> String {
    let sku = row.get("SKU");
    if sku.is_empty() && classify_row(row) == ProductRole::Parent {
        format!("id:{}", row.get("ID"))
    } else {
        sku.to_string()
    }
}

/// All variant rows whose `Parent` column names `parent_sku`. Linear scan —
/// this is a batch job, not a latency-sensitive path.
#[must_use]
pub fn child_rows<'a>(rows: &'a [SourceRow], parent_sku: &str) -> Vec<&'a SourceRow> {
    if parent_sku.is_empty() {
        return Vec::new();
    }
    rows.iter()
        .filter(|row| classify_row(row) == ProductRole::Variant)
        .filter(|row| row.get("Parent") == parent_sku)
        .collect()
}

/// Assembles the canonical product record for one source row.
///
/// `parent` supplies the option schema when the row is a variant. Remote
/// identifiers (`existing_remote_id`, `parent_remote_id`) are not resolved
/// here — the runner fills them in from SKU lookups, keeping assembly pure.
///
/// Vendor precedence: attribute-derived designer > category-path designer >
/// the row's `Brand` column > `fallback_vendor`. An attribute-derived
/// designer is also added to the context's category accumulator.
#[must_use]
pub fn assemble_product(
    row: &SourceRow,
    parent: Option<&CanonicalProduct>,
    ctx: &mut MigrationContext,
    fallback_vendor: &str,
) -> CanonicalProduct {
    let role = classify_row(row);

    let (category_tags, category_designer) = process_categories(row.get("Categories"), ctx);
    let classified = classify_attributes(row, parent);

    if let Some(raw) = &classified.unparsed_dimension {
        ctx.record_unparsed_dimension(UnparsedDimension {
            line: row.line(),
            sku: row.get("SKU").to_string(),
            name: row.get("Name").to_string(),
            raw: raw.clone(),
        });
    }

    let vendor = if let Some(designer) = &classified.designer {
        ctx.add_category(designer);
        designer.clone()
    } else if let Some(designer) = category_designer {
        designer
    } else {
        let brand = row.get("Brand");
        if brand.is_empty() {
            fallback_vendor.to_string()
        } else {
            brand.to_string()
        }
    };

    let tags = reconcile_tags(
        &category_tags,
        classified.free_tags.as_deref().unwrap_or_default(),
    );

    let price = match row.get("Regular price") {
        "" => "0.00".to_string(),
        p => p.to_string(),
    };
    let inventory_quantity = match row.get("Stock") {
        "" => "0".to_string(),
        s => s.to_string(),
    };
    let product_type = match row.get("Type") {
        "" => "Default".to_string(),
        t => t.to_string(),
    };

    let description_html =
        format_description(row.get("Short description"), &classified.product_attributes);

    CanonicalProduct {
        sku: row_sku(row),
        title: row.get("Name").to_string(),
        description_html,
        vendor,
        product_type,
        price,
        inventory_quantity,
        status: ProductStatus::from_published(row.get("Published")),
        role,
        tags,
        product_attributes: classified.product_attributes,
        variant_attributes: classified.variant_attributes,
        metafields: classified.dimension_metafields,
        images: row.get("Images").to_string(),
        existing_remote_id: None,
        parent_remote_id: None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn row_with(line: u64, pairs: &[(&str, &str)]) -> SourceRow {
        let columns: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        SourceRow::new(line, columns)
    }

    fn standalone_row() -> SourceRow {
        row_with(
            2,
            &[
                ("SKU", "VV-100"),
                ("Name", "Teak Sideboard"),
                ("Type", "simple"),
                ("Published", "1"),
                ("Regular price", "450.00"),
                ("Stock", "1"),
                ("Categories", "Furniture > Sideboards"),
                ("Short description", "Long and low."),
                ("Images", "https://a.test/1.jpg"),
            ],
        )
    }

    #[test]
    fn standalone_row_assembles_fully() {
        let mut ctx = MigrationContext::new();
        let product = assemble_product(&standalone_row(), None, &mut ctx, "Fallback Vendor");
        assert_eq!(product.sku, "VV-100");
        assert_eq!(product.title, "Teak Sideboard");
        assert_eq!(product.role, ProductRole::Standalone);
        assert_eq!(product.status, woomig_core::ProductStatus::Active);
        assert_eq!(product.price, "450.00");
        assert_eq!(product.inventory_quantity, "1");
        assert_eq!(product.vendor, "Fallback Vendor");
        assert_eq!(
            product.tags,
            Some(vec!["Furniture".to_string(), "Sideboards".to_string()])
        );
        assert_eq!(product.description_html, "<p>Long and low.</p>");
        assert!(product.is_new());
    }

    #[test]
    fn unpublished_row_is_draft() {
        let mut ctx = MigrationContext::new();
        let row = row_with(2, &[("SKU", "VV-1"), ("Published", "0")]);
        let product = assemble_product(&row, None, &mut ctx, "V");
        assert_eq!(product.status, woomig_core::ProductStatus::Draft);
    }

    #[test]
    fn price_and_stock_default_when_empty() {
        let mut ctx = MigrationContext::new();
        let row = row_with(2, &[("SKU", "VV-1")]);
        let product = assemble_product(&row, None, &mut ctx, "V");
        assert_eq!(product.price, "0.00");
        assert_eq!(product.inventory_quantity, "0");
        assert_eq!(product.product_type, "Default");
    }

    #[test]
    fn parent_without_sku_is_keyed_by_id() {
        let mut ctx = MigrationContext::new();
        let row = row_with(2, &[("Type", "variable"), ("ID", "7341")]);
        let product = assemble_product(&row, None, &mut ctx, "V");
        assert_eq!(product.sku, "id:7341");
        assert_eq!(product.role, ProductRole::Parent);
    }

    #[test]
    fn standalone_without_sku_keeps_empty_sku() {
        let mut ctx = MigrationContext::new();
        let row = row_with(2, &[("Type", "simple"), ("ID", "7341")]);
        let product = assemble_product(&row, None, &mut ctx, "V");
        assert_eq!(product.sku, "");
    }

    #[test]
    fn vendor_prefers_attribute_designer_over_everything() {
        let mut ctx = MigrationContext::new();
        let row = row_with(
            2,
            &[
                ("SKU", "VV-1"),
                ("Brand", "Brand Co"),
                ("Categories", "Designers > Category Designer"),
                ("Attribute 1 name", "Designer"),
                ("Attribute 1 value(s)", "Attr Designer"),
            ],
        );
        let product = assemble_product(&row, None, &mut ctx, "Fallback");
        assert_eq!(product.vendor, "Attr Designer");
        // The attribute designer joins the category accumulator.
        assert!(ctx.categories().any(|c| c == "Attr Designer"));
    }

    #[test]
    fn vendor_falls_back_category_then_brand() {
        let mut ctx = MigrationContext::new();
        let row = row_with(
            2,
            &[
                ("SKU", "VV-1"),
                ("Brand", "Brand Co"),
                ("Categories", "Designers > Category Designer"),
            ],
        );
        let product = assemble_product(&row, None, &mut ctx, "Fallback");
        assert_eq!(product.vendor, "Category Designer");

        let row = row_with(2, &[("SKU", "VV-2"), ("Brand", "Brand Co")]);
        let product = assemble_product(&row, None, &mut ctx, "Fallback");
        assert_eq!(product.vendor, "Brand Co");
    }

    #[test]
    fn unparsed_dimensions_are_recorded_with_row_identity() {
        let mut ctx = MigrationContext::new();
        let row = row_with(
            9,
            &[
                ("SKU", "VV-9"),
                ("Name", "Odd Table"),
                ("Attribute 1 name", "Dimensions"),
                ("Attribute 1 value(s)", "tallish"),
            ],
        );
        assemble_product(&row, None, &mut ctx, "V");
        let records = ctx.drain_unparsed_dimensions();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].line, 9);
        assert_eq!(records[0].sku, "VV-9");
        assert_eq!(records[0].name, "Odd Table");
        assert_eq!(records[0].raw, "tallish");
    }

    #[test]
    fn variant_row_never_classifies_as_parent_or_standalone() {
        let row = row_with(2, &[("Type", "variation")]);
        assert_eq!(classify_row(&row), ProductRole::Variant);
    }

    #[test]
    fn parent_row_never_carries_parent_remote_id() {
        let mut ctx = MigrationContext::new();
        let row = row_with(2, &[("Type", "variable"), ("SKU", "P1")]);
        let product = assemble_product(&row, None, &mut ctx, "V");
        assert!(product.parent_remote_id.is_none());
    }

    #[test]
    fn child_rows_find_variants_by_parent_sku() {
        let rows = vec![
            row_with(2, &[("Type", "variable"), ("SKU", "P1")]),
            row_with(3, &[("Type", "variation"), ("SKU", "C1"), ("Parent", "P1")]),
            row_with(4, &[("Type", "variation"), ("SKU", "C2"), ("Parent", "P1")]),
            row_with(5, &[("Type", "variation"), ("SKU", "X1"), ("Parent", "P2")]),
            row_with(6, &[("Type", "simple"), ("SKU", "S1"), ("Parent", "P1")]),
        ];
        let children = child_rows(&rows, "P1");
        let skus: Vec<&str> = children.iter().map(|r| r.get("SKU")).collect();
        assert_eq!(skus, vec!["C1", "C2"]);
    }

    #[test]
    fn child_rows_empty_parent_sku_matches_nothing() {
        let rows = vec![row_with(2, &[("Type", "variation"), ("Parent", "")])];
        assert!(child_rows(&rows, "").is_empty());
    }

    #[test]
    fn variant_options_are_subset_of_parent_options() {
        let mut ctx = MigrationContext::new();
        let parent_row = row_with(
            2,
            &[
                ("Type", "variable"),
                ("SKU", "P1"),
                ("Attribute 1 name", "Colour"),
                ("Attribute 1 visible", "0"),
                ("Attribute 1 value(s)", "Red, Blue"),
            ],
        );
        let parent = assemble_product(&parent_row, None, &mut ctx, "V");

        let child_row = row_with(
            3,
            &[
                ("Type", "variation"),
                ("SKU", "C1"),
                ("Parent", "P1"),
                ("Attribute 1 name", "Colour"),
                ("Attribute 1 value(s)", "Red"),
                ("Attribute 2 name", "Finish"),
                ("Attribute 2 value(s)", "Matte"),
            ],
        );
        let child = assemble_product(&child_row, Some(&parent), &mut ctx, "V");

        let parent_options = parent.option_names();
        for name in child.option_names() {
            assert!(
                parent_options.contains(&name),
                "variant option {name:?} missing from parent schema"
            );
        }
        // "Finish" was demoted to a display attribute, not an option.
        assert_eq!(child.option_names(), vec!["Colour"]);
        assert!(child
            .product_attributes
            .iter()
            .any(|(n, _)| n == "Finish"));
    }
}
