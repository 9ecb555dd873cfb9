use serde::{Deserialize, Serialize};

/// The role a source row plays in the catalog, derived from its `Type` column.
///
/// A row is never more than one role: `variable` → [`ProductRole::Parent`],
/// `variation` → [`ProductRole::Variant`], anything else →
/// [`ProductRole::Standalone`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductRole {
    Standalone,
    Parent,
    Variant,
}

impl ProductRole {
    /// Classifies a raw `Type` column value. Matching is trimmed and
    /// case-insensitive.
    #[must_use]
    pub fn from_type(type_field: &str) -> Self {
        match type_field.trim().to_lowercase().as_str() {
            "variable" => ProductRole::Parent,
            "variation" => ProductRole::Variant,
            _ => ProductRole::Standalone,
        }
    }
}

/// Shopify product status, derived from the source `Published` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductStatus {
    #[serde(rename = "ACTIVE")]
    Active,
    #[serde(rename = "DRAFT")]
    Draft,
}

impl ProductStatus {
    /// `ACTIVE` iff the source row's `Published` column equals `"1"`.
    #[must_use]
    pub fn from_published(published: &str) -> Self {
        if published == "1" {
            ProductStatus::Active
        } else {
            ProductStatus::Draft
        }
    }
}

/// A typed custom key-value attribute attached to a remote product or variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metafield {
    pub namespace: String,
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub value_type: String,
}

impl Metafield {
    /// A `custom`-namespace `single_line_text_field` metafield, the only
    /// shape this migration emits.
    #[must_use]
    pub fn single_line(key: &str, value: impl Into<String>) -> Self {
        Metafield {
            namespace: "custom".to_string(),
            key: key.to_string(),
            value: value.into(),
            value_type: "single_line_text_field".to_string(),
        }
    }
}

/// The assembled, immutable record handed to the remote-sync layer.
///
/// One `CanonicalProduct` is built per source row. Variant children are
/// embedded in their parent's attach call and never persisted on their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalProduct {
    /// Source SKU. Parents without a SKU are keyed `id:<ID>` instead.
    pub sku: String,
    pub title: String,
    /// Paragraph-wrapped description with the attribute table appended.
    pub description_html: String,
    pub vendor: String,
    pub product_type: String,
    /// Price as a decimal string, defaults `"0.00"`.
    pub price: String,
    /// Stock count as an integer string, defaults `"0"`.
    pub inventory_quantity: String,
    pub status: ProductStatus,
    pub role: ProductRole,
    /// Deduplicated, ordered, title-cased tags; `None` when empty so the
    /// field is omitted from remote calls rather than sent as `[]`.
    pub tags: Option<Vec<String>>,
    /// Display attributes in source order, rendered into the description
    /// table only.
    pub product_attributes: Vec<(String, String)>,
    /// Option-defining attributes in source order. For a parent these name
    /// the option axes; for a variant they carry this row's value per axis.
    pub variant_attributes: Option<Vec<(String, String)>>,
    /// Width/height/depth metafields when the dimensions attribute parsed.
    pub metafields: Option<Vec<Metafield>>,
    /// Raw comma-separated image URL string, parsed lazily downstream.
    pub images: String,
    /// Remote id found by SKU lookup; absent for products not yet migrated.
    pub existing_remote_id: Option<String>,
    /// Remote id of the parent product; set only for variant rows whose
    /// `Parent` SKU resolved.
    pub parent_remote_id: Option<String>,
}

impl CanonicalProduct {
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.existing_remote_id.is_none()
    }

    #[must_use]
    pub fn is_parent(&self) -> bool {
        self.role == ProductRole::Parent
    }

    /// Names of the option axes, in source order. Empty for products with
    /// no variant attributes.
    #[must_use]
    pub fn option_names(&self) -> Vec<&str> {
        self.variant_attributes
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// This product's value for the named option, if recorded.
    #[must_use]
    pub fn variant_attribute(&self, name: &str) -> Option<&str> {
        self.variant_attributes
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Splits the raw image field into trimmed, non-empty URLs.
    #[must_use]
    pub fn image_urls(&self) -> Vec<String> {
        self.images
            .split(',')
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_owned)
            .collect()
    }
}
