//! Response types for the Admin GraphQL API.
//!
//! Only the fields the migration reads are modelled; everything else in the
//! payloads is ignored by serde.

use serde::Deserialize;

/// Top-level GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlEnvelope {
    pub data: Option<serde_json::Value>,
    pub errors: Option<Vec<GraphQlMessage>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlMessage {
    pub message: String,
}

/// A field-level validation error from a mutation payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserError {
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
}

/// Result of a create/update mutation: the remote id when the API produced
/// one, plus any field-level errors for the caller to report.
#[derive(Debug)]
pub struct MutationOutcome {
    pub id: Option<String>,
    pub user_errors: Vec<UserError>,
}

impl MutationOutcome {
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.id.is_some() && self.user_errors.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Wire shapes (connection envelopes and mutation payloads)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct IdNode {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Edge {
    pub node: IdNode,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Connection {
    pub edges: Vec<Edge>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductsData {
    pub products: Connection,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LocationsData {
    pub locations: Connection,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductImagesData {
    pub product: Option<ProductImages>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductImages {
    pub images: Connection,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductMutationData {
    #[serde(alias = "productCreate", alias = "productUpdate")]
    pub payload: ProductMutationPayload,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductMutationPayload {
    pub product: Option<IdNode>,
    #[serde(rename = "userErrors", default)]
    pub user_errors: Vec<UserError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VariantsBulkCreateData {
    #[serde(rename = "productVariantsBulkCreate")]
    pub payload: VariantsBulkCreatePayload,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VariantsBulkCreatePayload {
    #[serde(rename = "userErrors", default)]
    pub user_errors: Vec<UserError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateMediaData {
    #[serde(rename = "productCreateMedia")]
    pub payload: CreateMediaPayload,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateMediaPayload {
    #[serde(rename = "mediaUserErrors", default)]
    pub media_user_errors: Vec<UserError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CollectionCreateData {
    #[serde(rename = "collectionCreate")]
    pub payload: CollectionCreatePayload,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CollectionCreatePayload {
    pub collection: Option<IdNode>,
    #[serde(rename = "userErrors", default)]
    pub user_errors: Vec<UserError>,
}
