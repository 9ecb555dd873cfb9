//! HTTP client for the Shopify Admin API.
//!
//! All catalog operations go through the GraphQL endpoint; image deletion and
//! smart-collection publishing use the legacy REST resources the GraphQL API
//! does not cover. Field-level `userErrors` ride back in the call results —
//! only transport, status, and query-level failures become [`ShopifyError`].

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;
use woomig_core::{AppConfig, CanonicalProduct, Metafield};

use crate::error::ShopifyError;
use crate::types::{
    CollectionCreateData, CreateMediaData, GraphQlEnvelope, LocationsData, MutationOutcome,
    ProductImagesData, ProductMutationData, ProductsData, UserError, VariantsBulkCreateData,
};

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

const FIND_PRODUCT_QUERY: &str = "\
query FindProductBySku($query: String!) {
  products(first: 1, query: $query) {
    edges { node { id } }
  }
}";

const LOCATIONS_QUERY: &str = "\
query DefaultLocation {
  locations(first: 10) {
    edges { node { id } }
  }
}";

const PRODUCT_IMAGES_QUERY: &str = "\
query ProductImages($id: ID!) {
  product(id: $id) {
    images(first: 250) {
      edges { node { id } }
    }
  }
}";

const CREATE_PRODUCT_MUTATION: &str = "\
mutation CreateProduct($input: ProductInput!, $media: [CreateMediaInput!]) {
  productCreate(input: $input, media: $media) {
    product { id }
    userErrors { field message }
  }
}";

const UPDATE_PRODUCT_MUTATION: &str = "\
mutation UpdateProduct($input: ProductInput!) {
  productUpdate(input: $input) {
    product { id }
    userErrors { field message }
  }
}";

const ATTACH_VARIANTS_MUTATION: &str = "\
mutation AttachVariants($productId: ID!, $variants: [ProductVariantsBulkInput!]!, $strategy: ProductVariantsBulkCreateStrategy) {
  productVariantsBulkCreate(productId: $productId, variants: $variants, strategy: $strategy) {
    productVariants { id }
    userErrors { field message }
  }
}";

const CREATE_MEDIA_MUTATION: &str = "\
mutation CreateProductMedia($productId: ID!, $media: [CreateMediaInput!]!) {
  productCreateMedia(productId: $productId, media: $media) {
    media { id }
    mediaUserErrors { field message }
  }
}";

const CREATE_COLLECTION_MUTATION: &str = "\
mutation CreateCollection($input: CollectionInput!) {
  collectionCreate(input: $input) {
    collection { id }
    userErrors { field message }
  }
}";

/// Client for the Shopify Admin API.
///
/// Use [`AdminClient::new`] for the real store or
/// [`AdminClient::with_base_url`] to point at a mock server in tests.
pub struct AdminClient {
    client: Client,
    base_url: Url,
    api_version: String,
}

impl AdminClient {
    /// Creates a client pointed at the store named in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::Config`] if the access token is not a valid
    /// header value, or [`ShopifyError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(config: &AppConfig) -> Result<Self, ShopifyError> {
        Self::with_base_url(config, &config.base_url())
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// As [`AdminClient::new`], plus [`ShopifyError::Config`] if `base_url`
    /// does not parse.
    pub fn with_base_url(config: &AppConfig, base_url: &str) -> Result<Self, ShopifyError> {
        let token = HeaderValue::from_str(&config.shopify_access_token)
            .map_err(|e| ShopifyError::Config(format!("invalid access token: {e}")))?;
        let mut headers = HeaderMap::new();
        headers.insert(ACCESS_TOKEN_HEADER, token);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;

        // Keep exactly one trailing slash so Url::join appends path segments
        // instead of replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| ShopifyError::Config(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            base_url,
            api_version: config.api_version.clone(),
        })
    }

    /// Looks up a product's remote id by SKU.
    ///
    /// An empty SKU short-circuits to `None` without a request: the search
    /// query `sku:` would match arbitrary products.
    ///
    /// # Errors
    ///
    /// Transport, status, or query-level failures as [`ShopifyError`].
    pub async fn find_product_by_sku(&self, sku: &str) -> Result<Option<String>, ShopifyError> {
        if sku.is_empty() {
            return Ok(None);
        }

        let variables = json!({ "query": format!("sku:{sku}") });
        let data = self
            .post_graphql(FIND_PRODUCT_QUERY, variables, "FindProductBySku")
            .await?;
        let products: ProductsData = decode(data, "FindProductBySku")?;

        Ok(products
            .products
            .edges
            .into_iter()
            .next()
            .map(|edge| edge.node.id))
    }

    /// Returns the store's first location id, or `None` when the store has
    /// no locations. Inventory cannot be assigned without one.
    ///
    /// # Errors
    ///
    /// Transport, status, or query-level failures as [`ShopifyError`].
    pub async fn default_location_id(&self) -> Result<Option<String>, ShopifyError> {
        let data = self
            .post_graphql(LOCATIONS_QUERY, json!({}), "DefaultLocation")
            .await?;
        let locations: LocationsData = decode(data, "DefaultLocation")?;

        Ok(locations
            .locations
            .edges
            .into_iter()
            .next()
            .map(|edge| edge.node.id))
    }

    /// Creates a product with its metafields and initial media.
    ///
    /// # Errors
    ///
    /// Transport, status, or query-level failures as [`ShopifyError`].
    /// Field-level `userErrors` are returned in the [`MutationOutcome`].
    pub async fn create_product(
        &self,
        product: &CanonicalProduct,
    ) -> Result<MutationOutcome, ShopifyError> {
        let media: Vec<serde_json::Value> = product
            .image_urls()
            .into_iter()
            .map(|url| media_input(&url, &product.title))
            .collect();

        let variables = json!({
            "input": product_input(product, None),
            "media": media,
        });
        let data = self
            .post_graphql(CREATE_PRODUCT_MUTATION, variables, "CreateProduct")
            .await?;
        let mutation: ProductMutationData = decode(data, "CreateProduct")?;

        Ok(MutationOutcome {
            id: mutation.payload.product.map(|p| p.id),
            user_errors: mutation.payload.user_errors,
        })
    }

    /// Updates an existing product in place.
    ///
    /// # Errors
    ///
    /// Transport, status, or query-level failures as [`ShopifyError`].
    /// Field-level `userErrors` are returned in the [`MutationOutcome`].
    pub async fn update_product(
        &self,
        product_id: &str,
        product: &CanonicalProduct,
    ) -> Result<MutationOutcome, ShopifyError> {
        let variables = json!({ "input": product_input(product, Some(product_id)) });
        let data = self
            .post_graphql(UPDATE_PRODUCT_MUTATION, variables, "UpdateProduct")
            .await?;
        let mutation: ProductMutationData = decode(data, "UpdateProduct")?;

        Ok(MutationOutcome {
            id: mutation.payload.product.map(|p| p.id),
            user_errors: mutation.payload.user_errors,
        })
    }

    /// Attaches all of a parent's variants in one bulk call, replacing the
    /// standalone variant Shopify creates with every new product.
    ///
    /// # Errors
    ///
    /// Transport, status, or query-level failures as [`ShopifyError`].
    /// Field-level `userErrors` are returned for the caller to report.
    pub async fn attach_variants(
        &self,
        parent_id: &str,
        children: &[CanonicalProduct],
        location_id: &str,
    ) -> Result<Vec<UserError>, ShopifyError> {
        let variants: Vec<serde_json::Value> = children
            .iter()
            .map(|child| variant_input(child, location_id))
            .collect();

        let variables = json!({
            "productId": parent_id,
            "variants": variants,
            "strategy": "REMOVE_STANDALONE_VARIANT",
        });
        let data = self
            .post_graphql(ATTACH_VARIANTS_MUTATION, variables, "AttachVariants")
            .await?;
        let mutation: VariantsBulkCreateData = decode(data, "AttachVariants")?;

        Ok(mutation.payload.user_errors)
    }

    /// Lists the numeric ids of a product's current images.
    ///
    /// # Errors
    ///
    /// Transport, status, or query-level failures as [`ShopifyError`].
    pub async fn product_image_ids(&self, product_id: &str) -> Result<Vec<u64>, ShopifyError> {
        let variables = json!({ "id": product_id });
        let data = self
            .post_graphql(PRODUCT_IMAGES_QUERY, variables, "ProductImages")
            .await?;
        let images: ProductImagesData = decode(data, "ProductImages")?;

        let Some(product) = images.product else {
            return Ok(Vec::new());
        };
        Ok(product
            .images
            .edges
            .into_iter()
            .filter_map(|edge| numeric_id(&edge.node.id).parse().ok())
            .collect())
    }

    /// Deletes one image from a product via the legacy REST resource.
    ///
    /// # Errors
    ///
    /// [`ShopifyError::UnexpectedStatus`] on a non-2xx response, transport
    /// failures as [`ShopifyError::Http`].
    pub async fn delete_product_image(
        &self,
        product_id: &str,
        image_id: u64,
    ) -> Result<(), ShopifyError> {
        let url = self.rest_url(&format!(
            "products/{}/images/{image_id}.json",
            numeric_id(product_id)
        ))?;
        let response = self.client.delete(url.clone()).send().await?;
        check_status(&response, &url)?;
        Ok(())
    }

    /// Uploads images to a product from their source URLs.
    ///
    /// Returns the `mediaUserErrors` list; a failed URL does not fail the
    /// call.
    ///
    /// # Errors
    ///
    /// Transport, status, or query-level failures as [`ShopifyError`].
    pub async fn create_media(
        &self,
        product_id: &str,
        urls: &[String],
        alt: &str,
    ) -> Result<Vec<UserError>, ShopifyError> {
        let media: Vec<serde_json::Value> = urls.iter().map(|url| media_input(url, alt)).collect();
        let variables = json!({ "productId": product_id, "media": media });
        let data = self
            .post_graphql(CREATE_MEDIA_MUTATION, variables, "CreateProductMedia")
            .await?;
        let mutation: CreateMediaData = decode(data, "CreateProductMedia")?;

        Ok(mutation.payload.media_user_errors)
    }

    /// Replaces a product's images: deletes every existing image, then
    /// uploads `urls` fresh.
    ///
    /// # Errors
    ///
    /// Transport, status, or query-level failures as [`ShopifyError`].
    pub async fn resync_images(
        &self,
        product_id: &str,
        urls: &[String],
        alt: &str,
    ) -> Result<Vec<UserError>, ShopifyError> {
        let existing = self.product_image_ids(product_id).await?;
        debug!(product_id, count = existing.len(), "deleting existing images");
        for image_id in existing {
            self.delete_product_image(product_id, image_id).await?;
        }
        self.create_media(product_id, urls, alt).await
    }

    /// Creates a smart collection whose membership rule is
    /// `TAG EQUALS <title>`.
    ///
    /// # Errors
    ///
    /// Transport, status, or query-level failures as [`ShopifyError`].
    /// Field-level `userErrors` are returned in the [`MutationOutcome`].
    pub async fn create_collection(&self, title: &str) -> Result<MutationOutcome, ShopifyError> {
        let variables = json!({
            "input": {
                "title": title,
                "ruleSet": {
                    "appliedDisjunctively": false,
                    "rules": [{
                        "column": "TAG",
                        "relation": "EQUALS",
                        "condition": title,
                    }],
                },
            },
        });
        let data = self
            .post_graphql(CREATE_COLLECTION_MUTATION, variables, "CreateCollection")
            .await?;
        let mutation: CollectionCreateData = decode(data, "CreateCollection")?;

        Ok(MutationOutcome {
            id: mutation.payload.collection.map(|c| c.id),
            user_errors: mutation.payload.user_errors,
        })
    }

    /// Publishes a smart collection to the `web` and `global` scopes via the
    /// legacy REST resource; the GraphQL API has no equivalent.
    ///
    /// # Errors
    ///
    /// [`ShopifyError::UnexpectedStatus`] on a non-2xx response, transport
    /// failures as [`ShopifyError::Http`].
    pub async fn publish_collection(&self, collection_id: &str) -> Result<(), ShopifyError> {
        let id = numeric_id(collection_id);
        let url = self.rest_url(&format!("smart_collections/{id}.json"))?;

        for scope in ["web", "global"] {
            let body = json!({
                "smart_collection": {
                    "id": id,
                    "published": true,
                    "published_scope": scope,
                },
            });
            let response = self.client.put(url.clone()).json(&body).send().await?;
            check_status(&response, &url)?;
        }
        Ok(())
    }

    fn graphql_url(&self) -> Result<Url, ShopifyError> {
        self.rest_url("graphql.json")
    }

    fn rest_url(&self, path: &str) -> Result<Url, ShopifyError> {
        let full = format!("admin/api/{}/{path}", self.api_version);
        self.base_url
            .join(&full)
            .map_err(|e| ShopifyError::Config(format!("invalid request path '{full}': {e}")))
    }

    /// Posts one GraphQL document and unwraps the envelope: non-2xx statuses
    /// and top-level `errors` become [`ShopifyError`]; the `data` object is
    /// returned for per-operation decoding.
    async fn post_graphql(
        &self,
        query: &str,
        variables: serde_json::Value,
        context: &str,
    ) -> Result<serde_json::Value, ShopifyError> {
        let url = self.graphql_url()?;
        let body = json!({ "query": query, "variables": variables });
        let response = self.client.post(url.clone()).json(&body).send().await?;
        check_status(&response, &url)?;

        let text = response.text().await?;
        let envelope: GraphQlEnvelope =
            serde_json::from_str(&text).map_err(|e| ShopifyError::Deserialize {
                context: context.to_string(),
                source: e,
            })?;

        if let Some(errors) = envelope.errors {
            if !errors.is_empty() {
                return Err(ShopifyError::GraphQl {
                    messages: errors.into_iter().map(|e| e.message).collect(),
                });
            }
        }

        envelope.data.ok_or_else(|| ShopifyError::GraphQl {
            messages: vec![format!("{context}: response carried no data")],
        })
    }
}

fn check_status(response: &reqwest::Response, url: &Url) -> Result<(), ShopifyError> {
    let status: StatusCode = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(ShopifyError::UnexpectedStatus {
            status,
            url: url.to_string(),
        })
    }
}

fn decode<T: DeserializeOwned>(data: serde_json::Value, context: &str) -> Result<T, ShopifyError> {
    serde_json::from_value(data).map_err(|e| ShopifyError::Deserialize {
        context: context.to_string(),
        source: e,
    })
}

/// The trailing segment of a `gid://shopify/...` identifier. Already-numeric
/// ids pass through unchanged.
fn numeric_id(gid: &str) -> &str {
    gid.rsplit('/').next().unwrap_or(gid)
}

/// Shared `ProductInput` body for create and update. Every product carries a
/// `custom.woocommerce_sku` metafield so the source SKU survives migration,
/// followed by any dimension metafields.
fn product_input(product: &CanonicalProduct, id: Option<&str>) -> serde_json::Value {
    let mut metafields = vec![Metafield::single_line("woocommerce_sku", &product.sku)];
    if let Some(extra) = &product.metafields {
        metafields.extend(extra.iter().cloned());
    }

    let mut input = json!({
        "title": product.title,
        "descriptionHtml": product.description_html,
        "vendor": product.vendor,
        "productType": product.product_type,
        "status": product.status,
        "metafields": metafields,
    });
    if let Some(id) = id {
        input["id"] = json!(id);
    }
    if let Some(tags) = &product.tags {
        input["tags"] = json!(tags);
    }
    input
}

fn media_input(url: &str, alt: &str) -> serde_json::Value {
    json!({
        "originalSource": url,
        "alt": alt,
        "mediaContentType": "IMAGE",
    })
}

/// One `ProductVariantsBulkInput` entry. Option values map each variant
/// attribute onto the parent's option schema by name.
fn variant_input(child: &CanonicalProduct, location_id: &str) -> serde_json::Value {
    let mut metafields = vec![Metafield::single_line("woocommerce_sku", &child.sku)];
    if let Some(extra) = &child.metafields {
        metafields.extend(extra.iter().cloned());
    }

    let option_values: Vec<serde_json::Value> = child
        .variant_attributes
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|(name, value)| json!({ "optionName": name, "name": value }))
        .collect();

    let available: i64 = child.inventory_quantity.parse().unwrap_or(0);

    json!({
        "price": child.price,
        "inventoryItem": { "sku": child.sku, "tracked": true },
        "inventoryQuantities": [{
            "locationId": location_id,
            "availableQuantity": available,
        }],
        "metafields": metafields,
        "optionValues": option_values,
    })
}
