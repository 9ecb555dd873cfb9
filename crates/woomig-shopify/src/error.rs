use thiserror::Error;

/// Errors returned by the Shopify Admin API client.
///
/// Field-level `userErrors` in mutation payloads are not represented here:
/// those are data, returned alongside the result so callers can report them
/// per product without aborting a batch.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The client could not be constructed (bad base URL or access token).
    #[error("client configuration error: {0}")]
    Config(String),

    /// The API answered with a non-2xx status.
    #[error("unexpected status {status} from {url}")]
    UnexpectedStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    /// The response body could not be deserialized into the expected shape.
    #[error("deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The GraphQL layer rejected the request (top-level `errors` array).
    #[error("graphql errors: {}", messages.join("; "))]
    GraphQl { messages: Vec<String> },
}
