//! Shopify Admin API client for the catalog migration.
//!
//! Everything remote lives here: product lookup, create/update, bulk variant
//! attachment, media sync, and smart-collection creation/publishing.

pub mod client;
pub mod error;
pub mod types;

pub use client::AdminClient;
pub use error::ShopifyError;
pub use types::{MutationOutcome, UserError};
