use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    /// Store domain, e.g. `my-store.myshopify.com`.
    pub shopify_store: String,
    pub shopify_access_token: String,
    /// Admin API version segment, e.g. `2024-07`.
    pub api_version: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Fixed delay between remote mutations. Rate-limit avoidance, not a
    /// performance knob.
    pub throttle_ms: u64,
    /// Vendor used when neither attributes, categories, nor the `Brand`
    /// column name a designer.
    pub fallback_vendor: String,
    pub dimensions_log_path: PathBuf,
    pub image_errors_log_path: PathBuf,
}

impl AppConfig {
    /// Base URL for all Admin API calls, e.g. `https://my-store.myshopify.com`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("https://{}", self.shopify_store)
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("shopify_store", &self.shopify_store)
            .field("shopify_access_token", &"[redacted]")
            .field("api_version", &self.api_version)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("throttle_ms", &self.throttle_ms)
            .field("fallback_vendor", &self.fallback_vendor)
            .field("dimensions_log_path", &self.dimensions_log_path)
            .field("image_errors_log_path", &self.image_errors_log_path)
            .finish()
    }
}
