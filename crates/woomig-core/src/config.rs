use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup — no
/// `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let shopify_store = require("SHOPIFY_STORE")?;
    let shopify_access_token = require("SHOPIFY_ACCESS_TOKEN")?;

    let api_version = or_default("WOOMIG_API_VERSION", "2024-07");
    let request_timeout_secs = parse_u64("WOOMIG_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("WOOMIG_USER_AGENT", "woomig/0.1 (catalog-migration)");
    let throttle_ms = parse_u64("WOOMIG_THROTTLE_MS", "200")?;
    let fallback_vendor = or_default("WOOMIG_FALLBACK_VENDOR", "Vampt Vintage Design");
    let dimensions_log_path = PathBuf::from(or_default(
        "WOOMIG_DIMENSIONS_LOG",
        "dimensions_to_process.csv",
    ));
    let image_errors_log_path =
        PathBuf::from(or_default("WOOMIG_IMAGE_ERRORS_LOG", "image_errors.csv"));

    Ok(AppConfig {
        shopify_store,
        shopify_access_token,
        api_version,
        request_timeout_secs,
        user_agent,
        throttle_ms,
        fallback_vendor,
        dimensions_log_path,
        image_errors_log_path,
    })
}
