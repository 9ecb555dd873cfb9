pub mod app_config;
pub mod config;
pub mod context;
pub mod product;
pub mod row;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use context::{MigrationContext, UnparsedDimension};
pub use product::{CanonicalProduct, Metafield, ProductRole, ProductStatus};
pub use row::SourceRow;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
