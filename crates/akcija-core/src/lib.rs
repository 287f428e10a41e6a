pub mod app_config;
pub mod config;
pub mod manifests;
pub mod naming;
pub mod offers;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use manifests::{ImageManifest, ProcessedImage, TextManifest};
pub use naming::{batch_timestamp, format_timestamp, to_json_pretty};
pub use offers::{OfferRecord, OfferSection};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
