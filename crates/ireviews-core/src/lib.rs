pub mod app_config;
pub mod config;
pub mod params;
pub mod review;

use thiserror::Error;

pub use app_config::HarvesterConfig;
pub use config::{load_harvester_config, load_harvester_config_from_env};
pub use params::{validate, FeedFormat, HarvestParameters, InvalidParameters, Violation};
pub use review::{CountryResult, HarvestResult, Review};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
