mod app_config;
mod config;
mod metrics;

pub use app_config::{AppConfig, BrowserOptions, Viewport, VisitTimings};
pub use config::{load_app_config, load_app_config_from_env};
pub use metrics::{Metric, MetricResult};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
