//! Configuration module for mvc_core.
//!
//! This module provides centralized configuration loading from environment
//! variables.
//!
//! # Example
//!
//! ```rust,ignore
//! use mvc_core::config::Config;
//!
//! let config = Config::from_env()?;
//! println!("Views root: {:?}", config.views.views_root);
//! ```

mod error;
mod logging;
mod parse;
mod routing;
mod views;

pub use error::ConfigError;
pub use logging::LoggingConfig;
pub use parse::{env_bool, env_opt, env_or};
pub use routing::RoutingConfig;
pub use views::{ViewConfig, SHARED_DIR};

/// Complete application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// View tree configuration.
    pub views: ViewConfig,
    /// Routing convention defaults.
    pub routing: RoutingConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            views: ViewConfig::from_env()?,
            routing: RoutingConfig::from_env()?,
            logging: LoggingConfig::from_env()?,
        })
    }

    /// Print configuration summary to log.
    pub fn log_summary(&self) {
        use tracing::info;

        info!("Configuration loaded:");
        info!("  Views root: {:?}", self.views.views_root);
        info!("  View extension: .{}", self.views.extension);
        info!(
            "  Default route: {}/{}",
            self.routing.default_controller, self.routing.default_action
        );
        info!("  Log filter: {}", self.logging.filter);
    }
}
