//! Routing convention configuration.

use super::parse::env_or;
use super::ConfigError;

/// Defaults for the two-parameter routing convention.
#[derive(Clone, Debug)]
pub struct RoutingConfig {
    /// Controller used when the `controller` parameter is absent.
    pub default_controller: String,
    /// Action used when the `action` parameter is absent.
    pub default_action: String,
}

impl RoutingConfig {
    /// Load configuration from environment variables
    /// (`DEFAULT_CONTROLLER`, `DEFAULT_ACTION`).
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            default_controller: env_or("DEFAULT_CONTROLLER", "Home"),
            default_action: env_or("DEFAULT_ACTION", "index"),
        })
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            default_controller: "Home".to_string(),
            default_action: "index".to_string(),
        }
    }
}
