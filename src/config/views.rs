//! View layout configuration: template root, shared directory, extension.

use std::path::{Path, PathBuf};

use super::parse::env_or;
use super::ConfigError;

/// Name of the subdirectory holding shared views (layouts, partials).
pub const SHARED_DIR: &str = "shared";

/// Configuration of the view file tree.
#[derive(Clone, Debug)]
pub struct ViewConfig {
    /// Root directory of all view templates.
    pub views_root: PathBuf,
    /// Template file extension, without the leading dot.
    pub extension: String,
}

impl ViewConfig {
    /// Create a config rooted at the given directory with the default
    /// `html` extension.
    pub fn new(views_root: impl Into<PathBuf>) -> Self {
        Self {
            views_root: views_root.into(),
            extension: "html".to_string(),
        }
    }

    /// Load configuration from environment variables
    /// (`VIEWS_ROOT`, `VIEW_EXT`).
    pub fn from_env() -> Result<Self, ConfigError> {
        let extension = env_or("VIEW_EXT", "html");
        let extension = extension.trim_start_matches('.').to_string();
        if extension.is_empty() {
            return Err(ConfigError::Invalid {
                key: "VIEW_EXT".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        Ok(Self {
            views_root: PathBuf::from(env_or("VIEWS_ROOT", "views")),
            extension,
        })
    }

    /// Set the template extension.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Directory holding shared views (`<views_root>/shared`).
    pub fn shared_root(&self) -> PathBuf {
        self.views_root.join(SHARED_DIR)
    }

    /// Directory holding one controller's views.
    pub fn controller_dir(&self, controller: &str) -> PathBuf {
        self.views_root.join(controller.to_lowercase())
    }

    /// Conventional view file for a controller/action pair:
    /// `<views_root>/<lowercased-controller>/<action>.<ext>`.
    pub fn conventional_view(&self, controller: &str, action: &str) -> PathBuf {
        self.controller_dir(controller)
            .join(format!("{}.{}", action, self.extension))
    }

    /// Whether a path already carries the configured template extension.
    pub fn has_extension(&self, path: &str) -> bool {
        Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(&self.extension))
    }
}
