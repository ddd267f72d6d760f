//! View file resolution.
//!
//! Resolves a view name to an existing template file by probing, in order:
//! the literal path, the controller's view directory, then the shared
//! directory. When nothing matches and the name lacks the configured
//! template extension, the whole search runs once more with the extension
//! appended.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::ViewConfig;

/// Find the template file for `path`, searching relative to the given
/// controller's view directory. Returns `None` when no candidate exists.
pub fn resolve_view(config: &ViewConfig, controller: &str, path: &str) -> Option<PathBuf> {
    if path.is_empty() {
        return None;
    }

    if let Some(found) = probe(config, controller, path) {
        return Some(found);
    }

    // One retry with the template extension appended.
    if !config.has_extension(path) {
        let with_ext = format!("{}.{}", path, config.extension);
        if let Some(found) = probe(config, controller, &with_ext) {
            return Some(found);
        }
    }

    debug!(controller, path, "view not found");
    None
}

fn probe(config: &ViewConfig, controller: &str, path: &str) -> Option<PathBuf> {
    let literal = Path::new(path);
    if literal.is_file() {
        return Some(literal.to_path_buf());
    }

    let in_controller = config.controller_dir(controller).join(path);
    if in_controller.is_file() {
        return Some(in_controller);
    }

    let in_shared = config.shared_root().join(path);
    if in_shared.is_file() {
        return Some(in_shared);
    }

    None
}
