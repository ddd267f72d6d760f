//! Per-dispatch view state.
//!
//! One [`ViewContext`] is created at the start of each dispatch and threaded
//! through the pipeline; it is never shared between requests, so concurrent
//! dispatches cannot corrupt each other's render state. Fields are written
//! by the dispatcher while normalizing the action result and read during
//! view rendering.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde_json::Value;

use crate::core::Error;
use crate::dispatch::ActionResult;

/// Validation/error state of the current dispatch. Currently only populated
/// when a controller action fails.
#[derive(Debug, Default)]
pub struct ModelState {
    exception: Option<Error>,
}

impl ModelState {
    /// Record a failure from the action invocation.
    pub fn set_exception(&mut self, error: Error) {
        self.exception = Some(error);
    }

    /// The captured failure, if any.
    #[inline]
    pub fn exception(&self) -> Option<&Error> {
        self.exception.as_ref()
    }

    /// True when no failure has been captured.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.exception.is_none()
    }
}

/// State of one render pass: model, layout, title, extra view data, and the
/// rendered content.
#[derive(Debug, Default)]
pub struct ViewContext {
    layout: Option<String>,
    title: Option<String>,
    view_data: IndexMap<String, Value>,
    action_result: Option<ActionResult>,
    model: Value,
    content: Option<String>,
    model_state: ModelState,
    view_file: Option<PathBuf>,
}

impl ViewContext {
    /// Create an empty context for a new dispatch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layout path.
    pub fn set_layout(&mut self, path: impl Into<String>) {
        self.layout = Some(path.into());
    }

    /// The layout path, if one is set.
    #[inline]
    pub fn layout(&self) -> Option<&str> {
        self.layout.as_deref()
    }

    /// Set the page title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// The page title, if one is set.
    #[inline]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Set a single view data entry.
    pub fn set_data(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.view_data.insert(key.into(), value.into());
    }

    /// Get the view data entry with the given key.
    #[inline]
    pub fn data(&self, key: &str) -> Option<&Value> {
        self.view_data.get(key)
    }

    /// All view data.
    #[inline]
    pub fn data_all(&self) -> &IndexMap<String, Value> {
        &self.view_data
    }

    /// Merge incoming view data using unique-union semantics; see
    /// [`merge_view_data`].
    pub fn merge_data(&mut self, incoming: &IndexMap<String, Value>) {
        merge_view_data(&mut self.view_data, incoming);
    }

    /// Store the action result as returned by the controller action.
    pub fn set_action_result(&mut self, result: ActionResult) {
        self.action_result = Some(result);
    }

    /// The action result, if the action produced one.
    #[inline]
    pub fn action_result(&self) -> Option<&ActionResult> {
        self.action_result.as_ref()
    }

    /// Store the normalized model payload.
    pub fn set_model(&mut self, model: Value) {
        self.model = model;
    }

    /// The normalized model payload (`Null` when the action failed or
    /// returned nothing).
    #[inline]
    pub fn model(&self) -> &Value {
        &self.model
    }

    /// Overwrite `target` with the view result's model, but only when the
    /// action result is a view variant carrying a non-empty model.
    pub fn inject_model(&self, target: &mut Value) {
        if let Some(ActionResult::View(view)) = &self.action_result {
            if let Some(model) = &view.model {
                if !model.is_null() {
                    *target = model.clone();
                }
            }
        }
    }

    /// Store the rendered content of the primary view.
    pub fn set_content(&mut self, content: String) {
        self.content = Some(content);
    }

    /// The rendered content; `None` when no view file resolved.
    #[inline]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Mutable access to the model state.
    #[inline]
    pub fn model_state_mut(&mut self) -> &mut ModelState {
        &mut self.model_state
    }

    /// The model state of the current dispatch.
    #[inline]
    pub fn model_state(&self) -> &ModelState {
        &self.model_state
    }

    /// Record the resolved view file.
    pub fn set_view_file(&mut self, path: PathBuf) {
        self.view_file = Some(path);
    }

    /// The resolved view file, if a view was found.
    #[inline]
    pub fn view_file(&self) -> Option<&Path> {
        self.view_file.as_deref()
    }
}

/// Merge `incoming` into `data` with unique-union semantics: later keys
/// overwrite earlier ones (keeping the original position), then entries
/// whose value equals an earlier entry's value are dropped, first
/// occurrence winning.
pub fn merge_view_data(data: &mut IndexMap<String, Value>, incoming: &IndexMap<String, Value>) {
    for (key, value) in incoming {
        data.insert(key.clone(), value.clone());
    }

    let mut seen: Vec<Value> = Vec::with_capacity(data.len());
    data.retain(|_, value| {
        if seen.contains(value) {
            false
        } else {
            seen.push(value.clone());
            true
        }
    });
}
