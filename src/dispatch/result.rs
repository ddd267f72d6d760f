//! Action results: the closed set of outcomes a controller action can
//! produce, dispatched by exhaustive match.

use http::StatusCode;
use indexmap::IndexMap;
use serde_json::Value;

use crate::core::Response;

/// Outcome of a controller action.
#[derive(Debug, Clone)]
pub enum ActionResult {
    /// Render a view, optionally wrapped in a layout.
    View(ViewResult),
    /// Terminate with a specific HTTP status code.
    StatusCode(StatusCodeResult),
    /// Raw value; JSON-encoded unless it is already a string.
    Raw(Value),
}

impl From<ViewResult> for ActionResult {
    fn from(v: ViewResult) -> Self {
        ActionResult::View(v)
    }
}

impl From<StatusCodeResult> for ActionResult {
    fn from(s: StatusCodeResult) -> Self {
        ActionResult::StatusCode(s)
    }
}

impl From<Value> for ActionResult {
    fn from(v: Value) -> Self {
        ActionResult::Raw(v)
    }
}

/// Properties needed to render a view: the model plus optional layout,
/// title, and extra view data.
#[derive(Debug, Clone, Default)]
pub struct ViewResult {
    /// Model passed to the view.
    pub model: Option<Value>,
    /// Layout file name in the shared folder, or a full path.
    pub layout: Option<String>,
    /// Page title.
    pub title: Option<String>,
    /// Extra key-value data for the view.
    pub view_data: IndexMap<String, Value>,
}

impl ViewResult {
    /// Create an empty view result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<Value>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the layout path.
    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = Some(layout.into());
        self
    }

    /// Set the page title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add a view data entry.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.view_data.insert(key.into(), value.into());
        self
    }
}

/// Action result carrying a specific HTTP response status code and
/// description.
#[derive(Debug, Clone)]
pub struct StatusCodeResult {
    /// The HTTP status code.
    pub status_code: StatusCode,
    /// The HTTP status description.
    pub status_description: Option<String>,
}

impl StatusCodeResult {
    /// Create a status-code result.
    pub fn new(status_code: StatusCode) -> Self {
        Self {
            status_code,
            status_description: None,
        }
    }

    /// Set the status description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.status_description = Some(description.into());
        self
    }

    /// Execute the result against the response: set status code and
    /// description, write the description (if any) as the body, and end the
    /// response stream.
    pub fn execute(&self, response: &mut Response) {
        response.set_status_code(self.status_code);
        if let Some(description) = &self.status_description {
            response.set_status_description(description.clone());
            response.write(description);
        }
        response.end();
    }
}
