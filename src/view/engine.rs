//! Template rendering behind the [`ViewEngine`] seam.
//!
//! The default [`TemplateEngine`] is a minimal substitution renderer: it
//! reads the template file and replaces `{{ name }}` placeholders from the
//! render context. Richer engines plug in through the trait.

use std::borrow::Cow;
use std::path::Path;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::{Captures, Regex};
use serde_json::Value;

use crate::core::Result;
use crate::view::context::ModelState;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_.]+)\s*\}\}").expect("placeholder pattern is valid")
});

/// Everything a template can reference during one render pass.
#[derive(Debug)]
pub struct RenderContext<'a> {
    /// The model payload.
    pub model: &'a Value,
    /// Model state of the dispatch; absent for layout renders.
    pub model_state: Option<&'a ModelState>,
    /// Inner rendered content, available to layouts.
    pub content: Option<&'a str>,
    /// Extra view data.
    pub view_data: &'a IndexMap<String, Value>,
    /// Page title.
    pub title: Option<&'a str>,
}

/// Renders a template file against a [`RenderContext`].
pub trait ViewEngine {
    /// Render the template at `file` and return the produced markup.
    fn render(&self, file: &Path, ctx: &RenderContext<'_>) -> Result<String>;
}

/// The built-in `{{ name }}` substitution renderer.
///
/// Recognized placeholders: `title`, `content`, `model`,
/// `model.<path.to.field>`, `data.<key>`, and `exception`. Anything else
/// renders as the empty string.
#[derive(Debug, Default)]
pub struct TemplateEngine;

impl TemplateEngine {
    pub fn new() -> Self {
        Self
    }

    fn lookup(ctx: &RenderContext<'_>, name: &str) -> String {
        match name {
            "title" => ctx.title.unwrap_or("").to_string(),
            "content" => ctx.content.unwrap_or("").to_string(),
            "model" => value_text(ctx.model),
            "exception" => ctx
                .model_state
                .and_then(|s| s.exception())
                .map(|e| e.to_string())
                .unwrap_or_default(),
            _ => {
                if let Some(key) = name.strip_prefix("data.") {
                    ctx.view_data.get(key).map(value_text).unwrap_or_default()
                } else if let Some(path) = name.strip_prefix("model.") {
                    lookup_path(ctx.model, path).map(value_text).unwrap_or_default()
                } else {
                    String::new()
                }
            }
        }
    }
}

impl ViewEngine for TemplateEngine {
    fn render(&self, file: &Path, ctx: &RenderContext<'_>) -> Result<String> {
        let template = std::fs::read_to_string(file)?;
        let rendered = PLACEHOLDER.replace_all(&template, |caps: &Captures<'_>| {
            Self::lookup(ctx, &caps[1])
        });
        Ok(match rendered {
            Cow::Borrowed(s) => s.to_string(),
            Cow::Owned(s) => s,
        })
    }
}

/// Walk a dot-separated path through a JSON value.
fn lookup_path<'v>(value: &'v Value, path: &str) -> Option<&'v Value> {
    let mut current = value;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Text form of a JSON value: strings unquoted, everything else compact JSON.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Error;
    use serde_json::json;
    use std::fs;

    fn render_str(template: &str, ctx: &RenderContext<'_>) -> String {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("view.html");
        fs::write(&file, template).unwrap();
        TemplateEngine::new().render(&file, ctx).unwrap()
    }

    fn empty_data() -> IndexMap<String, Value> {
        IndexMap::new()
    }

    #[test]
    fn test_title_and_content_placeholders() {
        let data = empty_data();
        let model = Value::Null;
        let ctx = RenderContext {
            model: &model,
            model_state: None,
            content: Some("<p>inner</p>"),
            view_data: &data,
            title: Some("Welcome"),
        };

        let out = render_str("<h1>{{ title }}</h1>{{ content }}", &ctx);
        assert_eq!(out, "<h1>Welcome</h1><p>inner</p>");
    }

    #[test]
    fn test_model_path_lookup() {
        let data = empty_data();
        let model = json!({"user": {"name": "ada"}, "items": [10, 20]});
        let ctx = RenderContext {
            model: &model,
            model_state: None,
            content: None,
            view_data: &data,
            title: None,
        };

        assert_eq!(render_str("{{ model.user.name }}", &ctx), "ada");
        assert_eq!(render_str("{{ model.items.1 }}", &ctx), "20");
        assert_eq!(render_str("{{ model.user.missing }}", &ctx), "");
    }

    #[test]
    fn test_data_lookup_and_unknown_placeholder() {
        let mut data = empty_data();
        data.insert("count".to_string(), json!(3));
        let model = Value::Null;
        let ctx = RenderContext {
            model: &model,
            model_state: None,
            content: None,
            view_data: &data,
            title: None,
        };

        assert_eq!(render_str("{{ data.count }}/{{ nope }}", &ctx), "3/");
    }

    #[test]
    fn test_exception_placeholder() {
        let data = empty_data();
        let model = Value::Null;
        let mut state = ModelState::default();
        state.set_exception(Error::Action("kaput".to_string()));
        let ctx = RenderContext {
            model: &model,
            model_state: Some(&state),
            content: None,
            view_data: &data,
            title: None,
        };

        assert!(render_str("{{ exception }}", &ctx).contains("kaput"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let data = empty_data();
        let model = Value::Null;
        let ctx = RenderContext {
            model: &model,
            model_state: None,
            content: None,
            view_data: &data,
            title: None,
        };

        let err = TemplateEngine::new()
            .render(Path::new("/definitely/not/here.html"), &ctx)
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
