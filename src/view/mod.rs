//! View layer: per-dispatch context, template resolution, and rendering.

mod context;
mod engine;
mod resolver;

pub use context::{merge_view_data, ModelState, ViewContext};
pub use engine::{RenderContext, TemplateEngine, ViewEngine};
pub use resolver::resolve_view;
