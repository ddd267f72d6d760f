//! The dispatch pipeline: route, bind, invoke, render, serialize.
//!
//! One [`ViewContext`] is created per dispatch and threaded through the
//! pipeline stages; nothing here is shared mutable state, so a dispatcher
//! can serve concurrent requests behind a shared reference.

use http::StatusCode;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::config::{Config, RoutingConfig, ViewConfig};
use crate::core::{Error, Request, Response, Result};
use crate::dispatch::model::bind_request_model;
use crate::dispatch::router::Router;
use crate::dispatch::{ActionResult, StatusCodeResult};
use crate::view::{resolve_view, RenderContext, TemplateEngine, ViewContext, ViewEngine};

/// Drives one request through the full pipeline and writes the response.
pub struct Dispatcher {
    router: Router,
    engine: Box<dyn ViewEngine + Send + Sync>,
    views: ViewConfig,
    routing: RoutingConfig,
}

impl Dispatcher {
    /// Create a dispatcher with the default template engine.
    pub fn new(router: Router, config: &Config) -> Self {
        Self {
            router,
            engine: Box::new(TemplateEngine::new()),
            views: config.views.clone(),
            routing: config.routing.clone(),
        }
    }

    /// Replace the view engine.
    pub fn with_engine(mut self, engine: Box<dyn ViewEngine + Send + Sync>) -> Self {
        self.engine = engine;
        self
    }

    /// Dispatch one request, writing the outcome into `response`.
    ///
    /// A handler failure does not abort the dispatch: the error is captured
    /// in the model state and rendering continues with a null payload. Only
    /// infrastructure failures (unresolvable layout, JSON encoding) surface
    /// as `Err`.
    pub fn dispatch(&self, request: &Request, response: &mut Response) -> Result<()> {
        let (route, handler) = match self.router.resolve(request, &self.routing) {
            Ok(resolved) => resolved,
            Err(err) => {
                warn!(%err, "route not found");
                StatusCodeResult::new(StatusCode::NOT_FOUND)
                    .with_description("Not Found")
                    .execute(response);
                self.log_access(request, response);
                return Ok(());
            }
        };

        let mut ctx = ViewContext::new();
        let bound = bind_request_model(request);

        match handler(request, bound.as_ref()) {
            Ok(result) => ctx.set_action_result(result),
            Err(err) => {
                error!(
                    controller = %route.controller,
                    action = %route.action,
                    %err,
                    "action failed"
                );
                ctx.model_state_mut().set_exception(err);
            }
        }

        // Normalize the action result into the view pipeline.
        let mut payload = Value::Null;
        let mut layout = None;
        let mut title = None;
        let mut view_data = None;
        match ctx.action_result() {
            Some(ActionResult::StatusCode(result)) => {
                result.execute(response);
                self.log_access(request, response);
                return Ok(());
            }
            Some(ActionResult::View(view)) => {
                layout = view.layout.clone().filter(|l| !l.is_empty());
                title = view.title.clone().filter(|t| !t.is_empty());
                view_data = Some(view.view_data.clone());
            }
            Some(ActionResult::Raw(value)) => {
                payload = value.clone();
            }
            None => {}
        }
        if let Some(layout) = layout {
            ctx.set_layout(layout);
        }
        if let Some(title) = title {
            ctx.set_title(title);
        }
        if let Some(data) = view_data {
            ctx.merge_data(&data);
        }
        ctx.inject_model(&mut payload);
        ctx.set_model(payload);

        // Primary view: conventional <views>/<lc-controller>/<action>.<ext>.
        // The router matches case-insensitively, so the file lookup
        // normalizes the action the same way; only the conventional path is
        // probed here, the generic search is for layouts and explicit paths.
        let view_file = self
            .views
            .conventional_view(&route.controller, &route.action.to_lowercase());
        if view_file.is_file() {
            let render_ctx = RenderContext {
                model: ctx.model(),
                model_state: Some(ctx.model_state()),
                content: None,
                view_data: ctx.data_all(),
                title: ctx.title(),
            };
            let content = self.engine.render(&view_file, &render_ctx)?;
            ctx.set_view_file(view_file);
            ctx.set_content(content);
        }

        // Layout wrap. The layout render sees the content and the model but
        // never the model state.
        let output = if let Some(layout) = ctx.layout() {
            let layout_file = resolve_view(&self.views, &route.controller, layout)
                .ok_or_else(|| Error::ViewNotFound(layout.to_string()))?;
            let render_ctx = RenderContext {
                model: ctx.model(),
                model_state: None,
                content: ctx.content(),
                view_data: ctx.data_all(),
                title: ctx.title(),
            };
            Some(self.engine.render(&layout_file, &render_ctx)?)
        } else {
            ctx.content().map(str::to_string)
        };

        self.serialize(&ctx, output, response)?;
        self.log_access(request, response);
        Ok(())
    }

    /// Write the final body: rendered markup verbatim, a bare string payload
    /// verbatim, anything else as JSON with the matching content type.
    fn serialize(
        &self,
        ctx: &ViewContext,
        output: Option<String>,
        response: &mut Response,
    ) -> Result<()> {
        match output {
            Some(markup) => response.write(markup),
            None => match ctx.model() {
                Value::String(s) => response.write(s),
                other => {
                    let encoded = serde_json::to_string(other)?;
                    response.set_content_type("application/json");
                    response.write(encoded);
                }
            },
        }
        response.end();
        Ok(())
    }

    fn log_access(&self, request: &Request, response: &Response) {
        info!(
            target: "access",
            method = request.http_method().unwrap_or("-"),
            path = request.path(),
            status = response.status().as_u16(),
            bytes = response.body_len(),
        );
    }

    /// The routing defaults in effect.
    #[inline]
    pub fn routing(&self) -> &RoutingConfig {
        &self.routing
    }

    /// The view configuration in effect.
    #[inline]
    pub fn views(&self) -> &ViewConfig {
        &self.views
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("router", &self.router)
            .field("views", &self.views)
            .field("routing", &self.routing)
            .finish_non_exhaustive()
    }
}
