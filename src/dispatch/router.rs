//! Explicit dispatch table mapping `(controller, action)` pairs to handlers.
//!
//! Handlers are registered at startup; resolution reads the `controller` and
//! `action` request parameters (query first, then form) and fails fast with
//! an unknown-route error instead of deep inside invocation.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::config::RoutingConfig;
use crate::core::{Error, Request, Result};
use crate::dispatch::ActionResult;

/// A registered controller action.
pub type Handler = Box<dyn Fn(&Request, Option<&Value>) -> Result<ActionResult> + Send + Sync>;

/// The route a request resolved to, with the original parameter casing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub controller: String,
    pub action: String,
}

/// Dispatch table keyed by lowercased `(controller, action)`.
#[derive(Default)]
pub struct Router {
    routes: HashMap<(String, String), Handler>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a controller/action pair. Matching is
    /// case-insensitive; a later registration replaces an earlier one.
    pub fn register<F>(&mut self, controller: &str, action: &str, handler: F)
    where
        F: Fn(&Request, Option<&Value>) -> Result<ActionResult> + Send + Sync + 'static,
    {
        self.routes.insert(
            (controller.to_lowercase(), action.to_lowercase()),
            Box::new(handler),
        );
    }

    /// Look up the handler for a controller/action pair.
    pub fn lookup(&self, controller: &str, action: &str) -> Option<&Handler> {
        self.routes
            .get(&(controller.to_lowercase(), action.to_lowercase()))
    }

    /// Extract the route from the request parameters, falling back to the
    /// configured defaults. Query parameters win over form parameters.
    pub fn route_of(request: &Request, config: &RoutingConfig) -> Route {
        Route {
            controller: param(request, "controller")
                .unwrap_or(&config.default_controller)
                .to_string(),
            action: param(request, "action")
                .unwrap_or(&config.default_action)
                .to_string(),
        }
    }

    /// Resolve the request to a registered handler.
    pub fn resolve(
        &self,
        request: &Request,
        config: &RoutingConfig,
    ) -> Result<(Route, &Handler)> {
        let route = Self::route_of(request, config);
        match self.lookup(&route.controller, &route.action) {
            Some(handler) => Ok((route, handler)),
            None => Err(Error::UnknownRoute {
                controller: route.controller,
                action: route.action,
            }),
        }
    }
}

fn param<'r>(request: &'r Request, key: &str) -> Option<&'r str> {
    request.query(key).or_else(|| request.form(key))
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes.keys().collect::<Vec<_>>())
            .finish()
    }
}
