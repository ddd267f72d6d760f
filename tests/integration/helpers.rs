//! Test helpers and utilities

use std::fs;
use std::path::Path;

use serde_json::{json, Value};

use mvc_core::config::{Config, LoggingConfig, RoutingConfig, ViewConfig};
use mvc_core::core::Error;
use mvc_core::dispatch::{Dispatcher, Router, StatusCodeResult, ViewResult};
use mvc_core::{Request, Response};

/// A dispatcher wired against a temporary view tree.
pub struct TestApp {
    // Held so the view tree outlives the dispatcher.
    _dir: tempfile::TempDir,
    pub dispatcher: Dispatcher,
}

impl TestApp {
    /// Build the standard test application: a small view tree plus a router
    /// covering every result kind.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let views_root = dir.path().join("views");
        write_view_tree(&views_root);

        let config = Config {
            views: ViewConfig::new(&views_root),
            routing: RoutingConfig::default(),
            logging: LoggingConfig::default(),
        };

        let mut router = Router::new();
        router.register("Home", "index", |_, _| {
            Ok(ViewResult::new()
                .with_title("Welcome")
                .with_model(json!({"greeting": "hello"}))
                .into())
        });
        router.register("Home", "wrapped", |_, _| {
            Ok(ViewResult::new()
                .with_title("Wrapped")
                .with_layout("_layout")
                .with_model(json!({"greeting": "inside"}))
                .into())
        });
        router.register("Home", "fail", |_, _| {
            Err(Error::Action("database unreachable".to_string()))
        });
        router.register("Home", "gone", |_, _| {
            Ok(StatusCodeResult::new(http::StatusCode::GONE)
                .with_description("Gone")
                .into())
        });
        router.register("Api", "list", |_, _| Ok(json!([1, 2, 3]).into()));
        router.register("Account", "create", |_, model| {
            Ok(model.cloned().unwrap_or(Value::Null).into())
        });

        Self {
            _dir: dir,
            dispatcher: Dispatcher::new(router, &config),
        }
    }

    /// Dispatch a GET request for the given controller/action pair.
    pub fn get(&self, controller: &str, action: &str) -> Response {
        let request = Request::builder()
            .method("GET")
            .query("controller", controller)
            .query("action", action)
            .build();
        self.dispatch(&request)
    }

    /// Dispatch a POST request with form parameters.
    pub fn post(&self, controller: &str, action: &str, form: &[(&str, &str)]) -> Response {
        let mut builder = Request::builder()
            .method("POST")
            .form("controller", controller)
            .form("action", action);
        for (key, value) in form {
            builder = builder.form(*key, *value);
        }
        self.dispatch(&builder.build())
    }

    pub fn dispatch(&self, request: &Request) -> Response {
        let mut response = Response::new();
        self.dispatcher
            .dispatch(request, &mut response)
            .expect("dispatch failed");
        response
    }
}

fn write_view_tree(root: &Path) {
    fs::create_dir_all(root.join("home")).expect("Failed to create view dirs");
    fs::create_dir_all(root.join("shared")).expect("Failed to create view dirs");

    fs::write(
        root.join("home/index.html"),
        "<h1>{{ title }}</h1><p>{{ model.greeting }}</p>",
    )
    .expect("Failed to write view");
    fs::write(root.join("home/wrapped.html"), "<p>{{ model.greeting }}</p>")
        .expect("Failed to write view");
    fs::write(root.join("home/fail.html"), "error: {{ exception }}")
        .expect("Failed to write view");
    fs::write(
        root.join("shared/_layout.html"),
        "<html><title>{{ title }}</title><body>{{ content }}</body></html>",
    )
    .expect("Failed to write view");
}

/// Assert the response body as UTF-8 text.
pub fn body_text(response: &Response) -> &str {
    std::str::from_utf8(response.body()).expect("body is not UTF-8")
}
