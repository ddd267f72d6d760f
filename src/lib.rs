//! mvc_core - Request-dispatch core of a minimal MVC web framework.
//!
//! This crate maps an inbound HTTP request to a registered controller
//! action, renders the resulting view, and writes the response. It has no
//! server of its own: the host hands over a request snapshot and receives a
//! buffered response back.
//!
//! # Features
//!
//! - **Request snapshot**: Server variables, cookies, query/form parameters,
//!   and uploaded files behind one immutable type with cached derived fields
//! - **Explicit routing**: A `(controller, action)` dispatch table populated
//!   at startup; unknown routes fail fast as 404
//! - **Action results**: View, status-code, and raw-value results as a
//!   closed enum dispatched by exhaustive match
//! - **View resolution**: Controller directory, then shared directory, with
//!   a single extension-append retry
//! - **JSON fallback**: Payloads with no matching view are serialized as
//!   `application/json`
//! - **Structured logging**: Per-request access events via tracing
//!
//! # Example
//!
//! ```rust,ignore
//! use mvc_core::config::Config;
//! use mvc_core::core::{Request, Response};
//! use mvc_core::dispatch::{Dispatcher, Router, ViewResult};
//!
//! let mut router = Router::new();
//! router.register("Home", "index", |_req, _model| {
//!     Ok(ViewResult::new().with_title("Welcome").into())
//! });
//!
//! let config = Config::from_env()?;
//! let dispatcher = Dispatcher::new(router, &config);
//!
//! let request = Request::builder().method("GET").uri("/").build();
//! let mut response = Response::new();
//! dispatcher.dispatch(&request, &mut response)?;
//! ```

/// Package version from Cargo.toml
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod core;
pub mod dispatch;
pub mod logging;
pub mod view;

// Re-exports for convenience
pub use crate::config::Config;
pub use crate::core::{Error, Request, Response, Result};
pub use crate::dispatch::{ActionResult, Dispatcher, Router};
