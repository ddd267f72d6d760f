//! Core types for request/response handling.
//!
//! This module provides the fundamental types used throughout the dispatch
//! pipeline:
//!
//! - [`Request`] - read-only snapshot of one inbound HTTP request
//! - [`Response`] - buffered HTTP response with write/end semantics
//! - [`Url`] - parsed URL components
//! - [`Error`] - core error types

mod error;
mod request;
mod response;
mod url;

pub use error::{Error, Result};
pub use request::{parse_cookie_header, parse_query_string, Request, RequestBuilder, UploadedFile};
pub use response::Response;
pub use url::Url;
