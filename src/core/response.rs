//! HTTP response abstraction for action results and the dispatcher.

use bytes::{BufMut, Bytes, BytesMut};
use http::header::{self, HeaderName};
use http::{HeaderMap, HeaderValue, StatusCode};

/// Common header name constants for fast lookup.
mod header_names {
    use super::*;
    pub static CONTENT_TYPE: HeaderName = header::CONTENT_TYPE;
}

/// Buffered HTTP response written by the dispatch pipeline.
///
/// Body content is accumulated with [`write`](Response::write); calling
/// [`end`](Response::end) closes the stream, after which further writes are
/// ignored. The host server is expected to flush status, headers, and body
/// once the dispatch completes.
#[derive(Debug)]
pub struct Response {
    status: StatusCode,
    status_description: Option<String>,
    headers: HeaderMap,
    body: BytesMut,
    ended: bool,
}

impl Response {
    /// Create an empty 200 OK response.
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            status_description: None,
            headers: HeaderMap::new(),
            body: BytesMut::new(),
            ended: false,
        }
    }

    /// Set the status code.
    #[inline]
    pub fn set_status_code(&mut self, status: StatusCode) {
        self.status = status;
    }

    /// Set the status description.
    #[inline]
    pub fn set_status_description(&mut self, description: impl Into<String>) {
        self.status_description = Some(description.into());
    }

    /// Set the Content-Type header.
    pub fn set_content_type(&mut self, content_type: &str) {
        if let Ok(value) = HeaderValue::try_from(content_type) {
            self.headers.insert(header_names::CONTENT_TYPE.clone(), value);
        }
    }

    /// Set a header by string name and value.
    pub fn set_header(&mut self, name: impl AsRef<str>, value: impl AsRef<str>) {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_ref()),
            HeaderValue::try_from(value.as_ref()),
        ) {
            self.headers.insert(name, value);
        }
    }

    /// Append data to the response body. Ignored once the response has ended.
    pub fn write(&mut self, data: impl AsRef<[u8]>) {
        if self.ended {
            tracing::debug!("write after end ignored");
            return;
        }
        self.body.put_slice(data.as_ref());
    }

    /// Close the response stream.
    #[inline]
    pub fn end(&mut self) {
        self.ended = true;
    }

    // Getters

    /// Get the status code.
    #[inline]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the status description, if one was set.
    #[inline]
    pub fn status_description(&self) -> Option<&str> {
        self.status_description.as_deref()
    }

    /// Get the headers.
    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get a header value by name (case-insensitive).
    #[inline]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get Content-Type header.
    #[inline]
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(&header_names::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    /// Get the accumulated body.
    #[inline]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Get body length.
    #[inline]
    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    /// Whether the response stream has been closed.
    #[inline]
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Check if this is a client error (4xx).
    #[inline]
    pub fn is_client_error(&self) -> bool {
        self.status.is_client_error()
    }

    /// Check if this is a server error (5xx).
    #[inline]
    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }

    /// Consume the response, yielding the frozen body.
    #[inline]
    pub fn into_body(self) -> Bytes {
        self.body.freeze()
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}
