//! Core error types.

use std::fmt;

/// Errors raised by the request/dispatch core.
#[derive(Debug)]
pub enum Error {
    /// A required request field (e.g. `REQUEST_METHOD`) is absent.
    MissingField(String),

    /// No handler is registered for the resolved controller/action pair.
    UnknownRoute { controller: String, action: String },

    /// A controller action failed. Captured into the model state by the
    /// dispatcher rather than aborting the pipeline.
    Action(String),

    /// A layout path was set but could not be resolved to a file.
    ViewNotFound(String),

    /// The action result payload could not be JSON-encoded.
    JsonEncode(serde_json::Error),

    /// I/O error (e.g. reading a view template).
    Io(std::io::Error),

    /// Custom error with message.
    Custom(String),
}

impl Error {
    /// Shorthand for a missing-request-field error.
    pub fn missing_field(name: impl Into<String>) -> Self {
        Error::MissingField(name.into())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingField(name) => write!(f, "missing required request field: {}", name),
            Error::UnknownRoute { controller, action } => {
                write!(f, "no route registered for {}/{}", controller, action)
            }
            Error::Action(msg) => write!(f, "action error: {}", msg),
            Error::ViewNotFound(path) => write!(f, "view not found: {}", path),
            Error::JsonEncode(e) => write!(f, "JSON encode error: {}", e),
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Custom(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::JsonEncode(e) => Some(e),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::JsonEncode(e)
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Custom(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Custom(msg.to_string())
    }
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
