//! Parsed URL components.

use crate::core::{Error, Result};

/// Components of an absolute URL.
///
/// Built by [`Url::parse`] from `scheme://host[:port]/path[?query][#fragment]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Url {
    scheme: String,
    host: String,
    port: Option<u16>,
    path: String,
    query: Option<String>,
    fragment: Option<String>,
}

impl Url {
    /// Parse an absolute URL string.
    pub fn parse(input: &str) -> Result<Self> {
        let (scheme, rest) = input
            .split_once("://")
            .ok_or_else(|| Error::Custom(format!("invalid URL, missing scheme: {}", input)))?;

        if scheme.is_empty() {
            return Err(Error::Custom(format!("invalid URL, empty scheme: {}", input)));
        }

        // Fragment first: it is never part of host, path, or query.
        let (rest, fragment) = match rest.split_once('#') {
            Some((r, f)) => (r, Some(f.to_string())),
            None => (rest, None),
        };

        let (authority, path_and_query) = match rest.find('/') {
            Some(pos) => (&rest[..pos], &rest[pos..]),
            None => (rest, ""),
        };

        if authority.is_empty() {
            return Err(Error::Custom(format!("invalid URL, empty host: {}", input)));
        }

        let (host, port) = match authority.rsplit_once(':') {
            Some((h, p)) => {
                let port = p
                    .parse::<u16>()
                    .map_err(|_| Error::Custom(format!("invalid URL port: {}", p)))?;
                (h.to_string(), Some(port))
            }
            None => (authority.to_string(), None),
        };

        let (path, query) = match path_and_query.split_once('?') {
            Some((p, q)) => (p.to_string(), Some(q.to_string())),
            None => (path_and_query.to_string(), None),
        };

        Ok(Self {
            scheme: scheme.to_string(),
            host,
            port,
            path: if path.is_empty() { "/".to_string() } else { path },
            query,
            fragment,
        })
    }

    /// URL scheme (`http` or `https`).
    #[inline]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Host name, without the port.
    #[inline]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Explicit port, if one was present in the authority.
    #[inline]
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Path component; `/` when the URL has no path.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query string after the `?`, without the `?` itself.
    #[inline]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Fragment after the `#`, without the `#` itself.
    #[inline]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }
}
