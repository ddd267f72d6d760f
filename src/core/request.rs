//! HTTP request snapshot for the dispatch pipeline.
//!
//! A [`Request`] is an immutable, per-request snapshot of the data the host
//! web server hands over: CGI-style server variables, cookies, query
//! parameters, form parameters, and uploaded files. Derived fields (parsed
//! URL, path, normalized headers) are computed at most once per instance.

use std::collections::HashMap;
use std::sync::{LazyLock, OnceLock};

use regex::Regex;
use serde::Serialize;

use crate::core::{Error, Result, Url};

/// Matches `lang` or `lang-subtag`, optionally followed by `;q=weight`.
static ACCEPT_LANGUAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([a-z]{1,8}(?:-[a-z]{1,8})?)\s*(?:;\s*q\s*=\s*(1|0\.[0-9]+))?")
        .expect("accept-language pattern is valid")
});

/// Represents an uploaded file from multipart form data.
#[derive(Debug, Clone, Serialize)]
pub struct UploadedFile {
    /// Original filename.
    pub name: String,
    /// MIME type reported by the client.
    pub mime_type: String,
    /// Temporary file path on disk.
    pub tmp_name: String,
    /// File size in bytes.
    pub size: u64,
    /// Upload error code (0 = success).
    pub error: u8,
}

/// Read-only snapshot of one inbound HTTP request.
///
/// Note: Clone is intentionally not derived to prevent expensive copies.
/// Use references or move semantics instead.
#[derive(Debug, Default)]
pub struct Request {
    server: HashMap<String, String>,
    cookies: HashMap<String, String>,
    query: HashMap<String, String>,
    form: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,

    // Derived fields, computed once per instance.
    url: OnceLock<Option<Url>>,
    path: OnceLock<String>,
    headers: OnceLock<HashMap<String, String>>,
}

impl Request {
    /// Create a request from raw host-environment mappings.
    pub fn new(
        server: HashMap<String, String>,
        cookies: HashMap<String, String>,
        query: HashMap<String, String>,
        form: HashMap<String, String>,
        files: HashMap<String, UploadedFile>,
    ) -> Self {
        Self {
            server,
            cookies,
            query,
            form,
            files,
            url: OnceLock::new(),
            path: OnceLock::new(),
            headers: OnceLock::new(),
        }
    }

    /// Create a request builder.
    #[inline]
    pub fn builder() -> RequestBuilder {
        RequestBuilder::default()
    }

    /// Parsed URL of the current request.
    ///
    /// Built from the `HTTPS` flag, `HTTP_HOST`, and `REQUEST_URI` server
    /// variables. Fails if `HTTP_HOST` is absent.
    pub fn url(&self) -> Result<&Url> {
        let host = self
            .server
            .get("HTTP_HOST")
            .ok_or_else(|| Error::missing_field("HTTP_HOST"))?;

        let parsed = self.url.get_or_init(|| {
            let scheme = if self.is_secure_connection() {
                "https"
            } else {
                "http"
            };
            Url::parse(&format!("{}://{}{}", scheme, host, self.raw_url())).ok()
        });

        parsed
            .as_ref()
            .ok_or_else(|| Error::Custom("invalid request URL".to_string()))
    }

    /// Raw request-target as sent by the client (`REQUEST_URI`).
    ///
    /// For `https://example.org/home/example?search=123` this is
    /// `/home/example?search=123`. Empty string when absent.
    #[inline]
    pub fn raw_url(&self) -> &str {
        self.server.get("REQUEST_URI").map(String::as_str).unwrap_or("")
    }

    /// Virtual path of the current request: [`raw_url`](Self::raw_url)
    /// truncated at the first `?`.
    pub fn path(&self) -> &str {
        self.path.get_or_init(|| {
            let raw = self.raw_url();
            match raw.find('?') {
                Some(pos) => raw[..pos].to_string(),
                None => raw.to_string(),
            }
        })
    }

    /// Query string of the current request (`QUERY_STRING`).
    #[inline]
    pub fn query_string(&self) -> Option<&str> {
        self.server.get("QUERY_STRING").map(String::as_str)
    }

    /// URL of the previous request that linked to the current one.
    #[inline]
    pub fn url_referrer(&self) -> Option<&str> {
        self.server.get("HTTP_REFERER").map(String::as_str)
    }

    /// User agent string.
    #[inline]
    pub fn user_agent(&self) -> Option<&str> {
        self.server.get("HTTP_USER_AGENT").map(String::as_str)
    }

    /// IP address the request originated from (`REMOTE_ADDR`).
    #[inline]
    pub fn user_host_address(&self) -> Option<&str> {
        self.server.get("REMOTE_ADDR").map(String::as_str)
    }

    /// Document root directory configured on the host server.
    #[inline]
    pub fn document_root(&self) -> Option<&str> {
        self.server.get("DOCUMENT_ROOT").map(String::as_str)
    }

    /// HTTP method (GET, POST, HEAD, ...).
    ///
    /// A missing `REQUEST_METHOD` is reported as a [`Error::MissingField`]
    /// rather than defaulting.
    pub fn http_method(&self) -> Result<&str> {
        self.server
            .get("REQUEST_METHOD")
            .map(String::as_str)
            .ok_or_else(|| Error::missing_field("REQUEST_METHOD"))
    }

    /// True iff the request method is exactly `POST`.
    #[inline]
    pub fn is_post(&self) -> bool {
        self.server.get("REQUEST_METHOD").map(String::as_str) == Some("POST")
    }

    /// Whether the connection uses HTTPS.
    ///
    /// True if the `HTTPS` flag is non-empty and not `off`, or the server
    /// port is 443.
    pub fn is_secure_connection(&self) -> bool {
        let https_flag = self
            .server
            .get("HTTPS")
            .map(|v| !v.is_empty() && v != "off")
            .unwrap_or(false);

        https_flag
            || self
                .server
                .get("SERVER_PORT")
                .and_then(|p| p.parse::<u16>().ok())
                == Some(443)
    }

    /// Client language preferences from `Accept-Language`, sorted descending
    /// by q-weight. Entries without a weight default to 1.0. Equal weights
    /// keep their header order (stable sort). A repeated language tag keeps
    /// its first position with the last weight.
    pub fn user_languages(&self) -> Vec<(String, f64)> {
        let Some(raw) = self.server.get("HTTP_ACCEPT_LANGUAGE") else {
            return Vec::new();
        };

        let mut languages: indexmap::IndexMap<String, f64> = indexmap::IndexMap::new();
        for cap in ACCEPT_LANGUAGE.captures_iter(raw) {
            let tag = cap[1].to_string();
            let weight = cap
                .get(2)
                .and_then(|m| m.as_str().parse::<f64>().ok())
                .unwrap_or(1.0);
            languages.insert(tag, weight);
        }

        let mut result: Vec<(String, f64)> = languages.into_iter().collect();
        result.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        result
    }

    /// Content-Type of the request, or empty string.
    ///
    /// Checks `CONTENT_TYPE` first, then `HTTP_CONTENT_TYPE`.
    pub fn content_type(&self) -> &str {
        for key in ["CONTENT_TYPE", "HTTP_CONTENT_TYPE"] {
            if let Some(value) = self.server.get(key) {
                if !value.is_empty() {
                    return value;
                }
            }
        }
        ""
    }

    /// All HTTP headers, derived once from `HTTP_*` server variables with
    /// normalized names (`HTTP_USER_AGENT` becomes `User-Agent`).
    pub fn headers(&self) -> &HashMap<String, String> {
        self.headers.get_or_init(|| {
            self.server
                .iter()
                .filter_map(|(k, v)| {
                    k.strip_prefix("HTTP_")
                        .map(|name| (normalize_header_name(name), v.clone()))
                })
                .collect()
        })
    }

    /// Get a single header by its normalized name (e.g. `User-Agent`).
    #[inline]
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers().get(key).map(String::as_str)
    }

    /// Get a single server variable.
    #[inline]
    pub fn server(&self, key: &str) -> Option<&str> {
        self.server.get(key).map(String::as_str)
    }

    /// All server variables.
    #[inline]
    pub fn server_all(&self) -> &HashMap<String, String> {
        &self.server
    }

    /// Get a single cookie.
    #[inline]
    pub fn cookie(&self, key: &str) -> Option<&str> {
        self.cookies.get(key).map(String::as_str)
    }

    /// All cookies.
    #[inline]
    pub fn cookies_all(&self) -> &HashMap<String, String> {
        &self.cookies
    }

    /// Get a single query parameter.
    #[inline]
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// All query parameters.
    #[inline]
    pub fn query_all(&self) -> &HashMap<String, String> {
        &self.query
    }

    /// Get a single form parameter.
    #[inline]
    pub fn form(&self, key: &str) -> Option<&str> {
        self.form.get(key).map(String::as_str)
    }

    /// All form parameters.
    #[inline]
    pub fn form_all(&self) -> &HashMap<String, String> {
        &self.form
    }

    /// Get a single uploaded file.
    #[inline]
    pub fn file(&self, key: &str) -> Option<&UploadedFile> {
        self.files.get(key)
    }

    /// All uploaded files.
    #[inline]
    pub fn files_all(&self) -> &HashMap<String, UploadedFile> {
        &self.files
    }
}

/// Normalize a header name from CGI style: underscores become hyphens and
/// each word is title-cased. `USER_AGENT` becomes `User-Agent`.
fn normalize_header_name(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    for (i, word) in name.split('_').enumerate() {
        if i > 0 {
            result.push('-');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            for c in chars {
                result.extend(c.to_lowercase());
            }
        }
    }
    result
}

/// Fast percent decode - avoids a scan-and-copy when no `%` is present.
#[inline]
fn percent_decode(s: &str) -> String {
    if s.contains('%') {
        percent_encoding::percent_decode_str(s)
            .decode_utf8_lossy()
            .into_owned()
    } else {
        s.to_string()
    }
}

/// Parse a raw query string (`a=1&b=2`) into a parameter mapping.
///
/// Keys and values are percent-decoded; pairs without `=` map to an empty
/// value; empty keys are skipped.
pub fn parse_query_string(query: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();

    for pair in query.split('&') {
        if pair.is_empty() {
            continue;
        }

        let (key, value) = match pair.find('=') {
            Some(pos) => (&pair[..pos], &pair[pos + 1..]),
            None => (pair, ""),
        };

        if !key.is_empty() {
            params.insert(percent_decode(key), percent_decode(value));
        }
    }

    params
}

/// Parse a `Cookie` header into a name-value mapping.
pub fn parse_cookie_header(cookie_header: &str) -> HashMap<String, String> {
    let mut cookies = HashMap::new();

    for cookie in cookie_header.split(';') {
        let cookie = cookie.trim();
        if cookie.is_empty() {
            continue;
        }

        let (name, value) = match cookie.find('=') {
            Some(pos) => (cookie[..pos].trim(), cookie[pos + 1..].trim()),
            None => continue,
        };

        if !name.is_empty() {
            cookies.insert(name.to_string(), percent_decode(value));
        }
    }

    cookies
}

/// Builder for creating requests without hand-assembling the raw mappings.
#[derive(Debug, Default)]
pub struct RequestBuilder {
    server: HashMap<String, String>,
    cookies: HashMap<String, String>,
    query: HashMap<String, String>,
    form: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl RequestBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a server variable.
    pub fn server(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.server.insert(key.into(), value.into());
        self
    }

    /// Set the request method (`REQUEST_METHOD`).
    pub fn method(self, method: impl Into<String>) -> Self {
        self.server("REQUEST_METHOD", method)
    }

    /// Set the request target (`REQUEST_URI`).
    pub fn uri(self, uri: impl Into<String>) -> Self {
        self.server("REQUEST_URI", uri)
    }

    /// Set the host (`HTTP_HOST`).
    pub fn host(self, host: impl Into<String>) -> Self {
        self.server("HTTP_HOST", host)
    }

    /// Mark the connection as HTTPS.
    pub fn secure(self) -> Self {
        self.server("HTTPS", "on")
    }

    /// Set a header by its wire name; stored as the matching `HTTP_*`
    /// server variable (`User-Agent` becomes `HTTP_USER_AGENT`).
    pub fn header(self, name: &str, value: impl Into<String>) -> Self {
        let key = format!("HTTP_{}", name.to_uppercase().replace('-', "_"));
        self.server(key, value)
    }

    /// Set a cookie.
    pub fn cookie(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(key.into(), value.into());
        self
    }

    /// Set a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Set a form parameter.
    pub fn form(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.insert(key.into(), value.into());
        self
    }

    /// Attach an uploaded file.
    pub fn file(mut self, key: impl Into<String>, file: UploadedFile) -> Self {
        self.files.insert(key.into(), file);
        self
    }

    /// Build the request.
    pub fn build(self) -> Request {
        Request::new(self.server, self.cookies, self.query, self.form, self.files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_new_builds_empty_request() {
        let req = RequestBuilder::new().method("GET").uri("/x").build();
        assert_eq!(req.raw_url(), "/x");
        assert_eq!(req.http_method().unwrap(), "GET");
        assert!(RequestBuilder::new().build().server_all().is_empty());
    }

    #[test]
    fn test_path_strips_query_string() {
        let req = Request::builder().uri("/home/example?search=123").build();
        assert_eq!(req.path(), "/home/example");
        // Idempotent: repeated calls yield the cached value.
        assert_eq!(req.path(), "/home/example");
    }

    #[test]
    fn test_path_without_query_string() {
        let req = Request::builder().uri("/home/example").build();
        assert_eq!(req.path(), "/home/example");
    }

    #[test]
    fn test_raw_url_defaults_empty() {
        let req = Request::builder().build();
        assert_eq!(req.raw_url(), "");
        assert_eq!(req.path(), "");
    }

    #[test]
    fn test_url_parses_host_and_uri() {
        let req = Request::builder()
            .host("example.org")
            .uri("/home/example?search=123")
            .build();

        let url = req.url().unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.host(), "example.org");
        assert_eq!(url.path(), "/home/example");
        assert_eq!(url.query(), Some("search=123"));
    }

    #[test]
    fn test_url_uses_https_scheme() {
        let req = Request::builder()
            .host("example.org")
            .uri("/")
            .secure()
            .build();

        assert_eq!(req.url().unwrap().scheme(), "https");
    }

    #[test]
    fn test_url_missing_host_is_error() {
        let req = Request::builder().uri("/home").build();
        assert!(matches!(req.url(), Err(Error::MissingField(_))));
    }

    #[test]
    fn test_http_method_missing_is_error() {
        let req = Request::builder().build();
        let err = req.http_method().unwrap_err();
        assert!(matches!(err, Error::MissingField(_)));
        assert!(err.to_string().contains("REQUEST_METHOD"));
    }

    #[test]
    fn test_is_post() {
        assert!(Request::builder().method("POST").build().is_post());
        assert!(!Request::builder().method("GET").build().is_post());
        assert!(!Request::builder().method("post").build().is_post());
        assert!(!Request::builder().build().is_post());
    }

    #[test]
    fn test_is_secure_connection() {
        assert!(Request::builder().server("HTTPS", "on").build().is_secure_connection());
        assert!(Request::builder().server("HTTPS", "1").build().is_secure_connection());
        assert!(!Request::builder().server("HTTPS", "off").build().is_secure_connection());
        assert!(!Request::builder().server("HTTPS", "").build().is_secure_connection());
        assert!(Request::builder()
            .server("SERVER_PORT", "443")
            .build()
            .is_secure_connection());
        assert!(!Request::builder()
            .server("SERVER_PORT", "8080")
            .build()
            .is_secure_connection());
    }

    #[test]
    fn test_headers_normalized_from_server_vars() {
        let req = Request::builder()
            .server("HTTP_USER_AGENT", "X")
            .server("HTTP_ACCEPT_ENCODING", "Y")
            .server("REQUEST_METHOD", "GET")
            .build();

        let headers = req.headers();
        assert_eq!(headers.get("User-Agent").map(String::as_str), Some("X"));
        assert_eq!(headers.get("Accept-Encoding").map(String::as_str), Some("Y"));
        // Non-HTTP_ variables are not headers.
        assert_eq!(headers.len(), 2);

        assert_eq!(req.header("User-Agent"), Some("X"));
        assert_eq!(req.header("X-Missing"), None);
    }

    #[test]
    fn test_user_languages_sorted_by_weight() {
        let req = Request::builder()
            .header("Accept-Language", "en-US,en;q=0.5,fr;q=0.8")
            .build();

        let langs = req.user_languages();
        assert_eq!(langs.len(), 3);
        assert_eq!(langs[0], ("en-US".to_string(), 1.0));
        assert_eq!(langs[1], ("fr".to_string(), 0.8));
        assert_eq!(langs[2], ("en".to_string(), 0.5));
    }

    #[test]
    fn test_user_languages_ties_keep_header_order() {
        let req = Request::builder()
            .header("Accept-Language", "de;q=0.5,fr;q=0.5")
            .build();

        let langs = req.user_languages();
        assert_eq!(langs[0].0, "de");
        assert_eq!(langs[1].0, "fr");
    }

    #[test]
    fn test_user_languages_absent_header() {
        let req = Request::builder().build();
        assert!(req.user_languages().is_empty());
    }

    #[test]
    fn test_content_type_prefers_content_type_var() {
        let req = Request::builder()
            .server("CONTENT_TYPE", "application/json")
            .server("HTTP_CONTENT_TYPE", "text/plain")
            .build();
        assert_eq!(req.content_type(), "application/json");

        let req = Request::builder()
            .server("CONTENT_TYPE", "")
            .server("HTTP_CONTENT_TYPE", "text/plain")
            .build();
        assert_eq!(req.content_type(), "text/plain");

        let req = Request::builder().build();
        assert_eq!(req.content_type(), "");
    }

    #[test]
    fn test_single_key_or_all_accessors() {
        let req = Request::builder()
            .query("controller", "Home")
            .form("name", "admin")
            .cookie("session", "abc")
            .build();

        assert_eq!(req.query("controller"), Some("Home"));
        assert_eq!(req.query("missing"), None);
        assert_eq!(req.query_all().len(), 1);

        assert_eq!(req.form("name"), Some("admin"));
        assert_eq!(req.cookie("session"), Some("abc"));
        assert!(req.files_all().is_empty());
    }

    #[test]
    fn test_uploaded_file_accessor() {
        let req = Request::builder()
            .file(
                "avatar",
                UploadedFile {
                    name: "me.png".to_string(),
                    mime_type: "image/png".to_string(),
                    tmp_name: "/tmp/upload1".to_string(),
                    size: 1024,
                    error: 0,
                },
            )
            .build();

        let file = req.file("avatar").unwrap();
        assert_eq!(file.name, "me.png");
        assert_eq!(file.size, 1024);
        assert!(req.file("other").is_none());
    }

    #[test]
    fn test_normalize_header_name() {
        assert_eq!(normalize_header_name("USER_AGENT"), "User-Agent");
        assert_eq!(normalize_header_name("ACCEPT_ENCODING"), "Accept-Encoding");
        assert_eq!(normalize_header_name("HOST"), "Host");
    }

    #[test]
    fn test_parse_query_string() {
        let params = parse_query_string("foo=bar&num=123&flag");
        assert_eq!(params.get("foo").map(String::as_str), Some("bar"));
        assert_eq!(params.get("num").map(String::as_str), Some("123"));
        assert_eq!(params.get("flag").map(String::as_str), Some(""));
    }

    #[test]
    fn test_parse_query_string_percent_decoding() {
        let params = parse_query_string("q=hello%20world");
        assert_eq!(params.get("q").map(String::as_str), Some("hello world"));
    }

    #[test]
    fn test_parse_cookie_header() {
        let cookies = parse_cookie_header("session=abc123; theme=dark");
        assert_eq!(cookies.get("session").map(String::as_str), Some("abc123"));
        assert_eq!(cookies.get("theme").map(String::as_str), Some("dark"));
    }
}
