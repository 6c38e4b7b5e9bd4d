//! Prepared requests.
//!
//! A [`Request`] is produced by [`Client::new_request`](crate::Client::new_request)
//! or [`Client::new_request_with_body`](crate::Client::new_request_with_body):
//! the URL is already resolved against the base URL, the JSON body is already
//! encoded and the standard headers are set. Nothing is sent until the request
//! is handed to one of the client's `execute` methods.

use http::{HeaderMap, HeaderName, HeaderValue, Method};
use url::Url;

/// A ready-to-send HTTP request.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET, POST, etc.).
    pub method: Method,

    /// The absolute request URL.
    pub url: Url,

    /// Headers sent with this request, on top of the client's defaults.
    pub headers: HeaderMap,

    /// The encoded JSON body, if any.
    pub body: Option<Vec<u8>>,
}

impl Request {
    /// Creates a bodiless request for an already-resolved URL.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Adds a header to the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn with_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, crate::Error> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| crate::Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| crate::Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Appends a query parameter. Empty values are omitted.
    pub fn with_query_param(mut self, key: &str, value: &str) -> Self {
        if !value.is_empty() {
            self.url.query_pairs_mut().append_pair(key, value);
        }
        self
    }
}
