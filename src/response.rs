//! Response envelope that keeps pagination, rate-limit and raw body details.
//!
//! Every request that reaches the server produces a [`Response`], whether it
//! succeeded or not. Successful calls hand it back with the decoded data;
//! failed calls embed it in the returned error.

use crate::pagination::next_cursor;
use crate::rate_limit::Rate;
use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};
use std::time::Duration;
use url::Url;

/// A Sentry API response.
///
/// Alongside the decoded data it carries the parsed pagination cursor and
/// rate limit snapshot, both derived from the headers of every response
/// regardless of its status.
///
/// # Examples
///
/// ```no_run
/// use sentry_api::Client;
///
/// # async fn example() -> Result<(), sentry_api::Error> {
/// let client = Client::builder().build()?;
///
/// let response = client.organizations().get("acme").await?;
///
/// println!("Organization: {:?}", response.name);
/// println!("Requests left in window: {}", response.rate.remaining);
/// println!("Request took {:?}", response.latency);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Response<T> {
    /// The decoded response data.
    pub data: T,

    /// The HTTP method of the request that produced this response.
    pub method: Method,

    /// The URL of the request that produced this response.
    pub url: Url,

    /// The HTTP status code of the response.
    pub status: StatusCode,

    /// The response headers.
    pub headers: HeaderMap,

    /// The raw response body, buffered so it can be inspected after decoding
    /// or classification.
    pub raw_body: Bytes,

    /// Continuation cursor for the next page; empty when there are no more pages.
    pub cursor: String,

    /// Rate limit snapshot; zero-valued when the headers are absent.
    pub rate: Rate,

    /// Time from sending the request until the body was fully read.
    pub latency: Duration,
}

impl Response<()> {
    /// Wraps a received response, parsing its cursor and rate limit headers.
    pub fn from_parts(
        method: Method,
        url: Url,
        status: StatusCode,
        headers: HeaderMap,
        raw_body: Bytes,
        latency: Duration,
    ) -> Self {
        let cursor = next_cursor(&headers);
        let rate = Rate::from_headers(&headers);
        Self {
            data: (),
            method,
            url,
            status,
            headers,
            raw_body,
            cursor,
            rate,
            latency,
        }
    }
}

impl<T> Response<T> {
    /// Maps the response data to a different type using the provided function.
    pub fn map<U, F>(self, f: F) -> Response<U>
    where
        F: FnOnce(T) -> U,
    {
        Response {
            data: f(self.data),
            method: self.method,
            url: self.url,
            status: self.status,
            headers: self.headers,
            raw_body: self.raw_body,
            cursor: self.cursor,
            rate: self.rate,
            latency: self.latency,
        }
    }

    /// Returns `true` if the listing has another page.
    pub fn has_next_page(&self) -> bool {
        !self.cursor.is_empty()
    }

    /// Returns a reference to a header value by name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Returns the raw body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.raw_body).into_owned()
    }
}

impl<T> AsRef<T> for Response<T> {
    fn as_ref(&self) -> &T {
        &self.data
    }
}

impl<T> std::ops::Deref for Response<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn envelope(headers: HeaderMap) -> Response<()> {
        Response::from_parts(
            Method::GET,
            Url::parse("https://sentry.io/api/0/projects/").unwrap(),
            StatusCode::OK,
            headers,
            Bytes::from_static(b"[]"),
            Duration::from_millis(5),
        )
    }

    #[test]
    fn test_from_parts_parses_cursor_and_rate() {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::LINK,
            HeaderValue::from_static(
                "<https://sentry.io/api/0/projects/?cursor=100:1:0>; rel=\"next\"; results=\"true\"; cursor=\"100:1:0\"",
            ),
        );
        headers.insert(
            "x-sentry-rate-limit-remaining",
            HeaderValue::from_static("12"),
        );

        let response = envelope(headers);
        assert_eq!(response.cursor, "100:1:0");
        assert!(response.has_next_page());
        assert_eq!(response.rate.remaining, 12);
    }

    #[test]
    fn test_from_parts_without_headers() {
        let response = envelope(HeaderMap::new());
        assert_eq!(response.cursor, "");
        assert!(!response.has_next_page());
        assert_eq!(response.rate, Rate::default());
        assert_eq!(response.text(), "[]");
    }

    #[test]
    fn test_map_preserves_metadata() {
        let response = envelope(HeaderMap::new()).map(|_| 42);
        assert_eq!(*response, 42);
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.latency, Duration::from_millis(5));
    }
}
