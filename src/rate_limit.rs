//! Rate limit snapshots parsed from Sentry response headers.
//!
//! Sentry reports quota usage on every response through a family of
//! `X-Sentry-Rate-Limit-*` headers (see <https://docs.sentry.io/api/ratelimits/>).
//! Every response envelope carries a [`Rate`] parsed from them, and a
//! 429 response whose quota is exhausted becomes a
//! [`RateLimitError`](crate::RateLimitError).

use http::HeaderMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub(crate) const HEADER_RATE_LIMIT: &str = "x-sentry-rate-limit-limit";
pub(crate) const HEADER_RATE_REMAINING: &str = "x-sentry-rate-limit-remaining";
pub(crate) const HEADER_RATE_RESET: &str = "x-sentry-rate-limit-reset";
pub(crate) const HEADER_RATE_CONCURRENT_LIMIT: &str = "x-sentry-rate-limit-concurrentlimit";
pub(crate) const HEADER_RATE_CONCURRENT_REMAINING: &str =
    "x-sentry-rate-limit-concurrentremaining";

/// Point-in-time capture of the request and concurrency quota headers.
///
/// Missing or unparseable headers leave the corresponding field at its zero
/// value (`0`, or `None` for the reset time).
///
/// # Examples
///
/// ```
/// use sentry_api::Rate;
/// use http::HeaderMap;
///
/// let mut headers = HeaderMap::new();
/// headers.insert("x-sentry-rate-limit-limit", "40".parse().unwrap());
/// headers.insert("x-sentry-rate-limit-remaining", "39".parse().unwrap());
///
/// let rate = Rate::from_headers(&headers);
/// assert_eq!(rate.limit, 40);
/// assert_eq!(rate.remaining, 39);
/// assert!(rate.reset.is_none());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rate {
    /// The maximum number of requests allowed within the window.
    pub limit: u64,

    /// The number of requests left on this endpoint within the current window.
    pub remaining: u64,

    /// When the next window begins and the count resets.
    pub reset: Option<SystemTime>,

    /// The maximum number of concurrent requests allowed.
    pub concurrent_limit: u64,

    /// The number of concurrent requests left.
    pub concurrent_remaining: u64,
}

impl Rate {
    /// Parses the rate limit headers of a response.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            limit: parse_count(headers, HEADER_RATE_LIMIT),
            remaining: parse_count(headers, HEADER_RATE_REMAINING),
            reset: parse_reset(headers),
            concurrent_limit: parse_count(headers, HEADER_RATE_CONCURRENT_LIMIT),
            concurrent_remaining: parse_count(headers, HEADER_RATE_CONCURRENT_REMAINING),
        }
    }

    /// Returns `true` when a reported quota has nothing left.
    ///
    /// A quota whose limit was not reported never counts.
    pub fn is_exhausted(&self) -> bool {
        (self.limit > 0 && self.remaining == 0)
            || (self.concurrent_limit > 0 && self.concurrent_remaining == 0)
    }

    /// Returns how long to wait until the window resets, capped by `max_wait`.
    ///
    /// Returns `None` when no reset time is known or it already passed.
    pub fn delay(&self, max_wait: Duration) -> Option<Duration> {
        let until_reset = self.reset?.duration_since(SystemTime::now()).ok()?;
        Some(until_reset.min(max_wait))
    }
}

/// Reports whether either quota header reads literally `"0"`.
///
/// Classification looks at the raw header text rather than the parsed
/// [`Rate`], so a missing header never counts as exhausted.
pub(crate) fn quota_exhausted(headers: &HeaderMap) -> bool {
    [HEADER_RATE_REMAINING, HEADER_RATE_CONCURRENT_REMAINING]
        .iter()
        .any(|name| header_str(headers, name) == Some("0"))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name)?.to_str().ok()
}

fn parse_count(headers: &HeaderMap, name: &str) -> u64 {
    header_str(headers, name)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or_default()
}

/// Parses the reset header (Unix seconds). A zero timestamp means unset.
fn parse_reset(headers: &HeaderMap) -> Option<SystemTime> {
    let timestamp: u64 = header_str(headers, HEADER_RATE_RESET)?.trim().parse().ok()?;
    if timestamp == 0 {
        return None;
    }
    Some(UNIX_EPOCH + Duration::from_secs(timestamp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_rate_from_all_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(HEADER_RATE_LIMIT, HeaderValue::from_static("40"));
        headers.insert(HEADER_RATE_REMAINING, HeaderValue::from_static("39"));
        headers.insert(HEADER_RATE_RESET, HeaderValue::from_static("1654566542"));
        headers.insert(HEADER_RATE_CONCURRENT_LIMIT, HeaderValue::from_static("25"));
        headers.insert(HEADER_RATE_CONCURRENT_REMAINING, HeaderValue::from_static("24"));

        let rate = Rate::from_headers(&headers);
        assert_eq!(rate.limit, 40);
        assert_eq!(rate.remaining, 39);
        assert_eq!(
            rate.reset,
            Some(UNIX_EPOCH + Duration::from_secs(1_654_566_542))
        );
        assert_eq!(rate.concurrent_limit, 25);
        assert_eq!(rate.concurrent_remaining, 24);
    }

    #[test]
    fn test_rate_defaults_when_headers_absent() {
        assert_eq!(Rate::from_headers(&HeaderMap::new()), Rate::default());
    }

    #[test]
    fn test_unparseable_values_are_zero() {
        let mut headers = HeaderMap::new();
        headers.insert(HEADER_RATE_LIMIT, HeaderValue::from_static("lots"));
        headers.insert(HEADER_RATE_RESET, HeaderValue::from_static("0"));

        let rate = Rate::from_headers(&headers);
        assert_eq!(rate.limit, 0);
        assert!(rate.reset.is_none());
    }

    #[test]
    fn test_quota_exhausted_requires_literal_zero() {
        let mut headers = HeaderMap::new();
        assert!(!quota_exhausted(&headers));

        headers.insert(HEADER_RATE_REMAINING, HeaderValue::from_static("3"));
        assert!(!quota_exhausted(&headers));

        headers.insert(HEADER_RATE_CONCURRENT_REMAINING, HeaderValue::from_static("0"));
        assert!(quota_exhausted(&headers));
    }

    #[test]
    fn test_is_exhausted() {
        let mut rate = Rate {
            limit: 40,
            remaining: 1,
            ..Rate::default()
        };
        assert!(!rate.is_exhausted());

        rate.remaining = 0;
        assert!(rate.is_exhausted());

        assert!(!Rate::default().is_exhausted());
    }

    #[test]
    fn test_delay_capped_by_max_wait() {
        let rate = Rate {
            reset: Some(SystemTime::now() + Duration::from_secs(600)),
            ..Rate::default()
        };

        assert_eq!(
            rate.delay(Duration::from_secs(300)),
            Some(Duration::from_secs(300))
        );
    }

    #[test]
    fn test_delay_none_when_reset_passed() {
        let rate = Rate {
            reset: Some(UNIX_EPOCH + Duration::from_secs(10)),
            ..Rate::default()
        };

        assert_eq!(rate.delay(Duration::from_secs(300)), None);
    }
}
