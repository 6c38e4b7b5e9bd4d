//! Error types for Sentry API calls.
//!
//! Failed responses are classified into two structured kinds: a generic
//! [`ErrorResponse`] and a [`RateLimitError`] for a 429 whose quota is
//! exhausted. Both keep the full response envelope, including the buffered
//! body, so callers can still inspect what the server sent.

use crate::rate_limit::{quota_exhausted, Rate};
use crate::response::Response;
use http::StatusCode;
use serde_json::Value;
use std::fmt;

/// The main error type for Sentry API calls.
///
/// # Examples
///
/// ```no_run
/// use sentry_api::{Client, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::builder().build()?;
///
/// match client.teams().get("acme", "backend").await {
///     Ok(team) => println!("Team: {:?}", team.name),
///     Err(Error::RateLimited(e)) => {
///         eprintln!("Rate limited, window resets at {:?}", e.rate.reset);
///     }
///     Err(Error::Api(e)) => eprintln!("HTTP {}: {}", e.status(), e.detail),
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A network-level error occurred (connection failed, DNS lookup failed, etc.).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The client's cancellation token fired while the call was in flight.
    #[error("Request cancelled")]
    Cancelled,

    /// The server returned a non-2xx status that is not a rate limit.
    #[error(transparent)]
    Api(ErrorResponse),

    /// The server returned 429 with an exhausted request or concurrency quota.
    #[error(transparent)]
    RateLimited(RateLimitError),

    /// An asynchronous task could not be resolved into its resource.
    #[error(transparent)]
    Task(#[from] TaskError),

    /// Failed to deserialize the response body into the expected type.
    ///
    /// This error preserves both the raw response text and the serde error message.
    #[error("Failed to deserialize response (status {status}): {serde_error}")]
    DeserializationFailed {
        /// The raw response body that failed to deserialize
        raw_response: String,
        /// The serde error message
        serde_error: String,
        /// The HTTP status code
        status: StatusCode,
    },

    /// A successful response had no body where a resource was expected.
    #[error("Empty response body (status {status})")]
    EmptyBody {
        /// The HTTP status code
        status: StatusCode,
    },

    /// Invalid configuration was provided.
    ///
    /// This indicates a caller bug such as a base URL without a trailing
    /// slash or an invalid header value.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Failed to serialize the request body.
    #[error("Failed to serialize request: {0}")]
    SerializationFailed(String),

    /// An invalid URL was provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Writing the raw body to a caller-supplied sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns the HTTP status code if this error has one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api(e) => Some(e.status()),
            Error::RateLimited(e) => Some(e.status()),
            Error::DeserializationFailed { status, .. } => Some(*status),
            Error::EmptyBody { status } => Some(*status),
            _ => None,
        }
    }

    /// Returns the detail message extracted from the error body, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Error::Api(e) => Some(&e.detail),
            Error::RateLimited(e) => Some(&e.detail),
            _ => None,
        }
    }

    /// Returns the raw response body if this error has one.
    pub fn raw_response(&self) -> Option<String> {
        match self {
            Error::Api(e) => Some(e.response.text()),
            Error::RateLimited(e) => Some(e.response.text()),
            Error::DeserializationFailed { raw_response, .. } => Some(raw_response.clone()),
            _ => None,
        }
    }

    /// Returns the rate limit snapshot of a rate-limited call.
    pub fn rate(&self) -> Option<&Rate> {
        match self {
            Error::RateLimited(e) => Some(&e.rate),
            _ => None,
        }
    }

    /// Returns `true` for a classified rate-limit error.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::RateLimited(_))
    }

    /// Returns `true` if the server answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

/// A specialized `Result` type for Sentry API calls.
pub type Result<T> = std::result::Result<T, Error>;

/// A generic API error: any non-2xx response that is not a rate limit.
#[derive(Debug, Clone)]
pub struct ErrorResponse {
    /// The failed response. Its `raw_body` is left intact.
    pub response: Response<()>,
    /// Human-readable message extracted from the body.
    pub detail: String,
}

impl ErrorResponse {
    /// The HTTP status code of the failed response.
    pub fn status(&self) -> StatusCode {
        self.response.status
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} {}",
            self.response.method,
            self.response.url,
            self.response.status.as_u16(),
            self.detail
        )
    }
}

impl std::error::Error for ErrorResponse {}

/// Compares structural fields only: status and detail.
impl PartialEq for ErrorResponse {
    fn eq(&self, other: &Self) -> bool {
        self.status() == other.status() && self.detail == other.detail
    }
}

/// A 429 response with an exhausted request or concurrency quota.
///
/// No retry is attempted; inspect [`Rate::reset`] to decide when to call again.
#[derive(Debug, Clone)]
pub struct RateLimitError {
    /// The failed response. Its `raw_body` is left intact.
    pub response: Response<()>,
    /// The quota snapshot at the time of the failure.
    pub rate: Rate,
    /// Human-readable message extracted from the body.
    pub detail: String,
}

impl RateLimitError {
    /// The HTTP status code of the failed response.
    pub fn status(&self) -> StatusCode {
        self.response.status
    }
}

impl fmt::Display for RateLimitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} {}",
            self.response.method,
            self.response.url,
            self.response.status.as_u16(),
            self.detail
        )?;
        match self.rate.delay(std::time::Duration::MAX) {
            Some(delay) => write!(f, " [rate reset in {}s]", delay.as_secs()),
            None => write!(f, " [rate reset now]"),
        }
    }
}

impl std::error::Error for RateLimitError {}

/// Compares structural fields only: status, detail and rate snapshot.
impl PartialEq for RateLimitError {
    fn eq(&self, other: &Self) -> bool {
        self.status() == other.status() && self.detail == other.detail && self.rate == other.rate
    }
}

/// Failures of the asynchronous task poller.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// The server accepted the mutation (202) without a task handle.
    #[error("missing task uuid")]
    MissingHandle,

    /// The task status endpoint answered 404.
    #[error("cannot find task with UUID {uuid}")]
    NotFound {
        /// The task handle that was polled.
        uuid: String,
    },

    /// The task reported a failure.
    #[error("{message}")]
    Failed {
        /// The task's own error message, or a generic fallback.
        message: String,
    },

    /// The task did not settle within the poll budget.
    #[error("task {uuid} did not complete after {attempts} status checks")]
    TimedOut {
        /// The task handle that was polled.
        uuid: String,
        /// The number of status checks performed.
        attempts: usize,
    },
}

/// Classifies a response.
///
/// Returns `Ok(())` for 2xx statuses. Otherwise returns a
/// [`RateLimitError`] when the status is 429 and either remaining-quota header
/// reads `"0"`, and an [`ErrorResponse`] in every other case. The response
/// body is read from the buffered copy and left untouched.
pub fn check_response(response: &Response<()>) -> Result<()> {
    if response.status.is_success() {
        return Ok(());
    }

    let detail = extract_detail(&response.raw_body);

    if response.status == StatusCode::TOO_MANY_REQUESTS && quota_exhausted(&response.headers) {
        return Err(Error::RateLimited(RateLimitError {
            response: response.clone(),
            rate: Rate::from_headers(&response.headers),
            detail,
        }));
    }

    Err(Error::Api(ErrorResponse {
        response: response.clone(),
        detail,
    }))
}

/// Extracts a human-readable message from an error body.
///
/// - a JSON object whose only key is a string `detail` yields that string;
/// - any other JSON object yields its JSON text;
/// - a JSON string yields the string itself;
/// - anything that is not JSON yields the trimmed raw text.
pub fn extract_detail(body: &[u8]) -> String {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => {
            if map.len() == 1 {
                if let Some(Value::String(detail)) = map.get("detail") {
                    return detail.clone();
                }
            }
            Value::Object(map).to_string()
        }
        Ok(Value::String(detail)) => detail,
        Ok(Value::Null) | Err(_) => String::from_utf8_lossy(body).trim().to_string(),
        Ok(other) => other.to_string(),
    }
}
