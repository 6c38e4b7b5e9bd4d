//! Sentry API client: request construction and dispatch.
//!
//! The [`Client`] type is the main entry point. Use [`ClientBuilder`] to
//! configure and create clients, then either reach the typed resource
//! services (`client.projects()`, `client.issue_alerts()`, ...) or build and
//! execute requests directly.

use crate::{
    cancel::CancellationToken, error::check_response, request::Request, retry::PollPolicy, Error,
    Response, Result,
};
use bytes::Bytes;
use http::{header, HeaderMap, HeaderName, HeaderValue, Method};
use serde::{de::DeserializeOwned, Serialize};
use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// The public Sentry API root.
pub const DEFAULT_BASE_URL: &str = "https://sentry.io/api/";

/// The user agent sent with every request unless overridden.
pub const DEFAULT_USER_AGENT: &str = "sentry-api";

/// A client for the Sentry REST API.
///
/// The client is cheap to clone and safe to share between tasks: all clones
/// use the same connection pool and immutable configuration.
///
/// # Examples
///
/// ```no_run
/// use sentry_api::{Client, ListCursorParams};
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), sentry_api::Error> {
/// let client = Client::builder()
///     .default_header("Authorization", "Bearer my-token")?
///     .timeout(Duration::from_secs(30))
///     .build()?;
///
/// let projects = client.projects().list(&ListCursorParams::default()).await?;
/// for project in projects.iter() {
///     println!("{}", project.slug);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
    cancel: CancellationToken,
}

struct ClientInner {
    http_client: reqwest::Client,
    base_url: Url,
    user_agent: String,
    default_headers: HeaderMap,
    timeout: Option<Duration>,
    poll_policy: PollPolicy,
}

impl Client {
    /// Creates a new `ClientBuilder` for configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Returns a clone of this client bound to `token`.
    ///
    /// Calls made through the returned client stop with
    /// [`Error::Cancelled`] once the token is cancelled.
    pub fn with_cancellation(&self, token: CancellationToken) -> Client {
        Client {
            inner: Arc::clone(&self.inner),
            cancel: token,
        }
    }

    /// The base URL every relative path is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    pub(crate) fn poll_policy(&self) -> &PollPolicy {
        &self.inner.poll_policy
    }

    pub(crate) fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Creates a bodiless request for `path`.
    ///
    /// `path` is resolved against the base URL with standard URL reference
    /// resolution: relative paths are appended to the base, absolute paths
    /// replace its path entirely.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigurationError`] if the base URL does not end with
    /// a trailing slash, or [`Error::InvalidUrl`] if `path` cannot be resolved.
    pub fn new_request(&self, method: Method, path: &str) -> Result<Request> {
        self.build_request(method, path, None)
    }

    /// Creates a request for `path` carrying `body` encoded as JSON.
    ///
    /// Characters such as `<`, `>` and `&` are written verbatim.
    pub fn new_request_with_body<B>(&self, method: Method, path: &str, body: &B) -> Result<Request>
    where
        B: Serialize + ?Sized,
    {
        let body =
            serde_json::to_vec(body).map_err(|e| Error::SerializationFailed(e.to_string()))?;
        self.build_request(method, path, Some(body))
    }

    fn build_request(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<Request> {
        let base_url = &self.inner.base_url;
        if !base_url.path().ends_with('/') {
            return Err(Error::ConfigurationError(format!(
                "base URL must have a trailing slash, but {:?} does not",
                base_url.as_str()
            )));
        }

        let url = base_url.join(path)?;
        let mut request = Request::new(method, url);

        if body.is_some() {
            request.headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
        }
        if !self.inner.user_agent.is_empty() {
            let user_agent = HeaderValue::try_from(self.inner.user_agent.as_str())
                .map_err(|e| Error::ConfigurationError(format!("Invalid user agent: {}", e)))?;
            request.headers.insert(header::USER_AGENT, user_agent);
        }
        request.body = body;

        Ok(request)
    }

    /// Sends a request and decodes its JSON body into `T`.
    ///
    /// Non-2xx responses are classified into [`Error::Api`] or
    /// [`Error::RateLimited`]. A successful response with an empty body yields
    /// `None`. Numbers are decoded from their literal text, so large
    /// identifiers and thresholds held as [`serde_json::Number`] round-trip
    /// exactly.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use sentry_api::Client;
    /// use http::Method;
    ///
    /// # async fn example() -> Result<(), sentry_api::Error> {
    /// let client = Client::builder().build()?;
    ///
    /// let request = client.new_request(Method::GET, "0/organizations/acme/")?;
    /// let response = client.execute::<serde_json::Value>(request).await?;
    /// println!("{:?}", response.data);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn execute<T>(&self, request: Request) -> Result<Response<Option<T>>>
    where
        T: DeserializeOwned,
    {
        let response = self.send(request).await?;

        if response.raw_body.iter().all(u8::is_ascii_whitespace) {
            return Ok(response.map(|_| None));
        }

        match serde_json::from_slice::<T>(&response.raw_body) {
            Ok(data) => Ok(response.map(|_| Some(data))),
            Err(e) => {
                let raw_response = response.text();
                tracing::error!(
                    error = %e,
                    raw_response = %raw_response,
                    "Failed to deserialize response"
                );

                Err(Error::DeserializationFailed {
                    raw_response,
                    serde_error: e.to_string(),
                    status: response.status,
                })
            }
        }
    }

    /// Sends a request and copies the raw body verbatim into `sink`.
    pub async fn execute_raw<W>(&self, request: Request, sink: &mut W) -> Result<Response<()>>
    where
        W: Write + ?Sized,
    {
        let response = self.send(request).await?;
        sink.write_all(&response.raw_body)?;
        Ok(response)
    }

    /// Sends a request and ignores its body.
    pub async fn execute_empty(&self, request: Request) -> Result<Response<()>> {
        self.send(request).await
    }

    /// Sends a request whose body must decode into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyBody`] if the server sent no content.
    pub async fn fetch<T>(&self, request: Request) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        let response = self.execute::<T>(request).await?;
        require_data(response)
    }

    /// Sends a request, buffers the body and classifies the status.
    async fn send(&self, request: Request) -> Result<Response<()>> {
        let Request {
            method,
            url,
            headers,
            body,
        } = request;

        tracing::debug!(
            method = %method,
            url = %url,
            "Executing HTTP request"
        );

        let mut builder = self
            .inner
            .http_client
            .request(method.clone(), url.clone())
            .headers(self.inner.default_headers.clone())
            .headers(headers);

        if let Some(timeout) = self.inner.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let start_time = Instant::now();
        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(Error::Cancelled),
            result = receive(builder) => result,
        };
        let (status, response_headers, raw_body) = result.map_err(|e| {
            // A concurrent cancellation explains the failure better than the transport.
            if self.cancel.is_cancelled() {
                Error::Cancelled
            } else {
                Error::Network(e)
            }
        })?;
        let latency = start_time.elapsed();

        tracing::info!(
            status = status.as_u16(),
            latency_ms = latency.as_millis(),
            "Received HTTP response"
        );

        let response =
            Response::from_parts(method, url, status, response_headers, raw_body, latency);

        if let Err(e) = check_response(&response) {
            if status.is_client_error() {
                tracing::error!(
                    status = status.as_u16(),
                    error = %e,
                    "Client error (4xx)"
                );
            } else {
                tracing::warn!(
                    status = status.as_u16(),
                    error = %e,
                    "Server error (5xx)"
                );
            }
            return Err(e);
        }

        Ok(response)
    }
}

/// Unwraps a decoded body, failing with [`Error::EmptyBody`] if there was none.
pub(crate) fn require_data<T>(mut response: Response<Option<T>>) -> Result<Response<T>> {
    match response.data.take() {
        Some(data) => Ok(response.map(|_| data)),
        None => Err(Error::EmptyBody {
            status: response.status,
        }),
    }
}

async fn receive(
    builder: reqwest::RequestBuilder,
) -> std::result::Result<(http::StatusCode, HeaderMap, Bytes), reqwest::Error> {
    let response = builder.send().await?;
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.bytes().await?;
    Ok((status, headers, body))
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use sentry_api::{ClientBuilder, PollPolicy};
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), sentry_api::Error> {
/// let client = ClientBuilder::new()
///     .on_premise("https://sentry.example.com")?
///     .timeout(Duration::from_secs(30))
///     .poll_policy(PollPolicy::Fixed {
///         delay: Duration::from_secs(2),
///         max_attempts: 10,
///     })
///     .default_header("Authorization", "Bearer my-token")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    base_url: Option<Url>,
    user_agent: String,
    default_headers: HeaderMap,
    timeout: Option<Duration>,
    poll_policy: PollPolicy,
    http_client: Option<reqwest::Client>,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self {
            base_url: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            default_headers: HeaderMap::new(),
            timeout: None,
            poll_policy: PollPolicy::default(),
            http_client: None,
        }
    }

    /// Sets the base URL for all requests.
    ///
    /// The URL is taken as given; it must end with a trailing slash or every
    /// request built from the client fails with a configuration error.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        self.base_url = Some(Url::parse(url.as_ref())?);
        Ok(self)
    }

    /// Sets the base URL of a self-hosted Sentry.
    ///
    /// The path is normalized to end with `/api/`, so `https://example.com`,
    /// `https://example.com/api` and `https://example.com/api/` are equivalent.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn on_premise(mut self, url: impl AsRef<str>) -> Result<Self> {
        let mut url = Url::parse(url.as_ref())?;
        let mut path = url.path().to_string();
        if !path.ends_with('/') {
            path.push('/');
        }
        if !path.ends_with("/api/") {
            path.push_str("api/");
        }
        url.set_path(&path);
        self.base_url = Some(url);
        Ok(self)
    }

    /// Sets the `User-Agent` header sent with every request.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Adds a default header that will be included in all requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets how asynchronous tasks are polled.
    pub fn poll_policy(mut self, policy: PollPolicy) -> Self {
        self.poll_policy = policy;
        self
    }

    /// Uses a preconfigured `reqwest` client as the transport.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be created.
    pub fn build(self) -> Result<Client> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };

        let http_client = match self.http_client {
            Some(client) => client,
            None => reqwest::Client::builder().build().map_err(|e| {
                Error::ConfigurationError(format!("Failed to build HTTP client: {}", e))
            })?,
        };

        Ok(Client {
            inner: Arc::new(ClientInner {
                http_client,
                base_url,
                user_agent: self.user_agent,
                default_headers: self.default_headers,
                timeout: self.timeout,
                poll_policy: self.poll_policy,
            }),
            cancel: CancellationToken::new(),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
