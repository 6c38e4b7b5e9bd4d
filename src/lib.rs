//! # sentry-api - A typed client for the Sentry REST API
//!
//! `sentry-api` wraps the Sentry web API in typed, async resource services
//! built on top of `reqwest`. Every call shares one request pipeline: URL
//! resolution against a base URL, JSON bodies, structured error
//! classification, cursor pagination and rate limit tracking.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sentry_api::{Client, ListCursorParams};
//! use sentry_api::services::CreateProjectParams;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sentry_api::Error> {
//!     let client = Client::builder()
//!         .default_header("Authorization", "Bearer <token>")?
//!         .timeout(Duration::from_secs(30))
//!         .build()?;
//!
//!     // List projects
//!     let projects = client.projects().list(&ListCursorParams::default()).await?;
//!     for project in projects.iter() {
//!         println!("{} ({})", project.name, project.slug);
//!     }
//!     println!("Rate limit remaining: {}", projects.rate.remaining);
//!
//!     // Create one
//!     let params = CreateProjectParams {
//!         name: Some("Pump Station".to_string()),
//!         ..Default::default()
//!     };
//!     let created = client.projects().create("acme", "backend", &params).await?;
//!     println!("Created {} in {:?}", created.slug, created.latency);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Typed resources** - Organizations, teams, projects, keys, members, integrations, repositories, release deploys, dashboards and alert rules
//! - **Rich error handling** - API errors carry the response envelope and the server's `detail` message; exhausted quotas surface as a distinct rate limit error
//! - **Cursor pagination** - The `Link` header is parsed into a ready-to-use continuation cursor
//! - **Rate limit snapshots** - Every response carries the `X-Sentry-Rate-Limit-*` headers as a [`Rate`]
//! - **Deferred mutations** - Alert rules saved in the background are polled until they settle
//! - **Exact numbers** - Thresholds and identifiers keep their literal digits
//! - **Cancellation** - Bind a [`CancellationToken`] to abort in-flight calls and task polling
//! - **Automatic logging** - Structured logging with `tracing`
//!
//! ## Error Handling
//!
//! ```no_run
//! use sentry_api::{Client, Error};
//!
//! # async fn example() -> Result<(), Error> {
//! # let client = Client::builder().build()?;
//! match client.projects().get("acme", "pump-station").await {
//!     Ok(response) => println!("Found {}", response.name),
//!     Err(e) if e.is_not_found() => eprintln!("No such project"),
//!     Err(Error::RateLimited(e)) => eprintln!("Slow down: {}", e),
//!     Err(Error::Api(e)) => eprintln!("HTTP {}: {}", e.status(), e.detail),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Self-hosted Sentry
//!
//! ```no_run
//! use sentry_api::{Client, PollPolicy};
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), sentry_api::Error> {
//! let client = Client::builder()
//!     .on_premise("https://sentry.example.com")?
//!     .poll_policy(PollPolicy::ExponentialBackoff {
//!         initial_delay: Duration::from_secs(1),
//!         max_delay: Duration::from_secs(10),
//!         max_attempts: 8,
//!         jitter: true,
//!     })
//!     .build()?;
//! assert_eq!(client.base_url().as_str(), "https://sentry.example.com/api/");
//! # Ok(())
//! # }
//! ```

mod cancel;
mod client;
mod error;
pub mod pagination;
pub mod rate_limit;
mod request;
mod response;
pub mod retry;
pub mod services;
mod task;
pub mod types;

pub use cancel::CancellationToken;
pub use client::{Client, ClientBuilder, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
pub use error::{
    check_response, extract_detail, Error, ErrorResponse, RateLimitError, Result, TaskError,
};
pub use pagination::{next_cursor, parse_link_header, LinkRelation, ListCursorParams};
pub use rate_limit::Rate;
pub use request::Request;
pub use response::Response;
pub use retry::PollPolicy;
