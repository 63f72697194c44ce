//! Jenkins REST API client
//!
//! Typed access to a Jenkins controller over its HTTP API, allowing you to:
//! - List, create, configure and delete jobs
//! - Trigger builds and follow them through the queue
//! - Inspect plugins, users, load statistics and server identity
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//! - `auth` - Credential parsing and authentication kind inference
//! - `crumb` - CSRF crumb retrieval and the per-client crumb decision
//! - `filter` - Request filters attaching `Authorization` and crumb headers
//! - `parsers` - Response to domain value conversions
//! - `api` - Operation groups (jobs, queue, plugins, ...)
//! - `config` - Environment and TOML configuration
//!
//! Reads go through [`NoCrumbAuthenticationFilter`]. Writes go through
//! [`AuthenticationFilter`], which fetches a crumb once per client and
//! reuses the outcome for every later write.
//!
//! # Example Usage
//!
//! ```no_run
//! use jenkins_rest::JenkinsClient;
//!
//! # async fn run() -> jenkins_rest::JenkinsResult<()> {
//! let client = JenkinsClient::builder()
//!     .endpoint("http://127.0.0.1:8080")
//!     .api_token("admin:11abcdef")
//!     .build()?;
//!
//! let queued = client.jobs().build(None, "nightly").await?;
//! println!("queued as {:?}", queued.value);
//! # Ok(())
//! # }
//! ```

pub mod api;
mod auth;
mod client;
mod config;
mod crumb;
mod filter;
mod interpolation;
pub mod logging;
pub mod parsers;
mod paths;
pub mod types;

pub use auth::{
    AuthenticationKind,
    Credential,
    EncodedIdentity,
};
pub use client::{
    JenkinsClient,
    JenkinsClientBuilder,
    DEFAULT_ENDPOINT,
};
pub use config::{
    JenkinsConfig,
    API_TOKEN_VAR,
    CREDENTIALS_VAR,
    ENDPOINT_VAR,
};
pub use crumb::{
    Crumb,
    CrumbDecision,
};
pub use filter::{
    AuthenticationFilter,
    NoCrumbAuthenticationFilter,
    RequestFilter,
    CRUMB_HEADER,
};
pub use jenkins_rest_api::{
    ApiError,
    ErrorKind,
    IntegerResponse,
    JenkinsError,
    JenkinsResult,
    RequestStatus,
    RetryPolicy,
};
