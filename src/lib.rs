//! # TestRail API Rust Client
//!
//! A Rust client for the TestRail API v2, providing validated configuration,
//! Basic authentication, a rate-limit aware request dispatcher and typed
//! options for the project, suite, run, plan, test, section, case, result and
//! status endpoints.
//!
//! ## Overview
//!
//! This crate provides:
//! - Configuration via [`TestRailConfig`] and [`TestRailConfigBuilder`], loaded
//!   from `testrail.toml` and `TR_` environment variables
//! - Validated newtypes for the base URL, project id and credentials
//! - A request dispatcher ([`HttpClient`]) that retries `429` responses
//!   after `Retry-After` seconds and normalizes every reply into JSON or an
//!   [`ApiError`]
//! - A project session ([`TestRailClient`]) with one method per API call
//! - Optional log output setup via [`logging::init`]
//!
//! ## Quick Start
//!
//! ```rust
//! use testrail_api::{BaseUrl, ProjectId, TestRailConfig, Username, ApiSecret};
//!
//! let config = TestRailConfig::builder()
//!     .base_url(BaseUrl::new("https://example.testrail.io").unwrap())
//!     .project_id(ProjectId::new("7").unwrap())
//!     .user(Username::new("qa@example.com").unwrap())
//!     .password(ApiSecret::new("api-key").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert!(config.has_credentials());
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use testrail_api::{TestRailClient, TestRailConfig};
//! use testrail_api::resources::NewRun;
//!
//! let config = TestRailConfig::load()?;
//! let client = TestRailClient::connect(&config).await?;
//!
//! let run = client.add_run(&NewRun::new(3, "Nightly")).await?;
//! let tests = client.get_tests(run["id"].as_u64().unwrap_or_default(), &[]).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: configuration is loaded into a value and passed
//!   to the client explicitly
//! - **Fail-fast validation**: newtypes and option structures are checked
//!   before any request is sent
//! - **Thread-safe**: the dispatcher and the session are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio runtime

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod logging;
pub mod resources;

mod client;

pub use client::TestRailClient;

// Re-export configuration types at crate root for convenience
pub use config::{
    ApiSecret, BaseUrl, LogLevel, LoggingConfig, ProjectId, TestRailConfig, TestRailConfigBuilder,
    Username,
};
pub use error::ConfigError;

// Re-export dispatcher types
pub use clients::{
    ApiError, ApplicationError, HttpClient, HttpMethod, HttpRequest, HttpResponse,
    MalformedResponseError, PreconditionError, TransportExhaustedError,
};
