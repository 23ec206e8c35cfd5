//! HTTP dispatch layer for TestRail API communication.
//!
//! # Overview
//!
//! - [`HttpClient`]: sends requests, retries rate-limited ones, normalizes results
//! - [`HttpRequest`]: method, relative path and optional JSON payload
//! - [`HttpResponse`]: a raw response before normalization
//! - [`HttpMethod`]: GET or POST
//! - [`ApiError`]: the single error type returned by every call
//!
//! # Example
//!
//! ```rust,ignore
//! use testrail_api::clients::{HttpClient, HttpRequest};
//!
//! let suites = client.dispatch(&HttpRequest::get("get_suites/7")).await?;
//! ```
//!
//! # Retry Behavior
//!
//! - **429 (Rate Limited)**: waits for `Retry-After` seconds, or 60 seconds if
//!   the header is missing or unparsable, then retries
//! - **Other non-2xx**: fails immediately
//!
//! At most [`MAX_TRIES`] attempts are made per request.

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{
    ApiError, ApplicationError, MalformedResponseError, PreconditionError,
    TransportExhaustedError, MAX_BODY_SNIPPET,
};
pub use http_client::{HttpClient, API_PREFIX, MAX_TRIES, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest};
pub use http_response::{HttpResponse, DEFAULT_RETRY_AFTER, TOO_MANY_REQUESTS};
