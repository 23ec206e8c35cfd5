//! Error types for TestRail API calls.
//!
//! Every request either returns parsed JSON or fails with one [`ApiError`]:
//!
//! - [`TransportExhaustedError`]: no successful exchange (rate-limit retries
//!   used up, or a terminal status without an error payload)
//! - [`MalformedResponseError`]: the body is not valid JSON
//! - [`ApplicationError`]: the server answered with an `error` field
//! - [`PreconditionError`]: the call was rejected locally before sending
//! - `Network`: the HTTP transport itself failed
//!
//! # Example
//!
//! ```rust,ignore
//! use testrail_api::ApiError;
//!
//! match client.get_run(42).await {
//!     Ok(run) => println!("Run: {run}"),
//!     Err(ApiError::Application(e)) => println!("TestRail refused: {}", e.message),
//!     Err(ApiError::TransportExhausted(e)) => println!("Gave up after {} tries", e.tries),
//!     Err(other) => println!("Request failed: {other}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::http_request::HttpMethod;

/// Longest body excerpt kept in a [`MalformedResponseError`].
pub const MAX_BODY_SNIPPET: usize = 512;

/// Error returned when a request could not be completed successfully.
///
/// Raised after the retry budget is spent on `429` responses, or when a
/// non-retryable status arrives whose body carries no better explanation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("TestRail request failed: {method} {url}, status code: {code} (after {tries} attempt(s))")]
pub struct TransportExhaustedError {
    /// The HTTP method of the request.
    pub method: HttpMethod,
    /// The full request URL.
    pub url: String,
    /// The status code of the last response.
    pub code: u16,
    /// The number of attempts made.
    pub tries: u32,
}

/// Error returned when the response body is not valid JSON.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("TestRail API returned invalid json, HTTP code {code}, data: {body}")]
pub struct MalformedResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The start of the raw response body.
    pub body: String,
}

impl MalformedResponseError {
    /// Creates the error, keeping at most [`MAX_BODY_SNIPPET`] characters of the body.
    #[must_use]
    pub fn new(code: u16, body: &str) -> Self {
        Self {
            code,
            body: body.chars().take(MAX_BODY_SNIPPET).collect(),
        }
    }
}

/// Error returned when the server reports a failure in the JSON payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("TestRail API returned error: \"{message}\"")]
pub struct ApplicationError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The value of the `error` field.
    pub message: String,
}

/// Error returned when a call is rejected locally, before any request is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PreconditionError {
    /// A payload was supplied for a GET request.
    #[error("Cannot send a payload with a GET request to '{path}'.")]
    PayloadOnGet {
        /// The request path.
        path: String,
    },

    /// `include_all` was enabled together with an explicit case selection.
    #[error("[{method}] include_all cannot be true when case_ids are supplied")]
    ConflictingCaseSelection {
        /// The API method being called.
        method: &'static str,
    },

    /// `include_all` was disabled without an explicit case selection.
    #[error("[{method}] case_ids are required when include_all is false")]
    MissingCaseIds {
        /// The API method being called.
        method: &'static str,
    },

    /// An update call carried nothing to update.
    #[error("[{method}] Either {fields} has to be supplied")]
    NothingToUpdate {
        /// The API method being called.
        method: &'static str,
        /// The fields of which at least one is required.
        fields: &'static str,
    },

    /// A bulk result submission was empty.
    #[error("[add_results_for_cases] At least one result has to be supplied")]
    NoResults,

    /// A single result entry carried no status, comment, or assignee.
    #[error("[add_results_for_cases] Result for case {case_id} needs a status_id, comment or assignedto_id")]
    EmptyResult {
        /// The case the empty entry refers to.
        case_id: u64,
    },

    /// A status id was not found in the session's status table.
    #[error("The given status code {status_id} is not defined")]
    UnknownStatus {
        /// The status id that was looked up.
        status_id: u64,
    },
}

/// Unified error type for TestRail API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Retries exhausted or terminal status.
    #[error(transparent)]
    TransportExhausted(#[from] TransportExhaustedError),

    /// Response body could not be parsed.
    #[error(transparent)]
    MalformedResponse(#[from] MalformedResponseError),

    /// The server reported an error in its payload.
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// The call was rejected before sending.
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A payload could not be encoded, or a response could not be decoded
    /// into the expected typed shape.
    #[error("JSON conversion failed: {0}")]
    Json(#[from] serde_json::Error),
}
