//! Request descriptors for the TestRail API.
//!
//! An [`HttpRequest`] is a method, a path relative to the API prefix, and an
//! optional JSON payload. The path already contains ids and query fragments
//! (`get_runs/7&is_completed=1`); it is passed through untouched.

use std::fmt;

use crate::clients::errors::PreconditionError;

/// HTTP methods used by the TestRail API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// Reads.
    Get,
    /// Writes, including deletions and closures.
    Post,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request to be sent through the dispatcher.
///
/// # Example
///
/// ```rust
/// use testrail_api::clients::{HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let get = HttpRequest::get("get_project/7");
/// assert_eq!(get.http_method, HttpMethod::Get);
///
/// let post = HttpRequest::post("add_suite/7", json!({"name": "S1"}));
/// assert!(post.payload.is_some());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The path relative to `index.php?/api/v2/`.
    pub path: String,
    /// The JSON payload, if any.
    pub payload: Option<serde_json::Value>,
}

impl HttpRequest {
    /// Creates a GET request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            http_method: HttpMethod::Get,
            path: path.into(),
            payload: None,
        }
    }

    /// Creates a POST request with a payload.
    #[must_use]
    pub fn post(path: impl Into<String>, payload: impl Into<serde_json::Value>) -> Self {
        Self {
            http_method: HttpMethod::Post,
            path: path.into(),
            payload: Some(payload.into()),
        }
    }

    /// Creates a POST request without a body.
    #[must_use]
    pub fn post_empty(path: impl Into<String>) -> Self {
        Self {
            http_method: HttpMethod::Post,
            path: path.into(),
            payload: None,
        }
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::PayloadOnGet`] if a GET request carries a payload.
    pub fn verify(&self) -> Result<(), PreconditionError> {
        if self.http_method == HttpMethod::Get && self.payload.is_some() {
            return Err(PreconditionError::PayloadOnGet {
                path: self.path.clone(),
            });
        }
        Ok(())
    }
}
