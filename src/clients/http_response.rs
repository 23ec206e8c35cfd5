//! Raw responses and their normalization into JSON results.

use std::collections::HashMap;
use std::time::Duration;

use crate::clients::errors::{
    ApiError, ApplicationError, MalformedResponseError, TransportExhaustedError,
};
use crate::clients::http_request::HttpMethod;

/// Wait used when a `429` response has no usable `Retry-After` header.
pub const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(60);

/// Status code TestRail uses for rate limiting.
pub const TOO_MANY_REQUESTS: u16 = 429;

/// An HTTP response from the TestRail API, before normalization.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name.
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: String,
    /// Seconds to wait before retrying (from `Retry-After` header).
    pub retry_request_after: Option<f64>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing `Retry-After` when present.
    ///
    /// Only the delta-seconds form of `Retry-After` is understood; negative
    /// or non-numeric values are ignored.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: String) -> Self {
        let retry_request_after = headers
            .get("retry-after")
            .and_then(|values| values.first())
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|seconds| seconds.is_finite() && *seconds >= 0.0);

        Self {
            code,
            headers,
            body,
            retry_request_after,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns `true` for a `429 Too Many Requests` response.
    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        self.code == TOO_MANY_REQUESTS
    }

    /// Returns how long to wait before retrying a rate-limited request.
    #[must_use]
    pub fn retry_delay(&self) -> Duration {
        self.retry_request_after
            .and_then(|seconds| Duration::try_from_secs_f64(seconds).ok())
            .unwrap_or(DEFAULT_RETRY_AFTER)
    }

    /// Normalizes a successful response into its JSON value.
    ///
    /// An empty body becomes `{}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MalformedResponse`] if the body is not JSON, or
    /// [`ApiError::Application`] if it is an object with an `error` field.
    pub fn into_json(self) -> Result<serde_json::Value, ApiError> {
        match self.parse_body()? {
            None => Ok(serde_json::json!({})),
            Some(value) => {
                if let Some(message) = error_message(&value) {
                    return Err(ApplicationError {
                        code: self.code,
                        message,
                    }
                    .into());
                }
                Ok(value)
            }
        }
    }

    /// Classifies a failed (non-2xx) response.
    ///
    /// The body decides the error: an `error` field becomes
    /// [`ApiError::Application`], unparsable text becomes
    /// [`ApiError::MalformedResponse`], anything else is
    /// [`ApiError::TransportExhausted`].
    #[must_use]
    pub fn into_failure(self, method: HttpMethod, url: &str, tries: u32) -> ApiError {
        let body = match self.parse_body() {
            Ok(body) => body,
            Err(malformed) => return malformed.into(),
        };

        match body.as_ref().and_then(error_message) {
            Some(message) => ApplicationError {
                code: self.code,
                message,
            }
            .into(),
            None => TransportExhaustedError {
                method,
                url: url.to_string(),
                code: self.code,
                tries,
            }
            .into(),
        }
    }

    /// Parses the body, treating whitespace-only content as absent.
    fn parse_body(&self) -> Result<Option<serde_json::Value>, MalformedResponseError> {
        if self.body.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&self.body)
            .map(Some)
            .map_err(|_| MalformedResponseError::new(self.code, &self.body))
    }
}

/// Extracts the message of an `error` field from a JSON object.
fn error_message(value: &serde_json::Value) -> Option<String> {
    let error = value.as_object()?.get("error")?;
    Some(
        error
            .as_str()
            .map_or_else(|| error.to_string(), ToString::to_string),
    )
}
