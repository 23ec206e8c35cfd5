//! The request dispatcher.
//!
//! [`HttpClient`] turns an [`HttpRequest`] into an authenticated call against
//! `<base_url>index.php?/api/v2/<path>`, retries rate-limited responses and
//! normalizes whatever comes back into a JSON value or an [`ApiError`].

use std::collections::HashMap;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

use crate::auth::Credentials;
use crate::clients::errors::{ApiError, TransportExhaustedError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::BaseUrl;

/// Path prefix of the TestRail API v2, appended to the base URL.
pub const API_PREFIX: &str = "index.php?/api/v2/";

/// Maximum number of attempts per request, including the first one.
pub const MAX_TRIES: u32 = 5;

/// Client version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Dispatcher for TestRail API requests.
///
/// Each call to [`dispatch`](Self::dispatch) completes before it returns:
/// attempts are sequential and a rate-limit wait suspends the caller for
/// the full `Retry-After` duration.
///
/// # Retry Behavior
///
/// - **2xx**: the body is normalized and returned
/// - **429**: waits `Retry-After` seconds (60 if absent) and tries again, up
///   to [`MAX_TRIES`] attempts in total
/// - **anything else**: fails immediately
///
/// # Example
///
/// ```rust,ignore
/// use testrail_api::auth::Credentials;
/// use testrail_api::clients::{HttpClient, HttpRequest};
/// use testrail_api::BaseUrl;
///
/// let client = HttpClient::new(
///     &BaseUrl::new("https://example.testrail.io")?,
///     Credentials::new("qa@example.com", "api-key"),
/// )?;
///
/// let project = client.dispatch(&HttpRequest::get("get_project/7")).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URL plus [`API_PREFIX`].
    api_url: String,
    /// Credential pair for the `Authorization` header.
    credentials: Credentials,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a dispatcher for the given TestRail instance.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the underlying HTTP client cannot be
    /// created (e.g. TLS initialization failure).
    pub fn new(base_url: &BaseUrl, credentials: Credentials) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(format!("TestRail API Rust Client v{SDK_VERSION}"))
            .build()?;

        Ok(Self {
            client,
            api_url: format!("{base_url}{API_PREFIX}"),
            credentials,
        })
    }

    /// Returns the URL every request path is appended to.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Returns the credentials used for authentication.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Sends a GET request for `path`.
    ///
    /// # Errors
    ///
    /// See [`dispatch`](Self::dispatch).
    pub async fn send_get(&self, path: &str) -> Result<serde_json::Value, ApiError> {
        self.dispatch(&HttpRequest::get(path)).await
    }

    /// Sends a POST request for `path` with a JSON payload.
    ///
    /// # Errors
    ///
    /// See [`dispatch`](Self::dispatch).
    pub async fn send_post(
        &self,
        path: &str,
        payload: serde_json::Value,
    ) -> Result<serde_json::Value, ApiError> {
        self.dispatch(&HttpRequest::post(path, payload)).await
    }

    /// Sends a request and normalizes the response.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Precondition`] if the request is invalid (nothing is sent)
    /// - [`ApiError::Network`] if the transport fails
    /// - [`ApiError::TransportExhausted`] if every attempt was rate limited, or
    ///   a terminal status arrived without an error payload
    /// - [`ApiError::MalformedResponse`] if the body is not JSON
    /// - [`ApiError::Application`] if the body carries an `error` field
    pub async fn dispatch(&self, request: &HttpRequest) -> Result<serde_json::Value, ApiError> {
        request.verify()?;

        let url = format!("{}{}", self.api_url, request.path);
        let method = request.http_method;
        let body = request.payload.as_ref().map(ToString::to_string);

        let mut tries: u32 = 0;
        let response = loop {
            tries += 1;

            match &body {
                Some(body) => tracing::debug!(%method, %url, attempt = tries, payload = %body, "sending request"),
                None => tracing::debug!(%method, %url, attempt = tries, "sending request"),
            }

            let mut req_builder = match method {
                HttpMethod::Get => self.client.get(&url),
                HttpMethod::Post => self.client.post(&url),
            };

            // Recomputed on every attempt; no token is cached between calls.
            req_builder = req_builder
                .header(AUTHORIZATION, self.credentials.authorization_header())
                .header(CONTENT_TYPE, "application/json");

            if let Some(body) = &body {
                req_builder = req_builder.body(body.clone());
            }

            let res = req_builder.send().await.map_err(|err| {
                tracing::error!(%method, %url, error = %err, "request failed before a response was received");
                err
            })?;

            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let body_text = res.text().await?;
            let response = HttpResponse::new(code, res_headers, body_text);

            if response.is_ok() {
                break response;
            }

            if !response.is_rate_limited() {
                tracing::debug!(%method, %url, code, "got a {} error, not retrying", code);
                let error = response.into_failure(method, &url, tries);
                tracing::error!(%method, %url, code, error = %error, "request failed");
                return Err(error);
            }

            if tries >= MAX_TRIES {
                tracing::error!(
                    "failed {} to {}, status code: {} after {} attempts",
                    method,
                    url,
                    code,
                    tries
                );
                return Err(TransportExhaustedError {
                    method,
                    url,
                    code,
                    tries,
                }
                .into());
            }

            let delay = response.retry_delay();
            tracing::debug!(
                %method,
                %url,
                attempt = tries,
                "sleeping {:.1} seconds because of a 429 error (too many requests) and retrying",
                delay.as_secs_f64()
            );
            tokio::time::sleep(delay).await;
        };

        let code = response.code;
        response.into_json().map_err(|error| {
            tracing::error!(%method, %url, code, error = %error, "invalid response");
            error
        })
    }

    /// Parses response headers into a `HashMap` keyed by lowercase name.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}
