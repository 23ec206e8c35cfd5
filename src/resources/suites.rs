//! Test suites.
//!
//! # Example
//!
//! ```rust,ignore
//! let suite = client.add_suite("Regression", Some("Nightly regression cases")).await?;
//! let suites = client.get_suites().await?;
//! ```

use serde::Serialize;

use crate::clients::ApiError;
use crate::TestRailClient;

/// Payload of `add_suite` and `update_suite`.
#[derive(Debug, Serialize)]
struct SuitePayload<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

impl TestRailClient {
    /// Lists the suites of the session's project.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn get_suites(&self) -> Result<serde_json::Value, ApiError> {
        self.send_get(&format!("get_suites/{}", self.project_id())).await
    }

    /// Fetches a single suite.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn get_suite(&self, suite_id: u64) -> Result<serde_json::Value, ApiError> {
        self.send_get(&format!("get_suite/{suite_id}")).await
    }

    /// Creates a suite in the session's project.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn add_suite(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<serde_json::Value, ApiError> {
        let payload = serde_json::to_value(SuitePayload { name, description })?;
        self.send_post(&format!("add_suite/{}", self.project_id()), payload).await
    }

    /// Renames a suite and optionally replaces its description.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn update_suite(
        &self,
        suite_id: u64,
        name: &str,
        description: Option<&str>,
    ) -> Result<serde_json::Value, ApiError> {
        let payload = serde_json::to_value(SuitePayload { name, description })?;
        self.send_post(&format!("update_suite/{suite_id}"), payload).await
    }
}
