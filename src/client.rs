//! The TestRail session.
//!
//! A [`TestRailClient`] binds the request dispatcher to one project and holds
//! the status definitions fetched when the session starts. Resource methods
//! (runs, plans, cases and so on) are implemented on it in the
//! [`resources`](crate::resources) module.

use std::fmt::Write as _;

use crate::auth::Credentials;
use crate::clients::{ApiError, HttpClient};
use crate::config::{ProjectId, TestRailConfig};
use crate::resources::StatusTable;

/// A session against one TestRail project.
///
/// # Example
///
/// ```rust,ignore
/// use testrail_api::{TestRailClient, TestRailConfig};
///
/// let config = TestRailConfig::load()?;
/// let client = TestRailClient::connect(&config).await?;
///
/// println!("{}", client.summary());
/// let suites = client.get_suites().await?;
/// ```
#[derive(Debug)]
pub struct TestRailClient {
    http_client: HttpClient,
    project_id: ProjectId,
    statuses: StatusTable,
}

// Verify TestRailClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TestRailClient>();
};

impl TestRailClient {
    /// Opens a session from loaded configuration.
    ///
    /// When both user and password are configured, the status definitions
    /// are fetched once. Without credentials the fetch is skipped, a warning
    /// is logged and the status table stays empty.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the HTTP client cannot be built or the
    /// status fetch fails.
    pub async fn connect(config: &TestRailConfig) -> Result<Self, ApiError> {
        let http_client = HttpClient::new(config.base_url(), Credentials::from_config(config))?;
        Self::with_http_client(http_client, config.project_id().clone()).await
    }

    /// Opens a session over an existing dispatcher.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the status fetch fails.
    pub async fn with_http_client(
        http_client: HttpClient,
        project_id: ProjectId,
    ) -> Result<Self, ApiError> {
        let mut client = Self {
            http_client,
            project_id,
            statuses: StatusTable::default(),
        };

        if client.http_client.credentials().is_complete() {
            let statuses = client.get_statuses().await?;
            client.statuses = StatusTable::from_value(statuses)?;
            tracing::debug!(count = client.statuses.len(), "loaded status definitions");
        } else {
            tracing::warn!(
                project_id = %client.project_id,
                "TestRail user and password are not set; status definitions were not loaded"
            );
        }

        Ok(client)
    }

    /// Returns the project this session works on.
    #[must_use]
    pub const fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    /// Returns the status definitions fetched at session start.
    #[must_use]
    pub const fn statuses(&self) -> &StatusTable {
        &self.statuses
    }

    /// Returns the underlying dispatcher.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Sends a GET request for an arbitrary API path.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::dispatch`].
    pub async fn send_get(&self, path: &str) -> Result<serde_json::Value, ApiError> {
        self.http_client.send_get(path).await
    }

    /// Sends a POST request for an arbitrary API path.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::dispatch`].
    pub async fn send_post(
        &self,
        path: &str,
        payload: serde_json::Value,
    ) -> Result<serde_json::Value, ApiError> {
        self.http_client.send_post(path, payload).await
    }

    /// Renders the project id and the known statuses as text.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut out = format!("project_id: {}\n", self.project_id);
        if self.statuses.is_empty() {
            out.push_str("No status definitions loaded\n");
            return out;
        }

        out.push_str("Available statuses:\nid   Label\n");
        for status in self.statuses.iter() {
            let _ = writeln!(out, "{:<4} {}", status.id, status.label);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BaseUrl;
    use crate::resources::Status;

    async fn offline_client() -> TestRailClient {
        let http_client = HttpClient::new(
            &BaseUrl::new("http://127.0.0.1:9").unwrap(),
            Credentials::default(),
        )
        .unwrap();
        TestRailClient::with_http_client(http_client, ProjectId::new("7").unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_connect_without_credentials_skips_status_fetch() {
        let client = offline_client().await;
        assert!(client.statuses().is_empty());
        assert_eq!(client.project_id().as_ref(), "7");
    }

    #[tokio::test]
    async fn test_summary_without_statuses() {
        let client = offline_client().await;
        assert_eq!(
            client.summary(),
            "project_id: 7\nNo status definitions loaded\n"
        );
    }

    #[tokio::test]
    async fn test_summary_lists_statuses() {
        let mut client = offline_client().await;
        client.statuses = [
            Status {
                id: 1,
                label: "Passed".to_string(),
                ..Default::default()
            },
            Status {
                id: 12,
                label: "Flaky".to_string(),
                ..Default::default()
            },
        ]
        .into_iter()
        .collect();

        assert_eq!(
            client.summary(),
            "project_id: 7\nAvailable statuses:\nid   Label\n1    Passed\n12   Flaky\n"
        );
    }

    #[tokio::test]
    async fn test_status_label_of_unknown_id_is_precondition_error() {
        let client = offline_client().await;
        let result = client.status_label(1);
        assert!(matches!(
            result,
            Err(ApiError::Precondition(
                crate::clients::PreconditionError::UnknownStatus { status_id: 1 }
            ))
        ));
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TestRailClient>();
    }
}
