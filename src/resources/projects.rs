//! Projects.

use crate::clients::ApiError;
use crate::TestRailClient;

impl TestRailClient {
    /// Fetches the session's project.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn get_project(&self) -> Result<serde_json::Value, ApiError> {
        self.send_get(&format!("get_project/{}", self.project_id())).await
    }

    /// Lists all projects visible to the user.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn get_projects(&self) -> Result<serde_json::Value, ApiError> {
        self.send_get("get_projects").await
    }
}
