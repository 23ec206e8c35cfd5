//! Sections: the folders cases are organized in.

use serde::Serialize;

use crate::clients::ApiError;
use crate::TestRailClient;

/// A section to create with `add_section`.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct NewSection {
    /// The suite the section belongs to.
    pub suite_id: u64,

    /// The name of the section.
    pub name: String,

    /// The description of the section.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The parent section, for nested sections.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,
}

impl NewSection {
    /// Creates a top-level section of `suite_id`.
    #[must_use]
    pub fn new(suite_id: u64, name: impl Into<String>) -> Self {
        Self {
            suite_id,
            name: name.into(),
            ..Default::default()
        }
    }
}

impl TestRailClient {
    /// Fetches a single section.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn get_section(&self, section_id: u64) -> Result<serde_json::Value, ApiError> {
        self.send_get(&format!("get_section/{section_id}")).await
    }

    /// Lists the sections of a suite in the session's project.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn get_sections(&self, suite_id: u64) -> Result<serde_json::Value, ApiError> {
        self.send_get(&format!(
            "get_sections/{}&suite_id={suite_id}",
            self.project_id()
        ))
        .await
    }

    /// Creates a section in the session's project.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn add_section(&self, section: &NewSection) -> Result<serde_json::Value, ApiError> {
        let payload = serde_json::to_value(section)?;
        self.send_post(&format!("add_section/{}", self.project_id()), payload).await
    }

    /// Deletes a section together with its cases.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn delete_section(&self, section_id: u64) -> Result<serde_json::Value, ApiError> {
        self.send_post(&format!("delete_section/{section_id}"), serde_json::json!({})).await
    }
}
