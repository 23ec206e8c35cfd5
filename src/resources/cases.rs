//! Test cases.
//!
//! Besides the standard fields, TestRail instances define custom case fields
//! (system names prefixed with `custom_`). They go into `custom_fields` and
//! are sent at the top level of the payload.
//!
//! # Example
//!
//! ```rust,ignore
//! use testrail_api::resources::{CaseFilter, CaseUpdate, NewCase};
//!
//! let mut case = NewCase::new("Login with expired password");
//! case.refs = vec!["REQ-12".to_string()];
//! case.custom_fields.insert("custom_keywords".to_string(), "auth".into());
//! let created = client.add_case(42, &case).await?;
//!
//! let cases = client
//!     .get_cases(3, &CaseFilter { section_id: Some(42), ..Default::default() })
//!     .await?;
//!
//! client
//!     .update_case(7, &CaseUpdate { priority_id: Some(4), ..Default::default() })
//!     .await?;
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::clients::{ApiError, PreconditionError};
use crate::resources::params::{query_string, serialize_joined};
use crate::TestRailClient;

/// Filters for `get_cases`. Unset fields are not sent.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct CaseFilter {
    /// Only cases of this section.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_id: Option<u64>,

    /// Only cases created after this instant.
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_seconds_option"
    )]
    pub created_after: Option<DateTime<Utc>>,

    /// Only cases created before this instant.
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_seconds_option"
    )]
    pub created_before: Option<DateTime<Utc>>,

    /// Only cases created by these users.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub created_by: Vec<u64>,

    /// Only cases linked to these milestones.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub milestone_id: Vec<u64>,

    /// Only cases with these priorities.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub priority_id: Vec<u64>,

    /// Only cases using these templates.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub template_id: Vec<u64>,

    /// Only cases of these types.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub type_id: Vec<u64>,

    /// Only cases updated after this instant.
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_seconds_option"
    )]
    pub updated_after: Option<DateTime<Utc>>,

    /// Only cases updated before this instant.
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_seconds_option"
    )]
    pub updated_before: Option<DateTime<Utc>>,

    /// Only cases last updated by these users.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub updated_by: Vec<u64>,
}

/// A case to create with `add_case`.
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct NewCase {
    /// The title of the case.
    pub title: String,

    /// The template (field layout).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<u64>,

    /// The case type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_id: Option<u64>,

    /// The case priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_id: Option<u64>,

    /// The estimate, e.g. `30s` or `1m 45s`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<String>,

    /// The milestone the case is linked to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone_id: Option<u64>,

    /// References or requirements.
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "serialize_joined"
    )]
    pub refs: Vec<String>,

    /// Custom fields, keyed by system name.
    #[serde(flatten)]
    pub custom_fields: Map<String, Value>,
}

impl NewCase {
    /// Creates a case with only a title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// Changes applied by `update_case`. Unset fields keep their value.
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct CaseUpdate {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// New template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<u64>,

    /// New case type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_id: Option<u64>,

    /// New priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_id: Option<u64>,

    /// New estimate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<String>,

    /// New milestone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone_id: Option<u64>,

    /// New references.
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "serialize_joined"
    )]
    pub refs: Vec<String>,

    /// Custom fields to change, keyed by system name.
    #[serde(flatten)]
    pub custom_fields: Map<String, Value>,
}

impl CaseUpdate {
    /// Returns `true` if the update changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.template_id.is_none()
            && self.type_id.is_none()
            && self.priority_id.is_none()
            && self.estimate.is_none()
            && self.milestone_id.is_none()
            && self.refs.is_empty()
            && self.custom_fields.is_empty()
    }
}

impl TestRailClient {
    /// Fetches a single case.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn get_case(&self, case_id: u64) -> Result<serde_json::Value, ApiError> {
        self.send_get(&format!("get_case/{case_id}")).await
    }

    /// Lists the cases of a suite in the session's project.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn get_cases(
        &self,
        suite_id: u64,
        filter: &CaseFilter,
    ) -> Result<serde_json::Value, ApiError> {
        let query = query_string(filter)?;
        self.send_get(&format!(
            "get_cases/{}&suite_id={suite_id}{query}",
            self.project_id()
        ))
        .await
    }

    /// Creates a case in a section.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn add_case(
        &self,
        section_id: u64,
        case: &NewCase,
    ) -> Result<serde_json::Value, ApiError> {
        let payload = serde_json::to_value(case)?;
        self.send_post(&format!("add_case/{section_id}"), payload).await
    }

    /// Updates fields of an existing case.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Precondition`] if the update is empty, otherwise
    /// an [`ApiError`] if the request fails.
    pub async fn update_case(
        &self,
        case_id: u64,
        update: &CaseUpdate,
    ) -> Result<serde_json::Value, ApiError> {
        if update.is_empty() {
            return Err(PreconditionError::NothingToUpdate {
                method: "update_case",
                fields: "a case field",
            }
            .into());
        }
        let payload = serde_json::to_value(update)?;
        self.send_post(&format!("update_case/{case_id}"), payload).await
    }

    /// Deletes a case.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn delete_case(&self, case_id: u64) -> Result<serde_json::Value, ApiError> {
        self.send_post(&format!("delete_case/{case_id}"), serde_json::json!({})).await
    }
}
