//! Test runs.
//!
//! # Example
//!
//! ```rust,ignore
//! use testrail_api::resources::{NewRun, RunFilter, RunUpdate};
//!
//! // Run a hand-picked selection of cases
//! let run = client
//!     .add_run(&NewRun {
//!         case_ids: vec![101, 102],
//!         ..NewRun::new(3, "Smoke")
//!     })
//!     .await?;
//!
//! // Only active runs of suite 3
//! let runs = client
//!     .get_runs(&RunFilter {
//!         suite_id: Some(3),
//!         is_completed: Some(false),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! client.update_run(11, &RunUpdate::with_description("Nightly")).await?;
//! client.close_run(11).await?;
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::clients::{ApiError, PreconditionError};
use crate::resources::params::{query_string, resolve_case_selection, serialize_joined};
use crate::TestRailClient;

/// Filters for `get_runs`. Unset fields are not sent.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct RunFilter {
    /// Only runs of this suite.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suite_id: Option<u64>,

    /// Only runs created after this instant.
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_seconds_option"
    )]
    pub created_after: Option<DateTime<Utc>>,

    /// Only runs created before this instant.
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_seconds_option"
    )]
    pub created_before: Option<DateTime<Utc>>,

    /// Only runs created by these users.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub created_by: Vec<u64>,

    /// `true` for completed runs only, `false` for active runs only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,

    /// Maximum number of runs to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// Number of runs to skip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,

    /// Only runs of these milestones.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub milestone_id: Vec<u64>,
}

/// A run to create with `add_run`.
///
/// Leaving `include_all` unset while listing `case_ids` selects exactly
/// those cases.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct NewRun {
    /// The suite the run is based on.
    pub suite_id: u64,

    /// The name of the run.
    pub name: String,

    /// The description of the run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The milestone the run belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone_id: Option<u64>,

    /// The user the run is assigned to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignedto_id: Option<u64>,

    /// Whether the run includes every case of the suite.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_all: Option<bool>,

    /// Cases of a custom selection.
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "serialize_joined"
    )]
    pub case_ids: Vec<u64>,
}

impl NewRun {
    /// Creates a run of `suite_id` with defaults for everything else.
    #[must_use]
    pub fn new(suite_id: u64, name: impl Into<String>) -> Self {
        Self {
            suite_id,
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Changes applied by `update_run`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunUpdate {
    /// New description.
    pub description: Option<String>,
    /// New case selection; switches the run to a custom selection.
    pub case_ids: Vec<u64>,
}

impl RunUpdate {
    /// An update that only replaces the description.
    #[must_use]
    pub fn with_description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            case_ids: Vec::new(),
        }
    }

    /// An update that only replaces the case selection.
    #[must_use]
    pub const fn with_case_ids(case_ids: Vec<u64>) -> Self {
        Self {
            description: None,
            case_ids,
        }
    }

    fn payload(&self) -> Result<RunUpdatePayload, PreconditionError> {
        if self.description.is_none() && self.case_ids.is_empty() {
            return Err(PreconditionError::NothingToUpdate {
                method: "update_run",
                fields: "description or case_ids",
            });
        }

        Ok(RunUpdatePayload {
            description: self.description.clone(),
            include_all: (!self.case_ids.is_empty()).then_some(false),
            case_ids: self.case_ids.clone(),
        })
    }
}

#[derive(Debug, Serialize)]
struct RunUpdatePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    include_all: Option<bool>,
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "serialize_joined"
    )]
    case_ids: Vec<u64>,
}

impl TestRailClient {
    /// Fetches a single run.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn get_run(&self, run_id: u64) -> Result<serde_json::Value, ApiError> {
        self.send_get(&format!("get_run/{run_id}")).await
    }

    /// Lists the runs of the session's project.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn get_runs(&self, filter: &RunFilter) -> Result<serde_json::Value, ApiError> {
        let query = query_string(filter)?;
        self.send_get(&format!("get_runs/{}{query}", self.project_id())).await
    }

    /// Creates a run in the session's project.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Precondition`] for a contradictory case selection,
    /// otherwise an [`ApiError`] if the request fails.
    pub async fn add_run(&self, run: &NewRun) -> Result<serde_json::Value, ApiError> {
        let include_all = resolve_case_selection("add_run", run.include_all, &run.case_ids)?;
        let payload = serde_json::to_value(NewRun {
            include_all,
            ..run.clone()
        })?;
        self.send_post(&format!("add_run/{}", self.project_id()), payload).await
    }

    /// Updates the description or case selection of a run.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Precondition`] if the update is empty, otherwise
    /// an [`ApiError`] if the request fails.
    pub async fn update_run(
        &self,
        run_id: u64,
        update: &RunUpdate,
    ) -> Result<serde_json::Value, ApiError> {
        let payload = serde_json::to_value(update.payload()?)?;
        self.send_post(&format!("update_run/{run_id}"), payload).await
    }

    /// Closes a run and archives its tests and results.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn close_run(&self, run_id: u64) -> Result<serde_json::Value, ApiError> {
        self.send_post(&format!("close_run/{run_id}"), serde_json::json!({})).await
    }
}
