//! Test plans and plan entries.
//!
//! A plan groups runs; each [`PlanEntry`] adds one or more runs of a suite,
//! optionally split by configuration through [`PlanEntryRun`].

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::clients::{ApiError, PreconditionError};
use crate::resources::params::{query_string, resolve_case_selection, serialize_joined};
use crate::TestRailClient;

/// Filters for `get_plans`. Unset fields are not sent.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct PlanFilter {
    /// Only plans created after this instant.
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_seconds_option"
    )]
    pub created_after: Option<DateTime<Utc>>,

    /// Only plans created before this instant.
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_seconds_option"
    )]
    pub created_before: Option<DateTime<Utc>>,

    /// Only plans created by these users.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub created_by: Vec<u64>,

    /// `true` for completed plans only, `false` for active plans only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,

    /// Maximum number of plans to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// Number of plans to skip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,

    /// Only plans of these milestones.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub milestone_id: Vec<u64>,
}

/// A plan to create with `add_plan`.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct NewPlan {
    /// The name of the plan.
    pub name: String,

    /// The description of the plan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The milestone the plan belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone_id: Option<u64>,

    /// Entries created together with the plan.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<PlanEntry>,
}

impl NewPlan {
    /// Creates a plan without entries.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// A plan entry: the runs of one suite inside a plan.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct PlanEntry {
    /// The suite the runs are based on.
    pub suite_id: u64,

    /// The name of the runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The description of the runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The user the runs are assigned to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignedto_id: Option<u64>,

    /// Whether the runs include every case of the suite.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_all: Option<bool>,

    /// Cases of a custom selection.
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "serialize_joined"
    )]
    pub case_ids: Vec<u64>,

    /// Configurations used for the runs of this entry.
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "serialize_joined"
    )]
    pub config_ids: Vec<u64>,

    /// Per-configuration runs.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub runs: Vec<PlanEntryRun>,
}

impl PlanEntry {
    /// Creates an entry for `suite_id` with defaults for everything else.
    #[must_use]
    pub fn new(suite_id: u64) -> Self {
        Self {
            suite_id,
            ..Default::default()
        }
    }

    /// Returns a copy with every case selection resolved.
    fn resolved(&self, method: &'static str) -> Result<Self, PreconditionError> {
        let runs = self
            .runs
            .iter()
            .map(|run| run.resolved(method))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            include_all: resolve_case_selection(method, self.include_all, &self.case_ids)?,
            runs,
            ..self.clone()
        })
    }
}

/// One run of a plan entry, usually bound to a set of configurations.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct PlanEntryRun {
    /// Whether the run includes every case of the suite.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_all: Option<bool>,

    /// Cases of a custom selection.
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "serialize_joined"
    )]
    pub case_ids: Vec<u64>,

    /// Configurations of this run.
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "serialize_joined"
    )]
    pub config_ids: Vec<u64>,

    /// The user the run is assigned to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignedto_id: Option<u64>,
}

impl PlanEntryRun {
    fn resolved(&self, method: &'static str) -> Result<Self, PreconditionError> {
        Ok(Self {
            include_all: resolve_case_selection(method, self.include_all, &self.case_ids)?,
            ..self.clone()
        })
    }
}

impl TestRailClient {
    /// Fetches a single plan with its entries.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn get_plan(&self, plan_id: u64) -> Result<serde_json::Value, ApiError> {
        self.send_get(&format!("get_plan/{plan_id}")).await
    }

    /// Lists the plans of the session's project.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn get_plans(&self, filter: &PlanFilter) -> Result<serde_json::Value, ApiError> {
        let query = query_string(filter)?;
        self.send_get(&format!("get_plans/{}{query}", self.project_id())).await
    }

    /// Creates a plan in the session's project.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Precondition`] if an entry has a contradictory case
    /// selection, otherwise an [`ApiError`] if the request fails.
    pub async fn add_plan(&self, plan: &NewPlan) -> Result<serde_json::Value, ApiError> {
        let entries = plan
            .entries
            .iter()
            .map(|entry| entry.resolved("add_plan"))
            .collect::<Result<Vec<_>, _>>()?;
        let payload = serde_json::to_value(NewPlan {
            entries,
            ..plan.clone()
        })?;
        self.send_post(&format!("add_plan/{}", self.project_id()), payload).await
    }

    /// Adds an entry to an existing plan.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Precondition`] for a contradictory case selection,
    /// otherwise an [`ApiError`] if the request fails.
    pub async fn add_plan_entry(
        &self,
        plan_id: u64,
        entry: &PlanEntry,
    ) -> Result<serde_json::Value, ApiError> {
        let payload = serde_json::to_value(entry.resolved("add_plan_entry")?)?;
        self.send_post(&format!("add_plan_entry/{plan_id}"), payload).await
    }
}
