//! Result status definitions.
//!
//! TestRail ships a set of system statuses (passed, blocked, untested, retest,
//! failed) and allows custom ones. The session fetches them once at startup
//! and keeps them in a [`StatusTable`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::clients::{ApiError, PreconditionError};
use crate::TestRailClient;

/// A status as returned by `get_statuses`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Status {
    /// The unique identifier of the status.
    pub id: u64,

    /// The system name of the status, e.g. `passed`.
    #[serde(default)]
    pub name: String,

    /// The display label, e.g. `Passed`.
    pub label: String,

    /// Whether the status is built into TestRail.
    #[serde(default)]
    pub is_system: bool,

    /// Whether the status marks a test as not yet executed.
    #[serde(default)]
    pub is_untested: bool,

    /// Whether the status is final.
    #[serde(default)]
    pub is_final: bool,
}

/// Status definitions keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusTable {
    statuses: BTreeMap<u64, Status>,
}

impl StatusTable {
    /// Builds the table from a `get_statuses` response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Json`] if the value is not a list of statuses.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ApiError> {
        let statuses: Vec<Status> = serde_json::from_value(value)?;
        Ok(statuses.into_iter().collect())
    }

    /// Returns the status with the given id.
    #[must_use]
    pub fn get(&self, status_id: u64) -> Option<&Status> {
        self.statuses.get(&status_id)
    }

    /// Returns the label of the status with the given id.
    #[must_use]
    pub fn label(&self, status_id: u64) -> Option<&str> {
        self.get(status_id).map(|status| status.label.as_str())
    }

    /// Returns the number of known statuses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    /// Returns `true` if no statuses are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Iterates over the statuses in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Status> {
        self.statuses.values()
    }
}

impl FromIterator<Status> for StatusTable {
    fn from_iter<I: IntoIterator<Item = Status>>(iter: I) -> Self {
        Self {
            statuses: iter.into_iter().map(|status| (status.id, status)).collect(),
        }
    }
}

impl TestRailClient {
    /// Fetches the status definitions of the TestRail instance.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn get_statuses(&self) -> Result<serde_json::Value, ApiError> {
        self.send_get("get_statuses").await
    }

    /// Returns the label of a status fetched at session start.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::UnknownStatus`] if the id is not in the
    /// status table.
    pub fn status_label(&self, status_id: u64) -> Result<&str, ApiError> {
        self.statuses()
            .label(status_id)
            .ok_or_else(|| PreconditionError::UnknownStatus { status_id }.into())
    }
}
