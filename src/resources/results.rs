//! Test results.
//!
//! # Example
//!
//! ```rust,ignore
//! use testrail_api::resources::{CaseResult, ResultFields};
//!
//! // Mark case 17 of run 11 as failed
//! let fields = ResultFields {
//!     comment: Some("Timeout on login".to_string()),
//!     defects: vec!["TR-7".to_string()],
//!     ..Default::default()
//! };
//! client.add_result_for_case(11, 17, 5, &fields).await?;
//!
//! // Several cases at once
//! client
//!     .add_results_for_cases(11, &[CaseResult::with_status(1, 1), CaseResult::with_status(2, 5)])
//!     .await?;
//! ```

use serde::Serialize;

use crate::clients::{ApiError, PreconditionError};
use crate::resources::params::serialize_joined;
use crate::TestRailClient;

/// Optional fields of a result.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct ResultFields {
    /// A comment or description of the result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// The version or build tested against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// The time the test took, e.g. `30s` or `1m 45s`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed: Option<String>,

    /// Defects linked to the result.
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "serialize_joined"
    )]
    pub defects: Vec<String>,

    /// The user the test should be assigned to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignedto_id: Option<u64>,
}

/// One entry of an `add_results_for_cases` submission.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct CaseResult {
    /// The case the result belongs to.
    pub case_id: u64,

    /// The status of the result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<u64>,

    /// Optional fields.
    #[serde(flatten)]
    pub fields: ResultFields,
}

impl CaseResult {
    /// A result that only sets a status.
    #[must_use]
    pub fn with_status(case_id: u64, status_id: u64) -> Self {
        Self {
            case_id,
            status_id: Some(status_id),
            fields: ResultFields::default(),
        }
    }

    /// Returns `true` if the entry carries a status, comment, or assignee.
    #[must_use]
    pub const fn has_content(&self) -> bool {
        self.status_id.is_some()
            || self.fields.comment.is_some()
            || self.fields.assignedto_id.is_some()
    }
}

#[derive(Debug, Serialize)]
struct ResultPayload<'a> {
    status_id: u64,
    #[serde(flatten)]
    fields: &'a ResultFields,
}

#[derive(Debug, Serialize)]
struct ResultsPayload<'a> {
    results: &'a [CaseResult],
}

fn check_results(results: &[CaseResult]) -> Result<(), PreconditionError> {
    if results.is_empty() {
        return Err(PreconditionError::NoResults);
    }
    match results.iter().find(|result| !result.has_content()) {
        Some(empty) => Err(PreconditionError::EmptyResult {
            case_id: empty.case_id,
        }),
        None => Ok(()),
    }
}

impl TestRailClient {
    /// Lists the results of a test.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn get_results(&self, test_id: u64) -> Result<serde_json::Value, ApiError> {
        self.send_get(&format!("get_results/{test_id}")).await
    }

    /// Adds a result for a case of a run.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn add_result_for_case(
        &self,
        run_id: u64,
        case_id: u64,
        status_id: u64,
        fields: &ResultFields,
    ) -> Result<serde_json::Value, ApiError> {
        let payload = serde_json::to_value(ResultPayload { status_id, fields })?;
        self.send_post(&format!("add_result_for_case/{run_id}/{case_id}"), payload).await
    }

    /// Adds results for several cases of a run in one request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Precondition`] if the list is empty or an entry
    /// carries no status, comment, or assignee, otherwise an [`ApiError`] if
    /// the request fails.
    pub async fn add_results_for_cases(
        &self,
        run_id: u64,
        results: &[CaseResult],
    ) -> Result<serde_json::Value, ApiError> {
        check_results(results)?;
        let payload = serde_json::to_value(ResultsPayload { results })?;
        self.send_post(&format!("add_results_for_cases/{run_id}"), payload).await
    }
}
