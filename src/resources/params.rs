//! Parameter marshaling shared by the resource methods.
//!
//! GET filters are serialized with serde and folded into `&key=value`
//! fragments appended to the method path. POST payloads are serialized
//! directly; list-valued fields use [`serialize_joined`] so they travel as
//! comma-separated strings.

use std::fmt::Display;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::clients::{ApiError, PreconditionError};

/// Joins list values into a comma-separated string.
pub(crate) fn join<T: Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Serializes a list as a single comma-separated string.
pub(crate) fn serialize_joined<T, S>(values: &[T], serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    serializer.serialize_str(&join(values))
}

/// Serializes a filter struct into a query string of `&key=value` fragments.
///
/// Null fields are skipped, booleans become `1`/`0` and arrays are joined
/// with commas. Keys come out in lexical order.
pub(crate) fn query_string<T: Serialize>(params: &T) -> Result<String, ApiError> {
    let value = serde_json::to_value(params)?;
    let mut query = String::new();

    if let Value::Object(map) = value {
        let mut entries: Vec<(String, Value)> = map.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        for (key, val) in entries {
            let rendered = match val {
                Value::Null => continue,
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => u8::from(b).to_string(),
                Value::Array(items) => items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(","),
                object @ Value::Object(_) => object.to_string(),
            };
            query.push('&');
            query.push_str(&key);
            query.push('=');
            query.push_str(&rendered);
        }
    }

    Ok(query)
}

/// Resolves the `include_all` flag against an explicit case selection.
///
/// Supplying case ids without a flag implies `include_all = false`.
///
/// # Errors
///
/// Returns [`PreconditionError::ConflictingCaseSelection`] for
/// `include_all = true` with case ids, and
/// [`PreconditionError::MissingCaseIds`] for `include_all = false` without.
pub(crate) const fn resolve_case_selection(
    method: &'static str,
    include_all: Option<bool>,
    case_ids: &[u64],
) -> Result<Option<bool>, PreconditionError> {
    match (include_all, case_ids.is_empty()) {
        (Some(true), false) => Err(PreconditionError::ConflictingCaseSelection { method }),
        (Some(false), true) => Err(PreconditionError::MissingCaseIds { method }),
        (None, false) => Ok(Some(false)),
        (flag, _) => Ok(flag),
    }
}
