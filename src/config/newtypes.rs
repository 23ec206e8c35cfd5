//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated TestRail base URL.
///
/// The URL must use the `http` or `https` scheme and name a host. It is
/// normalized to end in exactly one `/`, so the API prefix can be appended
/// directly.
///
/// # Example
///
/// ```rust
/// use testrail_api::BaseUrl;
///
/// let url = BaseUrl::new("https://example.testrail.io").unwrap();
/// assert_eq!(url.as_ref(), "https://example.testrail.io/");
///
/// let url = BaseUrl::new("https://example.testrail.io///").unwrap();
/// assert_eq!(url.as_ref(), "https://example.testrail.io/");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyBaseUrl`] if the URL is empty, or
    /// [`ConfigError::InvalidBaseUrl`] if it lacks an http(s) scheme or a host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim().trim_end_matches('/');

        if trimmed.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        let remainder = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
            .ok_or_else(|| ConfigError::InvalidBaseUrl { url: url.clone() })?;

        let host_end = remainder.find([':', '/', '?', '#']).unwrap_or(remainder.len());
        if host_end == 0 {
            return Err(ConfigError::InvalidBaseUrl { url });
        }

        Ok(Self(format!("{trimmed}/")))
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for BaseUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// The identifier of the TestRail project a session works against.
///
/// Project ids are kept as given (TestRail accepts them inside request paths
/// verbatim); only emptiness is rejected.
///
/// # Example
///
/// ```rust
/// use testrail_api::ProjectId;
///
/// let id = ProjectId::new("7").unwrap();
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProjectId(String);

impl ProjectId {
    /// Creates a new project id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyProjectId`] if the id is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into().trim().to_string();
        if id.is_empty() {
            return Err(ConfigError::EmptyProjectId);
        }
        Ok(Self(id))
    }
}

impl From<u64> for ProjectId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl AsRef<str> for ProjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A TestRail user name (usually the account e-mail address).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    /// Creates a new validated user name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyUsername`] if the name is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConfigError::EmptyUsername);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A TestRail API key or account password.
///
/// # Security
///
/// The `Debug` implementation masks the secret value, displaying only
/// `ApiSecret(*****)`.
///
/// # Example
///
/// ```rust
/// use testrail_api::ApiSecret;
///
/// let secret = ApiSecret::new("my-api-key").unwrap();
/// assert_eq!(format!("{:?}", secret), "ApiSecret(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiSecret(String);

impl ApiSecret {
    /// Creates a new validated secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiSecret`] if the secret is empty.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::EmptyApiSecret);
        }
        Ok(Self(secret))
    }
}

impl AsRef<str> for ApiSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiSecret(*****)")
    }
}
