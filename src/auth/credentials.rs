//! Basic-auth credential pair.

use base64::{engine::general_purpose::STANDARD, Engine};
use std::fmt;

use crate::config::TestRailConfig;

/// A user name and secret (password or API key) used for Basic auth.
///
/// Either part may be empty; the server then rejects authenticated calls.
/// Only the encoded pair is ever derived from these values, and it is
/// recomputed for every request.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    secret: String,
}

impl Credentials {
    /// Creates credentials from a user name and secret.
    #[must_use]
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            secret: secret.into(),
        }
    }

    /// Builds credentials from a configuration, using empty strings for
    /// missing parts.
    #[must_use]
    pub fn from_config(config: &TestRailConfig) -> Self {
        Self::new(
            config.user().map_or("", |user| user.as_ref()),
            config.password().map_or("", |secret| secret.as_ref()),
        )
    }

    /// Returns the user name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns `true` when both user name and secret are non-empty.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.secret.is_empty()
    }

    /// Returns the `Authorization` header value: `Basic <base64(user:secret)>`.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        let encoded = STANDARD.encode(format!("{}:{}", self.username, self.secret));
        format!("Basic {encoded}")
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("secret", &"*****")
            .finish()
    }
}
