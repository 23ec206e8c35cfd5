//! Configuration types for the TestRail API client.
//!
//! # Overview
//!
//! - [`TestRailConfig`]: connection and logging settings for a session
//! - [`TestRailConfigBuilder`]: builder for [`TestRailConfig`]
//! - [`BaseUrl`], [`ProjectId`], [`Username`], [`ApiSecret`]: validated newtypes
//! - [`LoggingConfig`], [`LogLevel`]: log destination and verbosity
//!
//! Configuration is either built in code or loaded from a TOML file with
//! environment overrides:
//!
//! ```toml
//! [testrail]
//! base_url = "https://example.testrail.io"
//! project_id = 7
//! user = "qa@example.com"
//! password = "api-key"
//!
//! [api_logging]
//! file = "testrail-api.log"
//! level = "debug"
//! ```
//!
//! Environment variables prefixed with `TR_` override file values, using `__`
//! between section and key (e.g. `TR_TESTRAIL__PASSWORD`).
//!
//! # Example
//!
//! ```rust
//! use testrail_api::{TestRailConfig, BaseUrl, ProjectId};
//!
//! let config = TestRailConfig::builder()
//!     .base_url(BaseUrl::new("https://example.testrail.io").unwrap())
//!     .project_id(ProjectId::new("7").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert!(!config.has_credentials());
//! ```

mod logging;
mod newtypes;

pub use logging::{LogLevel, LoggingConfig, UnknownLogLevel};
pub use newtypes::{ApiSecret, BaseUrl, ProjectId, Username};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Deserializer};
use std::path::Path;

use crate::error::ConfigError;

/// Default configuration file read by [`TestRailConfig::load`].
pub const DEFAULT_CONFIG_FILE: &str = "testrail.toml";

/// Prefix of environment variables that override file configuration.
pub const ENV_PREFIX: &str = "TR_";

/// Environment keys whose values are taken verbatim instead of type-parsed.
const VERBATIM_ENV_KEYS: &[&str] = &["testrail.user", "testrail.password"];

/// Configuration for a TestRail session.
///
/// Credentials are optional: without them the session skips the status
/// bootstrap and every authenticated call is rejected by the server.
#[derive(Clone, Debug)]
pub struct TestRailConfig {
    base_url: BaseUrl,
    project_id: ProjectId,
    user: Option<Username>,
    password: Option<ApiSecret>,
    logging: LoggingConfig,
}

// Verify TestRailConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TestRailConfig>();
};

impl TestRailConfig {
    /// Creates a new builder for constructing a `TestRailConfig`.
    #[must_use]
    pub fn builder() -> TestRailConfigBuilder {
        TestRailConfigBuilder::new()
    }

    /// Loads configuration from [`DEFAULT_CONFIG_FILE`] and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] if the sources cannot be extracted, or a
    /// validation error if a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Loads configuration from the given TOML file and the environment.
    ///
    /// A missing file is not an error by itself; required values may come
    /// from the environment instead.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] if the sources cannot be extracted, or a
    /// validation error if a value is invalid.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let env = Env::prefixed(ENV_PREFIX).split("__");
        let mut figment = Figment::new()
            .merge(Toml::file(path.as_ref()))
            .merge(env.clone().ignore(VERBATIM_ENV_KEYS));

        // Credentials keep their exact text, so `007` stays `007`.
        for (key, value) in env.only(VERBATIM_ENV_KEYS).iter() {
            figment = figment.merge(Serialized::default(key.as_str(), value));
        }

        let raw: RawConfig = figment.extract()?;

        raw.into_config()
    }

    /// Returns the base URL (always ending in `/`).
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the project id.
    #[must_use]
    pub const fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    /// Returns the user name, if configured.
    #[must_use]
    pub const fn user(&self) -> Option<&Username> {
        self.user.as_ref()
    }

    /// Returns the API key or password, if configured.
    #[must_use]
    pub const fn password(&self) -> Option<&ApiSecret> {
        self.password.as_ref()
    }

    /// Returns `true` when both user name and secret are configured.
    #[must_use]
    pub const fn has_credentials(&self) -> bool {
        self.user.is_some() && self.password.is_some()
    }

    /// Returns the logging settings.
    #[must_use]
    pub const fn logging(&self) -> &LoggingConfig {
        &self.logging
    }
}

/// Builder for constructing [`TestRailConfig`] instances.
///
/// `base_url` and `project_id` are required.
#[derive(Debug, Default)]
pub struct TestRailConfigBuilder {
    base_url: Option<BaseUrl>,
    project_id: Option<ProjectId>,
    user: Option<Username>,
    password: Option<ApiSecret>,
    logging: Option<LoggingConfig>,
}

impl TestRailConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL (required).
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the project id (required).
    #[must_use]
    pub fn project_id(mut self, id: ProjectId) -> Self {
        self.project_id = Some(id);
        self
    }

    /// Sets the user name.
    #[must_use]
    pub fn user(mut self, user: Username) -> Self {
        self.user = Some(user);
        self
    }

    /// Sets the API key or password.
    #[must_use]
    pub fn password(mut self, password: ApiSecret) -> Self {
        self.password = Some(password);
        self
    }

    /// Sets the logging settings.
    #[must_use]
    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = Some(logging);
        self
    }

    /// Builds the [`TestRailConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_url` or
    /// `project_id` are not set.
    pub fn build(self) -> Result<TestRailConfig, ConfigError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;
        let project_id = self.project_id.ok_or(ConfigError::MissingRequiredField {
            field: "project_id",
        })?;

        Ok(TestRailConfig {
            base_url,
            project_id,
            user: self.user,
            password: self.password,
            logging: self.logging.unwrap_or_default(),
        })
    }
}

/// File and environment layout before validation.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    testrail: RawConnection,
    #[serde(default)]
    api_logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize)]
struct RawConnection {
    base_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_scalar_string")]
    project_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_scalar_string")]
    user: Option<String>,
    #[serde(default, deserialize_with = "deserialize_scalar_string")]
    password: Option<String>,
}

impl RawConfig {
    fn into_config(self) -> Result<TestRailConfig, ConfigError> {
        let Self {
            testrail,
            api_logging,
        } = self;

        let mut builder = TestRailConfig::builder().logging(api_logging);
        if let Some(url) = testrail.base_url {
            builder = builder.base_url(BaseUrl::new(url)?);
        }
        if let Some(id) = testrail.project_id {
            builder = builder.project_id(ProjectId::new(id)?);
        }
        // Empty credentials are treated as absent.
        if let Some(user) = testrail.user.filter(|u| !u.is_empty()) {
            builder = builder.user(Username::new(user)?);
        }
        if let Some(password) = testrail.password.filter(|p| !p.is_empty()) {
            builder = builder.password(ApiSecret::new(password)?);
        }

        builder.build()
    }
}

/// Accepts a string value written as a string, number or boolean.
fn deserialize_scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        String(String),
        Unsigned(u64),
        Signed(i64),
        Float(f64),
        Bool(bool),
    }

    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|value| match value {
        Scalar::String(s) => s,
        Scalar::Unsigned(n) => n.to_string(),
        Scalar::Signed(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Bool(b) => b.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use std::path::PathBuf;

    fn base_builder() -> TestRailConfigBuilder {
        TestRailConfig::builder()
            .base_url(BaseUrl::new("https://x.test").unwrap())
            .project_id(ProjectId::new("7").unwrap())
    }

    #[test]
    fn test_builder_requires_base_url() {
        let result = TestRailConfigBuilder::new()
            .project_id(ProjectId::new("7").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "base_url" })
        ));
    }

    #[test]
    fn test_builder_requires_project_id() {
        let result = TestRailConfigBuilder::new()
            .base_url(BaseUrl::new("https://x.test").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "project_id"
            })
        ));
    }

    #[test]
    fn test_builder_provides_defaults() {
        let config = base_builder().build().unwrap();

        assert_eq!(config.base_url().as_ref(), "https://x.test/");
        assert_eq!(config.project_id().as_ref(), "7");
        assert!(config.user().is_none());
        assert!(config.password().is_none());
        assert!(!config.has_credentials());
        assert_eq!(config.logging(), &LoggingConfig::default());
    }

    #[test]
    fn test_has_credentials_requires_both_parts() {
        let only_user = base_builder()
            .user(Username::new("qa").unwrap())
            .build()
            .unwrap();
        assert!(!only_user.has_credentials());

        let both = base_builder()
            .user(Username::new("qa").unwrap())
            .password(ApiSecret::new("key").unwrap())
            .build()
            .unwrap();
        assert!(both.has_credentials());
    }

    #[test]
    fn test_config_debug_does_not_leak_secret() {
        let config = base_builder()
            .user(Username::new("qa").unwrap())
            .password(ApiSecret::new("hunter2").unwrap())
            .build()
            .unwrap();

        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("TestRailConfig"));
        assert!(!debug_str.contains("hunter2"));
    }

    #[test]
    fn test_load_from_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "testrail.toml",
                r#"
                [testrail]
                base_url = "https://x.test"
                project_id = 7
                user = "qa@example.com"
                password = "api-key"

                [api_logging]
                file = "api.log"
                level = "debug"
                "#,
            )?;

            let config = TestRailConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.base_url().as_ref(), "https://x.test/");
            assert_eq!(config.project_id().as_ref(), "7");
            assert_eq!(config.user().unwrap().as_ref(), "qa@example.com");
            assert_eq!(config.password().unwrap().as_ref(), "api-key");
            assert_eq!(config.logging().file, Some(PathBuf::from("api.log")));
            assert_eq!(config.logging().level, LogLevel::Debug);
            Ok(())
        });
    }

    #[test]
    fn test_environment_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "custom.toml",
                r#"
                [testrail]
                base_url = "https://x.test"
                project_id = "3"
                user = "qa"
                password = "from-file"
                "#,
            )?;
            jail.set_env("TR_TESTRAIL__PASSWORD", "from-env");
            jail.set_env("TR_API_LOGGING__LEVEL", "error");

            let config = TestRailConfig::load_from("custom.toml").map_err(|e| e.to_string())?;
            assert_eq!(config.password().unwrap().as_ref(), "from-env");
            assert_eq!(config.logging().level, LogLevel::Error);
            assert!(config.logging().file.is_none());
            Ok(())
        });
    }

    #[test]
    fn test_numeric_and_boolean_credentials_from_environment() {
        Jail::expect_with(|jail| {
            jail.set_env("TR_TESTRAIL__BASE_URL", "https://x.test");
            jail.set_env("TR_TESTRAIL__PROJECT_ID", "3");
            jail.set_env("TR_TESTRAIL__USER", "true");
            jail.set_env("TR_TESTRAIL__PASSWORD", "123456");

            let config = TestRailConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.user().unwrap().as_ref(), "true");
            assert_eq!(config.password().unwrap().as_ref(), "123456");
            Ok(())
        });
    }

    #[test]
    fn test_environment_credentials_keep_exact_text() {
        Jail::expect_with(|jail| {
            jail.set_env("TR_TESTRAIL__BASE_URL", "https://x.test");
            jail.set_env("TR_TESTRAIL__PROJECT_ID", "3");
            jail.set_env("TR_TESTRAIL__USER", "007");
            jail.set_env("TR_TESTRAIL__PASSWORD", "1.50");

            let config = TestRailConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.user().unwrap().as_ref(), "007");
            assert_eq!(config.password().unwrap().as_ref(), "1.50");
            Ok(())
        });
    }

    #[test]
    fn test_scalar_credentials_in_file_become_strings() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "testrail.toml",
                r#"
                [testrail]
                base_url = "https://x.test"
                project_id = 3
                user = false
                password = 123456
                "#,
            )?;

            let config = TestRailConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.user().unwrap().as_ref(), "false");
            assert_eq!(config.password().unwrap().as_ref(), "123456");
            Ok(())
        });
    }

    #[test]
    fn test_empty_credentials_are_absent() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "testrail.toml",
                r#"
                [testrail]
                base_url = "https://x.test"
                project_id = "3"
                user = ""
                password = ""
                "#,
            )?;

            let config = TestRailConfig::load().map_err(|e| e.to_string())?;
            assert!(!config.has_credentials());
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_missing_base_url() {
        Jail::expect_with(|jail| {
            jail.create_file("testrail.toml", "[testrail]\nproject_id = 1\n")?;

            let result = TestRailConfig::load();
            assert!(matches!(
                result,
                Err(ConfigError::MissingRequiredField { field: "base_url" })
            ));
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid_base_url() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "testrail.toml",
                "[testrail]\nbase_url = \"x.test\"\nproject_id = 1\n",
            )?;

            let result = TestRailConfig::load();
            assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
            Ok(())
        });
    }

    #[test]
    fn test_unknown_log_level_defaults_to_info() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "testrail.toml",
                r#"
                [testrail]
                base_url = "https://x.test"
                project_id = 1

                [api_logging]
                level = "loud"
                "#,
            )?;

            let config = TestRailConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.logging().level, LogLevel::Info);
            Ok(())
        });
    }
}
