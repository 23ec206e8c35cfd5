//! Authentication for TestRail API calls.
//!
//! TestRail uses HTTP Basic authentication with a user name and either the
//! account password or an API key. [`Credentials`] holds that pair and renders
//! the `Authorization` header value for each request.
//!
//! # Example
//!
//! ```rust
//! use testrail_api::auth::Credentials;
//!
//! let credentials = Credentials::new("user", "secret");
//! assert_eq!(credentials.authorization_header(), "Basic dXNlcjpzZWNyZXQ=");
//! ```

mod credentials;

pub use credentials::Credentials;
