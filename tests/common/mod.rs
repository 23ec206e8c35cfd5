//! Shared helpers for the integration tests.
//!
//! TestRail routes every call through `index.php?/api/v2/<method>`, so the
//! method path lives in the query string. [`api_path`] matches on it.

#![allow(dead_code)]

use serde_json::{json, Value};
use testrail_api::auth::Credentials;
use testrail_api::{
    ApiSecret, BaseUrl, HttpClient, ProjectId, TestRailClient, TestRailConfig, Username,
};
use wiremock::matchers::method;
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

pub const PROJECT_ID: &str = "7";
pub const USER: &str = "qa@example.com";
pub const SECRET: &str = "api-key";

/// `Authorization` value for [`USER`] and [`SECRET`].
pub const AUTHORIZATION: &str = "Basic cWFAZXhhbXBsZS5jb206YXBpLWtleQ==";

/// Matches requests for `index.php?/api/v2/<path>`.
pub struct ApiPath(String);

impl Match for ApiPath {
    fn matches(&self, request: &Request) -> bool {
        request.url.path() == "/index.php"
            && request.url.query() == Some(format!("/api/v2/{}", self.0).as_str())
    }
}

/// Matches the API method path exactly, query fragments included.
pub fn api_path(path: &str) -> ApiPath {
    ApiPath(path.to_string())
}

/// The status list most TestRail instances ship with.
pub fn default_statuses() -> Value {
    json!([
        {"id": 1, "name": "passed", "label": "Passed", "is_system": true, "is_untested": false, "is_final": true},
        {"id": 2, "name": "blocked", "label": "Blocked", "is_system": true, "is_untested": false, "is_final": true},
        {"id": 3, "name": "untested", "label": "Untested", "is_system": true, "is_untested": true, "is_final": false},
        {"id": 4, "name": "retest", "label": "Retest", "is_system": true, "is_untested": false, "is_final": false},
        {"id": 5, "name": "failed", "label": "Failed", "is_system": true, "is_untested": false, "is_final": true}
    ])
}

/// Configuration pointing at the mock server, with credentials.
pub fn config_for(server: &MockServer) -> TestRailConfig {
    TestRailConfig::builder()
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .project_id(ProjectId::new(PROJECT_ID).unwrap())
        .user(Username::new(USER).unwrap())
        .password(ApiSecret::new(SECRET).unwrap())
        .build()
        .unwrap()
}

/// A bare dispatcher pointing at the mock server.
pub fn dispatcher_for(server: &MockServer) -> HttpClient {
    HttpClient::new(
        &BaseUrl::new(server.uri()).unwrap(),
        Credentials::new(USER, SECRET),
    )
    .unwrap()
}

/// Mounts the status list and opens a session against the mock server.
pub async fn start_session(server: &MockServer) -> TestRailClient {
    Mock::given(method("GET"))
        .and(api_path("get_statuses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(default_statuses()))
        .expect(1)
        .mount(server)
        .await;

    TestRailClient::connect(&config_for(server)).await.unwrap()
}
