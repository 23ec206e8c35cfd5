//! Integration tests for the request dispatcher.
//!
//! These tests run the dispatcher against a mock TestRail server and verify
//! URL construction, authentication, retry behavior and response
//! normalization.

mod common;

use std::net::TcpListener;
use std::time::{Duration, Instant};

use common::{api_path, dispatcher_for, AUTHORIZATION, USER};
use serde_json::json;
use testrail_api::auth::Credentials;
use testrail_api::{
    ApiError, ApplicationError, BaseUrl, HttpClient, HttpMethod, HttpRequest,
    MalformedResponseError, TransportExhaustedError,
};
use wiremock::matchers::{body_json, header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Successful exchanges
// ============================================================================

#[tokio::test]
async fn test_get_returns_body_unchanged_with_basic_auth() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(api_path("get_project/7"))
        .and(header("authorization", AUTHORIZATION))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7, "name": "Demo"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = dispatcher_for(&mock_server);
    let project = client.send_get("get_project/7").await.unwrap();

    assert_eq!(project, json!({"id": 7, "name": "Demo"}));
}

#[tokio::test]
async fn test_post_returns_server_response_not_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(api_path("add_suite/7"))
        .and(body_json(json!({"name": "S1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 99, "name": "S1", "project_id": 7})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = dispatcher_for(&mock_server);
    let suite = client
        .send_post("add_suite/7", json!({"name": "S1"}))
        .await
        .unwrap();

    assert_eq!(suite, json!({"id": 99, "name": "S1", "project_id": 7}));
}

#[tokio::test]
async fn test_empty_success_body_becomes_empty_object() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(api_path("close_run/11"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = dispatcher_for(&mock_server);
    let result = client.send_post("close_run/11", json!({})).await.unwrap();

    assert_eq!(result, json!({}));
}

#[tokio::test]
async fn test_path_query_fragments_are_sent_verbatim() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(api_path("get_runs/7&created_by=1,2&is_completed=0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = dispatcher_for(&mock_server);
    let runs = client
        .send_get("get_runs/7&created_by=1,2&is_completed=0")
        .await
        .unwrap();

    assert_eq!(runs, json!([]));
}

#[tokio::test]
async fn test_dispatch_accepts_prebuilt_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(api_path("delete_section/3"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = dispatcher_for(&mock_server);
    let request = HttpRequest::post_empty("delete_section/3");
    assert_eq!(request.http_method, HttpMethod::Post);

    assert_eq!(client.dispatch(&request).await.unwrap(), json!({}));
}

// ============================================================================
// Rate limiting
// ============================================================================

#[tokio::test]
async fn test_rate_limited_request_waits_retry_after_then_succeeds() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(api_path("add_suite/7"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "2"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(api_path("add_suite/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 99})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = dispatcher_for(&mock_server);
    let started = Instant::now();
    let suite = client
        .send_post("add_suite/7", json!({"name": "S1"}))
        .await
        .unwrap();

    assert_eq!(suite, json!({"id": 99}));
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(2), "waited only {elapsed:?}");
    assert!(elapsed < Duration::from_secs(10), "waited {elapsed:?}");
}

#[tokio::test]
async fn test_rate_limited_request_without_retry_after_waits_sixty_seconds() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(api_path("get_run/3"))
        .respond_with(ResponseTemplate::new(429).insert_header("Connection", "close"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(api_path("get_run/3"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Connection", "close")
                .set_body_json(json!({"id": 3})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = dispatcher_for(&mock_server);
    tokio::time::pause();
    let started = tokio::time::Instant::now();
    let request = HttpRequest::get("get_run/3");
    let run = client.dispatch(&request).await.unwrap();

    assert_eq!(run, json!({"id": 3}));
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(60), "waited only {elapsed:?}");
    assert!(elapsed < Duration::from_secs(61), "waited {elapsed:?}");
}

#[tokio::test]
async fn test_five_rate_limited_responses_exhaust_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(api_path("get_case/1"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .expect(5)
        .mount(&mock_server)
        .await;

    let client = dispatcher_for(&mock_server);
    let error = client.send_get("get_case/1").await.unwrap_err();

    match error {
        ApiError::TransportExhausted(TransportExhaustedError {
            method,
            url,
            code,
            tries,
        }) => {
            assert_eq!(method, HttpMethod::Get);
            assert_eq!(url, format!("{}/index.php?/api/v2/get_case/1", mock_server.uri()));
            assert_eq!(code, 429);
            assert_eq!(tries, 5);
        }
        other => panic!("Expected TransportExhausted, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limit_recovers_on_last_attempt() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(api_path("get_case/1"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(4)
        .expect(4)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(api_path("get_case/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = dispatcher_for(&mock_server);
    assert_eq!(client.send_get("get_case/1").await.unwrap(), json!({"id": 1}));
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_server_error_with_text_body_is_malformed_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(api_path("get_plan/3"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Error"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = dispatcher_for(&mock_server);
    let error = client.send_get("get_plan/3").await.unwrap_err();

    assert!(matches!(
        error,
        ApiError::MalformedResponse(MalformedResponseError { code: 500, ref body }) if body == "Internal Error"
    ));
}

#[tokio::test]
async fn test_error_field_is_application_error_for_any_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(api_path("get_project/8"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"error": "Field :project_id is not a valid or accessible project."})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(api_path("get_project/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "Maintenance"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = dispatcher_for(&mock_server);

    let error = client.send_get("get_project/8").await.unwrap_err();
    assert!(matches!(
        error,
        ApiError::Application(ApplicationError { code: 400, ref message })
            if message == "Field :project_id is not a valid or accessible project."
    ));

    let error = client.send_get("get_project/9").await.unwrap_err();
    assert!(matches!(
        error,
        ApiError::Application(ApplicationError { code: 200, ref message }) if message == "Maintenance"
    ));
}

#[tokio::test]
async fn test_terminal_status_without_body_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(api_path("add_run/7"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = dispatcher_for(&mock_server);
    let error = client
        .send_post("add_run/7", json!({"suite_id": 1, "name": "R"}))
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        ApiError::TransportExhausted(TransportExhaustedError {
            code: 403,
            tries: 1,
            method: HttpMethod::Post,
            ..
        })
    ));
}

#[tokio::test]
async fn test_unparsable_success_body_is_malformed_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(api_path("get_projects"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&mock_server)
        .await;

    let client = dispatcher_for(&mock_server);
    let error = client.send_get("get_projects").await.unwrap_err();

    assert!(matches!(
        error,
        ApiError::MalformedResponse(MalformedResponseError { code: 200, .. })
    ));
}

#[tokio::test]
async fn test_connection_failure_is_network_error() {
    // Grab a free port, then close it so nothing is listening.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let client = HttpClient::new(
        &BaseUrl::new(format!("http://127.0.0.1:{port}")).unwrap(),
        Credentials::new(USER, "secret"),
    )
    .unwrap();

    let error = client.send_get("get_projects").await.unwrap_err();
    assert!(matches!(error, ApiError::Network(_)));
}

#[tokio::test]
async fn test_payload_on_get_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(api_path("get_case/1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = dispatcher_for(&mock_server);
    let request = HttpRequest {
        http_method: HttpMethod::Get,
        path: "get_case/1".to_string(),
        payload: Some(json!({"title": "x"})),
    };

    let error = client.dispatch(&request).await.unwrap_err();
    assert!(matches!(error, ApiError::Precondition(_)));
}
