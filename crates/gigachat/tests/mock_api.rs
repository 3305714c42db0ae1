//! Mock API tests for the gigachat library.
//!
//! These tests use wiremock to simulate the OAuth and API endpoints and
//! test the library's behavior without network access or real credentials.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use gigachat::error::AuthError;
use gigachat::{ApiUrl, Client, Credentials, Error, Session, TrustConfig};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_json, body_string, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const OAUTH_PATH: &str = "/api/v2/oauth";

fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

fn trust() -> TrustConfig {
    TrustConfig::from_pem_file(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/test_root_ca.pem"
    ))
    .unwrap()
}

/// Helper to build a session pointed at a mock server.
fn mock_session(server: &MockServer) -> Session {
    let oauth = ApiUrl::new(format!("{}{}", server.uri(), OAUTH_PATH)).unwrap();
    let api = ApiUrl::new(server.uri()).unwrap();
    Session::with_endpoints(oauth, api, trust()).unwrap()
}

fn credentials() -> Credentials {
    Credentials::new("test-key", "GIGACHAT_API_PERS")
}

/// An OAuth mock returning the given token and expiry.
fn oauth_mock(access_token: &str, expires_at: i64) -> Mock {
    Mock::given(method("POST"))
        .and(path(OAUTH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": access_token,
            "expires_at": expires_at
        })))
}

// ============================================================================
// Credential Exchange Tests
// ============================================================================

#[tokio::test]
async fn test_connect_sends_exchange_request_shape() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(OAUTH_PATH))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(header("accept", "application/json"))
        .and(header("authorization", "Basic test-key"))
        .and(header_exists("RqUID"))
        .and(body_string("scope=GIGACHAT_API_PERS"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "token-1",
            "expires_at": now() + 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::connect(mock_session(&server), credentials()).await;
    assert!(client.is_ok());
}

#[tokio::test]
async fn test_connect_rejected_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(OAUTH_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "unauthorized"
        })))
        .mount(&server)
        .await;

    let result = Client::connect(mock_session(&server), credentials()).await;

    match result {
        Err(Error::Auth(AuthError::ExchangeFailed { status, body })) => {
            assert_eq!(status, 401);
            assert!(body.contains("unauthorized"));
        }
        other => panic!("expected ExchangeFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_connect_response_missing_token_fields() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(OAUTH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"foo": "bar"})))
        .mount(&server)
        .await;

    let result = Client::connect(mock_session(&server), credentials()).await;

    match result {
        Err(Error::Auth(AuthError::TokenMissing { body })) => {
            assert!(body.contains("foo"));
        }
        other => panic!("expected TokenMissing, got {other:?}"),
    }
}

#[tokio::test]
async fn test_connect_non_json_success_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(OAUTH_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html>gateway</html>")
                .insert_header("content-type", "text/html"),
        )
        .mount(&server)
        .await;

    let result = Client::connect(mock_session(&server), credentials()).await;
    assert!(matches!(
        result,
        Err(Error::Auth(AuthError::TokenMissing { .. }))
    ));
}

// ============================================================================
// Token Refresh Tests
// ============================================================================

#[tokio::test]
async fn test_fresh_token_is_reused_without_second_exchange() {
    let server = MockServer::start().await;

    oauth_mock("token-1", now() + 3600)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/models"))
        .and(header("authorization", "Bearer token-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::connect(mock_session(&server), credentials())
        .await
        .unwrap();

    let response = client.list_models().await.unwrap();
    assert!(response.status().is_success());
}

#[tokio::test]
async fn test_token_inside_margin_triggers_one_refresh() {
    let server = MockServer::start().await;

    // Initial exchange yields a token already inside the 60s margin
    oauth_mock("stale-token", now() + 30)
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    oauth_mock("fresh-token", now() + 3600)
        .expect(1)
        .mount(&server)
        .await;

    // The domain request must carry the refreshed token
    Mock::given(method("GET"))
        .and(path("/models"))
        .and(header("authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::connect(mock_session(&server), credentials())
        .await
        .unwrap();

    let response = client.list_models().await.unwrap();
    assert!(response.status().is_success());
}

#[tokio::test]
async fn test_concurrent_stale_calls_share_one_refresh() {
    let server = MockServer::start().await;

    oauth_mock("stale-token", now() + 30)
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    // Delay the refresh response so the second caller observes the stale
    // token while the first caller's exchange is still in flight
    Mock::given(method("POST"))
        .and(path(OAUTH_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "access_token": "fresh-token",
                    "expires_at": now() + 3600
                }))
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/models"))
        .and(header("authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(2)
        .mount(&server)
        .await;

    let client = Client::connect(mock_session(&server), credentials())
        .await
        .unwrap();

    let (first, second) = tokio::join!(client.list_models(), client.list_models());
    assert!(first.unwrap().status().is_success());
    assert!(second.unwrap().status().is_success());
}

#[tokio::test]
async fn test_each_exchange_sends_fresh_rquid() {
    let server = MockServer::start().await;

    // Stale initial token forces a second exchange on the first domain call
    oauth_mock("stale-token", now() + 30)
        .up_to_n_times(1)
        .mount(&server)
        .await;
    oauth_mock("fresh-token", now() + 3600).mount(&server).await;

    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let client = Client::connect(mock_session(&server), credentials())
        .await
        .unwrap();
    client.list_models().await.unwrap();

    let rquids: Vec<Uuid> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|request| request.url.path() == OAUTH_PATH)
        .map(|request| {
            let value = request
                .headers
                .get("RqUID")
                .expect("exchange request missing RqUID header");
            Uuid::parse_str(value.to_str().unwrap()).expect("RqUID is not a valid UUID")
        })
        .collect();

    assert_eq!(rquids.len(), 2);
    assert_ne!(rquids[0], rquids[1]);
}

#[tokio::test]
async fn test_failed_refresh_fails_the_call() {
    let server = MockServer::start().await;

    oauth_mock("stale-token", now() + 30)
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(OAUTH_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "key revoked"
        })))
        .mount(&server)
        .await;

    let client = Client::connect(mock_session(&server), credentials())
        .await
        .unwrap();

    // No stale-token fallback: the domain call surfaces the auth error
    let result = client.list_models().await;
    assert!(matches!(
        result,
        Err(Error::Auth(AuthError::ExchangeFailed { status: 401, .. }))
    ));
}

// ============================================================================
// Domain Operation Tests
// ============================================================================

#[tokio::test]
async fn test_send_chat_body_shape() {
    let server = MockServer::start().await;

    oauth_mock("token-1", now() + 3600).mount(&server).await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer token-1"))
        .and(body_json(json!({
            "model": "M",
            "messages": [
                {"role": "system", "content": "be nice"},
                {"role": "user", "content": "hi"}
            ],
            "stream": false,
            "update_interval": 0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "hello"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::connect(mock_session(&server), credentials())
        .await
        .unwrap();

    let response = client.send_chat("M", "hi", "be nice").await.unwrap();
    assert!(response.status().is_success());
}

#[tokio::test]
async fn test_domain_error_status_passes_through() {
    let server = MockServer::start().await;

    oauth_mock("token-1", now() + 3600).mount(&server).await;

    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let client = Client::connect(mock_session(&server), credentials())
        .await
        .unwrap();

    // No status interpretation on domain calls
    let response = client.list_models().await.unwrap();
    assert_eq!(response.status().as_u16(), 503);
    assert_eq!(response.text().await.unwrap(), "overloaded");
}

// ============================================================================
// Teardown Tests
// ============================================================================

#[tokio::test]
async fn test_call_after_close_fails() {
    let server = MockServer::start().await;

    oauth_mock("token-1", now() + 3600).mount(&server).await;

    let client = Client::connect(mock_session(&server), credentials())
        .await
        .unwrap();

    client.close();

    let result = client.list_models().await;
    assert!(matches!(result, Err(Error::SessionClosed)));
}
