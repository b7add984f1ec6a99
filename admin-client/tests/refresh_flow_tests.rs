//! Executor and refresh-policy tests against a mock backend.

use std::sync::Arc;

use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use support_admin_client::{
    ApiClient, ApiConfig, ApiError, FilePart, KeyValueStorage, MemoryStorage, RequestSpec,
    SessionState, TokenPair, REFRESH_PATH,
};

/// Matches requests carrying no `Authorization` header at all.
struct NoAuthHeader;

impl wiremock::Match for NoAuthHeader {
    fn matches(&self, request: &Request) -> bool {
        !request.headers.contains_key("authorization")
    }
}

/// Matches multipart requests (content type set by the transport, with a
/// boundary, never `application/json`).
struct MultipartContentType;

impl wiremock::Match for MultipartContentType {
    fn matches(&self, request: &Request) -> bool {
        request
            .headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("multipart/form-data") && v.contains("boundary="))
    }
}

fn client_for(server: &MockServer) -> Arc<ApiClient> {
    let storage: Arc<dyn KeyValueStorage> = Arc::new(MemoryStorage::new());
    Arc::new(ApiClient::new(ApiConfig::new(server.uri()), storage).expect("client should build"))
}

#[tokio::test]
async fn test_refresh_success_replays_original_request() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    client
        .tokens()
        .set(TokenPair::new("stale", "R1"))
        .expect("seed tokens");

    Mock::given(method("GET"))
        .and(path("/customers"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(REFRESH_PATH))
        .and(NoAuthHeader)
        .and(body_json(json!({"refreshToken": "R1"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"accessToken": "fresh", "refreshToken": "R2"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/customers"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(1)
        .mount(&server)
        .await;

    let body = client
        .execute(RequestSpec::get("/customers"))
        .await
        .expect("request should resolve with the replayed body");

    assert_eq!(body, json!({"items": []}));
    assert_eq!(client.tokens().get(), Some(TokenPair::new("fresh", "R2")));
}

#[tokio::test]
async fn test_refresh_failure_clears_tokens_and_signals_once() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    client
        .tokens()
        .set(TokenPair::new("stale", "R1"))
        .expect("seed tokens");

    Mock::given(method("GET"))
        .and(path("/customers"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(REFRESH_PATH))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = client.session_state();
    assert_eq!(*session.borrow_and_update(), SessionState::Active);

    let err = client
        .execute(RequestSpec::get("/customers"))
        .await
        .expect_err("the original call must not resolve with a value");

    assert!(matches!(err, ApiError::SessionExpired));
    assert_eq!(client.tokens().get(), None);

    // The terminated signal is observed exactly once.
    assert!(session.has_changed().expect("sender alive"));
    assert_eq!(*session.borrow_and_update(), SessionState::Expired);
    assert!(!session.has_changed().expect("sender alive"));
}

#[tokio::test]
async fn test_replay_401_propagates_without_second_refresh() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    client
        .tokens()
        .set(TokenPair::new("stale", "R1"))
        .expect("seed tokens");

    // The endpoint rejects the fresh token too.
    Mock::given(method("GET"))
        .and(path("/customers"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(REFRESH_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"accessToken": "fresh", "refreshToken": "R2"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = client
        .execute(RequestSpec::get("/customers"))
        .await
        .expect_err("replay failure must propagate");

    assert!(matches!(err, ApiError::Status { status: 401, .. }));
    // The refreshed pair was stored before the replay.
    assert_eq!(client.tokens().get(), Some(TokenPair::new("fresh", "R2")));
}

#[tokio::test]
async fn test_skip_auth_sends_no_header_and_never_refreshes() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    client
        .tokens()
        .set(TokenPair::new("AT", "RT"))
        .expect("seed tokens");

    // Only an auth-header-free request matches; a 401 must come straight
    // back without entering the refresh path.
    Mock::given(method("POST"))
        .and(path("/auth/password-reset/request"))
        .and(NoAuthHeader)
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(REFRESH_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client
        .execute(
            RequestSpec::post("/auth/password-reset/request")
                .with_json(json!({"email": "a@b.com"}))
                .without_auth(),
        )
        .await
        .expect_err("401 propagates untouched");

    assert!(matches!(err, ApiError::Status { status: 401, .. }));
    assert_eq!(client.tokens().get(), Some(TokenPair::new("AT", "RT")));
}

#[tokio::test]
async fn test_401_without_stored_tokens_is_not_refreshed() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/customers"))
        .and(NoAuthHeader)
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(REFRESH_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client
        .execute(RequestSpec::get("/customers"))
        .await
        .expect_err("no refresh token, no refresh");
    assert!(matches!(err, ApiError::Status { status: 401, .. }));
}

#[tokio::test]
async fn test_refresh_endpoint_401_does_not_recurse() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    client
        .tokens()
        .set(TokenPair::new("AT", "RT"))
        .expect("seed tokens");

    Mock::given(method("POST"))
        .and(path(REFRESH_PATH))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let err = client
        .execute(
            RequestSpec::post(REFRESH_PATH)
                .with_json(json!({"refreshToken": "RT"}))
                .without_auth(),
        )
        .await
        .expect_err("a direct refresh call fails like any request");
    assert!(matches!(err, ApiError::Status { status: 401, .. }));
}

#[tokio::test]
async fn test_concurrent_401s_share_one_refresh() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    client
        .tokens()
        .set(TokenPair::new("stale", "R1"))
        .expect("seed tokens");

    for p in ["/chats", "/orders"] {
        Mock::given(method("GET"))
            .and(path(p))
            .and(header("authorization", "Bearer stale"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(p))
            .and(header("authorization", "Bearer fresh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"path": p})))
            .mount(&server)
            .await;
    }

    Mock::given(method("POST"))
        .and(path(REFRESH_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"accessToken": "fresh", "refreshToken": "R2"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (a, b) = tokio::join!(
        client.execute(RequestSpec::get("/chats")),
        client.execute(RequestSpec::get("/orders")),
    );

    assert_eq!(a.expect("first caller resolves"), json!({"path": "/chats"}));
    assert_eq!(b.expect("second caller resolves"), json!({"path": "/orders"}));
}

#[tokio::test]
async fn test_malformed_success_body_is_fatal() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/analytics/overview"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = client
        .execute(RequestSpec::get("/analytics/overview"))
        .await
        .expect_err("undecodable success body is an error");
    assert!(matches!(err, ApiError::MalformedResponse { .. }));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_empty_success_body_reads_as_null() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    Mock::given(method("DELETE"))
        .and(path("/customers/e6f4a0d8-0000-0000-0000-000000000042"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let body = client
        .execute(RequestSpec::delete(
            "/customers/e6f4a0d8-0000-0000-0000-000000000042",
        ))
        .await
        .expect("204 resolves");
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_error_message_extracted_and_classified() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    Mock::given(method("POST"))
        .and(path("/customers"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "errors": [{"message": "email is invalid"}],
            "message": "validation failed",
        })))
        .mount(&server)
        .await;

    let err = client
        .execute(RequestSpec::post("/customers").with_json(json!({"email": "nope"})))
        .await
        .expect_err("422 is an error");

    match &err {
        ApiError::Status {
            status,
            message,
            payload,
        } => {
            assert_eq!(*status, 422);
            assert_eq!(message, "email is invalid");
            assert!(payload.is_some());
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        err.user_message(),
        "The provided data is invalid. Please check your input."
    );
}

#[tokio::test]
async fn test_transport_failure_is_status_zero() {
    // Nothing listens here.
    let storage: Arc<dyn KeyValueStorage> = Arc::new(MemoryStorage::new());
    let client = ApiClient::new(ApiConfig::new("http://127.0.0.1:9"), storage)
        .expect("client should build");

    let err = client
        .execute(RequestSpec::get("/customers"))
        .await
        .expect_err("no listener, no response");

    assert!(matches!(err, ApiError::Transport { .. }));
    assert_eq!(err.status_code(), 0);
    assert_eq!(
        err.user_message(),
        "Unable to connect. Please check your internet connection."
    );
}

#[tokio::test]
async fn test_multipart_upload_keeps_transport_content_type() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    client
        .tokens()
        .set(TokenPair::new("AT", "RT"))
        .expect("seed tokens");

    Mock::given(method("POST"))
        .and(path("/uploads"))
        .and(header("authorization", "Bearer AT"))
        .and(MultipartContentType)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "7b5e1c2a-8d4f-4a6b-9c3d-2e1f0a9b8c7d",
            "fileName": "notes.pdf",
            "mimeType": "application/pdf",
            "sizeBytes": 3,
            "url": "https://files.example.com/notes.pdf",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let uploaded = client
        .upload_file(FilePart::new(
            "file",
            "notes.pdf",
            "application/pdf",
            vec![1, 2, 3],
        ))
        .await
        .expect("upload resolves");

    assert_eq!(uploaded.file_name, "notes.pdf");
    assert_eq!(uploaded.size_bytes, 3);
}
