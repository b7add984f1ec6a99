//! Session facade tests against a mock backend.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use support_admin_client::session::SESSION_STORAGE_KEY;
use support_admin_client::{
    ApiClient, ApiConfig, Credentials, KeyValueStorage, MemoryStorage, SessionManager, TokenPair,
};

struct NoAuthHeader;

impl wiremock::Match for NoAuthHeader {
    fn matches(&self, request: &Request) -> bool {
        !request.headers.contains_key("authorization")
    }
}

fn manager_for(server: &MockServer) -> (SessionManager, Arc<ApiClient>, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let client = Arc::new(
        ApiClient::new(
            ApiConfig::new(server.uri()),
            Arc::clone(&storage) as Arc<dyn KeyValueStorage>,
        )
        .expect("client should build"),
    );
    let manager = SessionManager::new(
        Arc::clone(&client),
        Arc::clone(&storage) as Arc<dyn KeyValueStorage>,
    );
    (manager, client, storage)
}

#[tokio::test]
async fn test_login_envelope_shape_persists_session_and_tokens() {
    let server = MockServer::start().await;
    let (manager, client, _storage) = manager_for(&server);

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(NoAuthHeader)
        .and(body_json(json!({"email": "a@b.com", "password": "x"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "user": {"id": 1},
                "tokens": {"accessToken": "AT", "refreshToken": "RT"}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let record = manager
        .login(&Credentials::new("a@b.com", "x"))
        .await
        .expect("login resolves");

    assert_eq!(record.access_token, "AT");
    assert_eq!(record.refresh_token, "RT");
    assert_eq!(record.token, "AT");
    assert_eq!(record.user, json!({"id": 1}));

    // Token store and persisted record are in sync.
    assert_eq!(client.tokens().get(), Some(TokenPair::new("AT", "RT")));
    assert_eq!(manager.session(), Some(record));
}

#[tokio::test]
async fn test_login_flat_shape_normalizes_identically() {
    let server = MockServer::start().await;
    let (manager, client, _storage) = manager_for(&server);

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": 2, "role": "agent"},
            "accessToken": "AT2",
            "refreshToken": "RT2"
        })))
        .mount(&server)
        .await;

    let record = manager
        .login(&Credentials::new("b@c.com", "y"))
        .await
        .expect("login resolves");

    assert_eq!(record.access_token, "AT2");
    assert_eq!(record.user["role"], "agent");
    assert_eq!(client.tokens().get(), Some(TokenPair::new("AT2", "RT2")));
}

#[tokio::test]
async fn test_login_rejection_classifies_as_invalid_credentials() {
    let server = MockServer::start().await;
    let (manager, client, _storage) = manager_for(&server);

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "bad credentials"})),
        )
        .mount(&server)
        .await;

    let err = manager
        .login(&Credentials::new("a@b.com", "wrong"))
        .await
        .expect_err("401 login fails");

    assert_eq!(err.user_message(), "Invalid email or password.");
    assert_eq!(client.tokens().get(), None);
    assert_eq!(manager.session(), None);
}

#[tokio::test]
async fn test_login_unknown_shape_is_rejected() {
    let server = MockServer::start().await;
    let (manager, _client, _storage) = manager_for(&server);

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let err = manager
        .login(&Credentials::new("a@b.com", "x"))
        .await
        .expect_err("shape matching neither variant is an error");
    assert!(matches!(
        err,
        support_admin_client::ApiError::MalformedResponse { .. }
    ));
}

#[tokio::test]
async fn test_logout_clears_local_state_even_when_backend_fails() {
    let server = MockServer::start().await;
    let (manager, client, storage) = manager_for(&server);

    // Seed a signed-in state directly.
    client
        .tokens()
        .set(TokenPair::new("AT", "RT"))
        .expect("seed tokens");
    storage
        .store(
            SESSION_STORAGE_KEY,
            r#"{"token":"AT","accessToken":"AT","refreshToken":"RT","user":{"id":1}}"#,
        )
        .expect("seed session");

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    manager.logout().await.expect("logout resolves regardless");

    assert_eq!(client.tokens().get(), None);
    assert_eq!(manager.session(), None);
}

#[tokio::test]
async fn test_session_read_fails_soft() {
    let server = MockServer::start().await;
    let (manager, _client, storage) = manager_for(&server);

    // Missing record.
    assert_eq!(manager.session(), None);

    // Unparsable record.
    storage
        .store(SESSION_STORAGE_KEY, "definitely not json")
        .expect("seed garbage");
    assert_eq!(manager.session(), None);
}

#[tokio::test]
async fn test_password_setup_signs_in_like_login() {
    let server = MockServer::start().await;
    let (manager, client, _storage) = manager_for(&server);

    Mock::given(method("POST"))
        .and(path("/auth/password-setup"))
        .and(NoAuthHeader)
        .and(body_json(json!({"token": "invite-1", "password": "new-pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": 7},
            "accessToken": "AT7",
            "refreshToken": "RT7"
        })))
        .mount(&server)
        .await;

    let record = manager
        .setup_password("invite-1", &secrecy::SecretString::from("new-pw".to_string()))
        .await
        .expect("password setup resolves");

    assert_eq!(record.access_token, "AT7");
    assert_eq!(client.tokens().get(), Some(TokenPair::new("AT7", "RT7")));
    assert_eq!(manager.session(), Some(record));
}

#[tokio::test]
async fn test_invitation_validation_is_unauthenticated() {
    let server = MockServer::start().await;
    let (manager, client, _storage) = manager_for(&server);
    client
        .tokens()
        .set(TokenPair::new("AT", "RT"))
        .expect("seed tokens");

    Mock::given(method("GET"))
        .and(path("/auth/invitations/invite-9"))
        .and(NoAuthHeader)
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"email": "new@agent.com"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let details = manager
        .validate_invitation("invite-9")
        .await
        .expect("validation resolves");
    assert_eq!(details["email"], "new@agent.com");
}
