mod common;

use std::collections::HashMap;

use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::StatusCode;
use serde_json::json;
use spotilink::{
    Error,
    management::SessionStore,
    spotify::{
        AuthFlow,
        auth::{AuthState, LOGIN_SCOPES, Scopes},
    },
    types::Session,
};
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn flow(server: &MockServer, dir: &TempDir) -> AuthFlow {
    let store = SessionStore::new(dir.path().join("session.json"));
    AuthFlow::new(common::auth_config(server), store)
}

async fn mount_token_ok(server: &MockServer) {
    let credentials = STANDARD.encode("client-id:client-secret");
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(header("authorization", format!("Basic {}", credentials).as_str()))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=good-code"))
        .and(body_string_contains(
            "redirect_uri=http%3A%2F%2F127.0.0.1%3A8888%2Fcallback",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-123",
            "token_type": "Bearer",
            "expires_in": 3600,
            "scope": "user-read-private user-read-email"
        })))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_token_rejected(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid authorization code"
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[test]
fn test_authorize_url_carries_request() {
    let server_uri = "http://127.0.0.1:9";
    let dir = TempDir::new().unwrap();
    let config = spotilink::config::AuthConfig {
        client_id: "client-id".to_string(),
        client_secret: "client-secret".to_string(),
        redirect_uri: common::REDIRECT_URI.to_string(),
        auth_url: format!("{}/authorize", server_uri),
        token_url: format!("{}/api/token", server_uri),
        api_url: format!("{}/v1", server_uri),
    };
    let flow = AuthFlow::new(config, SessionStore::new(dir.path().join("session.json")));

    let url = flow.authorize_url().unwrap();
    assert_eq!(url.path(), "/authorize");

    let params: HashMap<String, String> = url.query_pairs().into_owned().collect();
    assert_eq!(params["response_type"], "code");
    assert_eq!(params["client_id"], "client-id");
    assert_eq!(params["redirect_uri"], common::REDIRECT_URI);

    let scopes: Vec<&str> = params["scope"].split(' ').collect();
    assert_eq!(scopes.len(), LOGIN_SCOPES.len());
    assert!(scopes.contains(&"ugc-image-upload"));
    assert!(scopes.contains(&"playlist-modify-private"));

    // The client secret never travels through the browser
    assert!(!url.as_str().contains("client-secret"));
}

#[test]
fn test_scopes_drop_duplicates() {
    let scopes = Scopes::new([
        "playlist-modify-public",
        "streaming",
        "playlist-modify-public",
    ]);
    assert_eq!(scopes.len(), 2);
    assert_eq!(scopes.joined(), "playlist-modify-public streaming");
    assert!(scopes.contains("streaming"));

    let login = Scopes::login();
    assert_eq!(login.len(), LOGIN_SCOPES.len());
}

#[tokio::test]
async fn test_fresh_flow_is_unauthenticated() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let mut flow = flow(&server, &dir);

    assert_eq!(flow.state(), AuthState::Unauthenticated);
    assert!(!flow.is_authenticated());

    flow.prepare_login().unwrap();
    assert_eq!(flow.state(), AuthState::AwaitingCallback);
}

#[tokio::test]
async fn test_handle_callback_exchanges_code_then_fetches_profile() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_token_ok(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .and(header("authorization", "Bearer access-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "user-1",
            "display_name": "Ada",
            "email": "ada@example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut flow = flow(&server, &dir);
    flow.prepare_login().unwrap();
    let user = flow.handle_callback("good-code").await.unwrap();

    assert_eq!(user.id, "user-1");
    assert_eq!(flow.state(), AuthState::Authenticated);
    assert!(flow.is_authenticated());
    assert_eq!(flow.session().token.as_deref(), Some("access-123"));
    assert_eq!(flow.session().user.as_ref().map(|u| u.id.as_str()), Some("user-1"));

    let requests = server.received_requests().await.unwrap();
    let paths: Vec<&str> = requests.iter().map(|r| r.url.path()).collect();
    assert_eq!(paths, vec!["/api/token", "/v1/me"]);

    // The session survives a restart
    let reloaded = SessionStore::load_from(dir.path().join("session.json"))
        .await
        .unwrap();
    assert_eq!(reloaded.session(), flow.session());
}

#[tokio::test]
async fn test_reused_code_leaves_session_untouched() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_token_rejected(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut flow = flow(&server, &dir);
    flow.prepare_login().unwrap();

    let err = flow.handle_callback("used-code").await.unwrap_err();
    match &err {
        Error::AuthExchange { status, message } => {
            assert_eq!(*status, StatusCode::BAD_REQUEST);
            assert!(message.contains("invalid_grant"));
        }
        other => panic!("expected AuthExchange, got {:?}", other),
    }
    assert!(err.needs_login());

    assert_eq!(flow.state(), AuthState::Unauthenticated);
    assert_eq!(flow.session(), &Session::default());
    assert!(!dir.path().join("session.json").exists());
}

#[tokio::test]
async fn test_rejected_code_keeps_previous_session() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_token_rejected(&server).await;

    let mut store = SessionStore::new(dir.path().join("session.json"));
    store.set_token("old-token");
    store.set_user(common::user());
    let before = store.session().clone();

    let mut flow = AuthFlow::new(common::auth_config(&server), store);
    assert!(flow.handle_callback("used-code").await.is_err());

    assert_eq!(flow.session(), &before);
    assert_eq!(flow.state(), AuthState::Authenticated);
}

#[tokio::test]
async fn test_token_response_without_access_token_is_rejected() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token_type": "Bearer" })))
        .mount(&server)
        .await;

    let mut flow = flow(&server, &dir);
    let err = flow.handle_callback("good-code").await.unwrap_err();

    assert!(matches!(err, Error::AuthExchange { .. }));
    assert!(!flow.is_authenticated());
}

#[tokio::test]
async fn test_profile_failure_rolls_back_token() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_token_ok(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "status": 403, "message": "User not registered in the Developer Dashboard" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut flow = flow(&server, &dir);
    flow.prepare_login().unwrap();

    let err = flow.handle_callback("good-code").await.unwrap_err();
    match &err {
        Error::ProfileFetch(source) => {
            assert!(matches!(**source, Error::ApiRequest { .. }));
            assert!(source.to_string().contains("User not registered"));
        }
        other => panic!("expected ProfileFetch, got {:?}", other),
    }
    assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
    assert!(!err.needs_login());

    assert_eq!(flow.state(), AuthState::Unauthenticated);
    assert!(!flow.is_authenticated());
    assert_eq!(flow.store().token(), None);
    assert!(!dir.path().join("session.json").exists());
}

#[tokio::test]
async fn test_logout_clears_session() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_token_ok(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "user-1" })))
        .mount(&server)
        .await;

    let mut flow = flow(&server, &dir);
    flow.handle_callback("good-code").await.unwrap();
    assert!(dir.path().join("session.json").exists());

    flow.logout().await.unwrap();

    assert_eq!(flow.state(), AuthState::Unauthenticated);
    assert!(!flow.is_authenticated());
    assert_eq!(flow.session(), &Session::default());
    assert!(!dir.path().join("session.json").exists());
}

#[tokio::test]
async fn test_flow_resumes_persisted_session() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");

    let mut store = SessionStore::new(path.clone());
    store.set_token("access-123");
    store.set_user(common::user());
    store.persist().await.unwrap();

    let store = SessionStore::load_from(path).await.unwrap();
    let flow = AuthFlow::new(common::auth_config(&server), store);

    assert_eq!(flow.state(), AuthState::Authenticated);
    assert_eq!(flow.store().user().map(|u| u.id.as_str()), Some("user-1"));
}

#[tokio::test]
async fn test_profile_rejecting_fresh_token_asks_for_login() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_token_ok(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "status": 401, "message": "Invalid access token" }
        })))
        .mount(&server)
        .await;

    let mut flow = flow(&server, &dir);
    let err = flow.handle_callback("good-code").await.unwrap_err();

    assert!(matches!(err, Error::ProfileFetch(_)));
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    assert!(err.needs_login());
}

#[tokio::test]
async fn test_unsaved_session_fails_sign_in() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_token_ok(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "user-1" })))
        .mount(&server)
        .await;

    // A directory where the session file should go cannot be replaced
    let session_path = dir.path().join("session.json");
    std::fs::create_dir(&session_path).unwrap();

    let mut flow = AuthFlow::new(
        common::auth_config(&server),
        SessionStore::new(session_path.clone()),
    );
    flow.prepare_login().unwrap();

    let err = flow.handle_callback("good-code").await.unwrap_err();

    assert!(matches!(err, Error::Io(_)));
    assert_eq!(flow.state(), AuthState::Unauthenticated);
    assert!(!flow.is_authenticated());
    assert_eq!(flow.session(), &Session::default());
    assert!(session_path.is_dir());
    assert!(!dir.path().join("session.json.tmp").exists());
}

#[tokio::test]
async fn test_sign_in_over_corrupt_session_file() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_token_ok(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "user-1" })))
        .mount(&server)
        .await;

    let session_path = dir.path().join("session.json");
    std::fs::write(&session_path, r#"{"token":"abc","user":{"display_na"#).unwrap();

    let store = SessionStore::load_or_reset_from(session_path.clone()).await;
    assert!(!store.is_authenticated());

    let mut flow = AuthFlow::new(common::auth_config(&server), store);
    flow.handle_callback("good-code").await.unwrap();

    let reloaded = SessionStore::load_from(session_path).await.unwrap();
    assert_eq!(reloaded.token(), Some("access-123"));
    assert_eq!(reloaded.user().map(|u| u.id.as_str()), Some("user-1"));
}

#[tokio::test]
async fn test_logout_removes_corrupt_session_file() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let session_path = dir.path().join("session.json");
    std::fs::write(&session_path, "{ not json").unwrap();

    let store = SessionStore::load_or_reset_from(session_path.clone()).await;
    let mut flow = AuthFlow::new(common::auth_config(&server), store);
    flow.logout().await.unwrap();

    assert!(!session_path.exists());
}
