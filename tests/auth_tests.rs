mod common;

use std::sync::Arc;

use chrono::Utc;
use common::{admin_for, data, unsigned_jwt, user_json};
use estate_admin::auth::{FileSessionStore, Session, SessionStore, ACCESS_DENIED};
use estate_admin::config::ClientOptions;
use estate_admin::forms::{LoginForm, INVALID_CREDENTIALS};
use estate_admin::{EstateAdmin, Error};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_login(server: &MockServer, role: &str, token: &str) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({
            "email": "admin@example.com",
            "password": "password123"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(data(json!({
            "user": user_json("a1", role),
            "token": token
        }))))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_admin_login_authorizes_later_requests() {
    let mock_server = MockServer::start().await;
    let token = unsigned_jwt(Utc::now().timestamp() + 3600);
    mount_login(&mock_server, "admin", &token).await;

    Mock::given(method("GET"))
        .and(path("/api/appointments"))
        .and(header("Authorization", format!("Bearer {}", token).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(data(json!([]))))
        .expect(1)
        .mount(&mock_server)
        .await;

    let admin = admin_for(&mock_server);
    let session = admin
        .auth()
        .login("admin@example.com", "password123")
        .await
        .unwrap();
    assert!(session.is_admin());
    assert!(session.expires_at.is_some());
    assert_eq!(admin.auth().session().map(|s| s.token), Some(token));

    let appointments = admin.appointments().list().await.unwrap();
    assert!(appointments.is_empty());
}

#[tokio::test]
async fn test_non_admin_login_is_refused() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, "broker", "opaque-token").await;

    let admin = admin_for(&mock_server);
    let err = admin
        .auth()
        .login("admin@example.com", "password123")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Auth(ref msg) if msg == ACCESS_DENIED));
    assert!(admin.auth().session().is_none());
}

#[tokio::test]
async fn test_admin_gate_can_be_disabled() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, "broker", "opaque-token").await;

    let options = ClientOptions::default().with_require_admin(false);
    let admin = EstateAdmin::new_with_options(&mock_server.uri(), options).unwrap();
    let session = admin
        .auth()
        .login("admin@example.com", "password123")
        .await
        .unwrap();
    assert!(!session.is_admin());
    assert_eq!(session.expires_at, None);
}

#[tokio::test]
async fn test_login_form_writes_the_auth_slice() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, "admin", "opaque-token").await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Incorrect password"
        })))
        .mount(&mock_server)
        .await;

    let admin = admin_for(&mock_server);
    let slice = &admin.store().auth;

    let err = LoginForm::new("admin@example.com", "wrong")
        .submit(admin.auth(), slice)
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), INVALID_CREDENTIALS);
    let snapshot = slice.snapshot().await;
    assert_eq!(snapshot.error(), Some(INVALID_CREDENTIALS));
    assert!(!snapshot.loading());

    let session = LoginForm::new("admin@example.com", "password123")
        .submit(admin.auth(), slice)
        .await
        .unwrap();
    let snapshot = slice.snapshot().await;
    assert_eq!(snapshot.data().map(|s| s.token.as_str()), Some("opaque-token"));
    assert!(snapshot.error().is_none());
    assert_eq!(session.user.id, "a1");
}

#[tokio::test]
async fn test_login_form_keeps_access_denied_text() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, "buyer", "opaque-token").await;

    let admin = admin_for(&mock_server);
    let err = LoginForm::new("admin@example.com", "password123")
        .submit(admin.auth(), &admin.store().auth)
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), ACCESS_DENIED);
}

#[tokio::test]
async fn test_session_survives_restart_in_file_store() {
    let mock_server = MockServer::start().await;
    let token = unsigned_jwt(Utc::now().timestamp() + 3600);
    mount_login(&mock_server, "admin", &token).await;

    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileSessionStore::new(dir.path().join("session.json")));
    let options = ClientOptions::default().with_session_store(store.clone());

    let first = EstateAdmin::new_with_options(&mock_server.uri(), options.clone()).unwrap();
    first
        .auth()
        .login("admin@example.com", "password123")
        .await
        .unwrap();

    let second = EstateAdmin::new_with_options(&mock_server.uri(), options).unwrap();
    let restored = second.restore_session().await.unwrap().unwrap();
    assert_eq!(restored.token, token);
    assert_eq!(second.auth().session().map(|s| s.user.id), Some("a1".to_string()));
    assert!(second.store().auth.snapshot().await.data().is_some());

    second.logout().await.unwrap();
    assert!(second.auth().session().is_none());
    assert!(store.load().await.unwrap().is_none());
    assert!(second.store().auth.snapshot().await.data().is_none());
}

#[tokio::test]
async fn test_expired_session_is_not_restored() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileSessionStore::new(dir.path().join("session.json")));
    let user = serde_json::from_value(user_json("a1", "admin")).unwrap();
    let stale = Session::new(unsigned_jwt(Utc::now().timestamp() - 60), user);
    store.save(&stale).await.unwrap();

    let options = ClientOptions::default().with_session_store(store.clone());
    let admin = EstateAdmin::new_with_options("http://localhost:9", options).unwrap();

    assert!(admin.restore_session().await.unwrap().is_none());
    assert!(admin.auth().session().is_none());
    assert!(store.load().await.unwrap().is_none());
}
