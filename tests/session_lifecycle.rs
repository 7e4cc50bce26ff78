//! Integration tests for the session lifecycle: sign-in, restart, sign-out.
//!
//! Each test creates its own in-memory SQLite database. A "restart" is
//! simulated by building a fresh `SessionStore` over the same database, the
//! way a new process would reopen the same file.

use secrecy::SecretString;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kisan::auth::{AuthClient, SessionStore};
use kisan::i18n::Language;
use kisan::storage::Database;

const CREDENTIAL_BODY: &str = r#"{
    "idToken": "tok-lifecycle",
    "email": "farmer@example.com",
    "localId": "uid-lifecycle"
}"#;

async fn test_db() -> Database {
    Database::open(":memory:").await.unwrap()
}

fn auth_client(server_uri: &str) -> AuthClient {
    AuthClient::new(
        reqwest::Client::new(),
        server_uri,
        SecretString::from("integration-key".to_string()),
    )
}

// ============================================================================
// Sign-in and Restart
// ============================================================================

#[tokio::test]
async fn test_sign_in_persists_across_restart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts:signInWithPassword"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CREDENTIAL_BODY))
        .mount(&server)
        .await;

    let db = test_db().await;
    let store = SessionStore::new(db.clone());
    let auth = auth_client(&server.uri());

    let cred = auth
        .sign_in("farmer@example.com", &SecretString::from("pw".to_string()))
        .await
        .unwrap();
    store.save(&cred).await.unwrap();

    // Restart: a new store over the same database sees the session.
    let restarted = SessionStore::new(db);
    let restored = restarted.current().await.unwrap();
    assert_eq!(restored.email, "farmer@example.com");
    assert_eq!(restored.id_token, "tok-lifecycle");
}

#[tokio::test]
async fn test_startup_without_session_makes_no_remote_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let store = SessionStore::new(test_db().await);
    assert!(store.current().await.is_none());
}

#[tokio::test]
async fn test_startup_with_session_makes_no_remote_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts:signInWithPassword"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CREDENTIAL_BODY))
        .expect(1) // only the initial sign-in, nothing at "startup"
        .mount(&server)
        .await;

    let db = test_db().await;
    let store = SessionStore::new(db.clone());
    let auth = auth_client(&server.uri());
    let cred = auth
        .sign_in("farmer@example.com", &SecretString::from("pw".to_string()))
        .await
        .unwrap();
    store.save(&cred).await.unwrap();

    // The stored credential is trusted without revalidation.
    let restarted = SessionStore::new(db);
    assert!(restarted.current().await.is_some());
}

#[tokio::test]
async fn test_sign_up_then_restart_restores_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts:signUp"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CREDENTIAL_BODY))
        .mount(&server)
        .await;

    let db = test_db().await;
    let store = SessionStore::new(db.clone());
    let auth = auth_client(&server.uri());

    let pw = SecretString::from("pw".to_string());
    let cred = auth.sign_up("farmer@example.com", &pw, &pw).await.unwrap();
    store.save(&cred).await.unwrap();

    assert!(SessionStore::new(db).current().await.is_some());
}

// ============================================================================
// Sign-out Ordering
// ============================================================================

#[tokio::test]
async fn test_sign_out_survives_remote_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts:signOut"))
        .respond_with(ResponseTemplate::new(500).set_body_string("revocation down"))
        .expect(1)
        .mount(&server)
        .await;

    let db = test_db().await;
    let store = SessionStore::new(db.clone());
    store
        .save(&kisan::auth::UserCredential {
            id_token: "tok".to_string(),
            email: "a@b.com".to_string(),
            local_id: "uid".to_string(),
        })
        .await
        .unwrap();

    store.sign_out(&auth_client(&server.uri())).await.unwrap();

    // Next startup lands on the login screen despite the 500.
    assert!(SessionStore::new(db).current().await.is_none());
}

// ============================================================================
// Language Persistence
// ============================================================================

#[tokio::test]
async fn test_language_persists_across_restart() {
    let db = test_db().await;
    SessionStore::new(db.clone())
        .set_language(Language::Hi)
        .await
        .unwrap();

    assert_eq!(SessionStore::new(db).language().await, Language::Hi);
}

#[tokio::test]
async fn test_language_survives_sign_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let db = test_db().await;
    let store = SessionStore::new(db.clone());
    store
        .save(&kisan::auth::UserCredential {
            id_token: "tok".to_string(),
            email: "a@b.com".to_string(),
            local_id: "uid".to_string(),
        })
        .await
        .unwrap();
    store.set_language(Language::Ta).await.unwrap();

    store.sign_out(&auth_client(&server.uri())).await.unwrap();

    let restarted = SessionStore::new(db);
    assert!(restarted.current().await.is_none());
    assert_eq!(restarted.language().await, Language::Ta);
}

#[tokio::test]
async fn test_language_or_uses_fallback_for_fresh_install() {
    let store = SessionStore::new(test_db().await);
    assert_eq!(store.language_or(Language::Pa).await, Language::Pa);

    store.set_language(Language::En).await.unwrap();
    assert_eq!(store.language_or(Language::Pa).await, Language::En);
}
