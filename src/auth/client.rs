use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Per-request timeout for identity service calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// Error Types
// ============================================================================

/// Errors from sign-in / sign-up / sign-out operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Local validation failure: sign-up password and confirmation differ.
    /// Raised before any remote call is made.
    #[error("Passwords do not match")]
    PasswordMismatch,
    /// Error reported by the identity service; the message is surfaced
    /// verbatim to the user.
    #[error("{0}")]
    Remote(String),
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// Request exceeded the 30-second timeout
    #[error("Request timed out")]
    Timeout,
    /// Success response was not the expected JSON shape
    #[error("Decode error: {0}")]
    Decode(String),
}

impl AuthError {
    /// True for the locally raised validation failure (no remote call made).
    pub fn is_validation(&self) -> bool {
        matches!(self, AuthError::PasswordMismatch)
    }
}

// ============================================================================
// Wire Types
// ============================================================================

/// Opaque credential returned by the identity service on success.
///
/// Serialized as-is into the preference store as the session marker. No
/// expiry or validity check is performed locally; presence of a stored
/// credential is trusted until sign-out.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserCredential {
    pub id_token: String,
    pub email: String,
    pub local_id: String,
}

/// Mask the token in Debug output so credentials never land in logs.
impl std::fmt::Debug for UserCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserCredential")
            .field("id_token", &"[REDACTED]")
            .field("email", &self.email)
            .field("local_id", &self.local_id)
            .finish()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignOutRequest<'a> {
    id_token: &'a str,
}

#[derive(Deserialize)]
struct RemoteErrorBody {
    error: RemoteErrorDetail,
}

#[derive(Deserialize)]
struct RemoteErrorDetail {
    message: String,
}

// ============================================================================
// Client
// ============================================================================

/// REST client for the hosted identity service.
///
/// Endpoints follow the Firebase-style account API:
/// `POST /v1/accounts:signInWithPassword`, `:signUp`, `:signOut`, all keyed
/// by an API key query parameter. Failures are never retried; the service's
/// error message is passed through untouched.
#[derive(Clone)]
pub struct AuthClient {
    client: reqwest::Client,
    base_url: String,
    api_key: SecretString,
}

impl AuthClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, api_key: SecretString) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Verify credentials and obtain a session credential.
    pub async fn sign_in(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<UserCredential, AuthError> {
        tracing::debug!(email = %email, "Signing in");
        self.password_call("signInWithPassword", email, password)
            .await
    }

    /// Register a new account.
    ///
    /// Password and confirmation are compared locally first; on mismatch the
    /// operation fails with [`AuthError::PasswordMismatch`] and no request is
    /// sent.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &SecretString,
        confirm: &SecretString,
    ) -> Result<UserCredential, AuthError> {
        if password.expose_secret() != confirm.expose_secret() {
            return Err(AuthError::PasswordMismatch);
        }

        tracing::debug!(email = %email, "Signing up");
        self.password_call("signUp", email, password).await
    }

    /// Revoke a session credential with the identity service.
    pub async fn sign_out(&self, id_token: &str) -> Result<(), AuthError> {
        let url = self.endpoint("signOut");
        let body = SignOutRequest { id_token };

        let response = tokio::time::timeout(
            REQUEST_TIMEOUT,
            self.client.post(&url).json(&body).send(),
        )
        .await
        .map_err(|_| AuthError::Timeout)?
        .map_err(AuthError::Network)?;

        if response.status().is_success() {
            tracing::info!("Remote sign-out complete");
            Ok(())
        } else {
            Err(Self::remote_error(response).await)
        }
    }

    async fn password_call(
        &self,
        operation: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<UserCredential, AuthError> {
        let url = self.endpoint(operation);
        let body = PasswordRequest {
            email,
            password: password.expose_secret(),
            return_secure_token: true,
        };

        let response = tokio::time::timeout(
            REQUEST_TIMEOUT,
            self.client.post(&url).json(&body).send(),
        )
        .await
        .map_err(|_| AuthError::Timeout)?
        .map_err(AuthError::Network)?;

        if !response.status().is_success() {
            return Err(Self::remote_error(response).await);
        }

        response
            .json::<UserCredential>()
            .await
            .map_err(|e| AuthError::Decode(e.to_string()))
    }

    /// Extract the service's error message, verbatim when present.
    async fn remote_error(response: reqwest::Response) -> AuthError {
        let status = response.status();
        match response.json::<RemoteErrorBody>().await {
            Ok(body) => AuthError::Remote(body.error.message),
            Err(_) => AuthError::Remote(format!("HTTP {}", status.as_u16())),
        }
    }

    fn endpoint(&self, operation: &str) -> String {
        format!(
            "{}/v1/accounts:{}?key={}",
            self.base_url,
            operation,
            self.api_key.expose_secret()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const CREDENTIAL_BODY: &str = r#"{
        "idToken": "tok-123",
        "email": "a@b.com",
        "localId": "uid-1",
        "registered": true
    }"#;

    fn test_client(server_uri: &str) -> AuthClient {
        AuthClient::new(
            reqwest::Client::new(),
            server_uri,
            SecretString::from("test-api-key".to_string()),
        )
    }

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_string())
    }

    #[tokio::test]
    async fn test_sign_in_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithPassword"))
            .and(query_param("key", "test-api-key"))
            .and(body_partial_json(serde_json::json!({
                "email": "a@b.com",
                "password": "hunter2",
                "returnSecureToken": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string(CREDENTIAL_BODY))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let cred = client.sign_in("a@b.com", &secret("hunter2")).await.unwrap();

        assert_eq!(cred.id_token, "tok-123");
        assert_eq!(cred.email, "a@b.com");
        assert_eq!(cred.local_id, "uid-1");
    }

    #[tokio::test]
    async fn test_sign_in_surfaces_remote_message_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string(
                r#"{"error": {"code": 400, "message": "INVALID_LOGIN_CREDENTIALS"}}"#,
            ))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .sign_in("a@b.com", &secret("wrong"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "INVALID_LOGIN_CREDENTIALS");
        assert!(!err.is_validation());
    }

    #[tokio::test]
    async fn test_sign_up_mismatch_makes_no_request() {
        let server = MockServer::start().await;
        // Any request reaching the server fails the test on drop.
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string(CREDENTIAL_BODY))
            .expect(0)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .sign_up("a@b.com", &secret("one"), &secret("two"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::PasswordMismatch));
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_sign_up_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signUp"))
            .respond_with(ResponseTemplate::new(200).set_body_string(CREDENTIAL_BODY))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let cred = client
            .sign_up("a@b.com", &secret("pw"), &secret("pw"))
            .await
            .unwrap();
        assert_eq!(cred.local_id, "uid-1");
    }

    #[tokio::test]
    async fn test_sign_up_email_exists_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_string(r#"{"error": {"message": "EMAIL_EXISTS"}}"#),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .sign_up("a@b.com", &secret("pw"), &secret("pw"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "EMAIL_EXISTS");
    }

    #[tokio::test]
    async fn test_sign_out_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signOut"))
            .and(body_partial_json(serde_json::json!({"idToken": "tok-123"})))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        client.sign_out("tok-123").await.unwrap();
    }

    #[tokio::test]
    async fn test_non_json_error_falls_back_to_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.sign_in("a@b.com", &secret("pw")).await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP 503");
    }

    #[test]
    fn test_credential_debug_masks_token() {
        let cred = UserCredential {
            id_token: "very-secret-token".to_string(),
            email: "a@b.com".to_string(),
            local_id: "uid-1".to_string(),
        };
        let debug = format!("{:?}", cred);
        assert!(!debug.contains("very-secret-token"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_credential_round_trips_through_json() {
        let cred = UserCredential {
            id_token: "tok".to_string(),
            email: "a@b.com".to_string(),
            local_id: "uid".to_string(),
        };
        let json = serde_json::to_string(&cred).unwrap();
        assert!(json.contains("idToken"));
        let back: UserCredential = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cred);
    }
}
