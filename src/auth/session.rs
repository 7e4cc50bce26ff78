use anyhow::{Context, Result};

use super::client::{AuthClient, UserCredential};
use crate::i18n::{Language, LANGUAGE_KEY};
use crate::storage::Database;

/// Preference store key for the serialized session marker.
pub const SESSION_KEY: &str = "session.user";

/// Locally persisted session state.
///
/// The session marker is the credential blob from the last successful
/// sign-in, stored verbatim. Startup trusts its presence without contacting
/// the identity service; sign-out removes it before any remote call so the
/// device ends up signed out even when revocation fails.
#[derive(Clone)]
pub struct SessionStore {
    db: Database,
}

impl SessionStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Read the stored session marker, if any.
    ///
    /// Fails open: a storage error or an unparseable marker yields `None`
    /// (start at the login screen) rather than an error. Never contacts the
    /// identity service.
    pub async fn current(&self) -> Option<UserCredential> {
        let raw = match self.db.get_preference(SESSION_KEY).await {
            Ok(value) => value?,
            Err(e) => {
                tracing::warn!(error = %e, "Session read failed; starting signed out");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(cred) => Some(cred),
            Err(e) => {
                tracing::warn!(error = %e, "Corrupt session marker; starting signed out");
                None
            }
        }
    }

    /// Persist the credential as the session marker.
    pub async fn save(&self, credential: &UserCredential) -> Result<()> {
        let blob = serde_json::to_string(credential).context("Failed to serialize credential")?;
        self.db.set_preference(SESSION_KEY, &blob).await?;
        tracing::info!(email = %credential.email, "Session saved");
        Ok(())
    }

    /// Remove the local session marker. Absent marker is a no-op.
    pub async fn clear_local(&self) -> Result<()> {
        self.db.remove_preference(SESSION_KEY).await
    }

    /// Sign out: clear the local marker first, then attempt remote
    /// revocation.
    ///
    /// Local removal failure aborts and is reported; remote revocation
    /// failure is logged and swallowed. Either way, once this returns `Ok`
    /// the next startup lands on the login screen.
    pub async fn sign_out(&self, auth: &AuthClient) -> Result<()> {
        let credential = self.current().await;

        self.clear_local()
            .await
            .context("Failed to clear local session")?;
        tracing::info!("Local session cleared");

        if let Some(cred) = credential {
            if let Err(e) = auth.sign_out(&cred.id_token).await {
                tracing::warn!(error = %e, "Remote sign-out failed; local session already cleared");
            }
        }

        Ok(())
    }

    /// Read the persisted language. Missing, unreadable, or unknown codes
    /// fall back to the default.
    pub async fn language(&self) -> Language {
        self.language_or(Language::default()).await
    }

    /// Like [`language`](Self::language), but with a caller-supplied fallback
    /// (the config file's `language` key).
    pub async fn language_or(&self, default: Language) -> Language {
        match self.db.get_preference(LANGUAGE_KEY).await {
            Ok(Some(code)) => Language::from_code(&code).unwrap_or_else(|| {
                tracing::warn!(code = %code, "Unknown language code; using default");
                default
            }),
            Ok(None) => default,
            Err(e) => {
                tracing::warn!(error = %e, "Language read failed; using default");
                default
            }
        }
    }

    /// Persist the language choice.
    pub async fn set_language(&self, language: Language) -> Result<()> {
        self.db.set_preference(LANGUAGE_KEY, language.code()).await
    }
}
