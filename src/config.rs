//! Configuration file parser for ~/.config/kisan/config.toml.
//!
//! The config file is optional — a missing file yields `Config::default()`.
//! Unknown keys are silently ignored by serde, though we log a warning when
//! the file contains potential typos.
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Struct
// ============================================================================

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
/// Missing keys fall back to `Default::default()`.
///
/// Custom Debug impl masks `auth_api_key` to prevent secret leakage in logs
/// and error messages.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the post content service.
    pub api_base_url: String,

    /// Base URL used to derive post thumbnails from their id.
    pub thumbnail_base_url: String,

    /// Base URL of the identity service.
    pub auth_base_url: String,

    /// Identity service API key (alternative to KISAN_AUTH_API_KEY env var).
    /// Env var takes precedence over config file.
    pub auth_api_key: Option<String>,

    /// Number of posts fetched per page.
    pub page_size: u32,

    /// Default language code when no preference is stored yet.
    pub language: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://jsonplaceholder.typicode.com".to_string(),
            thumbnail_base_url: "https://picsum.photos".to_string(),
            auth_base_url: "https://identitytoolkit.googleapis.com".to_string(),
            auth_api_key: None,
            page_size: 10,
            language: "en".to_string(),
        }
    }
}

/// Mask auth_api_key in Debug output to prevent secret leakage.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_base_url", &self.api_base_url)
            .field("thumbnail_base_url", &self.thumbnail_base_url)
            .field("auth_base_url", &self.auth_base_url)
            .field(
                "auth_api_key",
                &self.auth_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("page_size", &self.page_size)
            .field("language", &self.language)
            .finish()
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → silently accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        // Check file size before reading to prevent memory exhaustion from a
        // corrupted config file.
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Race: file deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        // Parse as a raw table first to detect unknown keys
        if let Ok(raw) = content.parse::<toml::Table>() {
            let known_keys = [
                "api_base_url",
                "thumbnail_base_url",
                "auth_base_url",
                "auth_api_key",
                "page_size",
                "language",
            ];
            for key in raw.keys() {
                if !known_keys.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        tracing::info!(path = %path.display(), api = %config.api_base_url, "Loaded configuration");
        Ok(config)
    }

    /// Resolve the identity service API key: env var wins over config file.
    pub fn resolved_api_key(&self) -> Option<String> {
        std::env::var("KISAN_AUTH_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .or_else(|| self.auth_api_key.clone())
    }
}

// ============================================================================
// Tests
// ============================================================================
