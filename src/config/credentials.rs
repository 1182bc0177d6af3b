//! Session credential resolution.
//!
//! The HTTP client never reads ambient storage itself. It is handed a
//! [`CredentialProvider`] at construction and asks it for a token on
//! every request, so login/logout flows elsewhere are picked up without
//! rebuilding the client.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use super::types::AuthConfig;

/// Fixed storage key the session token lives under.
pub const TOKEN_KEY: &str = "token";

/// Wrapper for sensitive strings that prevents accidental logging.
///
/// The inner value is never exposed via Debug or Display traits.
/// Use `expose()` to access the actual value when needed for API calls.
#[derive(Clone, PartialEq, Eq)]
pub struct SecureString(String);

impl SecureString {
    /// Create a new secure string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Expose the inner value.
    ///
    /// Use sparingly and only when actually sending to APIs.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl std::fmt::Display for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

/// Read-only source of the session token.
pub trait CredentialProvider: Send + Sync {
    /// Current token, if a session exists. Empty tokens count as absent.
    fn token(&self) -> Option<SecureString>;
}

/// Provider that never yields a token.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentials;

impl CredentialProvider for NoCredentials {
    fn token(&self) -> Option<SecureString> {
        None
    }
}

/// Provider with a fixed token.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    token: SecureString,
}

impl StaticCredentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecureString::new(token),
        }
    }
}

impl CredentialProvider for StaticCredentials {
    fn token(&self) -> Option<SecureString> {
        if self.token.expose().is_empty() {
            None
        } else {
            Some(self.token.clone())
        }
    }
}

/// Errors reading the key/value storage file.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read storage file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage file '{path}' is not a JSON object of strings: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Provider backed by a client-side key/value storage file.
///
/// The file is a flat JSON object; the token is read from [`TOKEN_KEY`].
/// It is re-read on every call and never written.
#[derive(Debug, Clone)]
pub struct StorageCredentials {
    path: PathBuf,
}

impl StorageCredentials {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default storage location: `<data_dir>/turfdesk/storage.json`.
    pub fn default_path() -> PathBuf {
        let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        data_dir.join("turfdesk").join("storage.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the token, distinguishing "no session" from a broken file.
    pub fn read_token(&self) -> Result<Option<SecureString>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path).map_err(|e| StorageError::Read {
            path: self.path.clone(),
            source: e,
        })?;
        let entries: HashMap<String, String> =
            serde_json::from_str(&content).map_err(|e| StorageError::Format {
                path: self.path.clone(),
                source: e,
            })?;
        Ok(entries
            .get(TOKEN_KEY)
            .filter(|token| !token.is_empty())
            .map(|token| SecureString::new(token.clone())))
    }
}

impl CredentialProvider for StorageCredentials {
    fn token(&self) -> Option<SecureString> {
        match self.read_token() {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!("Ignoring unreadable session storage: {}", err);
                None
            }
        }
    }
}

/// Pick the provider described by `auth`: inline token first, then the
/// storage file (configured or default location).
pub fn provider_from_config(auth: &AuthConfig) -> Arc<dyn CredentialProvider> {
    if let Some(token) = auth.token.as_ref().filter(|t| !t.is_empty()) {
        return Arc::new(StaticCredentials::new(token.clone()));
    }
    let path = auth
        .storage_path
        .clone()
        .unwrap_or_else(StorageCredentials::default_path);
    Arc::new(StorageCredentials::new(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_secure_string_hides_value() {
        let secret = SecureString::new("abc123");
        assert_eq!(format!("{:?}", secret), "SecureString(••••••••)");
        assert_eq!(format!("{}", secret), "••••••••");
        assert_eq!(secret.expose(), "abc123");
    }

    #[test]
    fn test_static_empty_token_is_absent() {
        assert!(StaticCredentials::new("").token().is_none());
        assert_eq!(
            StaticCredentials::new("t").token().map(|t| t.expose().to_string()),
            Some("t".to_string())
        );
    }

    #[test]
    fn test_storage_reads_token_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, r#"{"token":"stored-token","theme":"dark"}"#).unwrap();

        let provider = StorageCredentials::new(&path);
        assert_eq!(provider.token().unwrap().expose(), "stored-token");
    }

    #[test]
    fn test_storage_missing_file_is_no_session() {
        let dir = TempDir::new().unwrap();
        let provider = StorageCredentials::new(dir.path().join("missing.json"));
        assert!(provider.read_token().unwrap().is_none());
    }

    #[test]
    fn test_storage_is_reread_each_call() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        let provider = StorageCredentials::new(&path);
        assert!(provider.token().is_none());

        std::fs::write(&path, r#"{"token":"fresh"}"#).unwrap();
        assert_eq!(provider.token().unwrap().expose(), "fresh");
    }

    #[test]
    fn test_storage_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json").unwrap();

        let provider = StorageCredentials::new(&path);
        assert!(matches!(
            provider.read_token(),
            Err(StorageError::Format { .. })
        ));
        assert!(provider.token().is_none());
    }

    #[test]
    fn test_inline_token_wins() {
        let auth = AuthConfig {
            token: Some("inline".to_string()),
            ..AuthConfig::default()
        };
        let provider = provider_from_config(&auth);
        assert_eq!(provider.token().unwrap().expose(), "inline");
    }
}
