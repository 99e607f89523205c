use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use keyring::credential::CredentialPersistence;
use serde::Serialize;

use crate::error::AuthError;

const DEFAULT_KEYRING_SERVICE: &str = "olcme-cli";
const KEYRING_USER: &str = "olcme_token";
const CREDENTIALS_FILE_NAME: &str = "credentials";
const TOKEN_ENV: &str = "OLCME_AUTH__TOKEN";

/// Where a loaded token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenSource {
    Keyring,
    Env,
    File,
    Memory,
}

impl TokenSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keyring => "keyring",
            Self::Env => "env",
            Self::File => "file",
            Self::Memory => "memory",
        }
    }
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persistent home of the single bearer token.
pub trait CredentialStore {
    /// The stored token, if any. Empty values count as absent.
    fn load(&self) -> Option<String>;

    /// Which tier [`CredentialStore::load`] would read from.
    fn source(&self) -> Option<TokenSource>;

    /// Persist `token`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if no tier accepts the write.
    fn store(&self, token: &str) -> Result<(), AuthError>;

    /// Remove the stored token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the credentials file cannot be removed.
    fn delete(&self) -> Result<(), AuthError>;
}

/// Keyring, then `OLCME_AUTH__TOKEN`, then `~/.olcme/credentials`.
#[derive(Debug, Clone)]
pub struct SystemStore {
    keyring_service: Option<String>,
    credentials_path: Option<PathBuf>,
}

impl Default for SystemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemStore {
    /// Store backed by the OS keychain and the file in the home directory.
    ///
    /// The keyring service defaults to `"olcme-cli"`. Override via
    /// `OLCME_KEYRING_SERVICE` to keep test runs away from real credentials.
    #[must_use]
    pub fn new() -> Self {
        Self {
            keyring_service: Some(
                std::env::var("OLCME_KEYRING_SERVICE")
                    .unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string()),
            ),
            credentials_path: default_credentials_path(),
        }
    }

    /// Store using keyring `service` with `path` as the file tier.
    #[must_use]
    pub fn with_keyring(service: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            keyring_service: Some(service.into()),
            credentials_path: Some(path.into()),
        }
    }

    /// Store that skips the keychain and uses `path` as the credentials file.
    #[must_use]
    pub fn file_only(path: impl Into<PathBuf>) -> Self {
        Self {
            keyring_service: None,
            credentials_path: Some(path.into()),
        }
    }

    #[must_use]
    pub fn credentials_path(&self) -> Option<&Path> {
        self.credentials_path.as_deref()
    }

    /// The keyring entry, when the platform keyring outlives this process.
    ///
    /// Without a native backend keyring falls back to a per-entry mock store
    /// that forgets the token as soon as the entry is dropped.
    fn keyring_entry(&self) -> Option<keyring::Entry> {
        let service = self.keyring_service.as_deref()?;
        if !keyring_persists() {
            tracing::debug!("keyring backend is not persistent; using the credentials file");
            return None;
        }
        match keyring::Entry::new(service, KEYRING_USER) {
            Ok(entry) => Some(entry),
            Err(error) => {
                tracing::debug!(%error, "keyring unavailable");
                None
            }
        }
    }

    fn load_keyring(&self) -> Option<String> {
        self.keyring_entry()
            .and_then(|entry| entry.get_password().ok())
            .filter(|token| !token.is_empty())
    }

    fn path(&self) -> Result<&Path, AuthError> {
        self.credentials_path.as_deref().ok_or_else(|| {
            AuthError::TokenStoreError("home directory not found; cannot store credentials".into())
        })
    }

    fn store_file(&self, token: &str) -> Result<(), AuthError> {
        let path = self.path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AuthError::TokenStoreError(format!("mkdir {}: {e}", parent.display()))
            })?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }
        fs::write(path, token)
            .map_err(|e| AuthError::TokenStoreError(format!("write {}: {e}", path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                AuthError::TokenStoreError(format!("chmod {}: {e}", path.display()))
            })?;
        }

        Ok(())
    }

    fn load_file(&self) -> Option<String> {
        let path = self.credentials_path.as_deref()?;
        fs::read_to_string(path)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

fn keyring_persists() -> bool {
    matches!(
        keyring::default::default_credential_builder().persistence(),
        CredentialPersistence::UntilReboot | CredentialPersistence::UntilDelete
    )
}

fn load_env() -> Option<String> {
    std::env::var(TOKEN_ENV).ok().filter(|token| !token.is_empty())
}

impl CredentialStore for SystemStore {
    fn load(&self) -> Option<String> {
        self.load_keyring()
            .or_else(load_env)
            .or_else(|| self.load_file())
    }

    fn source(&self) -> Option<TokenSource> {
        if self.load_keyring().is_some() {
            return Some(TokenSource::Keyring);
        }
        if load_env().is_some() {
            return Some(TokenSource::Env);
        }
        self.load_file().map(|_| TokenSource::File)
    }

    fn store(&self, token: &str) -> Result<(), AuthError> {
        if let Some(entry) = self.keyring_entry() {
            match entry.set_password(token) {
                Ok(()) => return Ok(()),
                Err(error) => {
                    tracing::warn!(%error, "keyring store failed; falling back to file");
                }
            }
        }
        self.store_file(token)
    }

    fn delete(&self) -> Result<(), AuthError> {
        // may not exist
        if let Some(entry) = self.keyring_entry() {
            let _ = entry.delete_credential();
        }

        let path = self.path()?;
        if path.exists() {
            fs::remove_file(path).map_err(|e| {
                AuthError::TokenStoreError(format!("failed to delete {}: {e}", path.display()))
            })?;
        }
        Ok(())
    }
}

fn default_credentials_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".olcme").join(CREDENTIALS_FILE_NAME))
}

/// Process-local store, for tests and one-shot sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    token: Mutex<Option<String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>, AuthError> {
        self.token
            .lock()
            .map_err(|_| AuthError::TokenStoreError("memory store lock poisoned".into()))
    }
}

impl CredentialStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.lock().ok()?.clone().filter(|token| !token.is_empty())
    }

    fn source(&self) -> Option<TokenSource> {
        self.load().map(|_| TokenSource::Memory)
    }

    fn store(&self, token: &str) -> Result<(), AuthError> {
        *self.lock()? = Some(token.to_string());
        Ok(())
    }

    fn delete(&self) -> Result<(), AuthError> {
        *self.lock()? = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_credentials_path_is_under_home() {
        let path = default_credentials_path().expect("should resolve");
        assert!(path.ends_with(".olcme/credentials"));
    }

    #[test]
    fn memory_store_cycle() {
        let store = MemoryStore::default();
        assert_eq!(store.load(), None);
        store.store("abc").unwrap();
        assert_eq!(store.load().as_deref(), Some("abc"));
        assert_eq!(store.source(), Some(TokenSource::Memory));
        store.delete().unwrap();
        assert_eq!(store.load(), None);
        assert_eq!(store.source(), None);
    }

    #[test]
    fn memory_store_treats_empty_as_absent() {
        let store = MemoryStore::with_token("");
        assert_eq!(store.load(), None);
    }

    #[test]
    fn file_only_store_has_no_keyring() {
        let store = SystemStore::file_only("/tmp/olcme-test/credentials");
        assert!(store.keyring_entry().is_none());
        assert_eq!(
            store.credentials_path(),
            Some(Path::new("/tmp/olcme-test/credentials"))
        );
    }
}
