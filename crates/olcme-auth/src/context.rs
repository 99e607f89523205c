use std::fmt;

use crate::error::AuthError;
use crate::token_store::CredentialStore;

/// Snapshot of the bearer token for one command.
///
/// Read once from a [`CredentialStore`] at the application boundary and
/// passed by reference to every authenticated API call.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    token: Option<String>,
}

impl AuthContext {
    /// Context with no token (public endpoints only).
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { token: None }
    }

    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            token: (!token.is_empty()).then_some(token),
        }
    }

    #[must_use]
    pub fn from_store(store: &dyn CredentialStore) -> Self {
        Self {
            token: store.load(),
        }
    }

    /// The bearer token, if present.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// # Errors
    ///
    /// Returns [`AuthError::NotAuthenticated`] when no token is present.
    pub fn require(&self) -> Result<&str, AuthError> {
        self.token().ok_or(AuthError::NotAuthenticated)
    }
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token_store::MemoryStore;

    #[test]
    fn empty_token_is_anonymous() {
        assert!(!AuthContext::with_token("").is_authenticated());
        assert_eq!(AuthContext::with_token(""), AuthContext::anonymous());
    }

    #[test]
    fn require_fails_without_token() {
        let error = AuthContext::anonymous().require().unwrap_err();
        assert!(matches!(error, AuthError::NotAuthenticated));
    }

    #[test]
    fn loads_from_store_once() {
        let store = MemoryStore::with_token("tok");
        let ctx = AuthContext::from_store(&store);
        store.delete().unwrap();
        // the snapshot keeps the token it was built with
        assert_eq!(ctx.require().unwrap(), "tok");
    }

    #[test]
    fn debug_redacts_token() {
        let rendered = format!("{:?}", AuthContext::with_token("secret-token"));
        assert!(!rendered.contains("secret-token"));
    }
}
