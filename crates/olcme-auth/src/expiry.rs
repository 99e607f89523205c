//! Best-effort JWT expiry inspection for `auth status`.
//!
//! The backend token is treated as opaque everywhere else; nothing here
//! verifies a signature or blocks a call.

use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::AuthError;
use crate::token_store::{CredentialStore, TokenSource};

/// Decode the JWT `exp` claim without verifying the signature.
///
/// # Errors
///
/// Returns `AuthError::InvalidToken` if the JWT format is invalid or the `exp`
/// claim is missing or cannot be parsed.
pub fn decode_expiry(jwt: &str) -> Result<DateTime<Utc>, AuthError> {
    let parts: Vec<&str> = jwt.split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::InvalidToken("invalid JWT format".into()));
    }
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1].trim_end_matches('='))
        .map_err(|e| AuthError::InvalidToken(format!("base64 decode failed: {e}")))?;
    let value: serde_json::Value = serde_json::from_slice(&payload)
        .map_err(|e| AuthError::InvalidToken(format!("JSON parse failed: {e}")))?;
    let exp = value["exp"]
        .as_i64()
        .ok_or_else(|| AuthError::InvalidToken("missing exp claim".into()))?;
    DateTime::from_timestamp(exp, 0)
        .ok_or_else(|| AuthError::InvalidToken("invalid exp timestamp".into()))
}

/// What `auth status` reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenStatus {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<TokenSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired: Option<bool>,
}

impl TokenStatus {
    #[must_use]
    pub fn inspect(store: &dyn CredentialStore) -> Self {
        let Some(token) = store.load() else {
            return Self {
                authenticated: false,
                source: None,
                expires_at: None,
                expired: None,
            };
        };

        let expires_at = match decode_expiry(&token) {
            Ok(at) => Some(at),
            Err(error) => {
                tracing::debug!(%error, "stored token has no readable expiry");
                None
            }
        };
        Self {
            authenticated: true,
            source: store.source(),
            expires_at,
            expired: expires_at.map(|at| at <= Utc::now()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token_store::MemoryStore;

    fn make_jwt_with_exp(exp: i64) -> String {
        let header = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256"}"#);
        let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .encode(format!(r#"{{"sub":"7","exp":{exp}}}"#));
        let signature = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode("fake_sig");
        format!("{header}.{payload}.{signature}")
    }

    #[test]
    fn decode_expiry_valid_jwt() {
        let future_exp = Utc::now().timestamp() + 3600;
        let dt = decode_expiry(&make_jwt_with_exp(future_exp)).unwrap();
        assert_eq!(dt.timestamp(), future_exp);
    }

    #[test]
    fn decode_expiry_invalid_format() {
        let error = decode_expiry("not-a-jwt").unwrap_err();
        assert!(error.to_string().contains("invalid JWT format"));
    }

    #[test]
    fn decode_expiry_bad_base64() {
        let error = decode_expiry("header.!!!invalid!!!.signature").unwrap_err();
        assert!(error.to_string().contains("base64 decode failed"));
    }

    #[test]
    fn status_reports_expired_token() {
        let store = MemoryStore::with_token(make_jwt_with_exp(Utc::now().timestamp() - 60));
        let status = TokenStatus::inspect(&store);
        assert!(status.authenticated);
        assert_eq!(status.source, Some(TokenSource::Memory));
        assert_eq!(status.expired, Some(true));
    }

    #[test]
    fn status_accepts_opaque_token() {
        let store = MemoryStore::with_token("opaque");
        let status = TokenStatus::inspect(&store);
        assert!(status.authenticated);
        assert_eq!(status.expires_at, None);
        assert_eq!(status.expired, None);
    }

    #[test]
    fn status_without_token() {
        let status = TokenStatus::inspect(&MemoryStore::default());
        assert!(!status.authenticated);
        assert_eq!(serde_json::to_value(&status).unwrap(), serde_json::json!({ "authenticated": false }));
    }
}
