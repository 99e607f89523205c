//! Participant links: `{app_base}/p/{session_id}`.

use olcme_core::entities::SessionId;

use crate::error::ConsoleError;

#[must_use]
pub fn participant_url(app_base: &str, session_id: SessionId) -> String {
    format!("{}/p/{session_id}", app_base.trim_end_matches('/'))
}

/// Accept a bare session id or any URL whose path ends in `/p/{id}`.
///
/// # Errors
///
/// Returns [`ConsoleError::InvalidSessionRef`] when no positive id can be read.
pub fn parse_session_ref(reference: &str) -> Result<SessionId, ConsoleError> {
    let trimmed = reference.trim();
    let without_query = trimmed
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end_matches('/');

    let candidate = match without_query.rsplit_once("/p/") {
        Some((_, tail)) => tail,
        None if !without_query.contains('/') => without_query,
        None => return Err(ConsoleError::InvalidSessionRef(trimmed.to_string())),
    };

    candidate
        .parse::<SessionId>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ConsoleError::InvalidSessionRef(trimmed.to_string()))
}
