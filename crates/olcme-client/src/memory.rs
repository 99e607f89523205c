//! In-memory [`SurveyApi`] backend.
//!
//! Mirrors the REST backend closely enough to drive the screen models without
//! a network: bearer checks on the admin endpoints, 404 for unknown ids,
//! cascading study deletes. Every call is recorded so tests can assert on what
//! was (or was not) sent.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use olcme_auth::AuthContext;
use olcme_core::entities::{
    CreatedSession, Credentials, HealthStatus, Instrument, InstrumentId, InstrumentSummary,
    LoginResponse, NewInstrument, NewResponse, NewSession, NewStudy, Registered, ResponseRow,
    Session, SessionId, SessionInstrument, Study, StudyId, SubmittedResponse,
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::api::SurveyApi;
use crate::error::ApiError;

/// One recorded call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub operation: &'static str,
    pub token: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
struct StoredSession {
    session_id: SessionId,
    participant_id: String,
    instrument_id: InstrumentId,
}

#[derive(Debug, Default)]
struct State {
    users: HashMap<String, String>,
    issued_token: Option<String>,
    studies: Vec<Study>,
    instruments: Vec<Instrument>,
    sessions: Vec<StoredSession>,
    responses: Vec<ResponseRow>,
    next_id: i64,
    failures: HashMap<&'static str, (u16, String)>,
    calls: Vec<RecordedCall>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Recording in-memory backend.
#[derive(Debug, Default)]
pub struct InMemoryApi {
    state: Mutex<State>,
}

fn status(status: u16, detail: &str) -> ApiError {
    ApiError::Status {
        status,
        message: json!({ "detail": detail }).to_string(),
    }
}

fn to_body<T: Serialize>(body: &T) -> Option<Value> {
    serde_json::to_value(body).ok()
}

impl InMemoryApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend with one registered user whose login yields `token`.
    #[must_use]
    pub fn with_user(email: &str, password: &str, token: &str) -> Self {
        let api = Self::default();
        {
            let mut state = api.lock();
            state.users.insert(email.to_string(), password.to_string());
            state.issued_token = Some(token.to_string());
        }
        api
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Make every later call of `operation` fail with `status` and `message`.
    pub fn fail(&self, operation: &'static str, status: u16, message: &str) {
        self.lock()
            .failures
            .insert(operation, (status, message.to_string()));
    }

    pub fn clear_failures(&self) {
        self.lock().failures.clear();
    }

    pub fn insert_study(&self, title: &str) -> Study {
        let mut state = self.lock();
        let study = Study {
            id: state.next_id(),
            title: title.to_string(),
        };
        state.studies.push(study.clone());
        study
    }

    pub fn insert_instrument(&self, study_id: StudyId, name: &str, spec: Value) -> Instrument {
        let mut state = self.lock();
        let instrument = Instrument {
            id: state.next_id(),
            study_id,
            name: name.to_string(),
            spec,
        };
        state.instruments.push(instrument.clone());
        instrument
    }

    pub fn insert_session(&self, instrument_id: InstrumentId) -> CreatedSession {
        let mut state = self.lock();
        let session_id = state.next_id();
        let participant_id = format!("p-{session_id:04}");
        state.sessions.push(StoredSession {
            session_id,
            participant_id: participant_id.clone(),
            instrument_id,
        });
        CreatedSession {
            session_id,
            participant_id,
        }
    }

    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    /// Recorded calls of one operation.
    #[must_use]
    pub fn calls_to(&self, operation: &str) -> Vec<RecordedCall> {
        self.lock()
            .calls
            .iter()
            .filter(|call| call.operation == operation)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn instrument(&self, id: InstrumentId) -> Option<Instrument> {
        self.lock().instruments.iter().find(|i| i.id == id).cloned()
    }

    #[must_use]
    pub fn responses(&self) -> Vec<ResponseRow> {
        self.lock().responses.clone()
    }

    /// Record the call, apply injected failures and the bearer check.
    fn enter(
        &self,
        operation: &'static str,
        auth: Option<&AuthContext>,
        body: Option<Value>,
    ) -> Result<MutexGuard<'_, State>, ApiError> {
        let mut state = self.lock();
        let token = auth.and_then(AuthContext::token).map(str::to_string);
        state.calls.push(RecordedCall {
            operation,
            token: token.clone(),
            body,
        });
        if let Some((code, message)) = state.failures.get(operation) {
            return Err(ApiError::Status {
                status: *code,
                message: message.clone(),
            });
        }
        if auth.is_some() {
            match (&token, &state.issued_token) {
                (None, _) => return Err(status(401, "Not authenticated")),
                (Some(given), Some(issued)) if given == issued => {}
                (Some(_), _) => return Err(status(401, "Invalid token")),
            }
        }
        Ok(state)
    }
}

#[async_trait]
impl SurveyApi for InMemoryApi {
    async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.enter("health", None, None)?;
        Ok(HealthStatus {
            ok: true,
            error: None,
        })
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let body = json!({ "email": credentials.email });
        let state = self.enter("login", None, Some(body))?;
        let valid = state
            .users
            .get(&credentials.email)
            .is_some_and(|password| *password == credentials.password);
        match (&state.issued_token, valid) {
            (Some(token), true) => Ok(LoginResponse {
                access_token: token.clone(),
                token_type: Some("bearer".into()),
            }),
            _ => Err(status(401, "Bad credentials")),
        }
    }

    async fn register(&self, credentials: &Credentials) -> Result<Registered, ApiError> {
        let body = json!({ "email": credentials.email });
        let mut state = self.enter("register", None, Some(body))?;
        if state.users.contains_key(&credentials.email) {
            return Err(status(409, "Email already registered"));
        }
        state
            .users
            .insert(credentials.email.clone(), credentials.password.clone());
        if state.issued_token.is_none() {
            state.issued_token = Some(format!("token-{}", credentials.email));
        }
        Ok(Registered { ok: true })
    }

    async fn list_studies(&self, auth: &AuthContext) -> Result<Vec<Study>, ApiError> {
        let state = self.enter("list_studies", Some(auth), None)?;
        Ok(state.studies.iter().rev().cloned().collect())
    }

    async fn create_study(&self, auth: &AuthContext, study: &NewStudy) -> Result<Study, ApiError> {
        let mut state = self.enter("create_study", Some(auth), to_body(study))?;
        let created = Study {
            id: state.next_id(),
            title: study.title.clone(),
        };
        state.studies.push(created.clone());
        Ok(created)
    }

    async fn delete_study(&self, auth: &AuthContext, id: StudyId) -> Result<(), ApiError> {
        let mut state = self.enter("delete_study", Some(auth), Some(json!(id)))?;
        if !state.studies.iter().any(|s| s.id == id) {
            return Err(status(404, "Not found"));
        }
        let instrument_ids: Vec<InstrumentId> = state
            .instruments
            .iter()
            .filter(|i| i.study_id == id)
            .map(|i| i.id)
            .collect();
        let session_ids: Vec<SessionId> = state
            .sessions
            .iter()
            .filter(|s| instrument_ids.contains(&s.instrument_id))
            .map(|s| s.session_id)
            .collect();
        state
            .responses
            .retain(|r| !session_ids.contains(&r.session_id));
        state
            .sessions
            .retain(|s| !instrument_ids.contains(&s.instrument_id));
        state.instruments.retain(|i| i.study_id != id);
        state.studies.retain(|s| s.id != id);
        Ok(())
    }

    async fn list_instruments(
        &self,
        auth: &AuthContext,
    ) -> Result<Vec<InstrumentSummary>, ApiError> {
        let state = self.enter("list_instruments", Some(auth), None)?;
        Ok(state
            .instruments
            .iter()
            .rev()
            .map(Instrument::summary)
            .collect())
    }

    async fn create_instrument(
        &self,
        auth: &AuthContext,
        instrument: &NewInstrument,
    ) -> Result<InstrumentSummary, ApiError> {
        let mut state = self.enter("create_instrument", Some(auth), to_body(instrument))?;
        if !state.studies.iter().any(|s| s.id == instrument.study_id) {
            return Err(status(404, "Study not found"));
        }
        let created = Instrument {
            id: state.next_id(),
            study_id: instrument.study_id,
            name: instrument.name.clone(),
            spec: instrument.spec.clone(),
        };
        state.instruments.push(created.clone());
        Ok(created.summary())
    }

    async fn get_instrument(
        &self,
        auth: &AuthContext,
        id: InstrumentId,
    ) -> Result<Instrument, ApiError> {
        let state = self.enter("get_instrument", Some(auth), None)?;
        state
            .instruments
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(|| status(404, "Not found"))
    }

    async fn update_instrument_spec(
        &self,
        auth: &AuthContext,
        id: InstrumentId,
        spec: &Value,
    ) -> Result<Value, ApiError> {
        let body = json!({ "spec": spec });
        let mut state = self.enter("update_instrument_spec", Some(auth), Some(body))?;
        let instrument = state
            .instruments
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| status(404, "Not found"))?;
        instrument.spec = spec.clone();
        Ok(json!({ "ok": true }))
    }

    async fn delete_instrument(
        &self,
        auth: &AuthContext,
        id: InstrumentId,
    ) -> Result<(), ApiError> {
        let mut state = self.enter("delete_instrument", Some(auth), Some(json!(id)))?;
        let before = state.instruments.len();
        state.instruments.retain(|i| i.id != id);
        if state.instruments.len() == before {
            return Err(status(404, "Not found"));
        }
        Ok(())
    }

    async fn create_session(&self, session: &NewSession) -> Result<CreatedSession, ApiError> {
        {
            let state = self.enter("create_session", None, to_body(session))?;
            if !state
                .instruments
                .iter()
                .any(|i| i.id == session.instrument_id)
            {
                return Err(status(404, "Instrument not found"));
            }
        }
        Ok(self.insert_session(session.instrument_id))
    }

    async fn get_session(&self, id: SessionId) -> Result<Session, ApiError> {
        let state = self.enter("get_session", None, None)?;
        let stored = state
            .sessions
            .iter()
            .find(|s| s.session_id == id)
            .ok_or_else(|| status(404, "Session not found"))?;
        let instrument = state
            .instruments
            .iter()
            .find(|i| i.id == stored.instrument_id)
            .ok_or_else(|| status(404, "Instrument not found"))?;
        Ok(Session {
            session_id: stored.session_id,
            participant_id: stored.participant_id.clone(),
            instrument: SessionInstrument {
                id: instrument.id,
                study_id: None,
                name: instrument.name.clone(),
                spec: instrument.spec.clone(),
            },
        })
    }

    async fn delete_session(&self, auth: &AuthContext, id: SessionId) -> Result<(), ApiError> {
        let mut state = self.enter("delete_session", Some(auth), Some(json!(id)))?;
        let before = state.sessions.len();
        state.sessions.retain(|s| s.session_id != id);
        if state.sessions.len() == before {
            return Err(status(404, "Not found"));
        }
        Ok(())
    }

    async fn submit_response(
        &self,
        response: &NewResponse,
    ) -> Result<SubmittedResponse, ApiError> {
        let mut state = self.enter("submit_response", None, to_body(response))?;
        if !state
            .sessions
            .iter()
            .any(|s| s.session_id == response.session_id)
        {
            return Err(status(404, "Session not found"));
        }
        let id = state.next_id();
        state.responses.push(ResponseRow {
            id,
            session_id: response.session_id,
            task_id: response.task_id.clone(),
            payload: serde_json::to_value(response.payload).unwrap_or(Value::Null),
            created_at: None,
        });
        Ok(SubmittedResponse {
            ok: true,
            response_id: id,
        })
    }

    async fn responses_by_instrument(
        &self,
        auth: &AuthContext,
        id: InstrumentId,
    ) -> Result<Vec<ResponseRow>, ApiError> {
        let state = self.enter("responses_by_instrument", Some(auth), None)?;
        let sessions: Vec<SessionId> = state
            .sessions
            .iter()
            .filter(|s| s.instrument_id == id)
            .map(|s| s.session_id)
            .collect();
        Ok(state
            .responses
            .iter()
            .filter(|r| sessions.contains(&r.session_id))
            .cloned()
            .collect())
    }

    async fn responses_by_session(
        &self,
        auth: &AuthContext,
        id: SessionId,
    ) -> Result<Vec<ResponseRow>, ApiError> {
        let state = self.enter("responses_by_session", Some(auth), None)?;
        Ok(state
            .responses
            .iter()
            .filter(|r| r.session_id == id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn admin_endpoints_require_issued_token() {
        let api = InMemoryApi::with_user("a@b.c", "pw", "tok");
        let err = api.list_studies(&AuthContext::anonymous()).await.unwrap_err();
        assert_eq!(err.status(), Some(401));
        let err = api
            .list_studies(&AuthContext::with_token("other"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert!(api.list_studies(&AuthContext::with_token("tok")).await.is_ok());
        assert_eq!(api.calls_to("list_studies").len(), 3);
    }

    #[tokio::test]
    async fn study_delete_cascades() {
        let api = InMemoryApi::with_user("a@b.c", "pw", "tok");
        let auth = AuthContext::with_token("tok");
        let study = api.insert_study("S");
        let instrument = api.insert_instrument(study.id, "I", json!({}));
        let session = api.insert_session(instrument.id);

        api.delete_study(&auth, study.id).await.unwrap();
        assert!(api.instrument(instrument.id).is_none());
        assert!(api.get_session(session.session_id).await.is_err());
    }

    #[tokio::test]
    async fn injected_failure_wins() {
        let api = InMemoryApi::new();
        api.fail("health", 503, "down");
        let err = api.health().await.unwrap_err();
        assert_eq!(err.to_string(), "down");
        api.clear_failures();
        assert!(api.health().await.unwrap().ok);
    }
}
