//! The backend operations as a trait, so screen models can run against the
//! HTTP client or an in-memory double.

use async_trait::async_trait;
use olcme_auth::AuthContext;
use olcme_core::entities::{
    CreatedSession, Credentials, HealthStatus, Instrument, InstrumentId, InstrumentSummary,
    LoginResponse, NewInstrument, NewResponse, NewSession, NewStudy, Registered, ResponseRow,
    Session, SessionId, Study, StudyId, SubmittedResponse,
};
use serde_json::Value;

use crate::error::ApiError;

/// One method per backend endpoint.
///
/// Methods that take an [`AuthContext`] send its bearer token when present;
/// the rest are public endpoints and never send one.
#[async_trait]
pub trait SurveyApi: Send + Sync {
    async fn health(&self) -> Result<HealthStatus, ApiError>;

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError>;
    async fn register(&self, credentials: &Credentials) -> Result<Registered, ApiError>;

    async fn list_studies(&self, auth: &AuthContext) -> Result<Vec<Study>, ApiError>;
    async fn create_study(&self, auth: &AuthContext, study: &NewStudy) -> Result<Study, ApiError>;
    /// Deletes the study with its instruments, sessions and responses.
    async fn delete_study(&self, auth: &AuthContext, id: StudyId) -> Result<(), ApiError>;

    async fn list_instruments(&self, auth: &AuthContext)
    -> Result<Vec<InstrumentSummary>, ApiError>;
    async fn create_instrument(
        &self,
        auth: &AuthContext,
        instrument: &NewInstrument,
    ) -> Result<InstrumentSummary, ApiError>;
    async fn get_instrument(
        &self,
        auth: &AuthContext,
        id: InstrumentId,
    ) -> Result<Instrument, ApiError>;
    /// `PUT /instruments/{id}` with `{ spec }`. Returns the raw response body.
    async fn update_instrument_spec(
        &self,
        auth: &AuthContext,
        id: InstrumentId,
        spec: &Value,
    ) -> Result<Value, ApiError>;
    async fn delete_instrument(&self, auth: &AuthContext, id: InstrumentId)
    -> Result<(), ApiError>;

    async fn create_session(&self, session: &NewSession) -> Result<CreatedSession, ApiError>;
    async fn get_session(&self, id: SessionId) -> Result<Session, ApiError>;
    async fn delete_session(&self, auth: &AuthContext, id: SessionId) -> Result<(), ApiError>;

    async fn submit_response(&self, response: &NewResponse)
    -> Result<SubmittedResponse, ApiError>;
    async fn responses_by_instrument(
        &self,
        auth: &AuthContext,
        id: InstrumentId,
    ) -> Result<Vec<ResponseRow>, ApiError>;
    async fn responses_by_session(
        &self,
        auth: &AuthContext,
        id: SessionId,
    ) -> Result<Vec<ResponseRow>, ApiError>;
}
