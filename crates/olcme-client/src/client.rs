//! `reqwest` implementation of [`SurveyApi`].

use async_trait::async_trait;
use olcme_auth::AuthContext;
use olcme_core::entities::{
    CreatedSession, Credentials, HealthStatus, Instrument, InstrumentId, InstrumentSummary,
    LoginResponse, NewInstrument, NewResponse, NewSession, NewStudy, Registered, ResponseRow,
    Session, SessionId, SpecUpdate, Study, StudyId, SubmittedResponse,
};
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::SurveyApi;
use crate::error::ApiError;
use crate::http::{check_response, decode, read_json};

/// HTTP client for the survey backend.
///
/// Every request carries `Content-Type: application/json`; authenticated
/// requests add `Authorization: Bearer <token>` when the context has one.
/// No timeout, no retry.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url` (trailing slashes are dropped).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` fails to build.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("olcme/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Perform one call and return the JSON body (`null` when empty).
    async fn send<B: Serialize + Sync + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        token: Option<&str>,
    ) -> Result<Value, ApiError> {
        tracing::debug!(%method, path, authenticated = token.is_some(), "api call");

        let mut request = self
            .http
            .request(method, self.url(path))
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(body) = body {
            let bytes = serde_json::to_vec(body).map_err(|e| ApiError::Decode(e.to_string()))?;
            request = request.body(bytes);
        }

        let resp = check_response(request.send().await?).await?;
        read_json(resp).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        auth: Option<&AuthContext>,
    ) -> Result<T, ApiError> {
        let token = auth.and_then(AuthContext::token);
        decode(self.send::<()>(Method::GET, path, None, token).await?)
    }

    async fn post<B, T>(
        &self,
        path: &str,
        body: &B,
        auth: Option<&AuthContext>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let token = auth.and_then(AuthContext::token);
        decode(self.send(Method::POST, path, Some(body), token).await?)
    }

    async fn delete(&self, path: &str, auth: &AuthContext) -> Result<(), ApiError> {
        self.send::<()>(Method::DELETE, path, None, auth.token())
            .await
            .map(drop)
    }
}

#[async_trait]
impl SurveyApi for ApiClient {
    async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.get("/health", None).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        self.post("/auth/login", credentials, None).await
    }

    async fn register(&self, credentials: &Credentials) -> Result<Registered, ApiError> {
        self.post("/auth/register", credentials, None).await
    }

    async fn list_studies(&self, auth: &AuthContext) -> Result<Vec<Study>, ApiError> {
        self.get("/studies", Some(auth)).await
    }

    async fn create_study(&self, auth: &AuthContext, study: &NewStudy) -> Result<Study, ApiError> {
        self.post("/studies", study, Some(auth)).await
    }

    async fn delete_study(&self, auth: &AuthContext, id: StudyId) -> Result<(), ApiError> {
        self.delete(&format!("/studies/{id}"), auth).await
    }

    async fn list_instruments(
        &self,
        auth: &AuthContext,
    ) -> Result<Vec<InstrumentSummary>, ApiError> {
        self.get("/instruments", Some(auth)).await
    }

    async fn create_instrument(
        &self,
        auth: &AuthContext,
        instrument: &NewInstrument,
    ) -> Result<InstrumentSummary, ApiError> {
        self.post("/instruments", instrument, Some(auth)).await
    }

    async fn get_instrument(
        &self,
        auth: &AuthContext,
        id: InstrumentId,
    ) -> Result<Instrument, ApiError> {
        self.get(&format!("/instruments/{id}"), Some(auth)).await
    }

    async fn update_instrument_spec(
        &self,
        auth: &AuthContext,
        id: InstrumentId,
        spec: &Value,
    ) -> Result<Value, ApiError> {
        let body = SpecUpdate { spec: spec.clone() };
        self.send(
            Method::PUT,
            &format!("/instruments/{id}"),
            Some(&body),
            auth.token(),
        )
        .await
    }

    async fn delete_instrument(
        &self,
        auth: &AuthContext,
        id: InstrumentId,
    ) -> Result<(), ApiError> {
        self.delete(&format!("/instruments/{id}"), auth).await
    }

    async fn create_session(&self, session: &NewSession) -> Result<CreatedSession, ApiError> {
        self.post("/sessions", session, None).await
    }

    async fn get_session(&self, id: SessionId) -> Result<Session, ApiError> {
        self.get(&format!("/sessions/{id}"), None).await
    }

    async fn delete_session(&self, auth: &AuthContext, id: SessionId) -> Result<(), ApiError> {
        self.delete(&format!("/sessions/{id}"), auth).await
    }

    async fn submit_response(
        &self,
        response: &NewResponse,
    ) -> Result<SubmittedResponse, ApiError> {
        self.post("/responses", response, None).await
    }

    async fn responses_by_instrument(
        &self,
        auth: &AuthContext,
        id: InstrumentId,
    ) -> Result<Vec<ResponseRow>, ApiError> {
        self.get(&format!("/responses/by-instrument/{id}"), Some(auth))
            .await
    }

    async fn responses_by_session(
        &self,
        auth: &AuthContext,
        id: SessionId,
    ) -> Result<Vec<ResponseRow>, ApiError> {
        self.get(&format!("/responses/by-session/{id}"), Some(auth))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let client = ApiClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/health"), "http://localhost:8000/health");
    }
}
