//! Admin dashboard: studies, instruments, templates, session links.

use std::sync::Arc;

use olcme_auth::{AuthContext, CredentialStore};
use olcme_client::{ApiError, SurveyApi};
use olcme_core::entities::{
    CreatedSession, Credentials, InstrumentId, InstrumentSummary, NewInstrument, NewSession,
    NewStudy, Study, StudyId,
};
use olcme_core::enums::TemplateKind;
use olcme_core::spec::templates;

use crate::clipboard::Clipboard;
use crate::error::ConsoleError;
use crate::link::participant_url;
use crate::messages;
use crate::status::StatusLine;

/// Operator-facing dashboard state.
///
/// Form fields are public so a front end can fill them before invoking an
/// operation. Everything derived from the backend is read through accessors.
pub struct AdminDashboard {
    api: Arc<dyn SurveyApi>,
    app_base: String,
    auth: AuthContext,

    pub email: String,
    pub password: String,
    pub new_study_title: String,
    pub new_instrument_name: String,
    pub template: TemplateKind,

    studies: Vec<Study>,
    instruments: Vec<InstrumentSummary>,
    selected_study: Option<StudyId>,
    last_session: Option<CreatedSession>,
    status: StatusLine,
}

impl AdminDashboard {
    #[must_use]
    pub fn new(api: Arc<dyn SurveyApi>, app_base: impl Into<String>) -> Self {
        Self {
            api,
            app_base: app_base.into(),
            auth: AuthContext::anonymous(),
            email: String::new(),
            password: String::new(),
            new_study_title: String::new(),
            new_instrument_name: String::new(),
            template: TemplateKind::default(),
            studies: Vec::new(),
            instruments: Vec::new(),
            selected_study: None,
            last_session: None,
            status: StatusLine::default(),
        }
    }

    /// Replace the auth context (e.g. with one resolved at startup).
    #[must_use]
    pub fn with_auth(mut self, auth: AuthContext) -> Self {
        self.auth = auth;
        self
    }

    /// Read the persisted token into the auth context.
    pub fn restore(&mut self, store: &dyn CredentialStore) {
        self.auth = AuthContext::from_store(store);
        tracing::debug!(authenticated = self.auth.is_authenticated(), "restored auth");
    }

    #[must_use]
    pub const fn auth(&self) -> &AuthContext {
        &self.auth
    }

    #[must_use]
    pub fn studies(&self) -> &[Study] {
        &self.studies
    }

    #[must_use]
    pub fn instruments(&self) -> &[InstrumentSummary] {
        &self.instruments
    }

    #[must_use]
    pub const fn selected_study(&self) -> Option<StudyId> {
        self.selected_study
    }

    pub const fn select_study(&mut self, id: Option<StudyId>) {
        self.selected_study = id;
    }

    #[must_use]
    pub const fn last_session(&self) -> Option<&CreatedSession> {
        self.last_session.as_ref()
    }

    #[must_use]
    pub const fn status(&self) -> &StatusLine {
        &self.status
    }

    /// Instruments of the selected study, or all of them when none is selected.
    #[must_use]
    pub fn visible_instruments(&self) -> Vec<&InstrumentSummary> {
        self.instruments
            .iter()
            .filter(|i| self.selected_study.is_none_or(|id| i.study_id == id))
            .collect()
    }

    /// `{app_base}/p/{session_id}` of the last created session.
    #[must_use]
    pub fn participant_url(&self) -> Option<String> {
        self.last_session
            .as_ref()
            .map(|session| participant_url(&self.app_base, session.session_id))
    }

    fn reject(&mut self, error: ConsoleError) -> ConsoleError {
        self.status.set(error.to_string());
        error
    }

    fn api_failure(&mut self, error: ApiError) -> ConsoleError {
        if error.is_unauthorized() {
            tracing::warn!("backend rejected the stored token");
        }
        self.status.set(messages::failed(&error));
        error.into()
    }

    fn require_token(&mut self) -> Result<(), ConsoleError> {
        if self.auth.is_authenticated() {
            Ok(())
        } else {
            Err(self.reject(ConsoleError::MissingToken))
        }
    }

    /// Post the login form, persist the token and load the lists.
    ///
    /// # Errors
    ///
    /// Fails when the backend rejects the credentials, the token cannot be
    /// stored, or the follow-up refresh fails.
    pub async fn login(&mut self, store: &dyn CredentialStore) -> Result<(), ConsoleError> {
        self.status.set(messages::LOGGING_IN);
        let credentials = Credentials::new(self.email.trim(), self.password.clone());
        let response = match self.api.login(&credentials).await {
            Ok(response) => response,
            Err(error) => {
                self.status.set(messages::login_failed(&error));
                return Err(error.into());
            }
        };

        if let Err(error) = store.store(&response.access_token) {
            self.status.set(messages::login_failed(&error));
            return Err(error.into());
        }
        self.auth = AuthContext::with_token(response.access_token);
        self.password.clear();

        self.refresh().await?;
        self.status.set(messages::LOGIN_OK);
        Ok(())
    }

    /// Clear the stored token and everything loaded with it.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Auth`] if the store cannot be cleared.
    pub fn logout(&mut self, store: &dyn CredentialStore) -> Result<(), ConsoleError> {
        store.delete()?;
        self.auth = AuthContext::anonymous();
        self.studies.clear();
        self.instruments.clear();
        self.selected_study = None;
        self.last_session = None;
        self.status.set(messages::LOGGED_OUT);
        Ok(())
    }

    /// Fetch studies, then instruments. Selects the first study when none is
    /// selected.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::MissingToken`] without a token, otherwise the API error.
    pub async fn refresh(&mut self) -> Result<(), ConsoleError> {
        self.require_token()?;

        let studies = match self.api.list_studies(&self.auth).await {
            Ok(studies) => studies,
            Err(error) => return Err(self.api_failure(error)),
        };
        let instruments = match self.api.list_instruments(&self.auth).await {
            Ok(instruments) => instruments,
            Err(error) => return Err(self.api_failure(error)),
        };

        if self.selected_study.is_none() {
            self.selected_study = studies.first().map(|s| s.id);
        }
        tracing::debug!(
            studies = studies.len(),
            instruments = instruments.len(),
            "refreshed"
        );
        self.studies = studies;
        self.instruments = instruments;
        Ok(())
    }

    /// Create a study from `new_study_title` and select it.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::MissingToken`] without a token, otherwise the API error.
    pub async fn create_study(&mut self) -> Result<Study, ConsoleError> {
        self.require_token()?;
        self.status.set(messages::CREATING_STUDY);

        let body = NewStudy {
            title: self.new_study_title.trim().to_string(),
        };
        let study = match self.api.create_study(&self.auth, &body).await {
            Ok(study) => study,
            Err(error) => return Err(self.api_failure(error)),
        };

        self.refresh().await?;
        self.selected_study = Some(study.id);
        self.status.set(messages::study_created(study.id));
        Ok(study)
    }

    /// Delete a study after `confirm` approves the prompt. The backend removes
    /// its instruments, sessions and responses too.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::MissingToken`], [`ConsoleError::Cancelled`], or the API error.
    pub async fn delete_study(
        &mut self,
        id: StudyId,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<(), ConsoleError> {
        self.require_token()?;
        if !confirm(messages::CONFIRM_DELETE_STUDY) {
            return Err(self.reject(ConsoleError::Cancelled));
        }

        self.status.set(messages::DELETING_STUDY);
        if let Err(error) = self.api.delete_study(&self.auth, id).await {
            return Err(self.api_failure(error));
        }

        self.studies.retain(|s| s.id != id);
        self.instruments.retain(|i| i.study_id != id);
        if self.selected_study == Some(id) {
            self.selected_study = None;
        }
        self.status.set(messages::STUDY_DELETED);
        Ok(())
    }

    /// Create an instrument in the selected study from the chosen template.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::MissingToken`] or [`ConsoleError::NoStudySelected`]
    /// before any call, otherwise the API error.
    pub async fn create_instrument(&mut self) -> Result<InstrumentSummary, ConsoleError> {
        self.require_token()?;
        let Some(study_id) = self.selected_study else {
            return Err(self.reject(ConsoleError::NoStudySelected));
        };

        self.status.set(messages::CREATING_INSTRUMENT);
        let body = NewInstrument {
            study_id,
            name: self.new_instrument_name.trim().to_string(),
            spec: templates::spec_for(self.template).to_value(),
        };
        let created = match self.api.create_instrument(&self.auth, &body).await {
            Ok(created) => created,
            Err(error) => return Err(self.api_failure(error)),
        };

        self.refresh().await?;
        self.status.set(messages::instrument_created(created.id));
        Ok(created)
    }

    /// Delete an instrument after `confirm` approves the prompt. Sessions and
    /// responses of the instrument are left in place.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::MissingToken`], [`ConsoleError::Cancelled`], or the API error.
    pub async fn delete_instrument(
        &mut self,
        id: InstrumentId,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<(), ConsoleError> {
        self.require_token()?;
        if !confirm(messages::CONFIRM_DELETE_INSTRUMENT) {
            return Err(self.reject(ConsoleError::Cancelled));
        }

        self.status.set(messages::DELETING_INSTRUMENT);
        if let Err(error) = self.api.delete_instrument(&self.auth, id).await {
            return Err(self.api_failure(error));
        }
        self.instruments.retain(|i| i.id != id);
        self.status.set(messages::INSTRUMENT_DELETED);
        Ok(())
    }

    /// Open a participant session. Public endpoint: no token needed.
    ///
    /// # Errors
    ///
    /// Returns the API error.
    pub async fn create_session(
        &mut self,
        instrument_id: InstrumentId,
    ) -> Result<CreatedSession, ConsoleError> {
        self.status.set(messages::CREATING_SESSION);
        let session = match self.api.create_session(&NewSession { instrument_id }).await {
            Ok(session) => session,
            Err(error) => return Err(self.api_failure(error)),
        };
        self.status.set(messages::session_ready(session.session_id));
        self.last_session = Some(session.clone());
        Ok(session)
    }

    /// Copy the participant link. `Ok(None)` when there is no session yet.
    ///
    /// # Errors
    ///
    /// Returns the clipboard error.
    pub fn copy_link(
        &mut self,
        clipboard: &mut dyn Clipboard,
    ) -> Result<Option<String>, ConsoleError> {
        let Some(url) = self.participant_url() else {
            return Ok(None);
        };
        if let Err(error) = clipboard.copy(&url) {
            return Err(self.reject(error));
        }
        self.status.set(messages::LINK_COPIED);
        Ok(Some(url))
    }
}

impl std::fmt::Debug for AdminDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminDashboard")
            .field("app_base", &self.app_base)
            .field("auth", &self.auth)
            .field("email", &self.email)
            .field("studies", &self.studies.len())
            .field("instruments", &self.instruments.len())
            .field("selected_study", &self.selected_study)
            .field("last_session", &self.last_session)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use olcme_auth::MemoryStore;
    use olcme_client::InMemoryApi;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn dashboard(api: &Arc<InMemoryApi>) -> AdminDashboard {
        AdminDashboard::new(api.clone(), "https://anket.olcme.tr")
            .with_auth(AuthContext::with_token("tok"))
    }

    #[tokio::test]
    async fn refresh_selects_first_study_only_once() {
        let api = Arc::new(InMemoryApi::with_user("a@b.c", "pw", "tok"));
        let older = api.insert_study("older");
        let newer = api.insert_study("newer");
        let mut dash = dashboard(&api);

        dash.refresh().await.unwrap();
        // newest first
        assert_eq!(dash.selected_study(), Some(newer.id));

        dash.select_study(Some(older.id));
        dash.refresh().await.unwrap();
        assert_eq!(dash.selected_study(), Some(older.id));
    }

    #[tokio::test]
    async fn visible_instruments_follow_selection() {
        let api = Arc::new(InMemoryApi::with_user("a@b.c", "pw", "tok"));
        let a = api.insert_study("a");
        let b = api.insert_study("b");
        api.insert_instrument(a.id, "ia", json!({}));
        api.insert_instrument(b.id, "ib", json!({}));
        let mut dash = dashboard(&api);
        dash.refresh().await.unwrap();

        dash.select_study(Some(a.id));
        let names: Vec<_> = dash.visible_instruments().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["ia"]);

        dash.select_study(None);
        assert_eq!(dash.visible_instruments().len(), 2);
    }

    #[tokio::test]
    async fn instrument_without_study_makes_no_call() {
        let api = Arc::new(InMemoryApi::with_user("a@b.c", "pw", "tok"));
        let mut dash = dashboard(&api);

        let error = dash.create_instrument().await.unwrap_err();
        assert!(matches!(error, ConsoleError::NoStudySelected));
        assert_eq!(dash.status().get(), Some(messages::SELECT_STUDY_FIRST));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn declined_delete_makes_no_call() {
        let api = Arc::new(InMemoryApi::with_user("a@b.c", "pw", "tok"));
        let study = api.insert_study("s");
        let instrument = api.insert_instrument(study.id, "i", json!({}));
        let mut dash = dashboard(&api);

        let error = dash
            .delete_instrument(instrument.id, |_| false)
            .await
            .unwrap_err();
        assert!(matches!(error, ConsoleError::Cancelled));
        assert!(api.calls_to("delete_instrument").is_empty());
        assert!(api.instrument(instrument.id).is_some());
    }

    #[tokio::test]
    async fn confirmed_instrument_delete_keeps_sessions_and_responses() {
        use olcme_core::entities::{ChoicePayload, NewResponse};
        use olcme_core::enums::Choice;

        let api = Arc::new(InMemoryApi::with_user("a@b.c", "pw", "tok"));
        let study = api.insert_study("s");
        let gone = api.insert_instrument(study.id, "gone", json!({}));
        let kept = api.insert_instrument(study.id, "kept", json!({}));
        let session = api.insert_session(gone.id);
        let answer = NewResponse {
            session_id: session.session_id,
            task_id: "pc_1".into(),
            payload: ChoicePayload {
                choice: Choice::Left,
                rt_ms: None,
            },
        };
        api.submit_response(&answer).await.unwrap();

        let mut dash = dashboard(&api);
        dash.refresh().await.unwrap();
        let mut asked = None;
        dash.delete_instrument(gone.id, |question| {
            asked = Some(question.to_string());
            true
        })
        .await
        .unwrap();

        assert_eq!(asked.as_deref(), Some(messages::CONFIRM_DELETE_INSTRUMENT));
        let ids: Vec<_> = dash.instruments().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![kept.id]);
        assert_eq!(dash.status().get(), Some(messages::INSTRUMENT_DELETED));

        let calls = api.calls_to("delete_instrument");
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].token.as_deref(), Some("tok"));
        assert!(api.instrument(gone.id).is_none());

        // no cascade: the session still takes answers and old rows remain
        assert_eq!(api.responses().len(), 1);
        api.submit_response(&answer).await.unwrap();
        assert_eq!(api.responses().len(), 2);
    }

    #[tokio::test]
    async fn study_delete_drops_local_rows_and_selection() {
        let api = Arc::new(InMemoryApi::with_user("a@b.c", "pw", "tok"));
        let keep = api.insert_study("keep");
        let drop = api.insert_study("drop");
        api.insert_instrument(keep.id, "k", json!({}));
        api.insert_instrument(drop.id, "d", json!({}));
        let mut dash = dashboard(&api);
        dash.refresh().await.unwrap();
        assert_eq!(dash.selected_study(), Some(drop.id));

        dash.delete_study(drop.id, |prompt| {
            assert_eq!(prompt, messages::CONFIRM_DELETE_STUDY);
            true
        })
        .await
        .unwrap();

        assert_eq!(dash.selected_study(), None);
        assert_eq!(dash.studies().len(), 1);
        assert_eq!(dash.instruments().len(), 1);
        assert_eq!(dash.status().get(), Some(messages::STUDY_DELETED));
    }

    #[tokio::test]
    async fn failed_login_keeps_token_unset() {
        let api = Arc::new(InMemoryApi::with_user("a@b.c", "pw", "tok"));
        let store = MemoryStore::default();
        let mut dash = AdminDashboard::new(api.clone(), "https://anket.olcme.tr");
        dash.email = "a@b.c".into();
        dash.password = "wrong".into();

        assert!(dash.login(&store).await.is_err());
        assert_eq!(store.load(), None);
        assert!(!dash.auth().is_authenticated());
        let status = dash.status().get().unwrap();
        assert!(status.starts_with("Giriş hatası: "), "{status}");
        assert!(status.contains("Bad credentials"));
    }

    #[tokio::test]
    async fn logout_clears_everything() {
        let api = Arc::new(InMemoryApi::with_user("a@b.c", "pw", "tok"));
        let study = api.insert_study("s");
        let instrument = api.insert_instrument(study.id, "i", json!({}));
        let store = MemoryStore::with_token("tok");
        let mut dash = AdminDashboard::new(api.clone(), "https://anket.olcme.tr");
        dash.restore(&store);
        dash.refresh().await.unwrap();
        dash.create_session(instrument.id).await.unwrap();

        dash.logout(&store).unwrap();
        assert_eq!(store.load(), None);
        assert!(dash.studies().is_empty());
        assert!(dash.last_session().is_none());
        assert_eq!(dash.status().get(), Some(messages::LOGGED_OUT));
    }

    #[tokio::test]
    async fn copy_link_without_session_is_a_no_op() {
        let api = Arc::new(InMemoryApi::new());
        let mut dash = AdminDashboard::new(api, "https://anket.olcme.tr");
        let mut clipboard = crate::clipboard::MemoryClipboard::default();
        assert_eq!(dash.copy_link(&mut clipboard).unwrap(), None);
        assert_eq!(clipboard.contents, None);
        assert_eq!(dash.status().get(), None);
    }
}
