use std::sync::Arc;

use anyhow::Context;
use olcme_auth::{AuthContext, SystemStore};
use olcme_client::{ApiClient, SurveyApi};
use olcme_config::OlcmeConfig;
use olcme_console::{AdminDashboard, InstrumentEditor, ParticipantRunner, messages};
use olcme_core::entities::InstrumentId;

/// Shared resources for one command: config, API client, token snapshot.
pub struct AppContext {
    pub config: OlcmeConfig,
    pub api: Arc<dyn SurveyApi>,
    pub store: SystemStore,
    pub auth: AuthContext,
}

impl AppContext {
    /// Build the HTTP client and read the stored token once.
    pub fn init(config: OlcmeConfig) -> anyhow::Result<Self> {
        let client = ApiClient::new(config.api.base_url())
            .context("failed to initialize the API client")?;
        let store = SystemStore::new();
        let auth = AuthContext::from_store(&store);
        tracing::debug!(
            api = config.api.base_url(),
            authenticated = auth.is_authenticated(),
            "context ready"
        );
        Ok(Self {
            config,
            api: Arc::new(client),
            store,
            auth,
        })
    }

    /// Fail early for admin commands run without a stored token.
    pub fn require_auth(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.auth.is_authenticated(), messages::NO_TOKEN_SAVE);
        Ok(())
    }

    #[must_use]
    pub fn dashboard(&self) -> AdminDashboard {
        AdminDashboard::new(self.api.clone(), self.config.app.base_url())
            .with_auth(self.auth.clone())
    }

    #[must_use]
    pub fn editor(&self, instrument_id: InstrumentId) -> InstrumentEditor {
        InstrumentEditor::new(self.api.clone(), self.auth.clone(), instrument_id)
    }

    pub fn runner(&self, reference: &str) -> anyhow::Result<ParticipantRunner> {
        Ok(ParticipantRunner::from_reference(self.api.clone(), reference)?)
    }
}
