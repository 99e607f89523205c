//! Instrument editor.
//!
//! The editable state is the JSON text buffer. The parsed document and the
//! task list are derived from it on every read, so the typed projection can
//! never drift from the text. Edits build a new [`SpecDocument`] from the
//! current one and re-serialize it into the buffer.

use std::sync::Arc;

use olcme_auth::AuthContext;
use olcme_client::{ApiError, SurveyApi};
use olcme_core::SpecEditError;
use olcme_core::entities::{Instrument, InstrumentId};
use olcme_core::spec::{PairedTaskPatch, SpecDocument, SpecIssue, TaskEntry, has_errors, validate};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ConsoleError;
use crate::messages;
use crate::results::ResultsTable;
use crate::status::StatusLine;

/// Structured form for the selected task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskForm {
    Paired {
        prompt: String,
        left: String,
        right: String,
    },
    /// Only editable through the JSON buffer.
    RawOnly { task_type: Option<String> },
}

/// Read-only summary of the selected task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskPreview {
    pub index: usize,
    pub id: String,
    pub task_type: Option<String>,
    pub prompt: Option<String>,
    pub left: Option<String>,
    pub right: Option<String>,
}

pub struct InstrumentEditor {
    api: Arc<dyn SurveyApi>,
    auth: AuthContext,
    instrument_id: InstrumentId,
    loading: bool,
    instrument: Option<Instrument>,
    buffer: String,
    selected: usize,
    results: Option<ResultsTable>,
    status: StatusLine,
}

impl InstrumentEditor {
    #[must_use]
    pub fn new(api: Arc<dyn SurveyApi>, auth: AuthContext, instrument_id: InstrumentId) -> Self {
        Self {
            api,
            auth,
            instrument_id,
            loading: true,
            instrument: None,
            buffer: String::new(),
            selected: 0,
            results: None,
            status: StatusLine::default(),
        }
    }

    #[must_use]
    pub const fn instrument_id(&self) -> InstrumentId {
        self.instrument_id
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn instrument(&self) -> Option<&Instrument> {
        self.instrument.as_ref()
    }

    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Replace the buffer with hand-edited text. Invalid JSON is accepted.
    pub fn set_buffer(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub const fn results(&self) -> Option<&ResultsTable> {
        self.results.as_ref()
    }

    #[must_use]
    pub const fn status(&self) -> &StatusLine {
        &self.status
    }

    /// The buffer parsed as JSON, `None` when it does not parse.
    #[must_use]
    pub fn document(&self) -> Option<SpecDocument> {
        SpecDocument::parse(&self.buffer)
    }

    /// `blocks[0].tasks` of the buffer; empty when absent or malformed.
    #[must_use]
    pub fn tasks(&self) -> Vec<TaskEntry> {
        self.document().map(|doc| doc.tasks()).unwrap_or_default()
    }

    #[must_use]
    pub fn selected_task(&self) -> Option<TaskEntry> {
        self.document().and_then(|doc| doc.task(self.selected))
    }

    /// Issues of the current buffer; empty when it does not parse.
    #[must_use]
    pub fn issues(&self) -> Vec<SpecIssue> {
        self.document()
            .map(|doc| validate(doc.as_value()))
            .unwrap_or_default()
    }

    /// # Errors
    ///
    /// Returns [`SpecEditError::TaskIndexOutOfRange`] for an index past the end.
    pub fn select(&mut self, index: usize) -> Result<(), ConsoleError> {
        let len = self.tasks().len();
        if index >= len {
            return Err(SpecEditError::TaskIndexOutOfRange { index, len }.into());
        }
        self.selected = index;
        Ok(())
    }

    fn reject(&mut self, error: ConsoleError) -> ConsoleError {
        self.status.set(error.to_string());
        error
    }

    fn api_failure(&mut self, error: ApiError) -> ConsoleError {
        self.status.set(messages::failed(&error));
        error.into()
    }

    fn parsed(&self) -> Result<SpecDocument, ConsoleError> {
        self.document().ok_or(ConsoleError::InvalidJson)
    }

    fn replace(&mut self, next: &SpecDocument) {
        self.buffer = next.to_pretty_json();
    }

    /// Fetch the instrument and seed the buffer with its spec.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::MissingToken`] without a token, otherwise the API error.
    pub async fn load(&mut self) -> Result<&Instrument, ConsoleError> {
        if !self.auth.is_authenticated() {
            self.loading = false;
            return Err(self.reject(ConsoleError::MissingToken));
        }

        self.loading = true;
        let fetched = self.api.get_instrument(&self.auth, self.instrument_id).await;
        self.loading = false;
        let instrument = match fetched {
            Ok(instrument) => instrument,
            Err(error) => return Err(self.api_failure(error)),
        };

        let doc = SpecDocument::new(instrument.spec.clone());
        log_issues(&validate(doc.as_value()));
        self.buffer = doc.to_pretty_json();
        self.selected = 0;
        self.status.clear();
        Ok(self.instrument.insert(instrument))
    }

    /// Shallow-merge `partial` into the selected task.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::InvalidJson`] when the buffer does not parse (the
    /// buffer is left untouched), or the edit error.
    pub fn update_selected(&mut self, partial: &Map<String, Value>) -> Result<(), ConsoleError> {
        let next = self.parsed()?.with_task_merged(self.selected, partial)?;
        self.replace(&next);
        Ok(())
    }

    /// Apply the paired-comparison form to the selected task.
    ///
    /// # Errors
    ///
    /// Same as [`InstrumentEditor::update_selected`].
    pub fn update_selected_paired(&mut self, patch: &PairedTaskPatch) -> Result<(), ConsoleError> {
        if patch.is_empty() {
            return Ok(());
        }
        let next = self.parsed()?.with_paired_patch(self.selected, patch)?;
        self.replace(&next);
        Ok(())
    }

    /// Append a default paired task and select it. Returns its index.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::InvalidJson`] or the edit error.
    pub fn add_paired_task(&mut self) -> Result<usize, ConsoleError> {
        let (next, index) = self.parsed()?.with_paired_task_appended()?;
        self.replace(&next);
        self.selected = index;
        Ok(index)
    }

    /// Remove task `index` and select the one before it.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::InvalidJson`] or the edit error.
    pub fn delete_task(&mut self, index: usize) -> Result<(), ConsoleError> {
        let next = self.parsed()?.without_task(index)?;
        self.replace(&next);
        self.selected = index.saturating_sub(1);
        Ok(())
    }

    /// Form for the selected task; `None` when there is no such task.
    #[must_use]
    pub fn form(&self) -> Option<TaskForm> {
        let entry = self.selected_task()?;
        Some(match entry.as_paired() {
            Some(task) => TaskForm::Paired {
                prompt: task.prompt.clone(),
                left: task.left.text.clone(),
                right: task.right.text.clone(),
            },
            None => TaskForm::RawOnly {
                task_type: entry.type_label().map(str::to_string),
            },
        })
    }

    #[must_use]
    pub fn preview(&self) -> Option<TaskPreview> {
        let entry = self.selected_task()?;
        let paired = entry.as_paired();
        Some(TaskPreview {
            index: self.selected,
            id: entry.display_id(self.selected),
            task_type: entry.type_label().map(str::to_string),
            prompt: entry.prompt().map(str::to_string),
            left: paired.map(|task| task.left.text.clone()),
            right: paired.map(|task| task.right.text.clone()),
        })
    }

    /// PUT the buffer as the instrument's spec.
    ///
    /// Token and JSON are checked before any call; structural errors block
    /// the save, warnings are only logged.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::MissingToken`], [`ConsoleError::InvalidJson`],
    /// [`ConsoleError::InvalidSpec`], or the API error.
    pub async fn save(&mut self) -> Result<(), ConsoleError> {
        if !self.auth.is_authenticated() {
            self.status.set(messages::NO_TOKEN_SAVE);
            return Err(ConsoleError::MissingToken);
        }
        let Some(doc) = self.document() else {
            return Err(self.reject(ConsoleError::InvalidJson));
        };

        let issues = validate(doc.as_value());
        if has_errors(&issues) {
            let errors: Vec<SpecIssue> = issues
                .into_iter()
                .filter(SpecIssue::is_error)
                .collect();
            return Err(self.reject(ConsoleError::InvalidSpec(errors)));
        }
        log_issues(&issues);

        self.status.set(messages::SAVING);
        if let Err(error) = self
            .api
            .update_instrument_spec(&self.auth, self.instrument_id, doc.as_value())
            .await
        {
            return Err(self.api_failure(error));
        }

        if let Some(instrument) = self.instrument.as_mut() {
            instrument.spec = doc.into_value();
        }
        self.status.set(messages::SAVED);
        Ok(())
    }

    /// Fetch the response rows of this instrument.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::MissingToken`] before any call, otherwise the API error.
    pub async fn load_results(&mut self) -> Result<&ResultsTable, ConsoleError> {
        if !self.auth.is_authenticated() {
            return Err(self.reject(ConsoleError::MissingToken));
        }

        self.status.set(messages::LOADING_RESULTS);
        let rows = match self
            .api
            .responses_by_instrument(&self.auth, self.instrument_id)
            .await
        {
            Ok(rows) => rows,
            Err(error) => return Err(self.api_failure(error)),
        };
        self.status.clear();
        Ok(self.results.insert(ResultsTable::from_rows(&rows)))
    }
}

impl std::fmt::Debug for InstrumentEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstrumentEditor")
            .field("instrument_id", &self.instrument_id)
            .field("loading", &self.loading)
            .field("selected", &self.selected)
            .field("buffer_len", &self.buffer.len())
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

fn log_issues(issues: &[SpecIssue]) {
    for issue in issues {
        tracing::warn!(path = %issue.path, "{}", issue.message);
    }
}

#[cfg(test)]
mod tests {
    use olcme_client::InMemoryApi;
    use olcme_core::spec::templates;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    async fn loaded(spec: Value) -> (Arc<InMemoryApi>, InstrumentEditor) {
        let api = Arc::new(InMemoryApi::with_user("a@b.c", "pw", "tok"));
        let study = api.insert_study("s");
        let instrument = api.insert_instrument(study.id, "i", spec);
        let mut editor =
            InstrumentEditor::new(api.clone(), AuthContext::with_token("tok"), instrument.id);
        editor.load().await.unwrap();
        (api, editor)
    }

    #[tokio::test]
    async fn load_seeds_pretty_buffer() {
        let spec = templates::paired_comparison_five().to_value();
        let (_, editor) = loaded(spec.clone()).await;
        assert!(!editor.is_loading());
        assert_eq!(editor.buffer(), serde_json::to_string_pretty(&spec).unwrap());
        assert_eq!(editor.tasks().len(), 5);
        assert_eq!(editor.status().get(), None);
    }

    #[tokio::test]
    async fn paired_form_edits_keep_option_ids() {
        let (_, mut editor) = loaded(templates::paired_comparison_five().to_value()).await;
        editor.select(1).unwrap();
        editor
            .update_selected_paired(&PairedTaskPatch {
                left_text: Some("Yeni sol".into()),
                ..PairedTaskPatch::default()
            })
            .unwrap();

        let doc = editor.document().unwrap();
        let task = &doc.as_value()["blocks"][0]["tasks"][1];
        assert_eq!(task["left"], json!({ "id": "b1", "text": "Yeni sol" }));
        assert_eq!(task["prompt"], "Hangisi sana daha yakın?");
        assert_eq!(
            editor.form(),
            Some(TaskForm::Paired {
                prompt: "Hangisi sana daha yakın?".into(),
                left: "Yeni sol".into(),
                right: "Yavaş karar veririm; sonra değiştirmem.".into(),
            })
        );
    }

    #[tokio::test]
    async fn other_task_types_are_raw_only() {
        let (_, editor) = loaded(templates::maxdiff_demo().to_value()).await;
        assert_eq!(
            editor.form(),
            Some(TaskForm::RawOnly {
                task_type: Some("maxdiff".into())
            })
        );
        let preview = editor.preview().unwrap();
        assert_eq!(preview.id, "md_1");
        assert_eq!(preview.left, None);
    }

    #[tokio::test]
    async fn invalid_buffer_blocks_edits_without_touching_text() {
        let (_, mut editor) = loaded(templates::paired_comparison_five().to_value()).await;
        editor.set_buffer("{ not json");
        assert!(editor.tasks().is_empty());
        assert!(matches!(
            editor.add_paired_task(),
            Err(ConsoleError::InvalidJson)
        ));
        assert_eq!(editor.buffer(), "{ not json");
    }

    #[tokio::test]
    async fn structural_errors_block_save() {
        let (api, mut editor) = loaded(json!({ "version": "0.1", "blocks": [] })).await;
        editor.set_buffer(r#"{ "version": "0.1", "blocks": {} }"#);

        let error = editor.save().await.unwrap_err();
        assert!(matches!(error, ConsoleError::InvalidSpec(ref issues) if issues.len() == 1));
        assert!(api.calls_to("update_instrument_spec").is_empty());
    }

    #[tokio::test]
    async fn save_puts_buffer_and_updates_instrument() {
        let (api, mut editor) = loaded(templates::paired_comparison_five().to_value()).await;
        editor.delete_task(0).unwrap();
        editor.save().await.unwrap();

        assert_eq!(editor.status().get(), Some(messages::SAVED));
        let stored = api.instrument(editor.instrument_id()).unwrap();
        assert_eq!(stored.spec["blocks"][0]["tasks"].as_array().unwrap().len(), 4);
        assert_eq!(editor.instrument().unwrap().spec, stored.spec);
    }

    #[tokio::test]
    async fn save_failure_shows_error_text() {
        let (api, mut editor) = loaded(templates::paired_comparison_five().to_value()).await;
        api.fail("update_instrument_spec", 500, "boom");
        assert!(editor.save().await.is_err());
        assert_eq!(editor.status().get(), Some("Hata: boom"));
    }
}
