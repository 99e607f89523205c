//! Participant runner: one session, its tasks in order, one answer each.

use std::sync::Arc;

use olcme_client::SurveyApi;
use olcme_core::entities::{ChoicePayload, NewResponse, Session, SessionId};
use olcme_core::enums::{Choice, TaskType};
use olcme_core::spec::{SpecDocument, TaskEntry};
use serde::Serialize;

use crate::error::ConsoleError;
use crate::link::parse_session_ref;
use crate::messages;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum RunnerStatus {
    Idle,
    InProgress,
    Completed,
    Error(String),
}

impl RunnerStatus {
    /// Participant-facing text, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Idle | Self::InProgress => None,
            Self::Completed => Some(messages::COMPLETED),
            Self::Error(message) => Some(message),
        }
    }
}

/// The paired task currently shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    pub index: usize,
    pub total: usize,
    pub task_id: String,
    pub prompt: String,
    pub left: String,
    pub right: String,
}

/// What the participant sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum RunnerView {
    Loading,
    LoadFailed,
    NoTasks,
    /// A runnable type whose fields do not parse.
    Malformed { task_id: String },
    Unsupported { task_type: Option<String> },
    Task(TaskView),
    Completed,
}

impl RunnerView {
    /// Fixed text of the non-task views.
    #[must_use]
    pub const fn message(&self) -> Option<&'static str> {
        match self {
            Self::Loading | Self::Task(_) => None,
            Self::LoadFailed => Some(messages::SESSION_LOAD_FAILED),
            Self::NoTasks => Some(messages::NO_TASKS),
            Self::Malformed { .. } => Some(messages::MALFORMED_TASK),
            Self::Unsupported { .. } => Some(messages::UNSUPPORTED_TASK),
            Self::Completed => Some(messages::COMPLETED),
        }
    }
}

/// Result of a successful submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Advanced { next: usize },
    Completed,
}

pub struct ParticipantRunner {
    api: Arc<dyn SurveyApi>,
    session_id: SessionId,
    loading: bool,
    session: Option<Session>,
    index: usize,
    status: RunnerStatus,
}

impl ParticipantRunner {
    #[must_use]
    pub fn new(api: Arc<dyn SurveyApi>, session_id: SessionId) -> Self {
        Self {
            api,
            session_id,
            loading: false,
            session: None,
            index: 0,
            status: RunnerStatus::Idle,
        }
    }

    /// Runner for a bare session id or a participant link.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::InvalidSessionRef`] for an unreadable reference.
    pub fn from_reference(api: Arc<dyn SurveyApi>, reference: &str) -> Result<Self, ConsoleError> {
        Ok(Self::new(api, parse_session_ref(reference)?))
    }

    #[must_use]
    pub const fn session_id(&self) -> SessionId {
        self.session_id
    }

    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub const fn status(&self) -> &RunnerStatus {
        &self.status
    }

    /// Fetch the session. Public endpoint, no token.
    ///
    /// # Errors
    ///
    /// Returns the API error; the runner then shows the load failure.
    pub async fn load(&mut self) -> Result<&Session, ConsoleError> {
        self.loading = true;
        let fetched = self.api.get_session(self.session_id).await;
        self.loading = false;
        self.index = 0;

        match fetched {
            Ok(session) => {
                tracing::info!(
                    session_id = session.session_id,
                    instrument = session.instrument.id,
                    "session loaded"
                );
                self.status = RunnerStatus::InProgress;
                Ok(self.session.insert(session))
            }
            Err(error) => {
                tracing::warn!(%error, session_id = self.session_id, "session load failed");
                self.session = None;
                self.status = RunnerStatus::Error(messages::SESSION_LOAD_FAILED.into());
                Err(error.into())
            }
        }
    }

    /// `blocks[0].tasks` of the embedded spec; empty when absent or malformed.
    #[must_use]
    pub fn tasks(&self) -> Vec<TaskEntry> {
        self.session
            .as_ref()
            .map(|session| SpecDocument::new(session.instrument.spec.clone()).tasks())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn view(&self) -> RunnerView {
        if self.loading {
            return RunnerView::Loading;
        }
        if self.status == RunnerStatus::Completed {
            return RunnerView::Completed;
        }
        if self.session.is_none() {
            return match self.status {
                RunnerStatus::Error(_) => RunnerView::LoadFailed,
                _ => RunnerView::Loading,
            };
        }

        let tasks = self.tasks();
        let Some(entry) = tasks.get(self.index) else {
            return RunnerView::NoTasks;
        };
        match entry.as_paired() {
            Some(task) => RunnerView::Task(TaskView {
                index: self.index,
                total: tasks.len(),
                task_id: task.id.clone(),
                prompt: task.prompt.clone(),
                left: task.left.text.clone(),
                right: task.right.text.clone(),
            }),
            None if is_runnable(entry) => RunnerView::Malformed {
                task_id: entry.display_id(self.index),
            },
            None => RunnerView::Unsupported {
                task_type: entry.type_label().map(str::to_string),
            },
        }
    }

    /// Post `choice` for the current task, then advance or complete.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::NoSession`], [`ConsoleError::Completed`],
    /// [`ConsoleError::NoTasks`] or [`ConsoleError::Unsupported`] before any
    /// call; otherwise the API error, after which the index stays put.
    pub async fn submit(&mut self, choice: Choice) -> Result<SubmitOutcome, ConsoleError> {
        let Some(session) = self.session.as_ref() else {
            return Err(ConsoleError::NoSession);
        };
        if self.status == RunnerStatus::Completed {
            return Err(ConsoleError::Completed);
        }

        let tasks = self.tasks();
        let total = tasks.len();
        let entry = tasks.get(self.index).ok_or(ConsoleError::NoTasks)?;
        let Some(task) = entry.as_paired() else {
            return Err(if is_runnable(entry) {
                ConsoleError::Malformed
            } else {
                ConsoleError::Unsupported
            });
        };

        let response = NewResponse {
            session_id: session.session_id,
            task_id: task.id.clone(),
            payload: ChoicePayload {
                choice,
                rt_ms: None,
            },
        };
        if let Err(error) = self.api.submit_response(&response).await {
            tracing::warn!(%error, task_id = %response.task_id, "response not saved");
            self.status = RunnerStatus::Error(messages::RESPONSE_FAILED.into());
            return Err(error.into());
        }

        if self.index + 1 < total {
            self.index += 1;
            self.status = RunnerStatus::InProgress;
            Ok(SubmitOutcome::Advanced { next: self.index })
        } else {
            tracing::info!(session_id = self.session_id, "session completed");
            self.status = RunnerStatus::Completed;
            Ok(SubmitOutcome::Completed)
        }
    }
}

fn is_runnable(entry: &TaskEntry) -> bool {
    entry.task_type().is_some_and(TaskType::is_runnable)
}

impl std::fmt::Debug for ParticipantRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticipantRunner")
            .field("session_id", &self.session_id)
            .field("index", &self.index)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}
