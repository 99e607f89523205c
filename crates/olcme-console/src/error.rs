use olcme_auth::AuthError;
use olcme_client::ApiError;
use olcme_core::SpecEditError;
use olcme_core::spec::SpecIssue;
use thiserror::Error;

use crate::messages;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Edit(#[from] SpecEditError),

    #[error("{}", messages::NO_TOKEN)]
    MissingToken,

    #[error("{}", messages::INVALID_JSON)]
    InvalidJson,

    #[error("{}", messages::SELECT_STUDY_FIRST)]
    NoStudySelected,

    #[error("{}", messages::CANCELLED)]
    Cancelled,

    /// The spec has structural errors and cannot be saved.
    #[error("spec has {} structural error(s); first: {}", .0.len(), .0.first().map(ToString::to_string).unwrap_or_default())]
    InvalidSpec(Vec<SpecIssue>),

    #[error("no session loaded")]
    NoSession,

    #[error("{}", messages::NO_TASKS)]
    NoTasks,

    #[error("{}", messages::MALFORMED_TASK)]
    Malformed,

    #[error("{}", messages::UNSUPPORTED_TASK)]
    Unsupported,

    #[error("{}", messages::COMPLETED)]
    Completed,

    #[error("no participant link yet; create a session first")]
    NoLink,

    #[error("clipboard error: {0}")]
    Clipboard(String),

    #[error("invalid session reference '{0}'")]
    InvalidSessionRef(String),
}
