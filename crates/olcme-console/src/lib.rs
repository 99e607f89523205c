//! # olcme-console
//!
//! Screen models of the Ölçme Lab console: the admin dashboard, the
//! instrument editor and the participant runner.
//!
//! Each model owns its state and a single [`StatusLine`]. Operations are
//! `async`, await one backend call at a time through a shared
//! [`olcme_client::SurveyApi`], and update state only after the call
//! returns. Local checks (token, JSON, selection) run before any call.

pub mod clipboard;
pub mod dashboard;
pub mod editor;
pub mod error;
pub mod link;
pub mod messages;
pub mod results;
pub mod runner;
pub mod status;

pub use clipboard::{Clipboard, MemoryClipboard};
pub use dashboard::AdminDashboard;
pub use editor::{InstrumentEditor, TaskForm, TaskPreview};
pub use error::ConsoleError;
pub use link::{parse_session_ref, participant_url};
pub use results::ResultsTable;
pub use runner::{ParticipantRunner, RunnerStatus, RunnerView, SubmitOutcome, TaskView};
pub use status::StatusLine;
