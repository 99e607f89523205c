//! Entity structs and wire bodies for the survey backend.
//!
//! Each entity mirrors one JSON shape returned by (or posted to) the REST
//! backend. All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for
//! JSON roundtrip and schema validation.

mod auth;
mod health;
mod instrument;
mod response;
mod session;
mod study;

pub use auth::{Credentials, LoginResponse, Registered};
pub use health::HealthStatus;
pub use instrument::{Instrument, InstrumentSummary, NewInstrument, SpecUpdate};
pub use response::{ChoicePayload, NewResponse, ResponseRow, SubmittedResponse};
pub use session::{CreatedSession, NewSession, Session, SessionInstrument};
pub use study::{NewStudy, Study};

/// Backend id of a study.
pub type StudyId = i64;
/// Backend id of an instrument.
pub type InstrumentId = i64;
/// Backend id of a participant session.
pub type SessionId = i64;
/// Backend id of a stored response row.
pub type ResponseId = i64;
