pub mod auth;
pub mod instrument;
pub mod results;
pub mod session;
pub mod study;

pub use auth::AuthCommands;
pub use instrument::{InstrumentCommands, TaskCommands};
pub use results::ResultsCommands;
pub use session::SessionCommands;
pub use study::StudyCommands;
