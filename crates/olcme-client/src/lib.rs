//! # olcme-client
//!
//! REST client for the Ölçme Lab survey backend.
//!
//! - [`SurveyApi`]: one async method per backend endpoint.
//! - [`ApiClient`]: the `reqwest` implementation. Attaches JSON content type
//!   and the bearer token from an [`olcme_auth::AuthContext`], turns non-2xx
//!   responses into [`ApiError::Status`] carrying the body text.
//! - [`InMemoryApi`]: a recording in-memory backend for tests and offline runs.

mod api;
mod client;
mod error;
mod http;
pub mod memory;

pub use api::SurveyApi;
pub use client::ApiClient;
pub use error::ApiError;
pub use memory::{InMemoryApi, RecordedCall};
