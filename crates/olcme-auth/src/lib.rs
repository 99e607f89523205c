//! # olcme-auth
//!
//! Bearer token handling for the Ölçme Lab console.
//!
//! The backend issues one opaque bearer token on login. This crate persists it
//! (OS keychain via `keyring`, env var, `~/.olcme/credentials` fallback) and
//! hands it to the rest of the workspace as an explicit [`AuthContext`] value
//! loaded once at the command boundary.

pub mod context;
pub mod error;
pub mod expiry;
pub mod token_store;

pub use context::AuthContext;
pub use error::AuthError;
pub use token_store::{CredentialStore, MemoryStore, SystemStore, TokenSource};
