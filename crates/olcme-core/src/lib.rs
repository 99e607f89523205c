//! # olcme-core
//!
//! Core types for the Ölçme Lab console.
//!
//! This crate provides the foundational types shared across all olcme crates:
//! - Entity structs for the backend resources (studies, instruments, sessions, responses)
//! - Wire request/response bodies for the REST API
//! - Enums for choices, task types, and instrument templates
//! - The instrument spec document with its typed task projection and immutable edits
//! - Spec validation and the built-in instrument templates
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod spec;

pub use errors::{CoreError, SpecEditError};
