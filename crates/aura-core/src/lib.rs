//! Business logic and service trait definitions for Aura.
//!
//! This crate defines the "ports" (store, provider, and index traits) that
//! the infrastructure layer implements, plus the chat pipeline that wires
//! them together. It depends only on `aura-types` -- never on `aura-infra`
//! or any database/IO crate.

pub mod chat;
pub mod history;
pub mod llm;
pub mod retrieval;
pub mod safety;
