//! Shared domain types for Aura.
//!
//! This crate contains the data shapes used across the Aura wellness
//! service: conversation messages, completion requests, knowledge documents,
//! mood check-ins, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod config;
pub mod error;
pub mod knowledge;
pub mod llm;
pub mod mood;
