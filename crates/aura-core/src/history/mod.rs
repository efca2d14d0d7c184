//! Conversation history for Aura.
//!
//! This module defines the `HistoryStore` trait that the infrastructure
//! layer implements for per-user transcript persistence, and the
//! `RetentionPolicy` every store applies on append.

pub mod box_store;
pub mod retention;
pub mod store;
