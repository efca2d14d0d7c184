//! The chat pipeline for Aura.
//!
//! `PromptBuilder` assembles completion requests from persona, history,
//! and retrieved context; `ChatService` runs the full turn: crisis screen,
//! recall, retrieval, generation, moderation, persistence.

pub mod prompt;
pub mod service;
