//! Infrastructure layer for Aura.
//!
//! Concrete implementations of the ports defined in `aura-core`: SQLite and
//! in-process conversation stores, the LanceDB knowledge index, local
//! fastembed embeddings, and the OpenAI-compatible LLM provider client.

pub mod config;
pub mod history;
pub mod llm;
pub mod sqlite;
pub mod vector;
