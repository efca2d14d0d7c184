//! Knowledge retrieval for Aura.
//!
//! This module defines the embedding and vector index ports the
//! infrastructure layer implements, the fixed wellness corpus, and the
//! `KnowledgeBase` that turns a user message into a prompt context block.

pub mod box_embedder;
pub mod box_index;
pub mod corpus;
pub mod embedder;
pub mod index;
pub mod knowledge;
