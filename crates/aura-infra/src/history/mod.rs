//! Conversation history store implementations.

pub mod memory;

pub use memory::MemoryHistoryStore;
