//! LanceDB-backed vector storage and local embedding generation.

pub mod embedder;
pub mod index;
pub mod lance;
pub mod schema;

pub use embedder::FastEmbedder;
pub use index::LanceKnowledgeIndex;
pub use lance::LanceVectorStore;
