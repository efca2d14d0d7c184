//! Arrow schema definition for the knowledge base table.
//!
//! The embedding dimension matches the local fastembed model
//! (bge-small-en-v1.5 produces 384-dimensional vectors).

use std::sync::Arc;

use arrow_schema::{DataType, Field, Schema};

/// Dimension of embedding vectors stored in the knowledge table.
pub const EMBEDDING_DIMENSION: i32 = 384;

/// Name of the LanceDB table holding the wellness knowledge base.
pub const KNOWLEDGE_TABLE: &str = "wellness_docs";

/// Arrow schema for knowledge base rows.
///
/// - `id`: corpus position of the document
/// - `text`: full document text, returned verbatim on retrieval
/// - `embedding_model`: model that produced the vector, for re-embed detection
/// - `vector`: fixed-size float32 embedding
pub fn knowledge_schema() -> Schema {
    Schema::new(vec![
        Field::new("id", DataType::Int32, false),
        Field::new("text", DataType::Utf8, false),
        Field::new("embedding_model", DataType::Utf8, false),
        Field::new(
            "vector",
            DataType::FixedSizeList(
                Arc::new(Field::new("item", DataType::Float32, true)),
                EMBEDDING_DIMENSION,
            ),
            false,
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knowledge_schema_fields() {
        let schema = knowledge_schema();
        assert_eq!(schema.fields().len(), 4);
        assert_eq!(schema.field(0).name(), "id");
        assert_eq!(schema.field(1).name(), "text");
        assert_eq!(schema.field(2).name(), "embedding_model");
        assert_eq!(schema.field(3).name(), "vector");
    }

    #[test]
    fn test_vector_field_dimension() {
        let schema = knowledge_schema();
        match schema.field(3).data_type() {
            DataType::FixedSizeList(item, size) => {
                assert_eq!(*size, EMBEDDING_DIMENSION);
                assert_eq!(item.data_type(), &DataType::Float32);
            }
            other => panic!("unexpected vector field type: {other:?}"),
        }
    }
}
