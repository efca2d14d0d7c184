use serde::{Deserialize, Serialize};

/// A single document in the wellness knowledge base.
///
/// The corpus is small and fixed, so documents carry integer ids assigned
/// by their position in the seed list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeDocument {
    pub id: i32,
    pub text: String,
}

impl KnowledgeDocument {
    pub fn new(id: i32, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knowledge_document_serde_roundtrip() {
        let doc = KnowledgeDocument::new(3, "Journaling can help process emotions.");
        let json = serde_json::to_string(&doc).unwrap();
        let parsed: KnowledgeDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, doc);
    }
}
