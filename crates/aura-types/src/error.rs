use thiserror::Error;

/// Errors from repository operations (used by trait definitions in aura-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("serialization error: {0}")]
    Serialization(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_serialization_error_display() {
        let err = RepositoryError::Serialization("unexpected EOF".to_string());
        assert_eq!(err.to_string(), "serialization error: unexpected EOF");
    }
}
