//! LanceDB vector store wrapper for connection management and table operations.
//!
//! Provides `LanceVectorStore` which wraps a `lancedb::Connection` and offers
//! helper methods for table lifecycle (create, open, drop) using Arrow schemas.
//! The knowledge index built on top lives in [`super::index`].

use std::path::PathBuf;
use std::sync::Arc;

use arrow_schema::Schema;

/// LanceDB vector store wrapper for connection and table management.
///
/// Manages a single LanceDB connection at a filesystem path, conventionally
/// `{data_dir}/knowledge`.
pub struct LanceVectorStore {
    db: lancedb::Connection,
    base_path: PathBuf,
}

impl LanceVectorStore {
    /// Open or create a LanceDB vector store at the given path.
    ///
    /// Creates the directory if it does not exist.
    pub async fn new(base_path: PathBuf) -> Result<Self, lancedb::Error> {
        // Ensure directory exists
        std::fs::create_dir_all(&base_path).map_err(|e| lancedb::Error::CreateDir {
            path: base_path.display().to_string(),
            source: e,
        })?;

        let uri = base_path
            .to_str()
            .ok_or_else(|| lancedb::Error::InvalidInput {
                message: format!("Path contains invalid UTF-8: {}", base_path.display()),
            })?;

        let db = lancedb::connect(uri).execute().await?;

        Ok(Self { db, base_path })
    }

    /// Ensure a table exists with the given schema.
    ///
    /// If the table already exists, opens it. If not, creates an empty table
    /// with the provided schema.
    pub async fn ensure_table(
        &self,
        table_name: &str,
        schema: Arc<Schema>,
    ) -> Result<lancedb::Table, lancedb::Error> {
        // Try to open the existing table first
        match self.db.open_table(table_name).execute().await {
            Ok(table) => Ok(table),
            Err(lancedb::Error::TableNotFound { .. }) => {
                // Table doesn't exist, create it empty
                self.db
                    .create_empty_table(table_name, schema)
                    .execute()
                    .await
            }
            Err(e) => Err(e),
        }
    }

    /// Check if a table exists in the database.
    pub async fn table_exists(&self, table_name: &str) -> bool {
        self.db.open_table(table_name).execute().await.is_ok()
    }

    /// Drop a table from the database.
    ///
    /// Returns Ok(()) even if the table does not exist (idempotent).
    pub async fn drop_table(&self, table_name: &str) -> Result<(), lancedb::Error> {
        match self.db.drop_table(table_name, &[]).await {
            Ok(()) => Ok(()),
            Err(lancedb::Error::TableNotFound { .. }) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// List all table names in the database.
    pub async fn table_names(&self) -> Result<Vec<String>, lancedb::Error> {
        self.db.table_names().execute().await
    }

    /// Get a reference to the underlying LanceDB connection.
    pub fn connection(&self) -> &lancedb::Connection {
        &self.db
    }

    /// Get the base path of the vector store.
    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::schema::knowledge_schema;
    use tempfile::TempDir;

    async fn setup_store() -> (LanceVectorStore, TempDir) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = LanceVectorStore::new(dir.path().join("knowledge"))
            .await
            .expect("Failed to create store");
        (store, dir)
    }

    #[tokio::test]
    async fn test_connection_opens_successfully() {
        let (store, _dir) = setup_store().await;
        let tables = store.table_names().await.expect("Failed to list tables");
        assert!(tables.is_empty());
    }

    #[tokio::test]
    async fn test_ensure_table_creates_and_reopens() {
        let (store, _dir) = setup_store().await;
        let schema = Arc::new(knowledge_schema());

        assert!(!store.table_exists("wellness_docs").await);

        store
            .ensure_table("wellness_docs", schema.clone())
            .await
            .expect("Failed to create table");
        assert!(store.table_exists("wellness_docs").await);

        // Second call opens the existing table rather than failing
        store
            .ensure_table("wellness_docs", schema)
            .await
            .expect("Failed to reopen table");
        assert_eq!(store.table_names().await.unwrap(), vec!["wellness_docs"]);
    }

    #[tokio::test]
    async fn test_drop_table_idempotent() {
        let (store, _dir) = setup_store().await;
        let schema = Arc::new(knowledge_schema());

        store
            .ensure_table("to_drop", schema)
            .await
            .expect("Failed to create table");

        store
            .drop_table("to_drop")
            .await
            .expect("Failed to drop existing table");

        // Dropping again should still succeed
        store
            .drop_table("to_drop")
            .await
            .expect("Drop should be idempotent");
        assert!(!store.table_exists("to_drop").await);
    }
}
