//! BoxHistoryStore -- object-safe dynamic dispatch wrapper for HistoryStore.
//!
//! Same blanket-impl pattern as `BoxLlmProvider`:
//! 1. Define an object-safe `HistoryStoreDyn` trait with boxed futures
//! 2. Blanket-impl `HistoryStoreDyn` for all `T: HistoryStore`
//! 3. `BoxHistoryStore` wraps `Box<dyn HistoryStoreDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use aura_types::error::RepositoryError;
use aura_types::llm::Message;

use super::store::HistoryStore;

/// Object-safe version of [`HistoryStore`] with boxed futures.
///
/// This trait exists solely to enable dynamic dispatch (`dyn HistoryStoreDyn`).
/// A blanket implementation is provided for all types implementing
/// `HistoryStore`.
pub trait HistoryStoreDyn: Send + Sync {
    fn history_boxed<'a>(
        &'a self,
        user_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Message>, RepositoryError>> + Send + 'a>>;

    fn append_boxed<'a>(
        &'a self,
        user_id: &'a str,
        messages: Vec<Message>,
    ) -> Pin<Box<dyn Future<Output = Result<(), RepositoryError>> + Send + 'a>>;
}

/// Blanket implementation: any `HistoryStore` automatically implements
/// `HistoryStoreDyn`.
impl<T: HistoryStore> HistoryStoreDyn for T {
    fn history_boxed<'a>(
        &'a self,
        user_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Message>, RepositoryError>> + Send + 'a>> {
        Box::pin(self.history(user_id))
    }

    fn append_boxed<'a>(
        &'a self,
        user_id: &'a str,
        messages: Vec<Message>,
    ) -> Pin<Box<dyn Future<Output = Result<(), RepositoryError>> + Send + 'a>> {
        Box::pin(self.append(user_id, messages))
    }
}

/// Type-erased history store for runtime backend selection.
///
/// Since `HistoryStore` uses RPITIT, it cannot be used as a trait object
/// directly. `BoxHistoryStore` provides equivalent methods that delegate to
/// the inner `HistoryStoreDyn` trait object.
pub struct BoxHistoryStore {
    inner: Box<dyn HistoryStoreDyn + Send + Sync>,
}

impl BoxHistoryStore {
    /// Wrap a concrete `HistoryStore` in a type-erased box.
    pub fn new<T: HistoryStore + 'static>(store: T) -> Self {
        Self {
            inner: Box::new(store),
        }
    }

    /// Full stored transcript for a user, oldest first.
    pub async fn history(&self, user_id: &str) -> Result<Vec<Message>, RepositoryError> {
        self.inner.history_boxed(user_id).await
    }

    /// Append messages to a user's transcript, then apply retention.
    pub async fn append(
        &self,
        user_id: &str,
        messages: Vec<Message>,
    ) -> Result<(), RepositoryError> {
        self.inner.append_boxed(user_id, messages).await
    }
}
