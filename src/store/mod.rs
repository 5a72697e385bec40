pub mod memory;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::Document;

pub use memory::MemoryDocumentStore;

/// In-place mutation applied under the store's write lock.
pub type UpdateFn = Box<dyn FnOnce(&mut Document) + Send>;

/// Storage seam for document records.
///
/// This trait allows swapping the backing store and mocking it in tests.
/// Implementations are simple last-write-wins key-value maps: no
/// transactions, no conflict detection, no retries.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All stored documents, in no particular order.
    async fn list(&self) -> Result<Vec<Document>, AppError>;

    /// Find a document by id.
    async fn get(&self, id: &str) -> Result<Option<Document>, AppError>;

    /// Insert a document. An existing record under the same id is
    /// overwritten (last write wins).
    async fn create(&self, doc: Document) -> Result<(), AppError>;

    /// Apply `update` to the stored document and return the new state.
    /// Fails with `AppError::NotFound` when the id is absent.
    async fn mutate(&self, id: &str, update: UpdateFn) -> Result<Document, AppError>;

    /// Remove a document. Returns whether a record existed.
    async fn delete(&self, id: &str) -> Result<bool, AppError>;
}
