use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::AppError;
use crate::models::Document;
use crate::store::{DocumentStore, UpdateFn};

/// In-memory last-write-wins document store.
///
/// The whole corpus lives in a `HashMap` behind a `RwLock`. An optional
/// snapshot file is rewritten best-effort after every mutation and loaded
/// at startup. Durability is not guaranteed: a failed snapshot write never
/// fails the operation.
pub struct MemoryDocumentStore {
    inner: RwLock<HashMap<String, Document>>,
    snapshot_path: Option<PathBuf>,
}

impl MemoryDocumentStore {
    /// Create an empty store with no snapshot file.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            snapshot_path: None,
        }
    }

    /// Create a store backed by a JSON snapshot file.
    ///
    /// An existing snapshot is loaded; a missing one is treated as an
    /// empty corpus; a corrupt one is a startup error.
    pub fn with_snapshot(path: PathBuf) -> Result<Self, AppError> {
        let mut docs = HashMap::new();
        if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .map_err(|e| AppError::Store(format!("Failed to read snapshot: {}", e)))?;
            let loaded: Vec<Document> = serde_json::from_str(&raw)
                .map_err(|e| AppError::Store(format!("Corrupt snapshot file: {}", e)))?;
            for doc in loaded {
                docs.insert(doc.id.clone(), doc);
            }
        }
        Ok(Self {
            inner: RwLock::new(docs),
            snapshot_path: Some(path),
        })
    }

    /// Serialize the current corpus to the snapshot file, if configured.
    /// Failures are logged and swallowed.
    async fn persist(&self) {
        let Some(path) = &self.snapshot_path else {
            return;
        };
        let mut docs: Vec<Document> = self.inner.read().await.values().cloned().collect();
        docs.sort_by(|a, b| a.id.cmp(&b.id));
        match serde_json::to_vec_pretty(&docs) {
            Ok(bytes) => {
                if let Err(e) = tokio::fs::write(path, bytes).await {
                    tracing::warn!("Failed to write snapshot {}: {}", path.display(), e);
                }
            }
            Err(e) => tracing::warn!("Failed to serialize snapshot: {}", e),
        }
    }
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn list(&self) -> Result<Vec<Document>, AppError> {
        Ok(self.inner.read().await.values().cloned().collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Document>, AppError> {
        Ok(self.inner.read().await.get(id).cloned())
    }

    async fn create(&self, doc: Document) -> Result<(), AppError> {
        self.inner.write().await.insert(doc.id.clone(), doc);
        self.persist().await;
        Ok(())
    }

    async fn mutate(&self, id: &str, update: UpdateFn) -> Result<Document, AppError> {
        let updated = {
            let mut map = self.inner.write().await;
            let doc = map
                .get_mut(id)
                .ok_or_else(|| AppError::NotFound(format!("document '{}' not found", id)))?;
            update(doc);
            doc.clone()
        };
        self.persist().await;
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let existed = self.inner.write().await.remove(id).is_some();
        if existed {
            self.persist().await;
        }
        Ok(existed)
    }
}
