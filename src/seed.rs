use crate::error::AppError;
use crate::models::{DocSource, Document};
use crate::store::DocumentStore;

/// Demo documents embedded into the binary.
///
/// Tuples of (id, title, body, tags). Fixed ids keep seeding idempotent
/// across restarts when a snapshot file is in use.
fn seed_entries() -> Vec<(&'static str, &'static str, &'static str, Vec<&'static str>)> {
    vec![
        (
            "seed-welcome",
            "Welcome",
            include_str!("../seed_data/welcome.md"),
            vec!["welcome", "guide"],
        ),
        (
            "seed-auto-tagging",
            "Auto Tagging",
            include_str!("../seed_data/auto_tagging.md"),
            vec!["tags", "frequency"],
        ),
        (
            "seed-backlinks",
            "Backlink Graph",
            include_str!("../seed_data/backlink_graph.md"),
            vec!["backlinks", "linking"],
        ),
        (
            "seed-import-export",
            "Import and Export",
            include_str!("../seed_data/import_export.md"),
            vec!["import", "export", "markdown"],
        ),
    ]
}

/// Insert the demo corpus into an empty store.
///
/// A store that already holds documents is left alone, so user data is
/// never mixed with demo content.
pub async fn seed_demo_data(store: &dyn DocumentStore) -> Result<(), AppError> {
    if !store.list().await?.is_empty() {
        tracing::debug!("Store is not empty, skipping demo seed");
        return Ok(());
    }

    let now = chrono::Utc::now().timestamp_millis();
    let entries = seed_entries();
    let count = entries.len();

    for (i, (id, title, body, tags)) in entries.into_iter().enumerate() {
        // Stagger timestamps so listings have a stable order.
        let stamp = now - (i as i64) * 60_000;
        let doc = Document {
            id: id.to_string(),
            title: title.to_string(),
            body: body.trim().to_string(),
            tags: tags.into_iter().map(String::from).collect(),
            created_at: stamp,
            updated_at: stamp,
            source: DocSource::Seed,
            origin: None,
            backlinks: Vec::new(),
        };
        store.create(doc).await?;
    }

    tracing::info!("Seeded {} demo documents", count);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryDocumentStore;

    #[tokio::test]
    async fn test_seeds_empty_store() {
        let store = MemoryDocumentStore::new();
        seed_demo_data(&store).await.unwrap();

        let docs = store.list().await.unwrap();
        assert_eq!(docs.len(), 4);
        assert!(docs.iter().all(|d| d.source == DocSource::Seed));
        assert!(docs.iter().all(|d| !d.tags.is_empty()));
    }

    #[tokio::test]
    async fn test_does_not_touch_populated_store() {
        let store = MemoryDocumentStore::new();
        seed_demo_data(&store).await.unwrap();
        // Second call sees a populated store and adds nothing.
        seed_demo_data(&store).await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 4);
    }
}
