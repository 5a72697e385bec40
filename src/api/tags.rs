use std::collections::HashMap;

use axum::extract::State;
use axum::Json;

use crate::error::AppError;
use crate::models::{Document, TagCount};
use crate::state::AppState;

/// Number of entries in the tag cloud.
pub const TAG_CLOUD_LIMIT: usize = 10;

/// Aggregate tag usage across the corpus.
///
/// Counts occurrences of each tag over all documents and returns the top
/// `limit` by count descending; equal counts order alphabetically so the
/// cloud is deterministic.
pub fn aggregate_tags(docs: &[Document], limit: usize) -> Vec<TagCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for doc in docs {
        for tag in &doc.tags {
            *counts.entry(tag.as_str()).or_insert(0) += 1;
        }
    }

    let mut cloud: Vec<TagCount> = counts
        .into_iter()
        .map(|(name, count)| TagCount {
            name: name.to_string(),
            count,
        })
        .collect();
    cloud.sort_by(|a, b| b.count.cmp(&a.count).then(a.name.cmp(&b.name)));
    cloud.truncate(limit);
    cloud
}

/// Axum handler for `GET /api/docs/tags`.
pub async fn tag_cloud_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<TagCount>>, AppError> {
    let docs = state.store.list().await?;
    Ok(Json(aggregate_tags(&docs, TAG_CLOUD_LIMIT)))
}
