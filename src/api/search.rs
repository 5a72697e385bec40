use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use crate::error::AppError;
use crate::models::Document;
use crate::state::AppState;

/// Query parameters for `GET /api/docs/search`. All optional; omitted
/// filters match everything.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// Case-insensitive substring matched against title, body, and tags.
    pub q: Option<String>,
    /// Exact tag membership.
    pub tag: Option<String>,
    /// Recency window against `updatedAt`: `24h`, `7d`, or `30d`.
    /// Unrecognized values are ignored.
    pub since: Option<String>,
}

const HOUR_MILLIS: i64 = 60 * 60 * 1000;

/// Apply the search filters to a document list and sort it most recently
/// updated first. Plain substring matching only, without ranking or
/// stemming.
pub fn filter_documents(
    mut docs: Vec<Document>,
    query: &SearchQuery,
    now_millis: i64,
) -> Vec<Document> {
    let needle = query
        .q
        .as_deref()
        .map(str::to_lowercase)
        .filter(|q| !q.is_empty());
    let cutoff = query.since.as_deref().and_then(|s| match s {
        "24h" => Some(now_millis - 24 * HOUR_MILLIS),
        "7d" => Some(now_millis - 7 * 24 * HOUR_MILLIS),
        "30d" => Some(now_millis - 30 * 24 * HOUR_MILLIS),
        _ => None,
    });

    docs.retain(|doc| {
        let query_match = needle.as_deref().is_none_or(|q| {
            doc.title.to_lowercase().contains(q)
                || doc.body.to_lowercase().contains(q)
                || doc.tags.iter().any(|t| t.to_lowercase().contains(q))
        });
        let tag_match = query
            .tag
            .as_deref()
            .is_none_or(|tag| doc.tags.iter().any(|t| t == tag));
        let date_match = cutoff.is_none_or(|cutoff| doc.updated_at > cutoff);
        query_match && tag_match && date_match
    });

    docs.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    docs
}

/// Axum handler for `GET /api/docs/search`.
pub async fn search_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Document>>, AppError> {
    let docs = state.store.list().await?;
    let now = Utc::now().timestamp_millis();
    Ok(Json(filter_documents(docs, &query, now)))
}
