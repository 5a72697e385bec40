use axum::extract::State;
use axum::Json;
use futures::future::join_all;

use crate::api::docs::{create_document, NewDocument};
use crate::error::AppError;
use crate::fetch::PageFetcher;
use crate::models::{DocSource, ImportItem, ImportPayload, ImportResponse};
use crate::state::AppState;
use crate::store::DocumentStore;

/// URL imports are capped per batch; extra items are dropped with a log line.
pub const MAX_URL_IMPORTS: usize = 10;

/// Core import logic — separated from the HTTP layer for testability.
///
/// For `paste`/`upload` batches the items are used as given. For `url`
/// batches each item's `origin` is fetched (concurrently, capped at
/// [`MAX_URL_IMPORTS`]); items without an origin or whose fetch fails are
/// skipped. Every surviving item goes through the same create path as a
/// regular save: trimmed, tagged, persisted, backlink-synchronized.
pub async fn process_import(
    store: &dyn DocumentStore,
    fetcher: &dyn PageFetcher,
    payload: ImportPayload,
) -> Result<ImportResponse, AppError> {
    if !payload.source.is_import_source() {
        return Err(AppError::BadRequest(format!(
            "'{}' is not a valid import source",
            payload.source
        )));
    }

    let items = if payload.source == DocSource::Url {
        fetch_url_items(fetcher, &payload.items).await
    } else {
        payload.items
    };

    let mut created = Vec::new();
    for item in items {
        // Items with nothing in them are skipped, not fatal.
        if item.title.trim().is_empty() || item.body.trim().is_empty() {
            continue;
        }
        let doc = create_document(
            store,
            NewDocument {
                title: item.title,
                body: item.body,
                source: payload.source,
                origin: item.origin,
            },
        )
        .await?;
        created.push(doc);
    }

    Ok(ImportResponse {
        created_count: created.len(),
        items: created,
    })
}

/// Resolve `url` items into concrete title/body pairs by fetching each
/// origin. Failed or origin-less items collapse to nothing.
async fn fetch_url_items(fetcher: &dyn PageFetcher, items: &[ImportItem]) -> Vec<ImportItem> {
    if items.len() > MAX_URL_IMPORTS {
        tracing::info!(
            "URL import batch of {} truncated to {}",
            items.len(),
            MAX_URL_IMPORTS
        );
    }

    let fetches = items.iter().take(MAX_URL_IMPORTS).map(|item| async move {
        let origin = item.origin.as_deref()?;
        match fetcher.fetch_page(origin).await {
            Ok(page) => Some(ImportItem {
                // The page's own <title> wins over whatever the client sent.
                title: page.title.unwrap_or_else(|| item.title.clone()),
                body: page.body,
                origin: Some(origin.to_string()),
            }),
            Err(e) => {
                tracing::warn!("Skipping URL import of '{}': {}", origin, e);
                None
            }
        }
    });

    join_all(fetches).await.into_iter().flatten().collect()
}

/// Axum handler for `POST /api/docs/import`.
pub async fn import_handler(
    State(state): State<AppState>,
    Json(payload): Json<ImportPayload>,
) -> Result<Json<ImportResponse>, AppError> {
    let response =
        process_import(state.store.as_ref(), state.fetcher.as_ref(), payload).await?;
    Ok(Json(response))
}
