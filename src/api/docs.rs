use axum::extract::{Path, State};
use axum::response::Html;
use axum::Json;
use chrono::Utc;
use uuid::Uuid;

use crate::backlinks::sync_backlinks;
use crate::error::AppError;
use crate::models::{
    CreateDocumentRequest, DeleteResponse, DocSource, Document, UpdateDocumentRequest,
};
use crate::nlp::tags::{extract_tags, DEFAULT_TAG_COUNT};
use crate::rendering::markdown::render_markdown;
use crate::state::AppState;
use crate::store::DocumentStore;

/// Input for the shared create path, used by editor saves, import batches
/// and file uploads alike.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub title: String,
    pub body: String,
    pub source: DocSource,
    pub origin: Option<String>,
}

/// Create a document and bring the backlink graph up to date.
///
/// Trims title and body, derives tags from their concatenation, assigns a
/// fresh id and timestamps, persists the record, then runs the backlink
/// synchronizer so other documents referencing the new title pick it up.
pub async fn create_document(
    store: &dyn DocumentStore,
    input: NewDocument,
) -> Result<Document, AppError> {
    let title = input.title.trim().to_string();
    let body = input.body.trim().to_string();
    if title.is_empty() || body.is_empty() {
        return Err(AppError::BadRequest("title and body are required".into()));
    }

    let now = Utc::now().timestamp_millis();
    let tags = extract_tags(&format!("{} {}", title, body), DEFAULT_TAG_COUNT);
    let doc = Document {
        id: Uuid::new_v4().to_string(),
        title,
        body,
        tags,
        created_at: now,
        updated_at: now,
        source: input.source,
        origin: input.origin,
        backlinks: Vec::new(),
    };

    store.create(doc.clone()).await?;
    sync_backlinks(store, &doc).await?;
    Ok(doc)
}

/// Apply a partial update and bring the backlink graph up to date.
///
/// Omitted fields keep their value. Tags are recomputed from the effective
/// title and body unless the caller supplied them explicitly, in which
/// case they are deduplicated in order.
pub async fn update_document(
    store: &dyn DocumentStore,
    id: &str,
    request: UpdateDocumentRequest,
) -> Result<Document, AppError> {
    let updated = store
        .mutate(
            id,
            Box::new(move |doc| {
                if let Some(title) = request.title {
                    doc.title = title.trim().to_string();
                }
                if let Some(body) = request.body {
                    doc.body = body.trim().to_string();
                }
                doc.tags = match request.tags {
                    Some(tags) => dedup_tags(tags),
                    None => {
                        extract_tags(&format!("{} {}", doc.title, doc.body), DEFAULT_TAG_COUNT)
                    }
                };
                doc.updated_at = Utc::now().timestamp_millis();
            }),
        )
        .await?;

    sync_backlinks(store, &updated).await?;
    Ok(updated)
}

/// Drop duplicate tags, keeping first occurrences in order.
fn dedup_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    tags.into_iter().filter(|t| seen.insert(t.clone())).collect()
}

/// Axum handler for `GET /api/docs`. Most recently updated first.
pub async fn list_docs_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Document>>, AppError> {
    let mut docs = state.store.list().await?;
    docs.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    Ok(Json(docs))
}

/// Axum handler for `POST /api/docs`.
pub async fn create_doc_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateDocumentRequest>,
) -> Result<Json<Document>, AppError> {
    let doc = create_document(
        state.store.as_ref(),
        NewDocument {
            title: request.title,
            body: request.body,
            source: request.source.unwrap_or(DocSource::Editor),
            origin: request.origin,
        },
    )
    .await?;
    Ok(Json(doc))
}

/// Axum handler for `GET /api/docs/{id}`.
pub async fn get_doc_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Document>, AppError> {
    let doc = state
        .store
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("document not found".into()))?;
    Ok(Json(doc))
}

/// Axum handler for `GET /api/docs/{id}/html`. Serves the rendered body.
pub async fn doc_html_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let doc = state
        .store
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("document not found".into()))?;
    Ok(Html(render_markdown(&doc.body)))
}

/// Axum handler for `PUT /api/docs/{id}`.
pub async fn update_doc_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateDocumentRequest>,
) -> Result<Json<Document>, AppError> {
    let doc = update_document(state.store.as_ref(), &id, request).await?;
    Ok(Json(doc))
}

/// Axum handler for `DELETE /api/docs/{id}`.
///
/// Backlinks other documents hold pointing at the deleted id are NOT
/// retracted; they remain as stale entries. Known limitation, kept.
pub async fn delete_doc_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let deleted = state.store.delete(&id).await?;
    Ok(Json(DeleteResponse { id, deleted }))
}
