use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::error::AppError;
use crate::models::{Document, MarkdownExport};
use crate::state::AppState;
use crate::store::DocumentStore;

/// Query parameters for `GET /api/docs/export`.
#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    /// Comma-separated document ids. Required.
    pub ids: Option<String>,
    /// `json` (default) or `md`.
    pub format: Option<String>,
}

/// An assembled export, one variant per format.
#[derive(Debug)]
pub enum Export {
    Json(Vec<Document>),
    Markdown(String),
}

/// Core export logic — separated from the HTTP layer for testability.
///
/// Ids that resolve to nothing are skipped silently; an empty or missing
/// `ids` parameter is an error. The markdown format concatenates
/// `# title` + body sections separated by horizontal rules.
pub async fn process_export(
    store: &dyn DocumentStore,
    query: ExportQuery,
) -> Result<Export, AppError> {
    let ids: Vec<String> = query
        .ids
        .as_deref()
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if ids.is_empty() {
        return Err(AppError::BadRequest("No document IDs provided".into()));
    }

    let mut docs = Vec::new();
    for id in &ids {
        if let Some(doc) = store.get(id).await? {
            docs.push(doc);
        }
    }

    match query.format.as_deref() {
        Some("md") => {
            let content = docs
                .iter()
                .map(|d| format!("# {}\n\n{}", d.title, d.body))
                .collect::<Vec<_>>()
                .join("\n\n---\n\n");
            Ok(Export::Markdown(content))
        }
        _ => Ok(Export::Json(docs)),
    }
}

/// Axum handler for `GET /api/docs/export`.
pub async fn export_handler(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, AppError> {
    match process_export(state.store.as_ref(), query).await? {
        Export::Json(docs) => Ok(Json(docs).into_response()),
        Export::Markdown(content) => Ok(Json(MarkdownExport { content }).into_response()),
    }
}
