use axum::extract::{Multipart, State};
use axum::Json;

use crate::api::import::process_import;
use crate::error::AppError;
use crate::models::{DocSource, ImportItem, ImportPayload, ImportResponse};
use crate::state::AppState;

/// File extensions accepted by the upload endpoint.
const ALLOWED_EXTENSIONS: [&str; 3] = ["md", "markdown", "txt"];

/// Axum handler for `POST /api/docs/upload`.
///
/// Accepts a multipart form with one or more fields named "file", each a
/// markdown or plain-text document. The filename stem becomes the title
/// and the file contents the body; everything then runs through the
/// regular import path with `source: upload`.
pub async fn upload_docs_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImportResponse>, AppError> {
    let mut items = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name != "file" {
            continue;
        }

        let file_name = field.file_name().unwrap_or("note.md").to_string();
        let Some(title) = title_from_filename(&file_name) else {
            return Err(AppError::BadRequest(
                "Only markdown or plain text files are allowed".into(),
            ));
        };

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read file: {e}")))?;
        let body = String::from_utf8(data.to_vec())
            .map_err(|_| AppError::BadRequest(format!("'{}' is not valid UTF-8", file_name)))?;

        items.push(ImportItem {
            title,
            body,
            origin: None,
        });
    }

    if items.is_empty() {
        return Err(AppError::BadRequest("No file field found in request".into()));
    }

    let response = process_import(
        state.store.as_ref(),
        state.fetcher.as_ref(),
        ImportPayload {
            source: DocSource::Upload,
            items,
        },
    )
    .await?;
    Ok(Json(response))
}

/// Derive a document title from an uploaded filename.
///
/// Returns `None` for disallowed extensions. The extension is dropped;
/// the rest of the name is kept as-is.
fn title_from_filename(file_name: &str) -> Option<String> {
    let (stem, extension) = file_name.rsplit_once('.')?;
    if !ALLOWED_EXTENSIONS.contains(&extension.to_lowercase().as_str()) {
        return None;
    }
    let stem = stem.trim();
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_filename_allowed() {
        assert_eq!(
            title_from_filename("Reading Notes.md"),
            Some("Reading Notes".to_string())
        );
        assert_eq!(
            title_from_filename("journal.MARKDOWN"),
            Some("journal".to_string())
        );
        assert_eq!(title_from_filename("todo.txt"), Some("todo".to_string()));
    }

    #[test]
    fn test_title_from_filename_rejected() {
        assert_eq!(title_from_filename("image.png"), None);
        assert_eq!(title_from_filename("archive.tar.gz"), None);
        assert_eq!(title_from_filename("no-extension"), None);
        assert_eq!(title_from_filename(".md"), None);
    }

    #[test]
    fn test_dotted_stem_keeps_inner_dots() {
        assert_eq!(
            title_from_filename("v1.2 release notes.md"),
            Some("v1.2 release notes".to_string())
        );
    }
}
