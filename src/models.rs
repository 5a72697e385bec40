use serde::{Deserialize, Serialize};
use std::fmt;

/// How a document entered the wiki.
///
/// Serialized lowercase on the wire (`"seed"`, `"editor"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocSource {
    /// Shipped with the demo data set.
    Seed,
    /// Written in the editor.
    Editor,
    /// Pasted text import.
    Paste,
    /// File upload import.
    Upload,
    /// Fetched from a URL.
    Url,
}

impl fmt::Display for DocSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocSource::Seed => write!(f, "seed"),
            DocSource::Editor => write!(f, "editor"),
            DocSource::Paste => write!(f, "paste"),
            DocSource::Upload => write!(f, "upload"),
            DocSource::Url => write!(f, "url"),
        }
    }
}

impl DocSource {
    /// Parse a source tag from a string (case-insensitive).
    pub fn from_str_ci(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "seed" => Some(DocSource::Seed),
            "editor" => Some(DocSource::Editor),
            "paste" => Some(DocSource::Paste),
            "upload" => Some(DocSource::Upload),
            "url" => Some(DocSource::Url),
            _ => None,
        }
    }

    /// Returns `true` for the sources an import batch may declare.
    pub fn is_import_source(&self) -> bool {
        matches!(self, DocSource::Paste | DocSource::Upload | DocSource::Url)
    }
}

/// A recorded reference from one document to another.
///
/// The entry lives on the *referring* document: if A's body contains B's
/// title, A's `backlinks` gains `{docId: B.id, title: B.title}`. Maintained
/// by `backlinks::sync_backlinks` after every create/update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backlink {
    /// Id of the referenced document.
    pub doc_id: String,
    /// Title of the referenced document at the time the link was recorded.
    pub title: String,
}

/// A single wiki note.
///
/// The camelCase field names are the wire contract consumed by clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Opaque unique id, immutable after creation.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Markdown body.
    pub body: String,
    /// Auto-derived (or user-supplied) tags; never contains duplicates.
    pub tags: Vec<String>,
    /// Creation time, epoch milliseconds.
    pub created_at: i64,
    /// Last update time, epoch milliseconds. Always >= `created_at`.
    pub updated_at: i64,
    /// How the document entered the wiki.
    pub source: DocSource,
    /// Origin URL for documents imported from the web.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    /// References to other documents whose titles appear in `body`.
    /// No duplicate `docId` entries, never contains `id` itself.
    #[serde(default)]
    pub backlinks: Vec<Backlink>,
}

/// Payload for `POST /api/docs`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDocumentRequest {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub source: Option<DocSource>,
    #[serde(default)]
    pub origin: Option<String>,
}

/// Payload for `PUT /api/docs/{id}`. All fields optional; omitted fields
/// keep their current value. Omitting `tags` recomputes them from the
/// effective title and body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDocumentRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// A single item in an import batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportItem {
    pub title: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

/// Payload for `POST /api/docs/import`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportPayload {
    /// One of `paste`, `upload`, `url`.
    pub source: DocSource,
    pub items: Vec<ImportItem>,
}

/// Response from an import or upload batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    pub created_count: usize,
    pub items: Vec<Document>,
}

/// Response from `DELETE /api/docs/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub id: String,
    pub deleted: bool,
}

/// One entry of the tag cloud.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagCount {
    pub name: String,
    pub count: usize,
}

/// Markdown export body (`format=md`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkdownExport {
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_doc() -> Document {
        Document {
            id: "d1".to_string(),
            title: "Async Rust Patterns".to_string(),
            body: "Notes on async patterns.".to_string(),
            tags: vec!["async".to_string(), "rust".to_string()],
            created_at: 1_700_000_000_000,
            updated_at: 1_700_000_100_000,
            source: DocSource::Editor,
            origin: None,
            backlinks: vec![Backlink {
                doc_id: "d2".to_string(),
                title: "Tokio Internals".to_string(),
            }],
        }
    }

    #[test]
    fn test_document_wire_shape_is_camel_case() {
        let json = serde_json::to_value(sample_doc()).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert_eq!(json["source"], "editor");
        assert_eq!(json["backlinks"][0]["docId"], "d2");
        // origin is omitted entirely when absent
        assert!(json.get("origin").is_none());
    }

    #[test]
    fn test_document_roundtrip() {
        let doc = sample_doc();
        let json = serde_json::to_string(&doc).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, doc.id);
        assert_eq!(back.backlinks, doc.backlinks);
        assert_eq!(back.updated_at, doc.updated_at);
    }

    #[test]
    fn test_document_backlinks_default_on_missing_field() {
        // Older clients may omit backlinks entirely.
        let json = r###"{
            "id": "x",
            "title": "T",
            "body": "B",
            "tags": [],
            "createdAt": 1,
            "updatedAt": 2,
            "source": "paste"
        }"###;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert!(doc.backlinks.is_empty());
        assert_eq!(doc.source, DocSource::Paste);
    }

    #[test]
    fn test_doc_source_parsing() {
        assert_eq!(DocSource::from_str_ci("URL"), Some(DocSource::Url));
        assert_eq!(DocSource::from_str_ci("seed"), Some(DocSource::Seed));
        assert_eq!(DocSource::from_str_ci("bogus"), None);
        assert!(DocSource::Paste.is_import_source());
        assert!(!DocSource::Editor.is_import_source());
    }

    #[test]
    fn test_import_payload_deserialization() {
        let json = r###"{
            "source": "paste",
            "items": [
                { "title": "A", "body": "text" },
                { "title": "B", "body": "more", "origin": "https://example.com" }
            ]
        }"###;
        let payload: ImportPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.source, DocSource::Paste);
        assert_eq!(payload.items.len(), 2);
        assert_eq!(payload.items[1].origin.as_deref(), Some("https://example.com"));
    }
}
