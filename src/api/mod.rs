pub mod docs;
pub mod errors;
pub mod export;
pub mod import;
pub mod search;
pub mod tags;
pub mod upload;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the API router. Shared between `main` and the integration tests.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/docs",
            get(docs::list_docs_handler).post(docs::create_doc_handler),
        )
        .route("/api/docs/search", get(search::search_handler))
        .route("/api/docs/tags", get(tags::tag_cloud_handler))
        .route("/api/docs/export", get(export::export_handler))
        .route("/api/docs/import", post(import::import_handler))
        .route("/api/docs/upload", post(upload::upload_docs_handler))
        .route(
            "/api/docs/{id}",
            get(docs::get_doc_handler)
                .put(docs::update_doc_handler)
                .delete(docs::delete_doc_handler),
        )
        .route("/api/docs/{id}/html", get(docs::doc_html_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
