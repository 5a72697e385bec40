use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use mnemo::config::AppConfig;
use mnemo::error::AppError;
use mnemo::fetch::{FetchedPage, PageFetcher};
use mnemo::models::Document;
use mnemo::state::AppState;
use mnemo::store::{DocumentStore, MemoryDocumentStore};

/// Fetcher serving canned pages, so URL-import tests never touch the
/// network.
pub struct CannedFetcher {
    pages: HashMap<String, FetchedPage>,
}

impl CannedFetcher {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
        }
    }

    pub fn with_page(mut self, url: &str, title: Option<&str>, body: &str) -> Self {
        self.pages.insert(
            url.to_string(),
            FetchedPage {
                title: title.map(str::to_string),
                body: body.to_string(),
            },
        );
        self
    }
}

#[async_trait]
impl PageFetcher for CannedFetcher {
    async fn fetch_page(&self, origin: &str) -> Result<FetchedPage, AppError> {
        self.pages
            .get(origin)
            .cloned()
            .ok_or_else(|| AppError::Upstream(format!("no such page: {}", origin)))
    }
}

/// Provides the router and direct store access for integration tests.
pub struct TestEnv {
    pub router: axum::Router,
    pub store: Arc<dyn DocumentStore>,
}

impl TestEnv {
    /// Build a router wired to a fresh in-memory store.
    pub fn new() -> Self {
        Self::with_fetcher(CannedFetcher::new())
    }

    /// Same, with canned pages for URL-import tests.
    pub fn with_fetcher(fetcher: CannedFetcher) -> Self {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
        let state = AppState {
            store: store.clone(),
            fetcher: Arc::new(fetcher),
            config: AppConfig::default(),
        };
        Self {
            router: mnemo::api::router(state),
            store,
        }
    }

    /// Build an `axum_test::TestServer` from this environment's router.
    pub fn server(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .expect_success_by_default()
            .build(self.router.clone())
    }

    /// Build a `TestServer` that does NOT expect success by default (for
    /// error tests).
    pub fn server_permissive(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .build(self.router.clone())
    }

    /// Helper: create a document via the API and return it.
    pub async fn create_doc(
        &self,
        server: &axum_test::TestServer,
        title: &str,
        body: &str,
    ) -> Document {
        server
            .post("/api/docs")
            .json(&serde_json::json!({
                "title": title,
                "body": body,
            }))
            .await
            .json::<Document>()
    }
}
