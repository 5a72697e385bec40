mod common;

use axum_test::multipart::{MultipartForm, Part};
use mnemo::models::Document;

#[tokio::test]
async fn upload_markdown_files_creates_documents() {
    let env = common::TestEnv::new();
    let server = env.server();

    let form = MultipartForm::new()
        .add_part(
            "file",
            Part::text("Meeting notes from Tuesday, decisions and action items.")
                .file_name("Team Sync.md")
                .mime_type("text/markdown"),
        )
        .add_part(
            "file",
            Part::text("A plain text scratchpad with enough words to tag.")
                .file_name("scratchpad.txt")
                .mime_type("text/plain"),
        );

    let response = server.post("/api/docs/upload").multipart(form).await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["createdCount"], 2);

    let listing = server.get("/api/docs").await.json::<Vec<Document>>();
    let titles: Vec<&str> = listing.iter().map(|d| d.title.as_str()).collect();
    assert!(titles.contains(&"Team Sync"));
    assert!(titles.contains(&"scratchpad"));
    assert!(listing.iter().all(|d| format!("{}", d.source) == "upload"));
}

#[tokio::test]
async fn upload_rejects_disallowed_extensions() {
    let env = common::TestEnv::new();
    let server = env.server_permissive();

    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(vec![0u8, 1, 2, 3])
            .file_name("binary.png")
            .mime_type("image/png"),
    );

    let response = server.post("/api/docs/upload").multipart(form).await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn upload_without_file_field_is_bad_request() {
    let env = common::TestEnv::new();
    let server = env.server_permissive();

    let form = MultipartForm::new().add_part(
        "something-else",
        Part::text("content").file_name("note.md"),
    );

    let response = server.post("/api/docs/upload").multipart(form).await;
    response.assert_status_bad_request();
}
