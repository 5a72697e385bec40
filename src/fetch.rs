use std::time::Duration;

use async_trait::async_trait;

use crate::error::AppError;

/// A web page reduced to importable text.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Contents of the `<title>` element, when present.
    pub title: Option<String>,
    /// Tag-stripped page text.
    pub body: String,
}

/// Trait for fetching remote pages during URL imports.
///
/// Abstracted as a trait so tests can use a canned fetcher without network
/// access.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `origin` and convert it to importable text.
    async fn fetch_page(&self, origin: &str) -> Result<FetchedPage, AppError>;
}

/// reqwest-backed implementation of `PageFetcher`.
pub struct HttpPageFetcher {
    client: reqwest::Client,
}

impl HttpPageFetcher {
    /// Build a fetcher with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_page(&self, origin: &str) -> Result<FetchedPage, AppError> {
        let url = url::Url::parse(origin)
            .map_err(|e| AppError::BadRequest(format!("Invalid origin URL '{}': {}", origin, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::BadRequest(format!(
                "Unsupported URL scheme '{}'",
                url.scheme()
            )));
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to fetch '{}': {}", origin, e)))?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "Fetch of '{}' returned {}",
                origin,
                response.status()
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to read '{}': {}", origin, e)))?;

        Ok(FetchedPage {
            title: extract_title(&html),
            body: html_to_text(&html),
        })
    }
}

/// Pull the contents of the first `<title>` element, if any.
pub fn extract_title(html: &str) -> Option<String> {
    // ASCII lowercasing keeps byte offsets aligned with the source.
    let lower = html.to_ascii_lowercase();
    let open = lower.find("<title")?;
    let content_start = open + lower[open..].find('>')? + 1;
    let content_end = content_start + lower[content_start..].find("</title")?;
    let title = html[content_start..content_end].trim();
    if title.is_empty() {
        None
    } else {
        Some(decode_entities(title))
    }
}

/// Strip all markup from an HTML page, leaving readable text.
///
/// ammonia with an empty tag allowlist removes every element (including
/// script/style contents); what remains is entity-escaped text, which is
/// then decoded and whitespace-collapsed.
pub fn html_to_text(html: &str) -> String {
    let mut builder = ammonia::Builder::empty();
    builder.clean_content_tags(std::collections::HashSet::from(["script", "style"]));
    let stripped = builder.clean(html).to_string();
    let decoded = decode_entities(&stripped);

    // Collapse runs of blank lines, trim trailing space per line.
    let mut out = String::new();
    let mut blank_pending = false;
    for line in decoded.lines() {
        let line = line.trim();
        if line.is_empty() {
            blank_pending = !out.is_empty();
            continue;
        }
        if blank_pending {
            out.push_str("\n\n");
            blank_pending = false;
        } else if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(line);
    }
    out
}

/// Decode the handful of entities ammonia's escaping produces.
fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_title_basic() {
        let html = "<html><head><title>My Page</title></head><body>hi</body></html>";
        assert_eq!(extract_title(html), Some("My Page".to_string()));
    }

    #[test]
    fn test_extract_title_with_attributes_and_case() {
        let html = r#"<HTML><TITLE lang="en">  Spaced Out  </TITLE></HTML>"#;
        assert_eq!(extract_title(html), Some("Spaced Out".to_string()));
    }

    #[test]
    fn test_extract_title_missing_or_empty() {
        assert_eq!(extract_title("<html><body>no title</body></html>"), None);
        assert_eq!(extract_title("<title></title>"), None);
        assert_eq!(extract_title("<title>"), None);
    }

    #[test]
    fn test_html_to_text_strips_markup() {
        let html = "<h1>Heading</h1><p>First <b>bold</b> paragraph.</p>";
        let text = html_to_text(html);
        assert!(text.contains("Heading"));
        assert!(text.contains("First bold paragraph."));
        assert!(!text.contains('<'));
    }

    #[test]
    fn test_html_to_text_drops_scripts_and_styles() {
        let html = r#"<style>.x { color: red }</style>
<script>alert("boom")</script>
<p>Visible content</p>"#;
        let text = html_to_text(html);
        assert!(text.contains("Visible content"));
        assert!(!text.contains("alert"));
        assert!(!text.contains("color"));
    }

    #[test]
    fn test_html_to_text_decodes_entities() {
        let html = "<p>Fish &amp; chips &lt;cheap&gt;</p>";
        assert_eq!(html_to_text(html), "Fish & chips <cheap>");
    }

    #[test]
    fn test_html_to_text_collapses_blank_runs() {
        let html = "<p>one</p>\n\n\n\n<p>two</p>";
        let text = html_to_text(html);
        assert_eq!(text, "one\n\ntwo");
    }
}
