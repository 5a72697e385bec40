use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

/// Sync markdown notes with a running mnemo server.
#[derive(Parser)]
#[command(name = "mnemo-sync", version, about)]
struct Cli {
    /// Base URL of the mnemo server.
    #[arg(long, global = true, default_value = "http://127.0.0.1:3000")]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import all markdown files under a directory.
    Push {
        /// Directory to scan for .md / .markdown files.
        dir: PathBuf,
        /// List what would be imported without sending anything.
        #[arg(long)]
        dry_run: bool,
    },
    /// Export documents by id.
    Export {
        /// Comma-separated document ids.
        #[arg(long, value_delimiter = ',', required = true)]
        ids: Vec<String>,
        /// Export format: json or md.
        #[arg(long, default_value = "json")]
        format: String,
        /// Write to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Serialize)]
struct ImportItem {
    title: String,
    body: String,
}

#[derive(Debug, Serialize)]
struct ImportPayload {
    source: String,
    items: Vec<ImportItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportResponse {
    created_count: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Push { dir, dry_run } => push(&cli.server, &dir, dry_run).await,
        Command::Export {
            ids,
            format,
            output,
        } => export(&cli.server, &ids, &format, output.as_deref()).await,
    }
}

async fn push(server: &str, dir: &Path, dry_run: bool) -> anyhow::Result<()> {
    let items = collect_items(dir)?;
    if items.is_empty() {
        bail!("No markdown files found under {}", dir.display());
    }

    if dry_run {
        for item in &items {
            println!("would import: {}", item.title);
        }
        println!("{} file(s), nothing sent (--dry-run)", items.len());
        return Ok(());
    }

    let count = items.len();
    let payload = ImportPayload {
        source: "paste".to_string(),
        items,
    };

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/api/docs/import", server.trim_end_matches('/')))
        .json(&payload)
        .send()
        .await
        .context("Failed to reach the server")?;

    if !response.status().is_success() {
        bail!("Server rejected the import: {}", response.status());
    }

    let result: ImportResponse = response
        .json()
        .await
        .context("Unexpected response from the server")?;
    println!("Imported {} of {} file(s)", result.created_count, count);
    Ok(())
}

async fn export(
    server: &str,
    ids: &[String],
    format: &str,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    if !matches!(format, "json" | "md") {
        bail!("Unsupported format '{}', expected json or md", format);
    }

    let client = reqwest::Client::new();
    let response = client
        .get(format!(
            "{}/api/docs/export?ids={}&format={}",
            server.trim_end_matches('/'),
            ids.join(","),
            format
        ))
        .send()
        .await
        .context("Failed to reach the server")?;

    if !response.status().is_success() {
        bail!("Export failed: {}", response.status());
    }

    let content = if format == "md" {
        let body: serde_json::Value = response.json().await?;
        body["content"]
            .as_str()
            .context("Malformed export response")?
            .to_string()
    } else {
        response.text().await?
    };

    match output {
        Some(path) => {
            std::fs::write(path, &content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

/// Walk `dir` collecting markdown files as import items.
///
/// The title comes from the first `# ` heading when present, otherwise
/// from the file name stem.
fn collect_items(dir: &Path) -> anyhow::Result<Vec<ImportItem>> {
    let mut items = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let ext = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "md" && ext != "markdown" {
            continue;
        }

        let content = std::fs::read_to_string(entry.path())
            .with_context(|| format!("Failed to read {}", entry.path().display()))?;
        let title = title_from_content(&content).unwrap_or_else(|| {
            entry
                .path()
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| "Untitled".to_string())
        });

        items.push(ImportItem {
            title,
            body: content,
        });
    }
    Ok(items)
}

/// First level-one heading of a markdown document, if any.
fn title_from_content(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        line.strip_prefix("# ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_content() {
        assert_eq!(
            title_from_content("# My Title\n\nbody"),
            Some("My Title".to_string())
        );
        assert_eq!(
            title_from_content("intro text\n# Later Heading\nbody"),
            Some("Later Heading".to_string())
        );
        assert_eq!(title_from_content("no headings here"), None);
        assert_eq!(title_from_content("#not-a-heading"), None);
    }

    #[test]
    fn test_collect_items_filters_and_titles() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.md"), "# Note A\n\ncontent a").unwrap();
        std::fs::write(dir.path().join("b.markdown"), "plain body").unwrap();
        std::fs::write(dir.path().join("skip.txt"), "not markdown").unwrap();

        let items = collect_items(dir.path()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Note A");
        assert_eq!(items[1].title, "b");
    }

    #[test]
    fn test_collect_items_recurses() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested/deep.md"), "# Deep\n\nx").unwrap();

        let items = collect_items(dir.path()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Deep");
    }
}
