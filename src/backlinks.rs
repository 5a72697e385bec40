use crate::error::AppError;
use crate::models::{Backlink, Document};
use crate::nlp::links::find_links;
use crate::store::DocumentStore;

/// Outcome of one synchronization pass.
#[derive(Debug, Default)]
pub struct BacklinkSyncReport {
    /// Documents examined (everything except the updated document itself).
    pub scanned: usize,
    /// Ids whose backlink list was written.
    pub updated: Vec<String>,
    /// Per-document store failures. These do not abort the pass.
    pub failed: Vec<(String, AppError)>,
}

/// Recompute which other documents reference `updated_doc` and persist
/// their backlink sets.
///
/// Every other stored document `O` is checked for a literal occurrence of
/// `updated_doc.title` in `O.body`. On a match, `{docId, title}` is merged
/// into `O.backlinks`, deduplicated by `docId`, refreshing the stored
/// title to the current value. Documents with no match are left untouched;
/// stale entries are not pruned.
///
/// Writes are independent per document: a failed `mutate` for one document
/// is recorded in the report and the pass continues. Only a failure to
/// list the corpus aborts. Re-running with an unchanged corpus is
/// idempotent.
pub async fn sync_backlinks(
    store: &dyn DocumentStore,
    updated_doc: &Document,
) -> Result<BacklinkSyncReport, AppError> {
    let all_docs = store.list().await?;
    let mut report = BacklinkSyncReport::default();

    for other in all_docs {
        if other.id == updated_doc.id {
            continue;
        }
        report.scanned += 1;

        let links = find_links(
            &other.body,
            std::slice::from_ref(updated_doc),
            Some(&other.id),
        );
        if links.is_empty() {
            continue;
        }

        let link = Backlink {
            doc_id: updated_doc.id.clone(),
            title: updated_doc.title.clone(),
        };
        match store
            .mutate(&other.id, Box::new(move |doc| merge_backlink(doc, link)))
            .await
        {
            Ok(_) => report.updated.push(other.id.clone()),
            Err(e) => {
                tracing::warn!(
                    "Backlink update failed for document '{}': {}",
                    other.id,
                    e
                );
                report.failed.push((other.id.clone(), e));
            }
        }
    }

    Ok(report)
}

/// Merge `link` into `doc.backlinks`, keyed by `docId`.
///
/// An existing entry has its title refreshed in place; a self-reference is
/// never stored.
fn merge_backlink(doc: &mut Document, link: Backlink) {
    if doc.id == link.doc_id {
        return;
    }
    match doc.backlinks.iter_mut().find(|b| b.doc_id == link.doc_id) {
        Some(existing) => existing.title = link.title,
        None => doc.backlinks.push(link),
    }
}
