use std::collections::HashSet;

use crate::models::{Backlink, Document};

/// Titles shorter than this never match; they cause too many false
/// positives.
const MIN_TITLE_LEN: usize = 4;

/// Scan `text` for literal occurrences of the candidates' titles.
///
/// For each candidate in order: skipped when its id equals `exclude_id` or
/// its title is shorter than four characters; otherwise a case-insensitive
/// substring check of the title inside `text`. One entry per matching
/// document, first match wins, candidate-list order preserved.
///
/// Matching is unanchored substring containment, not word-boundary aware.
/// A four-letter title can match inside a longer word (e.g. "Form" inside
/// "Performance"). That is accepted behavior, kept deliberately.
pub fn find_links(
    text: &str,
    candidates: &[Document],
    exclude_id: Option<&str>,
) -> Vec<Backlink> {
    if text.is_empty() || candidates.is_empty() {
        return Vec::new();
    }

    let lower_text = text.to_lowercase();
    let mut found: Vec<Backlink> = Vec::new();
    let mut added: HashSet<&str> = HashSet::new();

    for doc in candidates {
        if exclude_id == Some(doc.id.as_str()) || doc.title.chars().count() < MIN_TITLE_LEN {
            continue;
        }
        let lower_title = doc.title.to_lowercase();
        if lower_text.contains(&lower_title) && added.insert(doc.id.as_str()) {
            found.push(Backlink {
                doc_id: doc.id.clone(),
                title: doc.title.clone(),
            });
        }
    }

    found
}
