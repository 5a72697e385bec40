use std::collections::HashMap;

use crate::nlp::tokenizer::tokenize;

/// Default number of suggested tags per document.
pub const DEFAULT_TAG_COUNT: usize = 5;

/// Minimum trimmed text length before extraction produces anything.
/// Shorter texts carry too little signal for frequency ranking.
const MIN_TEXT_LEN: usize = 20;

/// Extract up to `n` suggested tags from `text`, ranked by term frequency.
///
/// Ties between equal-frequency terms are broken by first occurrence in the
/// token stream: the term seen earlier ranks higher. The rule is stable;
/// repeated calls on the same input always agree.
///
/// Returns an empty Vec when the trimmed text is shorter than 20 characters.
/// The output never contains duplicates.
pub fn extract_tags(text: &str, n: usize) -> Vec<String> {
    if text.trim().chars().count() < MIN_TEXT_LEN {
        return Vec::new();
    }

    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut first_seen: Vec<String> = Vec::new();
    for token in tokenize(text) {
        let entry = counts.entry(token.clone()).or_insert(0);
        if *entry == 0 {
            first_seen.push(token);
        }
        *entry += 1;
    }

    let mut ranked: Vec<(String, usize)> = first_seen
        .into_iter()
        .map(|word| {
            let count = counts[&word];
            (word, count)
        })
        .collect();
    // Stable sort: equal counts keep their first-occurrence order.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(n);
    ranked.into_iter().map(|(word, _)| word).collect()
}
