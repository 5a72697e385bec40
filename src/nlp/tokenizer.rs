use std::collections::HashSet;
use std::sync::LazyLock;

/// Common English function words excluded from tag candidates.
///
/// Loaded once at first use; never rebuilt per call.
static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for", "with", "of", "by",
        "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does",
        "did", "will", "would", "should", "can", "could", "may", "might", "must", "about",
        "above", "after", "before", "from", "into", "out", "over", "under", "again", "further",
        "then", "once", "here", "there", "when", "where", "why", "how", "all", "any", "both",
        "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not", "only",
        "own", "same", "so", "than", "too", "very", "s", "t", "just", "don", "now", "it", "its",
        "this", "that", "i", "you", "he", "she", "we", "they",
    ]
    .into_iter()
    .collect()
});

/// Normalize raw text into a filtered sequence of lowercase word tokens.
///
/// Lowercases the input, strips everything except alphanumerics, `_`, `-`
/// and whitespace, then splits on whitespace runs. A token survives only if
/// it is longer than two characters, is not a stop word, and is not
/// entirely numeric. Pure and deterministic; empty or whitespace-only input
/// yields an empty Vec.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '-' || *c == '_')
        .collect();

    cleaned
        .split_whitespace()
        .filter(|&word| {
            word.chars().count() > 2 && !STOP_WORDS.contains(word) && !is_numeric(word)
        })
        .map(str::to_string)
        .collect()
}

/// A token counts as numeric when it parses as a float and carries at least
/// one digit, so `42`, `-3` and `1e5` are filtered while `inf` stays a word.
fn is_numeric(word: &str) -> bool {
    word.parse::<f64>().is_ok() && word.bytes().any(|b| b.is_ascii_digit())
}
