use regex::Regex;
use std::sync::LazyLock;

/// Anything outside ASCII word characters, whitespace, Hangul jamo and
/// Hangul syllables.
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\sㄱ-ㅎㅏ-ㅣ가-힣]").expect("valid regex"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Comparison form of a text: all whitespace removed, lowercased.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Strip punctuation and symbols from a raw query and collapse spacing.
pub fn sanitize_query(query: &str) -> String {
    let stripped = DISALLOWED.replace_all(query.trim(), "");
    WHITESPACE_RUN
        .replace_all(&stripped, " ")
        .trim()
        .to_string()
}
