pub mod history;
pub mod normalize;
pub mod scoring;


pub use history::SearchHistory;
pub use normalize::{normalize, sanitize_query};
pub use scoring::{score, Searchable};

use serde::Serialize;
use tracing::debug;

/// Results shown inline under the search box
pub const DROPDOWN_LIMIT: usize = 5;
/// Result count at which the dropdown offers a "show more" link
pub const DROPDOWN_SHOW_MORE_THRESHOLD: usize = 8;

/// Rows shown in the search dropdown plus the count hidden behind "N more"
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dropdown<T> {
    pub items: Vec<T>,
    pub more: usize,
}

/// Show everything up to the threshold; past it, show the first
/// `DROPDOWN_SHOW_MORE_THRESHOLD` rows and count the rest.
pub fn dropdown<T: Clone>(results: &[T]) -> Dropdown<T> {
    let shown = results.len().min(DROPDOWN_SHOW_MORE_THRESHOLD);
    Dropdown {
        items: results[..shown].to_vec(),
        more: results.len() - shown,
    }
}

/// Find records whose name or region contains `query`, most relevant first.
///
/// A query with nothing searchable left after sanitizing matches nothing.
/// Equal scores keep their input order.
pub fn search_cities<T: Searchable + Clone>(records: &[T], query: &str) -> Vec<T> {
    let sanitized = sanitize_query(query);
    let needle = normalize(&sanitized);
    if needle.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(f64, &T)> = records
        .iter()
        .filter(|record| {
            normalize(record.name()).contains(&needle)
                || normalize(record.region()).contains(&needle)
        })
        .map(|record| (score(record, &sanitized), record))
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    debug!(query = %sanitized, matches = scored.len(), "city search");

    scored.into_iter().map(|(_, record)| record.clone()).collect()
}
