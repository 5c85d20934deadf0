//! Session state and paging math
//!
//! A session binds one outgoing paginated message to everything needed to
//! interpret a reply to it. Mutation discipline is "replace, never merge":
//! each page turn swaps the whole state for a new one bound to a new message.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::identifiers::UserId;

/// Paging coordinates for one rendered page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSpec {
    /// 1-based page number
    pub page_number: u32,
    /// Candidates offered per page
    pub page_size: usize,
    /// Total pages for the full result list, fixed at session creation
    pub total_pages: u32,
}

impl PageSpec {
    /// Spec for the first page of `total_results` results
    #[must_use]
    pub fn first(total_results: usize, page_size: usize) -> Self {
        Self {
            page_number: 1,
            page_size,
            total_pages: total_pages(total_results, page_size),
        }
    }
}

/// `ceil(total_results / page_size)`
#[must_use]
pub fn total_pages(total_results: usize, page_size: usize) -> u32 {
    if page_size == 0 {
        return 0;
    }
    total_results.div_ceil(page_size) as u32
}

/// Slice one page out of the full result list.
///
/// Returns the page's URLs and the base index of the first one, clipped to
/// bounds. Pages past the end come back empty.
#[must_use]
pub fn page_slice(results: &[String], page_number: u32, page_size: usize) -> (&[String], usize) {
    let base = (page_number.max(1) as usize - 1) * page_size;
    let start = base.min(results.len());
    let end = (base + page_size).min(results.len());
    (&results[start..end], base)
}

/// The opaque blob attached to an outgoing paginated message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    /// Only user allowed to act on this session
    pub owner: UserId,
    /// Original search text, flag stripped
    pub query: String,
    /// Full result list in relevance order, immutable for the session
    pub all_urls: Vec<String>,
    /// Candidates offered per page
    pub page_size: usize,
    /// Page currently on display
    pub current_page: u32,
    /// Total pages, computed once from `all_urls`
    pub total_pages: u32,
    /// Ordinal-to-source translation table for the current page
    pub displayed_map: Vec<usize>,
    /// When this binding was created
    pub created_at: DateTime<Utc>,
}

impl SessionState {
    /// Source URL behind displayed ordinal `n` (1-based), if any
    #[must_use]
    pub fn url_for_ordinal(&self, n: usize) -> Option<&str> {
        if n == 0 {
            return None;
        }
        let source = *self.displayed_map.get(n - 1)?;
        self.all_urls.get(source).map(String::as_str)
    }

    /// Whether the session is already on its last page
    #[must_use]
    pub fn on_last_page(&self) -> bool {
        self.current_page >= self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("http://img/{i}.jpg")).collect()
    }

    #[test]
    fn test_first_page_spec() {
        let spec = PageSpec::first(45, 21);
        assert_eq!(spec.page_number, 1);
        assert_eq!(spec.total_pages, 3);
    }

    #[test]
    fn test_total_pages_ceiling() {
        assert_eq!(total_pages(45, 21), 3);
        assert_eq!(total_pages(42, 21), 2);
        assert_eq!(total_pages(1, 21), 1);
        assert_eq!(total_pages(0, 21), 0);
    }

    #[test]
    fn test_last_page_nonempty_whenever_results_exist() {
        for count in 1..100usize {
            let results = urls(count);
            let last = total_pages(count, 21);
            let (slice, _) = page_slice(&results, last, 21);
            assert!(!slice.is_empty(), "last page empty for {count} results");
        }
    }

    #[test]
    fn test_page_slice_base_index() {
        let results = urls(45);
        let (slice, base) = page_slice(&results, 2, 21);
        assert_eq!(base, 21);
        assert_eq!(slice.len(), 21);
        assert_eq!(slice[0], "http://img/21.jpg");
    }

    #[test]
    fn test_page_slice_clips_final_page() {
        let results = urls(45);
        let (slice, base) = page_slice(&results, 3, 21);
        assert_eq!(base, 42);
        assert_eq!(slice.len(), 3);
    }

    #[test]
    fn test_page_slice_past_end_is_empty() {
        let results = urls(45);
        let (slice, _) = page_slice(&results, 9, 21);
        assert!(slice.is_empty());
    }

    #[test]
    fn test_url_for_ordinal_translates_through_map() {
        let state = SessionState {
            owner: UserId::new("u1"),
            query: "cats".into(),
            all_urls: urls(10),
            page_size: 21,
            current_page: 1,
            total_pages: 1,
            // sparse map: sources 1 and 4 failed to decode
            displayed_map: vec![0, 2, 3, 5],
            created_at: Utc::now(),
        };
        assert_eq!(state.url_for_ordinal(2), Some("http://img/2.jpg"));
        assert_eq!(state.url_for_ordinal(4), Some("http://img/5.jpg"));
        assert_eq!(state.url_for_ordinal(0), None);
        assert_eq!(state.url_for_ordinal(5), None);
    }
}
