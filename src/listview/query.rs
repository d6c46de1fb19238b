//! User-controlled query state for a single list view.

use std::collections::BTreeMap;

use crate::listview::catalog::SortKey;

/// Whether a sort key is applied by the server or locally over the
/// already-fetched page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortMode {
    ServerSide,
    ClientSide,
}

/// Immutable snapshot of the query state taken when a fetch is issued.
#[derive(Clone, Debug, PartialEq)]
pub struct QuerySnapshot {
    pub search: String,
    pub filters: BTreeMap<String, String>,
    pub page: usize,
    pub page_size: usize,
    pub sort: Option<SortKey>,
}

/// Single source of truth for "what the user wants to see".
///
/// Invariant: changing the search term, any filter, or a server-side sort
/// resets `page` to 1. `set_page` clamps instead of erroring.
#[derive(Clone, Debug)]
pub struct QueryState {
    search_term: String,
    filters: BTreeMap<String, String>,
    page: usize,
    page_size: usize,
    sort: Option<SortKey>,
    known_total_pages: usize,
}

impl QueryState {
    pub fn new(page_size: usize) -> Self {
        Self {
            search_term: String::new(),
            filters: BTreeMap::new(),
            page: 1,
            page_size,
            sort: None,
            known_total_pages: 1,
        }
    }

    /// Seeds a filter at construction time. Filter defaults are always
    /// explicit per view; no collection gets a hidden one.
    pub fn with_filter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.is_empty() {
            self.filters.insert(name.into(), value);
        }
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn set_search(&mut self, term: &str) {
        self.search_term = term.trim().to_string();
        self.page = 1;
    }

    /// An empty value clears the filter entirely.
    pub fn set_filter(&mut self, name: &str, value: &str) {
        if value.is_empty() {
            self.filters.remove(name);
        } else {
            self.filters.insert(name.to_string(), value.to_string());
        }
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: Option<SortKey>, mode: SortMode) {
        self.sort = sort;
        if mode == SortMode::ServerSide {
            self.page = 1;
        }
    }

    /// Clamps to `[1, max(total_pages, 1)]` against the last committed page
    /// count. Out-of-range requests are corrected, never rejected.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.known_total_pages.max(1));
    }

    /// Records the page count of the last committed result so subsequent
    /// `set_page` calls clamp against fresh data.
    pub fn note_total_pages(&mut self, total_pages: usize) {
        self.known_total_pages = total_pages.max(1);
        if self.page > self.known_total_pages {
            self.page = self.known_total_pages;
        }
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn filter(&self, name: &str) -> Option<&str> {
        self.filters.get(name).map(String::as_str)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn sort(&self) -> Option<SortKey> {
        self.sort
    }

    pub fn snapshot(&self) -> QuerySnapshot {
        QuerySnapshot {
            search: self.search_term.clone(),
            filters: self.filters.clone(),
            page: self.page,
            page_size: self.page_size,
            sort: self.sort,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_resets_page() {
        let mut state = QueryState::new(10);
        state.note_total_pages(7);
        state.set_page(5);
        assert_eq!(state.page(), 5);

        state.set_search("rust");
        assert_eq!(state.page(), 1);
        assert_eq!(state.search_term(), "rust");
    }

    #[test]
    fn filter_resets_page_and_empty_value_clears() {
        let mut state = QueryState::new(10);
        state.note_total_pages(4);
        state.set_page(3);

        state.set_filter("category", "Web");
        assert_eq!(state.page(), 1);
        assert_eq!(state.filter("category"), Some("Web"));

        state.set_page(2);
        state.set_filter("category", "");
        assert_eq!(state.filter("category"), None);
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn server_sort_resets_page_client_sort_does_not() {
        let mut state = QueryState::new(10);
        state.note_total_pages(4);

        state.set_page(3);
        state.set_sort(Some(SortKey::Latest), SortMode::ClientSide);
        assert_eq!(state.page(), 3);

        state.set_sort(Some(SortKey::Rating), SortMode::ServerSide);
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn set_page_clamps_to_known_bounds() {
        let mut state = QueryState::new(10);
        state.note_total_pages(3);

        state.set_page(0);
        assert_eq!(state.page(), 1);
        state.set_page(99);
        assert_eq!(state.page(), 3);
        state.set_page(2);
        assert_eq!(state.page(), 2);
    }

    #[test]
    fn shrinking_total_pages_pulls_page_back() {
        let mut state = QueryState::new(10);
        state.note_total_pages(5);
        state.set_page(5);

        state.note_total_pages(2);
        assert_eq!(state.page(), 2);

        state.note_total_pages(0);
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn search_term_is_trimmed() {
        let mut state = QueryState::new(10);
        state.set_search("  web dev  ");
        assert_eq!(state.search_term(), "web dev");
    }
}
