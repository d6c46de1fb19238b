//! Pagination helpers shared by the templates and the JSON API.

use serde::Serialize;

/// Items shown per admin list page.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 12;

/// Pages kept at each end of the strip.
const EDGE_PAGES: usize = 2;
/// Pages kept before and after the current one.
const BEFORE_CURRENT: usize = 2;
const AFTER_CURRENT: usize = 4;

/// Walks the full page range once, keeping the edges and the neighborhood of
/// the current page and collapsing every skipped run into a single `None`.
fn page_window(total_pages: usize, current_page: usize) -> Vec<Option<usize>> {
    let visible = |page: usize| {
        page <= EDGE_PAGES
            || page > total_pages.saturating_sub(EDGE_PAGES)
            || (page + BEFORE_CURRENT >= current_page && page <= current_page + AFTER_CURRENT)
    };

    let mut pages: Vec<Option<usize>> = Vec::new();
    for page in 1..=total_pages {
        if visible(page) {
            pages.push(Some(page));
        } else if pages.last() != Some(&None) {
            pages.push(None);
        }
    }
    pages
}

/// One page of records plus the window of page links to render.
///
/// `None` entries in `pages` stand for an ellipsis gap.
#[derive(Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
}

impl<T> Paginated<T> {
    /// The requested page is clamped to `[1, max(total_pages, 1)]`.
    pub fn new(items: Vec<T>, current_page: usize, total_pages: usize, total: usize) -> Self {
        let current_page = current_page.clamp(1, total_pages.max(1));
        let pages = page_window(total_pages, current_page);

        Self {
            items,
            pages,
            page: current_page,
            total_pages,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_is_clamped_into_range() {
        let paginated: Paginated<i32> = Paginated::new(vec![], 0, 5, 50);
        assert_eq!(paginated.page, 1);

        let paginated: Paginated<i32> = Paginated::new(vec![], 99, 5, 50);
        assert_eq!(paginated.page, 5);

        let paginated: Paginated<i32> = Paginated::new(vec![], 7, 0, 0);
        assert_eq!(paginated.page, 1);
    }

    #[test]
    fn window_collapses_for_few_pages() {
        let paginated: Paginated<i32> = Paginated::new(vec![], 1, 3, 30);
        assert_eq!(paginated.pages, vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn window_elides_middle_for_many_pages() {
        let paginated: Paginated<i32> = Paginated::new(vec![], 10, 20, 200);
        assert!(paginated.pages.contains(&None));
        assert!(paginated.pages.contains(&Some(1)));
        assert!(paginated.pages.contains(&Some(10)));
        assert!(paginated.pages.contains(&Some(20)));
    }

    #[test]
    fn window_keeps_edges_and_current_neighborhood() {
        let paginated: Paginated<i32> = Paginated::new(vec![], 10, 20, 200);
        assert_eq!(
            paginated.pages,
            vec![
                Some(1),
                Some(2),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                Some(13),
                Some(14),
                None,
                Some(19),
                Some(20),
            ]
        );
    }
}
