//! Page-number strips and pagination metadata shared by every list view.

use serde::{Deserialize, Serialize};

/// Strips at or below this many pages are rendered in full.
const FULL_STRIP_LIMIT: usize = 7;

/// One entry of a rendered page-number strip.
///
/// Serialized untagged: a page is a plain number and an ellipsis is `null`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PageMarker {
    Page(usize),
    Ellipsis,
}

/// Builds the ordered page markers for the given position.
///
/// Returns nothing when there is at most one page, every page up to
/// [`FULL_STRIP_LIMIT`] pages, and otherwise the first and last pages around a
/// three-page window centred on `current_page`, collapsed with ellipses.
pub fn window_pages(current_page: usize, total_pages: usize) -> Vec<PageMarker> {
    if total_pages <= 1 {
        return vec![];
    }

    if total_pages <= FULL_STRIP_LIMIT {
        return (1..=total_pages).map(PageMarker::Page).collect();
    }

    let current_page = current_page.clamp(1, total_pages);
    let mut pages = vec![PageMarker::Page(1)];

    if current_page > 3 {
        pages.push(PageMarker::Ellipsis);
    }

    let window_start = current_page.saturating_sub(1).max(2);
    let window_end = (current_page + 1).min(total_pages - 1);
    pages.extend((window_start..=window_end).map(PageMarker::Page));

    if current_page + 2 < total_pages {
        pages.push(PageMarker::Ellipsis);
    }
    pages.push(PageMarker::Page(total_pages));

    pages
}

/// Pagination metadata returned by the backend alongside every list page.
///
/// Missing fields default to zero and are repaired by [`Pagination::normalized`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub page: usize,
    #[serde(alias = "per_page")]
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl Pagination {
    pub fn new(page: usize, page_size: usize, total: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            page: page.max(1),
            page_size,
            total,
            total_pages: total.div_ceil(page_size),
        }
    }

    /// Metadata for a listing the backend returns in one piece.
    pub fn single_page(total: usize) -> Self {
        Self::new(1, total, total)
    }

    pub fn is_consistent(&self) -> bool {
        self.page >= 1 && self.page_size > 0 && self.total_pages == self.total.div_ceil(self.page_size)
    }

    /// Returns a copy whose `total_pages` agrees with `total` and `page_size`.
    pub fn normalized(self) -> Self {
        if self.is_consistent() {
            return self;
        }
        log::warn!(
            "Backend pagination is inconsistent (page {}, size {}, total {}, pages {}); recomputing",
            self.page,
            self.page_size,
            self.total,
            self.total_pages
        );
        Self::new(self.page, self.page_size, self.total)
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<PageMarker>,
    pub page: usize,
    pub total: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, pagination: &Pagination) -> Self {
        let page = pagination.page.clamp(1, pagination.total_pages.max(1));

        Self {
            items,
            pages: window_pages(page, pagination.total_pages),
            page,
            total: pagination.total,
            total_pages: pagination.total_pages,
            has_previous: page > 1,
            has_next: page < pagination.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PageMarker::{Ellipsis, Page};
    use super::*;

    #[test]
    fn no_strip_for_single_page() {
        for current in 0..5 {
            assert!(window_pages(current, 0).is_empty());
            assert!(window_pages(current, 1).is_empty());
        }
    }

    #[test]
    fn every_page_up_to_seven() {
        for total in 2..=7 {
            for current in 1..=total {
                let expected: Vec<_> = (1..=total).map(Page).collect();
                assert_eq!(window_pages(current, total), expected);
            }
        }
    }

    #[test]
    fn first_page_of_ten() {
        assert_eq!(window_pages(1, 10), vec![Page(1), Page(2), Ellipsis, Page(10)]);
    }

    #[test]
    fn middle_page_of_ten() {
        assert_eq!(
            window_pages(5, 10),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn near_end_of_ten() {
        assert_eq!(window_pages(9, 10), vec![Page(1), Ellipsis, Page(8), Page(9), Page(10)]);
        assert_eq!(window_pages(10, 10), vec![Page(1), Ellipsis, Page(9), Page(10)]);
    }

    #[test]
    fn ellipsis_boundaries() {
        assert_eq!(
            window_pages(3, 10),
            vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(10)]
        );
        assert_eq!(
            window_pages(4, 10),
            vec![Page(1), Ellipsis, Page(3), Page(4), Page(5), Ellipsis, Page(10)]
        );
        assert_eq!(
            window_pages(8, 10),
            vec![Page(1), Ellipsis, Page(7), Page(8), Page(9), Page(10)]
        );
    }

    #[test]
    fn window_always_contains_current_page() {
        for total in 8..30 {
            for current in 1..=total {
                let pages = window_pages(current, total);
                assert!(pages.contains(&Page(current)), "({current}, {total})");
                assert_eq!(pages.first(), Some(&Page(1)));
                assert_eq!(pages.last(), Some(&Page(total)));
            }
        }
    }

    #[test]
    fn page_past_the_end_pins_to_last() {
        assert_eq!(window_pages(usize::MAX, 10), vec![Page(1), Ellipsis, Page(9), Page(10)]);
        assert_eq!(window_pages(11, 10), window_pages(10, 10));
    }

    #[test]
    fn paginated_survives_huge_page_number() {
        let pagination: Pagination = serde_json::from_str(
            r#"{"page":18446744073709551615,"page_size":10,"total":100,"total_pages":10}"#,
        )
        .unwrap();
        let paginated = Paginated::new(vec![0u8; 10], &pagination);
        assert_eq!(paginated.page, 10);
        assert!(!paginated.has_next);
        assert!(paginated.has_previous);
        assert_eq!(paginated.pages.last(), Some(&Page(10)));
    }

    #[test]
    fn repeated_calls_are_equal() {
        assert_eq!(window_pages(6, 42), window_pages(6, 42));
    }

    #[test]
    fn markers_serialize_as_numbers_and_null() {
        let json = serde_json::to_string(&window_pages(1, 10)).unwrap();
        assert_eq!(json, "[1,2,null,10]");
    }

    #[test]
    fn pagination_counts_pages() {
        assert_eq!(Pagination::new(1, 12, 0).total_pages, 0);
        assert_eq!(Pagination::new(1, 12, 12).total_pages, 1);
        assert_eq!(Pagination::new(1, 12, 13).total_pages, 2);
        assert_eq!(Pagination::single_page(0).total_pages, 0);
        assert_eq!(Pagination::single_page(5).total_pages, 1);
    }

    #[test]
    fn normalizes_inconsistent_payload() {
        let raw = Pagination {
            page: 2,
            page_size: 10,
            total: 35,
            total_pages: 9,
        };
        assert!(!raw.is_consistent());
        assert_eq!(raw.normalized().total_pages, 4);
    }

    #[test]
    fn paginated_flags_neighbours() {
        let paginated = Paginated::new(vec![1, 2, 3], &Pagination::new(1, 3, 9));
        assert!(!paginated.has_previous);
        assert!(paginated.has_next);
        assert_eq!(paginated.pages, vec![Page(1), Page(2), Page(3)]);
    }
}
