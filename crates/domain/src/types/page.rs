//! Pagination contract
//!
//! Every list operation, online or offline, resolves to the same
//! [`Page<T>`] shape with `total_pages == ceil(total_count / page_size)`.

use serde::{Deserialize, Serialize};

/// Smallest accepted page size
pub const MIN_PAGE_SIZE: u32 = 1;
/// Largest accepted page size; bigger requests are clamped down
pub const MAX_PAGE_SIZE: u32 = 100;
/// Page size used when the caller does not specify one
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// One page of a listed collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page_number: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Build a page, recomputing `total_pages` from the count and size.
    pub fn of(items: Vec<T>, total_count: u64, page_number: u32, page_size: u32) -> Self {
        let page_size = page_size.max(MIN_PAGE_SIZE);
        Self {
            items,
            total_count,
            page_number: page_number.max(1),
            page_size,
            total_pages: total_pages_for(total_count, page_size),
        }
    }

    /// The page returned for an empty or unrecognizable server body.
    pub fn empty(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            page_number: 1,
            page_size: page_size.max(MIN_PAGE_SIZE),
            total_pages: 0,
        }
    }
}

/// `ceil(total_count / page_size)` without floating point
pub fn total_pages_for(total_count: u64, page_size: u32) -> u32 {
    let page_size = u64::from(page_size.max(MIN_PAGE_SIZE));
    total_count.div_ceil(page_size) as u32
}

/// Sort options accepted by list operations.
///
/// The wire values are the exact strings the backend expects in the
/// `SortOrder` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    TitleAsc,
    TitleDesc,
    Newest,
    Oldest,
}

impl SortOrder {
    /// Query-parameter value for this sort option
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::TitleAsc => "TitleAsc",
            Self::TitleDesc => "TitleDesc",
            Self::Newest => "Newest",
            Self::Oldest => "Oldest",
        }
    }
}

/// Parameters accepted by every list operation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    /// Substring match against title/description/instructor
    pub search_term: Option<String>,
    /// 1-based page number; `None` defaults to 1
    pub page_number: Option<u32>,
    /// Items per page; `None` defaults to [`DEFAULT_PAGE_SIZE`], clamped to 1..=100
    pub page_size: Option<u32>,
    pub sort: Option<SortOrder>,
}

impl ListQuery {
    /// Query for a specific page with the default page size
    pub fn page(page_number: u32) -> Self {
        Self { page_number: Some(page_number), ..Self::default() }
    }

    /// Effective page number after defaulting
    pub fn effective_page_number(&self) -> u32 {
        self.page_number.unwrap_or(1).max(1)
    }

    /// Effective page size after defaulting and clamping
    pub fn effective_page_size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE)
    }
}

/// Slice an in-memory collection into the requested page.
///
/// This is the single pagination implementation shared by the fixture
/// layer and tests; the math is identical to what the backend applies.
pub fn paginate<T: Clone>(items: &[T], query: &ListQuery) -> Page<T> {
    let page_number = query.effective_page_number();
    let page_size = query.effective_page_size();
    let start = (page_number as usize - 1).saturating_mul(page_size as usize);
    let slice: Vec<T> =
        items.iter().skip(start).take(page_size as usize).cloned().collect();
    Page::of(slice, items.len() as u64, page_number, page_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_is_ceiling() {
        assert_eq!(total_pages_for(0, 10), 0);
        assert_eq!(total_pages_for(1, 10), 1);
        assert_eq!(total_pages_for(10, 10), 1);
        assert_eq!(total_pages_for(11, 10), 2);
        assert_eq!(total_pages_for(25, 10), 3);
    }

    #[test]
    fn test_page_of_recomputes_total_pages() {
        let page = Page::of(vec![1, 2, 3], 25, 1, 10);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page_number, 1);
    }

    #[test]
    fn test_empty_page() {
        let page: Page<i32> = Page::empty(20);
        assert_eq!(page.total_count, 0);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.page_number, 1);
        assert_eq!(page.page_size, 20);
    }

    #[test]
    fn test_query_defaults_and_clamping() {
        let query = ListQuery::default();
        assert_eq!(query.effective_page_number(), 1);
        assert_eq!(query.effective_page_size(), DEFAULT_PAGE_SIZE);

        let query = ListQuery { page_size: Some(0), page_number: Some(0), ..Default::default() };
        assert_eq!(query.effective_page_size(), 1);
        assert_eq!(query.effective_page_number(), 1);

        let query = ListQuery { page_size: Some(500), ..Default::default() };
        assert_eq!(query.effective_page_size(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_paginate_25_items_page_size_10() {
        let items: Vec<u32> = (1..=25).collect();

        let first = paginate(&items, &ListQuery { page_size: Some(10), ..Default::default() });
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.total_count, 25);

        let third = paginate(
            &items,
            &ListQuery { page_number: Some(3), page_size: Some(10), ..Default::default() },
        );
        assert_eq!(third.items.len(), 5);
        assert_eq!(third.items[0], 21);
    }

    #[test]
    fn test_paginate_past_the_end() {
        let items: Vec<u32> = (1..=5).collect();
        let page = paginate(
            &items,
            &ListQuery { page_number: Some(4), page_size: Some(10), ..Default::default() },
        );
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 5);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_sort_order_wire_values() {
        assert_eq!(SortOrder::TitleAsc.as_query_value(), "TitleAsc");
        assert_eq!(SortOrder::Newest.as_query_value(), "Newest");
    }

    #[test]
    fn test_envelope_field_casing() {
        let page = Page::of(vec![1u32], 1, 1, 10);
        let value = serde_json::to_value(&page).unwrap();
        assert!(value.get("totalCount").is_some());
        assert!(value.get("pageNumber").is_some());
        assert!(value.get("totalPages").is_some());
    }
}
