//! Server response-shape decoding for list operations
//!
//! The backend is inconsistent about collection responses: some endpoints
//! return the pagination envelope, some a bare array, and a few return
//! nothing useful at all. The shape is decided exactly once per call by
//! [`decode_page`], as a tagged value, and then folded uniformly into the
//! [`Page`] contract. A shape mismatch is never an error; only transport
//! failures are.

use campus_domain::{ListQuery, Page};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Tagged decode result for one collection response body
#[derive(Debug)]
pub enum PageShape<T> {
    /// The full `{items, totalCount, pageNumber, pageSize, totalPages}` envelope
    Envelope(Page<T>),
    /// A bare array of items, no pagination metadata
    Bare(Vec<T>),
    /// Anything else: empty body, wrong fields, items of the wrong type
    Malformed,
}

/// Classify a response body into one of the three known shapes
pub fn decode_page<T: DeserializeOwned>(value: Value) -> PageShape<T> {
    match value {
        Value::Array(_) => match serde_json::from_value(value) {
            Ok(items) => PageShape::Bare(items),
            Err(_) => PageShape::Malformed,
        },
        Value::Object(ref map) if map.contains_key("items") => {
            match serde_json::from_value(value) {
                Ok(page) => PageShape::Envelope(page),
                Err(_) => PageShape::Malformed,
            }
        }
        _ => PageShape::Malformed,
    }
}

/// Fold a decoded shape into the uniform pagination contract.
///
/// - envelope: used as-is, `total_pages` recomputed so the invariant holds
///   even when the server got it wrong
/// - bare array: wrapped with `total_count = len`
/// - malformed: empty page at the requested size
pub fn page_from_value<T: DeserializeOwned>(value: Value, query: &ListQuery) -> Page<T> {
    match decode_page(value) {
        PageShape::Envelope(page) => {
            Page::of(page.items, page.total_count, page.page_number, page.page_size)
        }
        PageShape::Bare(items) => {
            let total = items.len() as u64;
            Page::of(items, total, query.effective_page_number(), query.effective_page_size())
        }
        PageShape::Malformed => {
            debug!("unrecognized collection shape, returning empty page");
            Page::empty(query.effective_page_size())
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_envelope_shape() {
        let body = json!({
            "items": [1, 2, 3],
            "totalCount": 25,
            "pageNumber": 1,
            "pageSize": 10,
            "totalPages": 99
        });
        let page: Page<u32> = page_from_value(body, &ListQuery::default());
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.total_count, 25);
        // invariant re-established even though the server said 99
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_bare_array_shape() {
        let body = json!([10, 20, 30, 40]);
        let query = ListQuery { page_size: Some(20), ..Default::default() };
        let page: Page<u32> = page_from_value(body, &query);
        assert_eq!(page.items.len(), 4);
        assert_eq!(page.total_count, 4);
        assert_eq!(page.page_size, 20);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_malformed_shapes_yield_empty_page() {
        let query = ListQuery { page_size: Some(15), ..Default::default() };

        for body in [json!(null), json!("nonsense"), json!({"data": []}), json!(42)] {
            let page: Page<u32> = page_from_value(body, &query);
            assert!(page.items.is_empty());
            assert_eq!(page.total_count, 0);
            assert_eq!(page.total_pages, 0);
            assert_eq!(page.page_size, 15);
        }
    }

    #[test]
    fn test_wrong_item_type_is_malformed() {
        let body = json!(["not", "numbers"]);
        let page: Page<u32> = page_from_value(body, &ListQuery::default());
        assert!(page.items.is_empty());
    }
}
