//! Filtering and offset pagination over a catalog snapshot.

use serde::{Deserialize, Serialize};

/// Page returned when the caller does not ask for one.
pub const DEFAULT_PAGE: usize = 1;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_LIMIT: usize = 10;

/// Parameters for one catalog view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    limit: usize,
    search: String,
}

impl PageRequest {
    /// Create a request for `page` (1-based) of size `limit`, filtered by `search`.
    ///
    /// Zero values are raised to 1 so the view is always well-defined.
    #[must_use]
    pub fn new(page: usize, limit: usize, search: impl Into<String>) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
            search: search.into(),
        }
    }

    /// 1-based page number.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Page size.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Case-insensitive substring filter; empty keeps everything.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_LIMIT, String::new())
    }
}

/// Pagination metadata for a [`Paginated`] result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items_per_page: usize,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

/// One page of items plus metadata describing where it sits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

/// Filter `items` by the request's search term and cut out the requested page.
///
/// Filtering keeps items containing the term as a case-insensitive substring.
/// A page past the end yields empty `data` rather than an error.
///
/// # Example
///
/// ```
/// use breedbook_core::{PageRequest, paginate};
///
/// let catalog = ["bulldog", "husky", "retriever"].map(String::from);
/// let page = paginate(&catalog, &PageRequest::new(1, 10, "BULL"));
/// assert_eq!(page.data, ["bulldog"]);
/// assert_eq!(page.meta.total_items, 1);
/// ```
#[must_use]
pub fn paginate(items: &[String], request: &PageRequest) -> Paginated<String> {
    let needle = request.search().to_lowercase();
    let filtered: Vec<&String> = if needle.is_empty() {
        items.iter().collect()
    } else {
        items
            .iter()
            .filter(|item| item.to_lowercase().contains(&needle))
            .collect()
    };

    let page = request.page();
    let limit = request.limit();
    let total_items = filtered.len();
    let total_pages = total_items.div_ceil(limit);
    let offset = (page - 1).saturating_mul(limit);

    let data = filtered
        .into_iter()
        .skip(offset)
        .take(limit)
        .cloned()
        .collect();

    Paginated {
        data,
        meta: PageMeta {
            current_page: page,
            total_pages,
            total_items,
            items_per_page: limit,
            has_next_page: page < total_pages,
            has_previous_page: page > 1,
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn catalog() -> Vec<String> {
        ["bulldog", "husky", "retriever"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    fn many(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("breed{i:03}")).collect()
    }

    #[test]
    fn test_defaults_return_whole_small_catalog() {
        let result = paginate(&catalog(), &PageRequest::default());

        assert_eq!(result.data, ["bulldog", "husky", "retriever"]);
        assert_eq!(
            result.meta,
            PageMeta {
                current_page: 1,
                total_pages: 1,
                total_items: 3,
                items_per_page: 10,
                has_next_page: false,
                has_previous_page: false,
            }
        );
    }

    #[test]
    fn test_search_filters_case_insensitively() {
        let result = paginate(&catalog(), &PageRequest::new(1, 10, "bull"));
        assert_eq!(result.data, ["bulldog"]);
        assert_eq!(result.meta.total_items, 1);

        let result = paginate(&catalog(), &PageRequest::new(1, 10, "HUS"));
        assert_eq!(result.data, ["husky"]);
    }

    #[test]
    fn test_search_with_no_match() {
        let result = paginate(&catalog(), &PageRequest::new(1, 10, "unicorn"));
        assert!(result.data.is_empty());
        assert_eq!(result.meta.total_items, 0);
        assert_eq!(result.meta.total_pages, 0);
        assert!(!result.meta.has_next_page);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let items = many(25);
        let result = paginate(&items, &PageRequest::new(1, 10, ""));
        assert_eq!(result.meta.total_pages, 3);
        assert!(result.meta.has_next_page);
        assert!(!result.meta.has_previous_page);
    }

    #[test]
    fn test_last_page_is_partial() {
        let items = many(25);
        let result = paginate(&items, &PageRequest::new(3, 10, ""));
        assert_eq!(result.data.len(), 5);
        assert_eq!(result.data.first().unwrap(), "breed020");
        assert!(!result.meta.has_next_page);
        assert!(result.meta.has_previous_page);
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let result = paginate(&catalog(), &PageRequest::new(5, 2, ""));
        assert!(result.data.is_empty());
        assert_eq!(result.meta.current_page, 5);
        assert_eq!(result.meta.total_pages, 2);
        assert!(!result.meta.has_next_page);
        assert!(result.meta.has_previous_page);
    }

    #[test]
    fn test_pages_cover_filtered_set_exactly_once() {
        let items = many(47);
        let limit = 6;
        let first = paginate(&items, &PageRequest::new(1, limit, "breed0"));
        let expected: Vec<String> = items
            .iter()
            .filter(|i| i.contains("breed0"))
            .cloned()
            .collect();

        let mut seen = Vec::new();
        for page in 1..=first.meta.total_pages {
            let result = paginate(&items, &PageRequest::new(page, limit, "breed0"));
            assert!(result.data.iter().all(|b| b.contains("breed0")));
            seen.extend(result.data);
        }

        assert_eq!(seen, expected);
    }

    #[test]
    fn test_zero_values_are_raised_to_one() {
        let request = PageRequest::new(0, 0, "");
        assert_eq!(request.page(), 1);
        assert_eq!(request.limit(), 1);

        let result = paginate(&catalog(), &request);
        assert_eq!(result.data, ["bulldog"]);
        assert_eq!(result.meta.total_pages, 3);
    }

    #[test]
    fn test_meta_serializes_camel_case() {
        let result = paginate(&catalog(), &PageRequest::new(1, 2, ""));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["data"], serde_json::json!(["bulldog", "husky"]));
        assert_eq!(json["meta"]["currentPage"], 1);
        assert_eq!(json["meta"]["totalPages"], 2);
        assert_eq!(json["meta"]["totalItems"], 3);
        assert_eq!(json["meta"]["itemsPerPage"], 2);
        assert_eq!(json["meta"]["hasNextPage"], true);
        assert_eq!(json["meta"]["hasPreviousPage"], false);
    }
}
