//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Largest page size a client may request.
pub const MAX_PER_PAGE: u32 = 100;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    /// Page number (1-indexed).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Number of items per page.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl PageRequest {
    /// Page number, never below 1.
    #[must_use]
    pub fn page(&self) -> u64 {
        u64::from(self.page.max(1))
    }

    /// Page size clamped to `1..=MAX_PER_PAGE`.
    #[must_use]
    pub fn per_page(&self) -> u64 {
        u64::from(self.per_page.clamp(1, MAX_PER_PAGE))
    }

    /// Zero-based page index for `Paginator::fetch_page`.
    #[must_use]
    pub fn page_index(&self) -> u64 {
        self.page() - 1
    }
}

/// Response wrapper for paginated data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items in the current page.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub meta: PageMeta,
}

/// Pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Current page number.
    pub page: u64,
    /// Items per page.
    pub per_page: u64,
    /// Total number of items across all pages.
    pub total: u64,
    /// Total number of pages.
    pub total_pages: u64,
}

impl<T> PageResponse<T> {
    /// Creates a new paginated response.
    #[must_use]
    pub fn new(data: Vec<T>, request: &PageRequest, total: u64) -> Self {
        let per_page = request.per_page();
        Self {
            data,
            meta: PageMeta {
                page: request.page(),
                per_page,
                total,
                total_pages: total.div_ceil(per_page).max(1),
            },
        }
    }

    /// Converts the items while keeping the metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResponse<U> {
        PageResponse {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 20, 1)]
    #[case(20, 20, 1)]
    #[case(21, 20, 2)]
    #[case(250, 100, 3)]
    fn test_total_pages(#[case] total: u64, #[case] per_page: u32, #[case] expected: u64) {
        let request = PageRequest { page: 1, per_page };
        let page = PageResponse::<()>::new(Vec::new(), &request, total);
        assert_eq!(page.meta.total_pages, expected);
    }

    #[test]
    fn test_bounds_are_clamped() {
        let request = PageRequest {
            page: 0,
            per_page: 10_000,
        };
        assert_eq!(request.page(), 1);
        assert_eq!(request.page_index(), 0);
        assert_eq!(request.per_page(), u64::from(MAX_PER_PAGE));

        let request = PageRequest { page: 3, per_page: 0 };
        assert_eq!(request.per_page(), 1);
        assert_eq!(request.page_index(), 2);
    }

    #[test]
    fn test_query_uses_camel_case() {
        let request: PageRequest = serde_json::from_str(r#"{"page":2,"perPage":5}"#).unwrap();
        assert_eq!(request.page(), 2);
        assert_eq!(request.per_page(), 5);
    }
}
