/**
 * Pagination
 *
 * Shared query parameters and response metadata for list endpoints.
 * Every list endpoint accepts `page`/`limit` and returns a `pagination`
 * object of the shape `{page, limit, total, pages}`.
 */
use serde::{Deserialize, Serialize};

/// `page`/`limit` query parameters, both optional.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PageParams {
    /// Resolved page number (1-based, minimum 1).
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Resolved page size, falling back to the endpoint default.
    pub fn limit_or(&self, default: u32) -> u32 {
        match self.limit {
            Some(limit) if limit > 0 => limit,
            _ => default,
        }
    }

    /// SQL OFFSET for the resolved page.
    ///
    /// Widened before multiplying: both factors are client-supplied query
    /// parameters and their u32 product can overflow.
    pub fn offset(&self, default_limit: u32) -> i64 {
        i64::from(self.page() - 1) * i64::from(self.limit_or(default_limit))
    }
}

/// Pagination metadata returned alongside list payloads.
#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub pages: i64,
}

impl Pagination {
    pub fn new(page: u32, limit: u32, total: i64) -> Self {
        let pages = if limit == 0 {
            0
        } else {
            (total + i64::from(limit) - 1) / i64::from(limit)
        };
        Self {
            page,
            limit,
            total,
            pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PageParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit_or(10), 10);
        assert_eq!(params.offset(10), 0);
    }

    #[test]
    fn test_offset_for_later_pages() {
        let params = PageParams {
            page: Some(3),
            limit: Some(20),
        };
        assert_eq!(params.offset(10), 40);
    }

    #[test]
    fn test_zero_page_clamps_to_one() {
        let params = PageParams {
            page: Some(0),
            limit: None,
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.offset(10), 0);
    }

    #[test]
    fn test_extreme_page_and_limit_do_not_overflow() {
        let params = PageParams {
            page: Some(u32::MAX),
            limit: Some(u32::MAX),
        };
        let expected = i64::from(u32::MAX - 1) * i64::from(u32::MAX);
        assert_eq!(params.offset(10), expected);
    }

    #[test]
    fn test_pages_rounds_up() {
        let pagination = Pagination::new(1, 10, 41);
        assert_eq!(pagination.pages, 5);

        let exact = Pagination::new(1, 10, 40);
        assert_eq!(exact.pages, 4);

        let empty = Pagination::new(1, 10, 0);
        assert_eq!(empty.pages, 0);
    }
}
