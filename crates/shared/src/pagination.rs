//! Offset pagination utilities.

use serde::Serialize;

/// Resolved page window for a list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// 1-based page number.
    pub page: u32,
    /// Rows per page.
    pub limit: u32,
}

impl PageWindow {
    /// Resolves raw `page`/`limit` query values.
    ///
    /// Missing or zero values fall back to page 1 and `default_limit`;
    /// limits are capped at `max_limit`.
    pub fn resolve(
        page: Option<u32>,
        limit: Option<u32>,
        default_limit: u32,
        max_limit: u32,
    ) -> Self {
        let page = page.filter(|p| *p > 0).unwrap_or(1);
        let limit = limit
            .filter(|l| *l > 0)
            .unwrap_or(default_limit)
            .min(max_limit.max(1));
        Self { page, limit }
    }

    /// SQL OFFSET for this window.
    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.limit as i64
    }

    /// SQL LIMIT for this window.
    pub fn limit(&self) -> i64 {
        self.limit as i64
    }
}

/// Number of pages needed to show `total` rows.
pub fn total_pages(total: i64, limit: u32) -> i64 {
    if total <= 0 || limit == 0 {
        return 0;
    }
    (total + limit as i64 - 1) / limit as i64
}

/// Pagination metadata returned with list responses.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total: i64,
    pub total_pages: i64,
    pub current_page: u32,
    pub limit: u32,
}

impl PageInfo {
    pub fn new(window: PageWindow, total: i64) -> Self {
        Self {
            total,
            total_pages: total_pages(total, window.limit),
            current_page: window.page,
            limit: window.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let window = PageWindow::resolve(None, None, 10, 100);
        assert_eq!(window, PageWindow { page: 1, limit: 10 });
        assert_eq!(window.offset(), 0);
    }

    #[test]
    fn test_resolve_zero_values_fall_back() {
        let window = PageWindow::resolve(Some(0), Some(0), 20, 100);
        assert_eq!(window, PageWindow { page: 1, limit: 20 });
    }

    #[test]
    fn test_resolve_caps_limit() {
        let window = PageWindow::resolve(Some(3), Some(500), 10, 100);
        assert_eq!(window.limit, 100);
        assert_eq!(window.offset(), 200);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn test_page_info_serialization() {
        let info = PageInfo::new(PageWindow { page: 2, limit: 10 }, 25);
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["total"], 25);
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["currentPage"], 2);
    }
}
