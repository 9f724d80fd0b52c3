use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<Meta>,
    pub errors: Option<Vec<String>>,
}

/// List metadata. `total` is always the size of the whole matching collection,
/// independent of the page window.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub total: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

impl Meta {
    pub fn paged(total: i64, pagination: &PaginationQuery) -> Self {
        Self {
            total,
            page: Some(pagination.page()),
            limit: Some(pagination.limit()),
        }
    }

    /// Metadata of a random sample: there is no page to report
    pub fn sampled(total: i64, limit: i64) -> Self {
        Self {
            total,
            page: None,
            limit: Some(limit),
        }
    }
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Standard `page` / `limit` query parameters shared by list endpoints.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Number of items per page (default: 20, max: 100)
    #[serde(default = "default_limit")]
    #[param(minimum = 1, maximum = 100)]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationQuery {
    pub fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }

    /// Page number, never below 1
    pub fn page(&self) -> i64 {
        self.page.max(1)
    }

    /// SQL OFFSET for the page; saturates instead of overflowing on huge pages
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.limit())
    }

    /// Get clamped limit (respects MAX_PAGE_SIZE)
    pub fn limit(&self) -> i64 {
        self.limit.clamp(1, MAX_PAGE_SIZE)
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
            errors: None,
        }
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            meta: None,
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_offset() {
        assert_eq!(PaginationQuery::new(1, 20).offset(), 0);
        assert_eq!(PaginationQuery::new(3, 20).offset(), 40);
        // page below 1 is treated as the first page
        assert_eq!(PaginationQuery::new(0, 20).offset(), 0);
        assert_eq!(PaginationQuery::new(-4, 20).page(), 1);
    }

    #[test]
    fn test_pagination_offset_saturates_on_huge_page() {
        assert_eq!(PaginationQuery::new(i64::MAX, 20).offset(), i64::MAX);
        assert_eq!(PaginationQuery::new(i64::MAX, 1).offset(), i64::MAX - 1);
        assert!(PaginationQuery::new(i64::MAX, 100).offset() >= 0);
    }

    #[test]
    fn test_pagination_limit_is_clamped() {
        assert_eq!(PaginationQuery::new(1, 0).limit(), 1);
        assert_eq!(PaginationQuery::new(1, 500).limit(), MAX_PAGE_SIZE);
        assert_eq!(PaginationQuery::default().limit(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_meta_skips_missing_window() {
        let meta = Meta {
            total: 7,
            page: None,
            limit: None,
        };
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json, serde_json::json!({ "total": 7 }));
    }
}
