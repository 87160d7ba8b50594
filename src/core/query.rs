//! List query parameters and the paginated response envelope

use crate::core::error::{HuskResult, RequestError};
use crate::table::filter::{DateRange, FilterCriteria, parse_bound};
use crate::table::pager::Page;
use crate::table::sort::{SortConfig, SortDirection};
use serde::{Deserialize, Serialize};

/// Query string of the list endpoints.
///
/// ```text
/// GET /orders?search=husk
/// GET /orders?start=2024-05-01&end=2024-05-31&sort=amount&direction=desc
/// GET /orders/page?page=2&limit=10&sort=quantity:asc
/// GET /employees?department=Finance
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ListQuery {
    /// Case-insensitive substring over the searchable fields
    pub search: Option<String>,

    /// Earliest creation date, `YYYY-MM-DD` or RFC 3339
    pub start: Option<String>,

    /// Latest creation date; a bare date includes the whole day
    pub end: Option<String>,

    /// Exact department name (employees only)
    pub department: Option<String>,

    /// Sort key, optionally with a direction suffix: `amount` or `amount:desc`
    pub sort: Option<String>,

    /// `asc` or `desc`; overrides a suffix given in `sort`
    pub direction: Option<String>,

    /// Page number (starts at 1)
    pub page: Option<usize>,

    /// Items per page
    pub limit: Option<usize>,
}

/// Upper bound on `limit`
pub const MAX_PAGE_SIZE: usize = 100;

impl ListQuery {
    pub fn date_range(&self) -> HuskResult<DateRange> {
        let start = parse_param("start", self.start.as_deref(), false)?;
        let end = parse_param("end", self.end.as_deref(), true)?;
        Ok(DateRange::new(start, end))
    }

    /// Search term and date range as filter criteria
    pub fn criteria(&self) -> HuskResult<FilterCriteria> {
        Ok(FilterCriteria::search(self.search.clone().unwrap_or_default())
            .with_date_range(self.date_range()?))
    }

    /// Requested sort, or `default` when no key is given
    pub fn sort_config(&self, default: SortConfig) -> HuskResult<SortConfig> {
        let Some(raw) = self.sort.as_deref().filter(|s| !s.trim().is_empty()) else {
            return Ok(default);
        };

        let (key, suffix) = match raw.split_once(':') {
            Some((key, dir)) => (key.trim(), Some(dir)),
            None => (raw.trim(), None),
        };

        let direction = match self.direction.as_deref().or(suffix) {
            Some(dir) => SortDirection::parse(dir).ok_or_else(|| RequestError::InvalidQuery {
                param: "direction".into(),
                message: format!("expected 'asc' or 'desc', got '{}'", dir),
            })?,
            None => SortDirection::Asc,
        };

        Ok(SortConfig::new(key, direction))
    }

    /// Page number, at least 1
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    /// Page size, clamped to `[1, MAX_PAGE_SIZE]`
    pub fn limit(&self, default: usize) -> usize {
        self.limit.unwrap_or(default).clamp(1, MAX_PAGE_SIZE)
    }
}

fn parse_param(
    param: &str,
    raw: Option<&str>,
    end_of_range: bool,
) -> HuskResult<Option<chrono::DateTime<chrono::Utc>>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(raw) => parse_bound(raw, end_of_range).map(Some).ok_or_else(|| {
            RequestError::InvalidQuery {
                param: param.to_string(),
                message: format!("'{}' is not a date (expected YYYY-MM-DD)", raw),
            }
            .into()
        }),
    }
}

/// Paginated response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationMeta {
    /// Current page number after clamping
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages; 0 when there are no items
    pub total_pages: usize,

    pub has_next: bool,

    pub has_prev: bool,

    /// Page numbers for the navigation buttons
    pub window: Vec<usize>,
}

impl<T> PaginatedResponse<T> {
    pub fn from_page(page: Page<T>, window_width: usize) -> Self {
        let pagination = PaginationMeta {
            page: page.page,
            limit: page.page_size,
            total: page.total_items,
            total_pages: page.total_pages,
            has_next: page.has_next(),
            has_prev: page.has_prev(),
            window: page.window(window_width),
        };
        Self {
            data: page.items,
            pagination,
        }
    }
}
