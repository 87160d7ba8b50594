//! In-memory table engine
//!
//! The dashboards fetch a whole collection once and then filter, sort and
//! paginate it locally. The same functions back the REST list endpoints.
//!
//! Data flows `filter → sort → paginate`; the stats aggregators run over the
//! raw, unfiltered collection.

pub mod filter;
pub mod pager;
pub mod sort;
pub mod state;
pub mod stats;

pub use filter::{DateRange, FilterCriteria, filter_records};
pub use pager::{DEFAULT_PAGE_SIZE, DEFAULT_PAGE_WINDOW, Page, page_window, paginate};
pub use sort::{SortConfig, SortDirection, sort_records};
pub use state::{TableAction, TableState};
pub use stats::{OrderStats, PayrollSummary, StatusHistogram, order_stats, payroll_summary};
