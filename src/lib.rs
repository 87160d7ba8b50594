//! # husk
//!
//! Order and employee management core for a coconut-waste supplier.
//!
//! - **Table engine** ([`table`]): filter → sort → paginate over an in-memory
//!   collection, plus order stats and payroll aggregates.
//! - **Entities** ([`entities`]): orders with their status workflow, employees
//!   with derived payroll, and the registration form, each with form rules.
//! - **REST service** ([`server`]): axum routes for `/orders` and
//!   `/employees` over a pluggable [`core::DataService`].
//! - **Dashboards** ([`client`]): state containers that talk to the service
//!   through a [`client::Backend`] and only change local state on success.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use husk::prelude::*;
//!
//! let app = ServerBuilder::from_config(&AppConfig::default()).build()?;
//!
//! let orders: Vec<Order> = fetch_orders().await?;
//! let page = TableState::default()
//!     .with_sort(SortConfig::newest_first())
//!     .set_search("husk")
//!     .view(&orders);
//! let stats = order_stats(&orders);
//! ```

pub mod client;
pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;
pub mod table;
pub mod telemetry;

/// Re-exports of commonly used types and traits
pub mod prelude {
    pub use crate::core::{
        DataService, EntityValidationConfig, FieldFormat, FieldValidationError, FieldValue,
        HuskError, HuskResult, ListQuery, PaginatedResponse, Record, ValidatableEntity,
        Validated,
    };

    pub use crate::entities::{
        employee::{Employee, EmployeeDescriptor, EmployeePatch, EmployeeView, NewEmployee, Payroll},
        order::{
            NewOrder, Order, OrderDescriptor, OrderPatch, OrderStatus, StatusPolicy, WasteType,
        },
        registration::{Registration, Role},
    };

    pub use crate::table::{
        DateRange, FilterCriteria, OrderStats, Page, PayrollSummary, SortConfig, SortDirection,
        StatusHistogram, TableAction, TableState, filter_records, order_stats, paginate,
        payroll_summary, sort_records,
    };

    pub use crate::client::{
        Backend, ClientError, EmployeeDashboard, EmployeeEditor, LoadState, Notice,
        OrderDashboard, OrderDetail,
    };
    #[cfg(feature = "client")]
    pub use crate::client::HttpBackend;

    pub use crate::config::AppConfig;
    pub use crate::server::{EntityDescriptor, EntityRegistry, ServerBuilder};
    pub use crate::storage::InMemoryDataService;

    pub use async_trait::async_trait;
    pub use axum::Router;
}
