//! Client side: the backend boundary, its HTTP implementation, the
//! dashboard state containers built on the table engine and the
//! single-record pages

pub mod backend;
pub mod dashboard;
pub mod detail;
pub mod error;
#[cfg(feature = "client")]
pub mod http;

pub use backend::Backend;
pub use dashboard::{Collection, EmployeeDashboard, LoadState, Notice, OrderDashboard};
pub use detail::{EmployeeEditor, OrderDetail};
pub use error::ClientError;
#[cfg(feature = "client")]
pub use http::HttpBackend;
