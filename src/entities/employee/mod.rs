//! Employee entity: model, payroll derivation, form rules, CSV export and
//! REST surface

pub mod descriptor;
pub mod export;
pub mod handlers;
pub mod model;
pub mod payroll;
pub mod validation;

pub use descriptor::EmployeeDescriptor;
pub use export::employees_to_csv;
pub use handlers::EmployeeAppState;
pub use model::{Employee, EmployeePatch, EmployeeView, NewEmployee};
pub use payroll::{EPF_ETF_RATE, OVERTIME_HOURLY_RATE, Payroll};
