//! Domain entities

pub mod employee;
pub mod order;
pub mod registration;

pub use employee::{Employee, EmployeeDescriptor, EmployeeView, Payroll};
pub use order::{Order, OrderDescriptor, OrderStatus, StatusPolicy, WasteType};
pub use registration::{Registration, Role};
