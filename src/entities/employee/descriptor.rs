//! Entity descriptor for Employee

use super::handlers::{
    EmployeeAppState, create_employee, delete_employee, get_employee, get_payroll_summary,
    list_employees, page_employees, update_employee,
};
use super::model::Employee;
use crate::core::service::DataService;
use crate::server::entity_registry::EntityDescriptor;
use crate::table::{DEFAULT_PAGE_SIZE, DEFAULT_PAGE_WINDOW};
use axum::{Router, routing::get};
use std::sync::Arc;

/// Descriptor for the Employee entity
pub struct EmployeeDescriptor {
    pub service: Arc<dyn DataService<Employee>>,
    pub page_size: usize,
    pub page_window: usize,
}

impl EmployeeDescriptor {
    pub fn new(service: Arc<dyn DataService<Employee>>) -> Self {
        Self {
            service,
            page_size: DEFAULT_PAGE_SIZE,
            page_window: DEFAULT_PAGE_WINDOW,
        }
    }

    pub fn with_paging(mut self, page_size: usize, page_window: usize) -> Self {
        self.page_size = page_size;
        self.page_window = page_window;
        self
    }
}

impl EntityDescriptor for EmployeeDescriptor {
    fn entity_type(&self) -> &str {
        "employee"
    }

    fn plural(&self) -> &str {
        "employees"
    }

    fn build_routes(&self) -> Router {
        let state = EmployeeAppState {
            service: self.service.clone(),
            page_size: self.page_size,
            page_window: self.page_window,
        };

        Router::new()
            .route("/employees", get(list_employees).post(create_employee))
            .route("/employees/page", get(page_employees))
            .route("/employees/payroll", get(get_payroll_summary))
            .route(
                "/employees/{id}",
                get(get_employee).put(update_employee).delete(delete_employee),
            )
            .with_state(state)
    }
}
