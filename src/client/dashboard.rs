//! Dashboard state containers
//!
//! A dashboard owns the collection it fetched, the table view state and the
//! outcome of the last action. Local records change only after the backend
//! confirms a mutation; a failed call leaves them exactly as they were.

use super::backend::Backend;
use super::error::ClientError;
use crate::core::error::FieldValidationError;
use crate::core::record::Record;
use crate::core::validation::ValidatableEntity;
use crate::entities::employee::{Employee, EmployeePatch, NewEmployee, employees_to_csv};
use crate::entities::order::{NewOrder, Order, OrderPatch, OrderStatus};
use crate::table::{
    OrderStats, Page, PayrollSummary, SortConfig, TableAction, TableState, order_stats,
    payroll_summary,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    /// Shown with a retry action
    Failed { message: String },
}

/// One-shot message for the user after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Success(message) | Notice::Error(message) => message,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

/// Records plus the table view over them
#[derive(Debug, Clone)]
pub struct Collection<T: Record> {
    records: Vec<T>,
    table: TableState,
    load_state: LoadState,
    notice: Option<Notice>,
}

impl<T: Record> Collection<T> {
    pub fn new(table: TableState) -> Self {
        Self {
            records: Vec::new(),
            table,
            load_state: LoadState::Idle,
            notice: None,
        }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn table(&self) -> &TableState {
        &self.table
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn dispatch(&mut self, action: TableAction) {
        self.table = self.table.clone().apply(action, &self.records);
    }

    pub fn view(&self) -> Page<T> {
        self.table.view(&self.records)
    }

    fn reclamp(&mut self) {
        let page = self.table.page;
        self.table = self
            .table
            .clone()
            .apply(TableAction::GoToPage(page), &self.records);
    }

    fn replace_all(&mut self, records: Vec<T>) {
        self.records = records;
        self.load_state = LoadState::Ready;
        self.reclamp();
    }

    fn upsert(&mut self, record: T) {
        match self.records.iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => *slot = record,
            None => self.records.push(record),
        }
        self.reclamp();
    }

    fn remove(&mut self, id: &str) {
        self.records.retain(|r| r.id() != id);
        self.reclamp();
    }

    fn succeed(&mut self, message: &str) {
        self.notice = Some(Notice::Success(message.to_string()));
    }

    fn fail(&mut self, message: &str) {
        self.notice = Some(Notice::Error(message.to_string()));
    }
}

fn body_error(err: serde_json::Error) -> ClientError {
    ClientError::Invalid(vec![FieldValidationError::new("body", err.to_string())])
}

/// Run a form through the entity's rules for `operation` and decode it
pub(super) fn validate_form<E, D>(operation: &str, form: Value) -> Result<D, ClientError>
where
    E: ValidatableEntity,
    D: DeserializeOwned,
{
    let clean = E::validation_config(operation)
        .validate_and_filter(form)
        .map_err(ClientError::Invalid)?;
    serde_json::from_value(clean).map_err(body_error)
}

/// Check a partial update against the entity's update rules; the sanitized
/// patch is what gets sent
pub(super) fn validate_patch<E, P>(patch: &P) -> Result<P, ClientError>
where
    E: ValidatableEntity,
    P: Serialize + DeserializeOwned,
{
    let form = serde_json::to_value(patch).map_err(body_error)?;
    validate_form::<E, P>("update", form)
}

// =============================================================================
// Orders
// =============================================================================

pub const ORDERS_LOAD_FAILED: &str = "Failed to load orders. Please try again.";

pub struct OrderDashboard<B: Backend> {
    backend: B,
    orders: Collection<Order>,
    stats: OrderStats,
}

impl<B: Backend> OrderDashboard<B> {
    /// Newest orders first, ten per page
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            orders: Collection::new(TableState::default().with_sort(SortConfig::newest_first())),
            stats: OrderStats::default(),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        let sort = self.orders.table.sort.clone();
        self.orders.table = TableState::new(page_size).with_sort(sort);
        self
    }

    pub fn collection(&self) -> &Collection<Order> {
        &self.orders
    }

    pub fn orders(&self) -> &[Order] {
        self.orders.records()
    }

    /// Aggregates over every loaded order, ignoring the table filters
    pub fn stats(&self) -> &OrderStats {
        &self.stats
    }

    pub fn view(&self) -> Page<Order> {
        self.orders.view()
    }

    pub fn dispatch(&mut self, action: TableAction) {
        self.orders.dispatch(action);
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.orders.take_notice()
    }

    pub async fn load(&mut self) {
        self.orders.load_state = LoadState::Loading;
        match self.backend.list_orders().await {
            Ok(orders) => {
                tracing::debug!(count = orders.len(), "orders loaded");
                self.orders.replace_all(orders);
                self.refresh_stats();
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load orders");
                self.orders.load_state = LoadState::Failed {
                    message: ORDERS_LOAD_FAILED.to_string(),
                };
            }
        }
    }

    /// User-initiated retry after a failed load
    pub async fn retry(&mut self) {
        self.load().await;
    }

    /// Nothing is sent for a status outside the known four
    pub async fn update_status(
        &mut self,
        id: &str,
        status: OrderStatus,
    ) -> Result<(), ClientError> {
        let patch = match validate_patch::<Order, _>(&OrderPatch::status(status)) {
            Ok(patch) => patch,
            Err(e) => {
                self.orders
                    .fail(e.first_message().unwrap_or("Failed to update order."));
                return Err(e);
            }
        };

        match self.backend.update_order(id, &patch).await {
            Ok(updated) => {
                self.orders.upsert(updated);
                self.refresh_stats();
                self.orders.succeed("Order status updated successfully!");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "order status update failed");
                self.orders.fail("Failed to update order.");
                Err(e)
            }
        }
    }

    pub async fn delete(&mut self, id: &str) -> Result<(), ClientError> {
        match self.backend.delete_order(id).await {
            Ok(()) => {
                self.orders.remove(id);
                self.refresh_stats();
                self.orders.succeed("Order deleted successfully!");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "order delete failed");
                self.orders.fail("Failed to delete order.");
                Err(e)
            }
        }
    }

    /// Validate the new-order form locally, then place the order.
    /// Nothing is sent when validation fails.
    pub async fn submit(&mut self, form: Value) -> Result<Order, ClientError> {
        let new_order: NewOrder = match validate_form::<Order, _>("create", form) {
            Ok(new_order) => new_order,
            Err(e) => {
                self.orders.fail(e.first_message().unwrap_or("Please check the form."));
                return Err(e);
            }
        };

        match self.backend.create_order(&new_order).await {
            Ok(created) => {
                self.orders.upsert(created.clone());
                self.refresh_stats();
                self.orders.succeed("Order placed successfully!");
                Ok(created)
            }
            Err(e) => {
                tracing::warn!(error = %e, "order submit failed");
                let message = e
                    .first_message()
                    .unwrap_or("Failed to place order. Please try again.")
                    .to_string();
                self.orders.fail(&message);
                Err(e)
            }
        }
    }

    fn refresh_stats(&mut self) {
        self.stats = order_stats(self.orders.records());
    }
}

// =============================================================================
// Employees
// =============================================================================

pub const EMPLOYEES_LOAD_FAILED: &str = "Failed to load employees. Please try again.";

pub struct EmployeeDashboard<B: Backend> {
    backend: B,
    employees: Collection<Employee>,
}

impl<B: Backend> EmployeeDashboard<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            employees: Collection::new(TableState::default()),
        }
    }

    pub fn collection(&self) -> &Collection<Employee> {
        &self.employees
    }

    pub fn employees(&self) -> &[Employee] {
        self.employees.records()
    }

    pub fn view(&self) -> Page<Employee> {
        self.employees.view()
    }

    pub fn dispatch(&mut self, action: TableAction) {
        self.employees.dispatch(action);
    }

    /// Restrict to one department; empty shows all
    pub fn filter_department(&mut self, department: &str) {
        self.dispatch(TableAction::SetFilter {
            field: "DepartmentName".into(),
            value: department.into(),
        });
    }

    /// Distinct department names in order of first appearance
    pub fn departments(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for employee in self.employees.records() {
            if !employee.department.is_empty() && !seen.contains(&employee.department.as_str()) {
                seen.push(&employee.department);
            }
        }
        seen
    }

    pub fn payroll_summary(&self) -> PayrollSummary {
        payroll_summary(self.employees.records())
    }

    /// The filtered, sorted table as CSV, every page included
    pub fn export_csv(&self) -> Result<String, ClientError> {
        let rows = self.employees.table.rows(self.employees.records());
        Ok(employees_to_csv(&rows)?)
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.employees.take_notice()
    }

    pub async fn load(&mut self) {
        self.employees.load_state = LoadState::Loading;
        match self.backend.list_employees().await {
            Ok(employees) => self.employees.replace_all(employees),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load employees");
                self.employees.load_state = LoadState::Failed {
                    message: EMPLOYEES_LOAD_FAILED.to_string(),
                };
            }
        }
    }

    pub async fn retry(&mut self) {
        self.load().await;
    }

    pub async fn submit(&mut self, form: Value) -> Result<Employee, ClientError> {
        let new_employee: NewEmployee = match validate_form::<Employee, _>("create", form) {
            Ok(new_employee) => new_employee,
            Err(e) => {
                self.employees
                    .fail(e.first_message().unwrap_or("Please check the form."));
                return Err(e);
            }
        };

        match self.backend.create_employee(&new_employee).await {
            Ok(created) => {
                self.employees.upsert(created.clone());
                self.employees.succeed("Employee added successfully!");
                Ok(created)
            }
            Err(e) => {
                tracing::warn!(error = %e, "employee submit failed");
                self.employees.fail("Failed to add employee.");
                Err(e)
            }
        }
    }

    /// Validate the changed fields locally, then save them
    pub async fn update(&mut self, id: &str, patch: EmployeePatch) -> Result<(), ClientError> {
        let patch = match validate_patch::<Employee, _>(&patch) {
            Ok(patch) => patch,
            Err(e) => {
                self.employees
                    .fail(e.first_message().unwrap_or("Failed to update employee."));
                return Err(e);
            }
        };

        match self.backend.update_employee(id, &patch).await {
            Ok(updated) => {
                self.employees.upsert(updated);
                self.employees.succeed("Employee updated successfully!");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "employee update failed");
                self.employees.fail("Failed to update employee.");
                Err(e)
            }
        }
    }

    pub async fn delete(&mut self, id: &str) -> Result<(), ClientError> {
        match self.backend.delete_employee(id).await {
            Ok(()) => {
                self.employees.remove(id);
                self.employees.succeed("Employee deleted successfully!");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "employee delete failed");
                self.employees.fail("Failed to delete employee.");
                Err(e)
            }
        }
    }
}
