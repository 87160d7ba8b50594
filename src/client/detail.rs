//! Single-record pages: the order summary and the edit-employee form
//!
//! Both fetch one record by id. A missing record, or any other failure,
//! leaves the page in [`LoadState::Failed`] until the user retries.

use super::backend::Backend;
use super::dashboard::{LoadState, Notice, validate_patch};
use super::error::ClientError;
use crate::entities::employee::{Employee, EmployeePatch};
use crate::entities::order::{DetailRow, Order};

pub const ORDER_NOT_FOUND: &str = "Order not found.";
pub const ORDER_DETAIL_FAILED: &str = "Failed to load order details. Please try again.";
pub const EMPLOYEE_NOT_FOUND: &str = "Employee not found.";
pub const EMPLOYEE_DETAIL_FAILED: &str = "Failed to load employee. Please try again.";

/// The fetched record and how the fetch went
#[derive(Debug, Clone)]
struct Detail<T> {
    id: String,
    record: Option<T>,
    load_state: LoadState,
}

impl<T> Detail<T> {
    fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            record: None,
            load_state: LoadState::Idle,
        }
    }

    /// A failed fetch drops any record shown before it
    fn settle(&mut self, result: Result<T, ClientError>, not_found: &str, failed: &str) {
        match result {
            Ok(record) => {
                self.record = Some(record);
                self.load_state = LoadState::Ready;
            }
            Err(e) => {
                tracing::warn!(id = %self.id, error = %e, "record fetch failed");
                let message = match e {
                    ClientError::NotFound { .. } => not_found,
                    _ => failed,
                };
                self.record = None;
                self.load_state = LoadState::Failed {
                    message: message.to_string(),
                };
            }
        }
    }
}

// =============================================================================
// Order summary
// =============================================================================

pub struct OrderDetail<B: Backend> {
    backend: B,
    detail: Detail<Order>,
}

impl<B: Backend> OrderDetail<B> {
    pub fn new(backend: B, id: impl Into<String>) -> Self {
        Self {
            backend,
            detail: Detail::new(id),
        }
    }

    pub fn id(&self) -> &str {
        &self.detail.id
    }

    pub fn order(&self) -> Option<&Order> {
        self.detail.record.as_ref()
    }

    pub fn load_state(&self) -> &LoadState {
        &self.detail.load_state
    }

    pub async fn load(&mut self) {
        self.detail.load_state = LoadState::Loading;
        let result = self.backend.get_order(&self.detail.id).await;
        self.detail.settle(result, ORDER_NOT_FOUND, ORDER_DETAIL_FAILED);
    }

    pub async fn retry(&mut self) {
        self.load().await;
    }

    /// Printable summary rows; empty until the order has loaded
    pub fn summary(&self) -> Vec<DetailRow> {
        self.order().map(Order::detail_rows).unwrap_or_default()
    }
}

// =============================================================================
// Edit employee
// =============================================================================

pub struct EmployeeEditor<B: Backend> {
    backend: B,
    detail: Detail<Employee>,
    notice: Option<Notice>,
}

impl<B: Backend> EmployeeEditor<B> {
    pub fn new(backend: B, id: impl Into<String>) -> Self {
        Self {
            backend,
            detail: Detail::new(id),
            notice: None,
        }
    }

    pub fn employee(&self) -> Option<&Employee> {
        self.detail.record.as_ref()
    }

    pub fn load_state(&self) -> &LoadState {
        &self.detail.load_state
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub async fn load(&mut self) {
        self.detail.load_state = LoadState::Loading;
        let result = self.backend.get_employee(&self.detail.id).await;
        self.detail
            .settle(result, EMPLOYEE_NOT_FOUND, EMPLOYEE_DETAIL_FAILED);
    }

    pub async fn retry(&mut self) {
        self.load().await;
    }

    /// The form pre-filled from the loaded employee, every editable field set
    pub fn form(&self) -> Option<EmployeePatch> {
        self.employee().map(|e| EmployeePatch {
            name: Some(e.name.clone()),
            employee_id: Some(e.employee_id.clone()),
            department: Some(e.department.clone()),
            job_role: Some(e.job_role.clone()),
            phone_number: Some(e.phone_number.clone()),
            email: Some(e.email.clone()),
            basic_salary: Some(e.basic_salary),
            bonus: Some(e.bonus),
            overtime_hours: Some(e.overtime_hours),
        })
    }

    /// Validate locally, then save. Nothing is sent when validation fails.
    pub async fn save(&mut self, patch: EmployeePatch) -> Result<Employee, ClientError> {
        let patch = match validate_patch::<Employee, _>(&patch) {
            Ok(patch) => patch,
            Err(e) => {
                let message = e.first_message().unwrap_or("Failed to update employee.");
                self.notice = Some(Notice::Error(message.to_string()));
                return Err(e);
            }
        };

        match self.backend.update_employee(&self.detail.id, &patch).await {
            Ok(updated) => {
                self.detail.record = Some(updated.clone());
                self.notice = Some(Notice::Success("Employee updated successfully!".into()));
                Ok(updated)
            }
            Err(e) => {
                tracing::warn!(id = %self.detail.id, error = %e, "employee save failed");
                self.notice = Some(Notice::Error("Failed to update employee.".into()));
                Err(e)
            }
        }
    }
}
