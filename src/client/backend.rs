//! Request/response boundary between the dashboards and the REST service

use super::error::ClientError;
use crate::entities::employee::{Employee, EmployeePatch, NewEmployee};
use crate::entities::order::{NewOrder, Order, OrderPatch};
use async_trait::async_trait;

/// The calls a dashboard makes. Each either succeeds with the server's
/// version of the record or fails without side effects on the caller.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn list_orders(&self) -> Result<Vec<Order>, ClientError>;

    /// A missing order is [`ClientError::NotFound`]
    async fn get_order(&self, id: &str) -> Result<Order, ClientError>;

    async fn create_order(&self, order: &NewOrder) -> Result<Order, ClientError>;

    async fn update_order(&self, id: &str, patch: &OrderPatch) -> Result<Order, ClientError>;

    async fn delete_order(&self, id: &str) -> Result<(), ClientError>;

    async fn list_employees(&self) -> Result<Vec<Employee>, ClientError>;

    async fn get_employee(&self, id: &str) -> Result<Employee, ClientError>;

    async fn create_employee(&self, employee: &NewEmployee) -> Result<Employee, ClientError>;

    async fn update_employee(
        &self,
        id: &str,
        patch: &EmployeePatch,
    ) -> Result<Employee, ClientError>;

    async fn delete_employee(&self, id: &str) -> Result<(), ClientError>;
}
