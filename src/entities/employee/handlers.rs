//! Employee HTTP handlers

use super::model::{Employee, EmployeePatch, EmployeeView, NewEmployee};
use crate::core::error::{HuskError, HuskResult};
use crate::core::query::{ListQuery, PaginatedResponse};
use crate::core::service::DataService;
use crate::core::validation::Validated;
use crate::table::{
    PayrollSummary, SortConfig, filter_records, paginate, payroll_summary, sort_records,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use serde_json::{Value, json};
use std::sync::Arc;

/// Employee-specific AppState
#[derive(Clone)]
pub struct EmployeeAppState {
    pub service: Arc<dyn DataService<Employee>>,
    pub page_size: usize,
    pub page_window: usize,
}

async fn load_filtered(state: &EmployeeAppState, query: &ListQuery) -> HuskResult<Vec<Employee>> {
    let criteria = query.criteria()?.with_equals(
        "DepartmentName",
        query.department.clone().unwrap_or_default(),
    );
    let sort = query.sort_config(SortConfig::default())?;
    let employees = state.service.list().await?;
    Ok(sort_records(&filter_records(&employees, &criteria), &sort))
}

async fn find(state: &EmployeeAppState, id: &str) -> HuskResult<Employee> {
    state
        .service
        .get(id)
        .await?
        .ok_or_else(|| HuskError::not_found("employee", id))
}

pub async fn list_employees(
    State(state): State<EmployeeAppState>,
    Query(query): Query<ListQuery>,
) -> HuskResult<Json<Vec<EmployeeView>>> {
    let employees = load_filtered(&state, &query).await?;
    Ok(Json(employees.into_iter().map(EmployeeView::from).collect()))
}

pub async fn page_employees(
    State(state): State<EmployeeAppState>,
    Query(query): Query<ListQuery>,
) -> HuskResult<Json<PaginatedResponse<EmployeeView>>> {
    let employees = load_filtered(&state, &query).await?;
    let page = paginate(&employees, query.page(), query.limit(state.page_size))
        .map(EmployeeView::from);
    Ok(Json(PaginatedResponse::from_page(page, state.page_window)))
}

/// Payroll totals over every stored employee
pub async fn get_payroll_summary(
    State(state): State<EmployeeAppState>,
) -> HuskResult<Json<PayrollSummary>> {
    let employees = state.service.list().await?;
    Ok(Json(payroll_summary(&employees)))
}

pub async fn get_employee(
    State(state): State<EmployeeAppState>,
    Path(id): Path<String>,
) -> HuskResult<Json<EmployeeView>> {
    find(&state, &id).await.map(|e| Json(e.into()))
}

pub async fn create_employee(
    State(state): State<EmployeeAppState>,
    payload: Validated<Employee>,
) -> HuskResult<(StatusCode, Json<EmployeeView>)> {
    let new_employee: NewEmployee = payload.parse()?;
    // the store refuses an EmployeeId already on file
    let created = state
        .service
        .create(Employee::from_new(new_employee, Utc::now()))
        .await?;

    tracing::info!(id = %created.id, employee_id = %created.employee_id, "employee created");
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn update_employee(
    State(state): State<EmployeeAppState>,
    Path(id): Path<String>,
    payload: Validated<Employee>,
) -> HuskResult<Json<EmployeeView>> {
    let patch: EmployeePatch = payload.parse()?;
    let mut employee = find(&state, &id).await?;
    employee.apply(patch);
    let updated = state.service.update(&id, employee).await?;

    tracing::info!(id = %id, "employee updated");
    Ok(Json(updated.into()))
}

pub async fn delete_employee(
    State(state): State<EmployeeAppState>,
    Path(id): Path<String>,
) -> HuskResult<Json<Value>> {
    state.service.delete(&id).await?;
    tracing::info!(id = %id, "employee deleted");
    Ok(Json(json!({ "message": "Employee deleted successfully" })))
}
