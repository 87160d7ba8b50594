//! Order HTTP handlers

use super::model::{DetailRow, NewOrder, Order, OrderPatch};
use super::status::StatusPolicy;
use crate::core::error::{HuskError, HuskResult, ValidationError};
use crate::core::query::{ListQuery, PaginatedResponse};
use crate::core::service::DataService;
use crate::core::validation::Validated;
use crate::table::{
    SortConfig, filter_records, order_stats, paginate, sort_records, stats::OrderStats,
};
use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;

/// Order-specific AppState
#[derive(Clone)]
pub struct OrderAppState {
    pub service: Arc<dyn DataService<Order>>,
    pub policy: StatusPolicy,
    pub page_size: usize,
    pub page_window: usize,
}

/// Printable summary of one order
#[derive(Debug, Serialize)]
pub struct OrderSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub rows: Vec<DetailRow>,
}

async fn load_filtered(state: &OrderAppState, query: &ListQuery) -> HuskResult<Vec<Order>> {
    let criteria = query.criteria()?;
    let sort = query.sort_config(SortConfig::newest_first())?;
    let orders = state.service.list().await?;
    Ok(sort_records(&filter_records(&orders, &criteria), &sort))
}

async fn find(state: &OrderAppState, id: &str) -> HuskResult<Order> {
    state
        .service
        .get(id)
        .await?
        .ok_or_else(|| HuskError::not_found("order", id))
}

pub async fn list_orders(
    State(state): State<OrderAppState>,
    Query(query): Query<ListQuery>,
) -> HuskResult<Json<Vec<Order>>> {
    Ok(Json(load_filtered(&state, &query).await?))
}

pub async fn page_orders(
    State(state): State<OrderAppState>,
    Query(query): Query<ListQuery>,
) -> HuskResult<Json<PaginatedResponse<Order>>> {
    let orders = load_filtered(&state, &query).await?;
    let page = paginate(&orders, query.page(), query.limit(state.page_size));
    Ok(Json(PaginatedResponse::from_page(page, state.page_window)))
}

/// Aggregates over every stored order, regardless of any filter
pub async fn get_order_stats(State(state): State<OrderAppState>) -> HuskResult<Json<OrderStats>> {
    let orders = state.service.list().await?;
    Ok(Json(order_stats(&orders)))
}

pub async fn get_order(
    State(state): State<OrderAppState>,
    Path(id): Path<String>,
) -> HuskResult<Json<Order>> {
    find(&state, &id).await.map(Json)
}

pub async fn get_order_summary(
    State(state): State<OrderAppState>,
    Path(id): Path<String>,
) -> HuskResult<Json<OrderSummary>> {
    let order = find(&state, &id).await?;
    Ok(Json(OrderSummary {
        rows: order.detail_rows(),
        id: order.id,
    }))
}

pub async fn create_order(
    State(state): State<OrderAppState>,
    payload: Validated<Order>,
) -> HuskResult<Json<Order>> {
    let new_order: NewOrder = payload.parse()?;
    let created = state
        .service
        .create(Order::from_new(new_order, Utc::now()))
        .await?;

    tracing::info!(id = %created.id, waste_type = %created.waste_type, "order created");
    Ok(Json(created))
}

pub async fn update_order(
    State(state): State<OrderAppState>,
    Path(id): Path<String>,
    payload: Validated<Order>,
) -> HuskResult<Json<Order>> {
    let patch: OrderPatch = payload.parse()?;
    let mut order = find(&state, &id).await?;

    if let Some(next) = &patch.status {
        if !state.policy.allows(&order.status, next) {
            return Err(ValidationError::StatusTransition {
                from: order.status.to_string(),
                to: next.to_string(),
            }
            .into());
        }
    }

    let previous = order.status.clone();
    order.apply(patch, Utc::now());
    let updated = state.service.update(&id, order).await?;

    if previous != updated.status {
        tracing::info!(id = %id, from = %previous, to = %updated.status, "order status changed");
    } else {
        tracing::info!(id = %id, "order updated");
    }
    Ok(Json(updated))
}

pub async fn delete_order(
    State(state): State<OrderAppState>,
    Path(id): Path<String>,
) -> HuskResult<Json<Value>> {
    state.service.delete(&id).await?;
    tracing::info!(id = %id, "order deleted");
    Ok(Json(json!({ "message": "Order deleted successfully" })))
}
