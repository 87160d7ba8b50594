//! Entity descriptor for Order

use super::handlers::{
    OrderAppState, create_order, delete_order, get_order, get_order_stats, get_order_summary,
    list_orders, page_orders, update_order,
};
use super::model::Order;
use super::status::StatusPolicy;
use crate::core::service::DataService;
use crate::server::entity_registry::EntityDescriptor;
use crate::table::{DEFAULT_PAGE_SIZE, DEFAULT_PAGE_WINDOW};
use axum::{Router, routing::get};
use std::sync::Arc;

/// Descriptor for the Order entity
pub struct OrderDescriptor {
    pub service: Arc<dyn DataService<Order>>,
    pub policy: StatusPolicy,
    pub page_size: usize,
    pub page_window: usize,
}

impl OrderDescriptor {
    pub fn new(service: Arc<dyn DataService<Order>>) -> Self {
        Self {
            service,
            policy: StatusPolicy::default(),
            page_size: DEFAULT_PAGE_SIZE,
            page_window: DEFAULT_PAGE_WINDOW,
        }
    }

    pub fn with_policy(mut self, policy: StatusPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_paging(mut self, page_size: usize, page_window: usize) -> Self {
        self.page_size = page_size;
        self.page_window = page_window;
        self
    }
}

impl EntityDescriptor for OrderDescriptor {
    fn entity_type(&self) -> &str {
        "order"
    }

    fn plural(&self) -> &str {
        "orders"
    }

    fn build_routes(&self) -> Router {
        let state = OrderAppState {
            service: self.service.clone(),
            policy: self.policy,
            page_size: self.page_size,
            page_window: self.page_window,
        };

        Router::new()
            .route("/orders", get(list_orders).post(create_order))
            .route("/orders/page", get(page_orders))
            .route("/orders/stats", get(get_order_stats))
            .route(
                "/orders/{id}",
                get(get_order).put(update_order).delete(delete_order),
            )
            .route("/orders/{id}/summary", get(get_order_summary))
            .with_state(state)
    }
}
