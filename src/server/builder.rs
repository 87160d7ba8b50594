//! ServerBuilder for fluent API to build HTTP servers

use super::entity_registry::{EntityDescriptor, EntityRegistry};
use super::rest::RestExposure;
use crate::config::AppConfig;
use crate::core::service::DataService;
use crate::entities::employee::{Employee, EmployeeDescriptor};
use crate::entities::order::{Order, OrderDescriptor};
use crate::storage::InMemoryDataService;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the REST service
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .register(OrderDescriptor::new(Arc::new(InMemoryDataService::new())))
///     .with_base_path("/api")
///     .build()?;
/// ```
pub struct ServerBuilder {
    entity_registry: EntityRegistry,
    custom_routes: Vec<Router>,
    base_path: String,
    cors: bool,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self {
            entity_registry: EntityRegistry::new(),
            custom_routes: Vec::new(),
            base_path: String::new(),
            cors: true,
        }
    }

    /// Orders and employees backed by fresh in-memory stores, configured
    /// from `config`
    pub fn from_config(config: &AppConfig) -> Self {
        Self::with_services(
            config,
            Arc::new(InMemoryDataService::<Order>::new()),
            Arc::new(InMemoryDataService::<Employee>::new()),
        )
    }

    /// Orders and employees backed by the given services
    pub fn with_services(
        config: &AppConfig,
        orders: Arc<dyn DataService<Order>>,
        employees: Arc<dyn DataService<Employee>>,
    ) -> Self {
        let table = &config.table;
        Self::new()
            .with_base_path(config.server.base_path.clone())
            .with_cors(config.server.cors)
            .register(
                OrderDescriptor::new(orders)
                    .with_policy(config.orders.status_policy)
                    .with_paging(table.page_size, table.page_window),
            )
            .register(
                EmployeeDescriptor::new(employees).with_paging(table.page_size, table.page_window),
            )
    }

    /// Register an entity's routes
    pub fn register(mut self, descriptor: impl EntityDescriptor + 'static) -> Self {
        self.entity_registry.register(Box::new(descriptor));
        self
    }

    /// Add routes that are not entity CRUD; they share the base path
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Prefix for entity and custom routes, e.g. `/api`
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    pub fn with_cors(mut self, cors: bool) -> Self {
        self.cors = cors;
        self
    }

    pub fn entity_types(&self) -> Vec<&str> {
        self.entity_registry.entity_types()
    }

    pub fn build(self) -> Result<Router> {
        if !self.base_path.is_empty() && !self.base_path.starts_with('/') {
            anyhow::bail!("base path '{}' must start with '/'", self.base_path);
        }
        Ok(RestExposure::build_router(
            &self.entity_registry,
            self.custom_routes,
            &self.base_path,
            self.cors,
        ))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds `addr`, serves until SIGTERM or Ctrl+C, then drains in-flight
    /// requests.
    pub async fn serve(self, addr: &str) -> Result<()> {
        let listener = TcpListener::bind(addr).await?;
        self.serve_on(listener).await
    }

    /// Serve on an already bound listener
    pub async fn serve_on(self, listener: TcpListener) -> Result<()> {
        let entities = self.entity_types().join(", ");
        let app = self.build()?;
        let addr = listener.local_addr()?;

        tracing::info!(%addr, entities = %entities, "server listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received Ctrl+C, shutting down");
        },
        _ = terminate => {
            tracing::info!("received SIGTERM, shutting down");
        },
    }
}
