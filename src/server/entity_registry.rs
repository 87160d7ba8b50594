//! Entity registry: collects each entity's routes into one router

use axum::Router;
use indexmap::IndexMap;

/// Describes how one entity exposes itself over REST.
///
/// The descriptor owns whatever state its handlers need and applies it in
/// `build_routes`, so registered routers are already stateless.
pub trait EntityDescriptor: Send + Sync {
    /// The entity type name (singular, e.g. "order")
    fn entity_type(&self) -> &str;

    /// The plural form, which is also the path segment (e.g. "orders")
    fn plural(&self) -> &str;

    /// Routes under `/{plural}`
    fn build_routes(&self) -> Router;
}

/// Registered entities, in registration order
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: IndexMap<String, Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity descriptor. A second descriptor for the same
    /// entity type replaces the first.
    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        let entity_type = descriptor.entity_type().to_string();
        tracing::debug!(entity = %entity_type, plural = descriptor.plural(), "entity registered");
        self.descriptors.insert(entity_type, descriptor);
    }

    /// Merge every entity's routes into one router
    pub fn build_routes(&self) -> Router {
        self.descriptors
            .values()
            .fold(Router::new(), |router, descriptor| {
                router.merge(descriptor.build_routes())
            })
    }

    pub fn entity_types(&self) -> Vec<&str> {
        self.descriptors.keys().map(|s| s.as_str()).collect()
    }

    pub fn plurals(&self) -> Vec<&str> {
        self.descriptors.values().map(|d| d.plural()).collect()
    }
}
