//! HTTP server: entity registry, REST assembly and the `ServerBuilder`

pub mod builder;
pub mod entity_registry;
pub mod rest;

pub use builder::ServerBuilder;
pub use entity_registry::{EntityDescriptor, EntityRegistry};
pub use rest::RestExposure;
