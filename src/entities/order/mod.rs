//! Order entity: model, statuses, form rules and REST surface

pub mod descriptor;
pub mod handlers;
pub mod model;
pub mod status;
pub mod validation;

pub use descriptor::OrderDescriptor;
pub use handlers::OrderAppState;
pub use model::{DetailRow, NewOrder, Order, OrderPatch, format_rupees};
pub use status::{OrderStatus, StatusPolicy, WasteType};
