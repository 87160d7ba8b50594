//! Core module containing the fundamental traits and types of the crate

pub mod error;
pub mod field;
pub mod query;
pub mod record;
pub mod service;
pub mod validation;

pub use error::{FieldValidationError, HuskError, HuskResult};
pub use field::{FieldFormat, FieldValue};
pub use query::{ListQuery, PaginatedResponse, PaginationMeta};
pub use record::Record;
pub use service::DataService;
pub use validation::{EntityValidationConfig, Validated, ValidatableEntity};
