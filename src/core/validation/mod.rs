//! Validation and filtering system
//!
//! Declarative field rules that sanitize and check entity data before it
//! reaches a handler or, on the client side, before it is submitted.

pub mod config;
pub mod extractor;
pub mod filters;
pub mod validators;

pub use config::EntityValidationConfig;
pub use extractor::{Validated, ValidatableEntity};
