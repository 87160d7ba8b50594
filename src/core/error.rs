//! Typed error handling for husk
//!
//! Handlers return [`HuskError`] so every failure maps to a precise HTTP
//! status and a stable error code instead of a generic `anyhow::Error`.
//!
//! # Error Categories
//!
//! - [`EntityError`]: lookups and uniqueness (404, 409)
//! - [`ValidationError`]: rejected input (400)
//! - [`ConfigError`]: configuration parsing and validation
//! - [`StorageError`]: store failures
//! - [`RequestError`]: malformed requests
//!
//! # Example
//!
//! ```rust,ignore
//! use husk::prelude::*;
//!
//! let order = service.get(&id).await?.ok_or_else(|| {
//!     HuskError::Entity(EntityError::NotFound {
//!         entity_type: "order".to_string(),
//!         id: id.clone(),
//!     })
//! })?;
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The main error type for husk
#[derive(Debug)]
pub enum HuskError {
    /// Entity-related errors (CRUD operations)
    Entity(EntityError),

    /// Validation errors
    Validation(ValidationError),

    /// Configuration errors
    Config(ConfigError),

    /// Storage errors
    Storage(StorageError),

    /// HTTP/Request errors
    Request(RequestError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for HuskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HuskError::Entity(e) => write!(f, "{}", e),
            HuskError::Validation(e) => write!(f, "{}", e),
            HuskError::Config(e) => write!(f, "{}", e),
            HuskError::Storage(e) => write!(f, "{}", e),
            HuskError::Request(e) => write!(f, "{}", e),
            HuskError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for HuskError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HuskError::Entity(e) => Some(e),
            HuskError::Validation(e) => Some(e),
            HuskError::Config(e) => Some(e),
            HuskError::Storage(e) => Some(e),
            HuskError::Request(e) => Some(e),
            HuskError::Internal(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl HuskError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            HuskError::Entity(e) => e.status_code(),
            HuskError::Validation(_) => StatusCode::BAD_REQUEST,
            HuskError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            HuskError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            HuskError::Request(_) => StatusCode::BAD_REQUEST,
            HuskError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            HuskError::Entity(e) => e.error_code(),
            HuskError::Validation(e) => e.error_code(),
            HuskError::Config(_) => "CONFIG_ERROR",
            HuskError::Storage(_) => "STORAGE_ERROR",
            HuskError::Request(e) => e.error_code(),
            HuskError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    /// Shorthand for a missing record
    pub fn not_found(entity_type: &str, id: &str) -> Self {
        HuskError::Entity(EntityError::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        })
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            HuskError::Entity(EntityError::NotFound { entity_type, id }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "id": id
                }))
            }
            HuskError::Entity(EntityError::AlreadyExists { entity_type, key }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "key": key
                }))
            }
            HuskError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for HuskError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity operations
#[derive(Debug)]
pub enum EntityError {
    /// Entity was not found
    NotFound { entity_type: String, id: String },

    /// A record with the same business key already exists
    AlreadyExists { entity_type: String, key: String },
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::NotFound { entity_type, id } => {
                write!(f, "{} with id '{}' not found", entity_type, id)
            }
            EntityError::AlreadyExists { entity_type, key } => {
                write!(f, "{} '{}' already exists", entity_type, key)
            }
        }
    }
}

impl std::error::Error for EntityError {}

impl EntityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::AlreadyExists { .. } => StatusCode::CONFLICT,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::AlreadyExists { .. } => "ENTITY_ALREADY_EXISTS",
        }
    }
}

impl From<EntityError> for HuskError {
    fn from(err: EntityError) -> Self {
        HuskError::Entity(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Rejected input
#[derive(Debug)]
pub enum ValidationError {
    /// Every field that failed its rules, in form order
    FieldErrors(Vec<FieldValidationError>),

    /// Body is not JSON, or not the expected shape
    InvalidJson { message: String },

    /// Status change refused by the configured workflow
    StatusTransition { from: String, to: String },
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl FieldValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::FieldErrors(errors) => match errors.as_slice() {
                [only] => write!(f, "{} is invalid: {}", only.field, only.message),
                _ => {
                    let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                    write!(f, "Invalid fields: {}", fields.join(", "))
                }
            },
            ValidationError::InvalidJson { message } => {
                write!(f, "Request body is not valid JSON: {}", message)
            }
            ValidationError::StatusTransition { from, to } => {
                write!(f, "Cannot change status from '{}' to '{}'", from, to)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::StatusTransition { .. } => "INVALID_STATUS_TRANSITION",
            ValidationError::InvalidJson { .. } => "INVALID_JSON",
            _ => "VALIDATION_ERROR",
        }
    }
}

impl From<ValidationError> for HuskError {
    fn from(err: ValidationError) -> Self {
        HuskError::Validation(err)
    }
}

impl From<Vec<FieldValidationError>> for HuskError {
    fn from(errors: Vec<FieldValidationError>) -> Self {
        HuskError::Validation(ValidationError::FieldErrors(errors))
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse configuration file
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// Configuration file not found
    FileNotFound { path: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::InvalidValue {
                field,
                value,
                message,
            } => {
                write!(
                    f,
                    "Invalid value '{}' for field '{}': {}",
                    value, field, message
                )
            }
            ConfigError::FileNotFound { path } => {
                write!(f, "Configuration file not found: {}", path)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for HuskError {
    fn from(err: ConfigError) -> Self {
        HuskError::Config(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to the record store
#[derive(Debug)]
pub enum StorageError {
    /// A lock guarding the store was poisoned
    LockPoisoned { message: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::LockPoisoned { message } => {
                write!(f, "Store lock poisoned: {}", message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for HuskError {
    fn from(err: StorageError) -> Self {
        HuskError::Storage(err)
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug)]
pub enum RequestError {
    /// Invalid request body
    InvalidBody { message: String },

    /// Query string parameter could not be interpreted
    InvalidQuery { param: String, message: String },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::InvalidBody { message } => {
                write!(f, "Invalid request body: {}", message)
            }
            RequestError::InvalidQuery { param, message } => {
                write!(f, "Invalid query parameter '{}': {}", param, message)
            }
        }
    }
}

impl std::error::Error for RequestError {}

impl RequestError {
    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidBody { .. } => "INVALID_BODY",
            RequestError::InvalidQuery { .. } => "INVALID_QUERY",
        }
    }
}

impl From<RequestError> for HuskError {
    fn from(err: RequestError) -> Self {
        HuskError::Request(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for HuskError {
    fn from(err: serde_json::Error) -> Self {
        HuskError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for HuskError {
    fn from(err: serde_yaml::Error) -> Self {
        HuskError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

/// Services speak `anyhow`; typed errors raised inside them survive the trip
impl From<anyhow::Error> for HuskError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<HuskError>() {
            Ok(husk_err) => husk_err,
            Err(err) => HuskError::Internal(err.to_string()),
        }
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for husk operations
pub type HuskResult<T> = Result<T, HuskError>;

// =============================================================================
// Tests
// =============================================================================
