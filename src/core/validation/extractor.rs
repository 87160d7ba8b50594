//! Axum extractor for validated entity payloads

use super::config::EntityValidationConfig;
use crate::core::error::{HuskError, ValidationError};
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Entities that declare their own validation rules
pub trait ValidatableEntity {
    /// Rules for an operation: `"create"` or `"update"`
    fn validation_config(operation: &str) -> EntityValidationConfig;
}

/// Axum extractor that filters and validates a JSON body.
///
/// ```rust,ignore
/// pub async fn create_order(
///     State(state): State<OrderAppState>,
///     payload: Validated<Order>,
/// ) -> HuskResult<Json<Order>> {
///     let new_order: NewOrder = payload.parse()?;
///     // ...
/// }
/// ```
pub struct Validated<T>(pub Value, std::marker::PhantomData<T>);

impl<T> Validated<T> {
    pub fn new(payload: Value) -> Self {
        Self(payload, std::marker::PhantomData)
    }

    pub fn into_inner(self) -> Value {
        self.0
    }

    /// Deserialize the sanitized payload into a typed input
    pub fn parse<D: DeserializeOwned>(self) -> Result<D, HuskError> {
        Ok(serde_json::from_value(self.0)?)
    }
}

impl<T> std::ops::Deref for Validated<T> {
    type Target = Value;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: ValidatableEntity + Send + Sync,
{
    type Rejection = HuskError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let method = req.method().clone();

        let Json(payload): Json<Value> = Json::from_request(req, state).await.map_err(|e| {
            HuskError::Validation(ValidationError::InvalidJson {
                message: e.body_text(),
            })
        })?;

        let operation = match method.as_str() {
            "PUT" | "PATCH" => "update",
            _ => "create",
        };

        let config = T::validation_config(operation);
        match config.validate_and_filter(payload) {
            Ok(payload) => Ok(Validated::new(payload)),
            Err(errors) => {
                tracing::debug!(
                    entity = %config.entity_type,
                    operation,
                    errors = errors.len(),
                    "payload rejected"
                );
                Err(errors.into())
            }
        }
    }
}
