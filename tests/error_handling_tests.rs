//! Tests for the typed error hierarchy
//!
//! Covers the HTTP status and error code of every category, the JSON body
//! shape, and conversion from the error types handlers meet in practice.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use husk::core::error::{
    ConfigError, EntityError, ErrorResponse, RequestError, StorageError, ValidationError,
};
use husk::prelude::*;

// =============================================================================
// Status codes
// =============================================================================

mod status_code_tests {
    use super::*;

    #[test]
    fn test_entity_not_found_returns_404() {
        let err = HuskError::not_found("order", "42");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_entity_already_exists_returns_409() {
        let err: HuskError = EntityError::AlreadyExists {
            entity_type: "employee".into(),
            key: "E001".into(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_validation_and_request_errors_return_400() {
        let validation: HuskError =
            vec![FieldValidationError::new("email", "Email is invalid")].into();
        let transition: HuskError = ValidationError::StatusTransition {
            from: "Delivered".into(),
            to: "Pending".into(),
        }
        .into();
        let query: HuskError = RequestError::InvalidQuery {
            param: "start".into(),
            message: "not a date".into(),
        }
        .into();

        for err in [validation, transition, query] {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_storage_and_config_errors_return_500() {
        let storage: HuskError = StorageError::LockPoisoned {
            message: "writer panicked".into(),
        }
        .into();
        let config: HuskError = ConfigError::FileNotFound {
            path: "husk.yaml".into(),
        }
        .into();
        assert_eq!(storage.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(config.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

// =============================================================================
// Response body
// =============================================================================

mod error_response_tests {
    use super::*;

    #[test]
    fn test_not_found_details() {
        let response = HuskError::not_found("order", "42").to_response();
        assert_eq!(response.code, "ENTITY_NOT_FOUND");
        assert_eq!(response.message, "order with id '42' not found");
        let details = response.details.unwrap();
        assert_eq!(details["entity_type"], "order");
        assert_eq!(details["id"], "42");
    }

    #[test]
    fn test_validation_errors_list_every_field() {
        let err: HuskError = vec![
            FieldValidationError::new("phoneNumber", "Phone Number must be 10 digits"),
            FieldValidationError::new("email", "Email is invalid"),
        ]
        .into();
        let body = serde_json::to_value(err.to_response()).unwrap();

        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["details"]["fields"][0]["field"], "phoneNumber");
        assert_eq!(body["details"]["fields"][1]["message"], "Email is invalid");
    }

    #[test]
    fn test_details_are_omitted_when_absent() {
        let err: HuskError = StorageError::LockPoisoned {
            message: "writer panicked".into(),
        }
        .into();
        let body = serde_json::to_value(err.to_response()).unwrap();
        assert!(body.get("details").is_none());
        assert_eq!(body["code"], "STORAGE_ERROR");
    }

    #[test]
    fn test_response_round_trips_for_clients() {
        let original = HuskError::not_found("employee", "x").to_response();
        let text = serde_json::to_string(&original).unwrap();
        let parsed: ErrorResponse = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.code, "ENTITY_NOT_FOUND");
    }
}

// =============================================================================
// Conversions
// =============================================================================

mod error_conversion_tests {
    use super::*;

    #[test]
    fn test_serde_json_error_becomes_invalid_json() {
        let json_err = serde_json::from_str::<Order>("{oops").unwrap_err();
        let err: HuskError = json_err.into();
        assert_eq!(err.error_code(), "INVALID_JSON");
    }

    #[test]
    fn test_anyhow_keeps_the_typed_error() {
        let wrapped = anyhow::Error::new(HuskError::not_found("order", "7"));
        let err: HuskError = wrapped.into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_plain_anyhow_is_internal() {
        let err: HuskError = anyhow::anyhow!("disk on fire").into();
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_can_match_specific_errors() {
        let err = HuskError::not_found("order", "9");
        match err {
            HuskError::Entity(EntityError::NotFound { id, .. }) => assert_eq!(id, "9"),
            other => panic!("unexpected {:?}", other),
        }
    }
}

// =============================================================================
// IntoResponse
// =============================================================================

mod into_response_tests {
    use super::*;

    #[test]
    fn test_into_response_status() {
        let response = HuskError::not_found("order", "1").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = HuskError::from(ValidationError::InvalidJson {
            message: "EOF".into(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

// =============================================================================
// Store errors through the service trait
// =============================================================================

mod data_service_error_tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_update_missing_record_is_typed_not_found() {
        let service: Arc<dyn DataService<Order>> = Arc::new(InMemoryDataService::new());
        let err = service
            .update("missing", Order::default())
            .await
            .unwrap_err();
        let err: HuskError = err.into();
        assert_eq!(err.error_code(), "ENTITY_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_delete_missing_record_is_typed_not_found() {
        let service = InMemoryDataService::<Employee>::new();
        let err: HuskError = service.delete("missing").await.unwrap_err().into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
