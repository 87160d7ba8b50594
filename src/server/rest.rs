//! REST exposure: assembles health, entity and custom routes into one router

use super::entity_registry::EntityRegistry;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router.
    ///
    /// Health checks always sit at the root; entity and custom routes are
    /// nested under `base_path` when it is not empty.
    pub fn build_router(
        registry: &EntityRegistry,
        custom_routes: Vec<Router>,
        base_path: &str,
        cors: bool,
    ) -> Router {
        let entities: Vec<String> = registry.plurals().into_iter().map(String::from).collect();

        let api = custom_routes
            .into_iter()
            .fold(registry.build_routes(), |app, custom| app.merge(custom));

        let app = if base_path.is_empty() {
            Self::health_routes(entities).merge(api)
        } else {
            Self::health_routes(entities).nest(base_path, api)
        };

        let app = app.layer(TraceLayer::new_for_http());
        if cors {
            app.layer(CorsLayer::permissive())
        } else {
            app
        }
    }

    fn health_routes(entities: Vec<String>) -> Router {
        let health = get(move || Self::health_check(entities.clone()));
        Router::new()
            .route("/health", health.clone())
            .route("/healthz", health)
    }

    async fn health_check(entities: Vec<String>) -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "husk",
            "entities": entities
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn get_status(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_health_routes_at_root() {
        let app = RestExposure::build_router(&EntityRegistry::new(), Vec::new(), "", false);
        let (status, body) = get_status(app.clone(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "husk");

        let (status, _) = get_status(app, "/healthz").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_custom_routes_follow_base_path() {
        let custom = Router::new().route("/ping", get(|| async { "pong" }));
        let app = RestExposure::build_router(&EntityRegistry::new(), vec![custom], "/api", true);

        let (status, body) = get_status(app.clone(), "/api/ping").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"pong");

        let (status, _) = get_status(app.clone(), "/ping").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = get_status(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
    }
}
