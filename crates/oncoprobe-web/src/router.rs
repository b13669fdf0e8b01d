//! Axum router — maps URL paths to handlers and applies middleware.

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::handlers::{detect::detect_protein, health::health, metrics::model_metrics};
use crate::state::SharedState;

/// Build and return the full Axum router.
pub fn build_router(state: SharedState, cors_origin: &str) -> Router {
    Router::new()
        .route("/api/detect-protein", post(detect_protein))
        .route("/api/model-metrics", get(model_metrics))
        .route("/health", get(health))
        .layer(cors_layer(cors_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS policy: "*" is permissive, anything else pins the browser origin
/// (mirrors the FLASK_CORS_ORIGIN behaviour the client was built against).
fn cors_layer(origin: &str) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];
    if origin == "*" {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any);
    }
    match origin.parse::<HeaderValue>() {
        Ok(value) => CorsLayer::new()
            .allow_origin(value)
            .allow_methods(methods)
            .allow_headers([header::CONTENT_TYPE]),
        Err(_) => {
            warn!(origin, "invalid CORS origin, falling back to permissive");
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(methods)
                .allow_headers(Any)
        }
    }
}
