pub mod health;
pub mod model_states;

use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::Router;
use serde::Serialize;
use std::time::Duration;
use tower::buffer::BufferLayer;
use tower::limit::RateLimitLayer;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::state::AppState;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// Routes exposing the store to the UI layer.
pub fn router(state: AppState) -> Router {
    let cors = match state.config.cors_origins.as_deref() {
        Some(origins) => {
            let origins: Vec<_> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        }
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    let refresh_rate_limit = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(|_: tower::BoxError| async {
            StatusCode::TOO_MANY_REQUESTS
        }))
        .layer(BufferLayer::new(16))
        .layer(RateLimitLayer::new(30, Duration::from_secs(60)));

    Router::new()
        .route("/health", get(health::health))
        .route("/model-states", get(model_states::list_model_states))
        .route(
            "/model-states/refresh",
            post(model_states::refresh).layer(refresh_rate_limit),
        )
        .route("/model-states/:id", put(model_states::update_model_state))
        .layer(cors)
        .with_state(state)
}
