pub mod health;
pub mod models;

use axum::body::Body;
use axum::error_handling::HandleErrorLayer;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use std::time::Duration;
use tower::buffer::BufferLayer;
use tower::limit::RateLimitLayer;
use tower::ServiceBuilder;

use crate::state::AppState;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

pub fn router(state: AppState) -> Router {
    let per_minute = state.config.rate_limit_per_minute;
    let base = Router::new()
        .route("/health", get(health::health))
        .with_state(state.clone());
    let catalog = Router::new()
        .route("/models", get(models::get_models))
        .route("/models/", get(models::get_models))
        .route("/models/:app_label", get(models::get_app_models))
        .route("/models/:app_label/", get(models::get_app_models))
        .with_state(state);

    if per_minute == 0 {
        return base.merge(catalog);
    }

    // One buffered limiter in front of the whole catalog router, so every
    // catalog path draws on the same budget. Unrouted paths land here too.
    let limited = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(|_: tower::BoxError| async {
            StatusCode::TOO_MANY_REQUESTS
        }))
        .layer(BufferLayer::<Request<Body>>::new(64))
        .layer(RateLimitLayer::new(per_minute, Duration::from_secs(60)))
        .service(catalog);

    base.fallback_service(limited)
}
