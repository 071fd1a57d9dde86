use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub apps_total: usize,
    pub models_total: usize,
    pub principals_total: usize,
    pub catalog_scope: String,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: format!("adminapi-v{}", env!("CARGO_PKG_VERSION")),
        apps_total: state.registry.app_labels().len(),
        models_total: state.registry.len(),
        principals_total: state.principals.len(),
        catalog_scope: state.config.catalog_scope.as_str().to_string(),
    })
}
