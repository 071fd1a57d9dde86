use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use tracing::debug;

use super::ErrorResponse;
use crate::catalog::{build_catalog, CatalogError, CatalogResponse};
use crate::state::AppState;

type CatalogResult = Result<Json<CatalogResponse>, (StatusCode, Json<ErrorResponse>)>;

/// `GET /models/`
pub async fn get_models(State(state): State<AppState>, headers: HeaderMap) -> CatalogResult {
    catalog_for(&state, &headers, None)
}

/// `GET /models/:app_label/`
pub async fn get_app_models(
    State(state): State<AppState>,
    Path(app_label): Path<String>,
    headers: HeaderMap,
) -> CatalogResult {
    catalog_for(&state, &headers, Some(&app_label))
}

fn catalog_for(state: &AppState, headers: &HeaderMap, app_label: Option<&str>) -> CatalogResult {
    let principal = state.principals.principal_for(headers);

    build_catalog(
        &principal,
        app_label,
        &state.registry,
        &state.oracle,
        state.routes.as_ref(),
        state.config.catalog_scope,
    )
    .map(Json)
    .map_err(|e| {
        debug!(
            "[adminapi] Catalog for '{}' (app {:?}): {}",
            principal.username, app_label, e
        );
        match e {
            CatalogError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: e.to_string(),
                    hint: Some(not_found_hint(app_label)),
                }),
            ),
        }
    })
}

fn not_found_hint(app_label: Option<&str>) -> String {
    match app_label {
        Some(label) => format!("No models in app '{}' are administrable by this user", label),
        None => "Listing all apps requires staff or superuser status and at least one model permission"
            .to_string(),
    }
}
