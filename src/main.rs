mod auth;
mod catalog;
mod config;
mod handlers;
mod models;
mod permissions;
mod routes;
mod site;
mod state;

use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::info;

use crate::config::Config;
use crate::site::Site;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    info!("[adminapi] Starting adminapi server");
    info!("[adminapi] Site config: {:?}", config.site_config);
    info!("[adminapi] Catalog scope: {}", config.catalog_scope.as_str());

    let site = Site::load(&config.site_config)?;
    if site.registry.is_empty() {
        tracing::warn!("[adminapi] No models registered; every catalog request will 404");
    }

    let state = AppState::new(config.clone(), site);

    let cors = if let Some(ref origins) = config.cors_origins {
        let origins: Vec<_> = origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let app = handlers::router(state).layer(cors);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("[adminapi] Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
