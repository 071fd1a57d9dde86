use std::path::PathBuf;
use tracing::{error, warn};

use crate::catalog::CatalogScope;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub site_config: PathBuf,
    pub cors_origins: Option<String>,
    pub catalog_scope: CatalogScope,
    /// Requests per minute allowed on the catalog routes. Zero disables limiting.
    pub rate_limit_per_minute: u64,
}

impl Config {
    pub fn from_env() -> Self {
        let port: u16 = match std::env::var("PORT") {
            Ok(p) => p.parse().unwrap_or_else(|_| {
                warn!("[adminapi] Invalid PORT value, defaulting to 3000");
                3000
            }),
            Err(_) => 3000,
        };

        let site_config = PathBuf::from(
            std::env::var("SITE_CONFIG").unwrap_or_else(|_| "./site.toml".to_string()),
        );

        if !site_config.exists() {
            error!("[adminapi] Site config not found: {:?}", site_config);
            std::process::exit(1);
        }

        let cors_origins = std::env::var("CORS_ORIGINS").ok();

        let catalog_scope = match std::env::var("CATALOG_SCOPE") {
            Ok(s) => CatalogScope::parse(&s).unwrap_or_else(|| {
                warn!(
                    "[adminapi] Unknown CATALOG_SCOPE '{}', defaulting to first_app",
                    s
                );
                CatalogScope::FirstApp
            }),
            Err(_) => CatalogScope::FirstApp,
        };

        let rate_limit_per_minute: u64 = match std::env::var("RATE_LIMIT_PER_MINUTE") {
            Ok(v) => v.parse().unwrap_or_else(|_| {
                warn!("[adminapi] Invalid RATE_LIMIT_PER_MINUTE value, defaulting to 120");
                120
            }),
            Err(_) => 120,
        };

        Self {
            port,
            site_config,
            cors_origins,
            catalog_scope,
            rate_limit_per_minute,
        }
    }
}
