use crate::auth::PrincipalDirectory;
use crate::config::Config;
use crate::models::ModelRegistry;
use crate::permissions::SitePermissions;
use crate::routes::RouteTable;
use crate::site::Site;

use std::sync::Arc;

/// Read-only after startup, so no locking.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub registry: Arc<ModelRegistry>,
    pub principals: Arc<PrincipalDirectory>,
    pub routes: Arc<RouteTable>,
    pub oracle: SitePermissions,
}

impl AppState {
    pub fn new(config: Config, site: Site) -> Self {
        Self {
            config,
            registry: Arc::new(site.registry),
            principals: Arc::new(site.principals),
            routes: Arc::new(site.routes),
            oracle: SitePermissions,
        }
    }
}
