use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::auth::{Principal, PrincipalDirectory, PrincipalToml};
use crate::models::{ModelDescriptor, ModelRegistry, ModelToml};
use crate::routes::RouteTable;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("failed to read site config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid site config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("model {0} is registered twice")]
    DuplicateModel(String),
    #[error("principal '{0}' is declared twice")]
    DuplicatePrincipal(String),
    #[error("invalid identifier '{0}': must be non-empty and contain no '.' or '/'")]
    InvalidIdentifier(String),
}

#[derive(Deserialize)]
struct SiteToml {
    #[serde(default)]
    models: Vec<ModelToml>,
    #[serde(default)]
    principals: Vec<PrincipalToml>,
    #[serde(default)]
    routes: HashMap<String, String>,
}

/// Everything loaded from the site file: registry, principals and routes.
pub struct Site {
    pub registry: ModelRegistry,
    pub principals: PrincipalDirectory,
    pub routes: RouteTable,
}

impl Site {
    pub fn load(path: &Path) -> Result<Self, SiteError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SiteError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let site = Self::parse(&contents)?;
        info!(
            "[adminapi] Loaded site config {:?}: {} models, {} principals",
            path,
            site.registry.len(),
            site.principals.len()
        );
        Ok(site)
    }

    pub fn parse(contents: &str) -> Result<Self, SiteError> {
        let site_toml: SiteToml = toml::from_str(contents)?;

        let mut registry = ModelRegistry::new();
        for model in site_toml.models {
            let descriptor = ModelDescriptor::from(model);
            check_identifier(&descriptor.app_label)?;
            check_identifier(&descriptor.model_name)?;
            if registry.contains(&descriptor.app_label, &descriptor.model_name) {
                return Err(SiteError::DuplicateModel(descriptor.key()));
            }
            registry.register(descriptor);
        }

        let mut principals = PrincipalDirectory::new();
        for principal in site_toml.principals {
            let principal = Principal::from(principal);
            if principal.username.is_empty() {
                return Err(SiteError::InvalidIdentifier(principal.username));
            }
            if principals.contains(&principal.username) {
                return Err(SiteError::DuplicatePrincipal(principal.username));
            }
            principals.insert(principal);
        }

        let mut routes = RouteTable::default();
        for (name, pattern) in &site_toml.routes {
            routes.insert(name, pattern);
        }

        Ok(Self {
            registry,
            principals,
            routes,
        })
    }
}

fn check_identifier(id: &str) -> Result<(), SiteError> {
    if id.is_empty() || id.contains('.') || id.contains('/') {
        return Err(SiteError::InvalidIdentifier(id.to_string()));
    }
    Ok(())
}
