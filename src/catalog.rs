//! Aggregates the model registry into the per-principal admin catalog.
//!
//! The catalog is a pure function of the registry, the requesting principal,
//! the authorization oracle and the route resolver. Nothing is cached between
//! calls.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::auth::Principal;
use crate::models::{ModelDescriptor, ModelRegistry};
use crate::permissions::{AuthorizationOracle, PermissionSet};
use crate::routes::{RouteResolver, APP_INDEX, MODEL_ADD, MODEL_CHANGELIST};

/// How an unfiltered request is grouped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogScope {
    /// Narrow to the app of the first registered model. Compatible behavior.
    FirstApp,
    /// One group per app label.
    PerApp,
}

impl CatalogScope {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "first_app" => Some(CatalogScope::FirstApp),
            "per_app" => Some(CatalogScope::PerApp),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogScope::FirstApp => "first_app",
            CatalogScope::PerApp => "per_app",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("The requested admin page does not exist.")]
    NotFound,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ModelEntry {
    pub name: String,
    pub perms: PermissionSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AppGroup {
    pub name: String,
    pub app_url: String,
    pub has_module_perms: bool,
    pub models: Vec<ModelEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CatalogResponse {
    pub title: String,
    pub app_list: Vec<AppGroup>,
}

/// Builds the catalog of models `requester` may administer.
///
/// With `app_label` set, only that app is considered and module access is
/// decided by [`Principal::has_module_perms`]. Without it, module access
/// requires staff or superuser status, and under [`CatalogScope::FirstApp`]
/// the call narrows to the app of the first registered model.
pub fn build_catalog<O, R>(
    requester: &Principal,
    app_label: Option<&str>,
    registry: &ModelRegistry,
    oracle: &O,
    resolver: &R,
    scope: CatalogScope,
) -> Result<CatalogResponse, CatalogError>
where
    O: AuthorizationOracle + ?Sized,
    R: RouteResolver + ?Sized,
{
    let has_module_perms = match app_label {
        None => requester.is_staff || requester.is_superuser,
        Some(label) => requester.has_module_perms(label),
    };

    let narrow = app_label.is_some() || scope == CatalogScope::FirstApp;
    let mut active_label: Option<&str> = app_label;
    let mut groups: Vec<(String, AppGroup)> = Vec::new();

    for model in registry.list() {
        if narrow {
            match active_label {
                Some(label) if label != model.app_label => continue,
                Some(_) => {}
                None => active_label = Some(model.app_label.as_str()),
            }
        }

        if !has_module_perms {
            continue;
        }

        let perms = oracle.model_permissions(requester, model);
        if !perms.any_granted() {
            debug!("[adminapi] No permissions on {} for '{}'", model.key(), requester.username);
            continue;
        }

        let entry = model_entry(model, perms, resolver);
        match groups.iter_mut().find(|(label, _)| *label == model.app_label) {
            Some((_, group)) => group.models.push(entry),
            None => {
                let group = AppGroup {
                    name: title_case(&model.app_label),
                    app_url: resolver
                        .resolve(APP_INDEX, &[model.app_label.as_str()])
                        .unwrap_or_default(),
                    has_module_perms,
                    models: vec![entry],
                };
                groups.push((model.app_label.clone(), group));
            }
        }
    }

    if groups.is_empty() {
        return Err(CatalogError::NotFound);
    }

    let title = if narrow {
        format!("{} administration", title_case(&groups[0].0))
    } else {
        "Site administration".to_string()
    };

    let mut app_list: Vec<AppGroup> = groups
        .into_iter()
        .map(|(_, mut group)| {
            group.models.sort_by(|a, b| a.name.cmp(&b.name));
            group
        })
        .collect();
    app_list.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(CatalogResponse { title, app_list })
}

fn model_entry<R>(model: &ModelDescriptor, perms: PermissionSet, resolver: &R) -> ModelEntry
where
    R: RouteResolver + ?Sized,
{
    let args = [model.app_label.as_str(), model.model_name.as_str()];
    let admin_url = if perms.allows("change") {
        resolve_optional(resolver, MODEL_CHANGELIST, &args)
    } else {
        None
    };
    let add_url = if perms.allows("add") {
        resolve_optional(resolver, MODEL_ADD, &args)
    } else {
        None
    };

    ModelEntry {
        name: title_case(&model.verbose_name_plural),
        perms,
        admin_url,
        add_url,
    }
}

fn resolve_optional<R>(resolver: &R, name: &str, args: &[&str]) -> Option<String>
where
    R: RouteResolver + ?Sized,
{
    match resolver.resolve(name, args) {
        Ok(url) => Some(url),
        Err(e) => {
            debug!("[adminapi] Omitting link: {}", e);
            None
        }
    }
}

/// Uppercases the first letter of every alphabetic run and lowercases the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
