use axum::http::HeaderMap;
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Header naming the requesting principal. Session auth lives in front of this service.
pub const PRINCIPAL_HEADER: &str = "x-admin-user";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    /// Codenames of the form `<app_label>.<action>_<model_name>`.
    pub permissions: BTreeSet<String>,
}

impl Principal {
    pub fn anonymous() -> Self {
        Self {
            username: String::new(),
            is_active: false,
            is_staff: false,
            is_superuser: false,
            permissions: BTreeSet::new(),
        }
    }

    #[cfg(test)]
    pub fn is_anonymous(&self) -> bool {
        self.username.is_empty()
    }

    pub fn has_perm(&self, codename: &str) -> bool {
        if !self.is_active {
            return false;
        }
        self.is_superuser || self.permissions.contains(codename)
    }

    /// True when the principal holds any permission inside `app_label`.
    pub fn has_module_perms(&self, app_label: &str) -> bool {
        if !self.is_active {
            return false;
        }
        if self.is_superuser {
            return true;
        }
        let prefix = format!("{}.", app_label);
        self.permissions.iter().any(|p| p.starts_with(&prefix))
    }
}

#[derive(Deserialize)]
pub struct PrincipalToml {
    pub username: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default)]
    pub permissions: Vec<String>,
}

fn default_active() -> bool {
    true
}

impl From<PrincipalToml> for Principal {
    fn from(p: PrincipalToml) -> Self {
        Self {
            username: p.username,
            is_active: p.is_active,
            is_staff: p.is_staff,
            is_superuser: p.is_superuser,
            permissions: p.permissions.into_iter().collect(),
        }
    }
}

#[derive(Clone, Default)]
pub struct PrincipalDirectory {
    principals: HashMap<String, Principal>,
}

impl PrincipalDirectory {
    pub fn new() -> Self {
        Self {
            principals: HashMap::new(),
        }
    }

    pub fn insert(&mut self, principal: Principal) {
        self.principals.insert(principal.username.clone(), principal);
    }

    pub fn contains(&self, username: &str) -> bool {
        self.principals.contains_key(username)
    }

    pub fn len(&self) -> usize {
        self.principals.len()
    }

    /// Resolves the request's principal; unknown or missing users are anonymous.
    pub fn principal_for(&self, headers: &HeaderMap) -> Principal {
        let username = headers
            .get(PRINCIPAL_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .unwrap_or("");
        if username.is_empty() {
            return Principal::anonymous();
        }
        match self.principals.get(username) {
            Some(p) => p.clone(),
            None => {
                debug!("[adminapi] Unknown principal '{}', treating as anonymous", username);
                Principal::anonymous()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn editor() -> Principal {
        Principal {
            username: "editor".into(),
            is_active: true,
            is_staff: true,
            is_superuser: false,
            permissions: ["blog.change_post".to_string()].into_iter().collect(),
        }
    }

    #[test]
    fn module_perms_follow_codename_prefix() {
        let p = editor();
        assert!(p.has_module_perms("blog"));
        assert!(!p.has_module_perms("blo"));
        assert!(!p.has_module_perms("shop"));
    }

    #[test]
    fn inactive_superuser_has_nothing() {
        let p = Principal {
            username: "root".into(),
            is_active: false,
            is_staff: true,
            is_superuser: true,
            permissions: BTreeSet::new(),
        };
        assert!(!p.has_perm("blog.add_post"));
        assert!(!p.has_module_perms("blog"));
    }

    #[test]
    fn active_superuser_has_everything() {
        let p = Principal {
            username: "root".into(),
            is_active: true,
            is_staff: false,
            is_superuser: true,
            permissions: BTreeSet::new(),
        };
        assert!(p.has_perm("shop.delete_order"));
        assert!(p.has_module_perms("anything"));
    }

    #[test]
    fn directory_resolves_header_or_falls_back_to_anonymous() {
        let mut dir = PrincipalDirectory::new();
        dir.insert(editor());

        let mut headers = HeaderMap::new();
        assert!(dir.principal_for(&headers).is_anonymous());

        headers.insert(PRINCIPAL_HEADER, HeaderValue::from_static("editor"));
        assert_eq!(dir.principal_for(&headers), editor());

        headers.insert(PRINCIPAL_HEADER, HeaderValue::from_static("mallory"));
        assert!(dir.principal_for(&headers).is_anonymous());
    }
}
