use serde::Serialize;
use std::collections::BTreeMap;

use crate::auth::Principal;
use crate::models::ModelDescriptor;

/// Per-action grants for one principal against one model. Keys serialize sorted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeMap<String, bool>);

impl PermissionSet {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn set(&mut self, action: &str, granted: bool) {
        self.0.insert(action.to_string(), granted);
    }

    #[cfg(test)]
    pub fn with(mut self, action: &str, granted: bool) -> Self {
        self.set(action, granted);
        self
    }

    /// Missing actions read as denied.
    pub fn allows(&self, action: &str) -> bool {
        self.0.get(action).copied().unwrap_or(false)
    }

    pub fn any_granted(&self) -> bool {
        self.0.values().any(|granted| *granted)
    }
}

pub trait AuthorizationOracle {
    fn model_permissions(&self, principal: &Principal, model: &ModelDescriptor) -> PermissionSet;
}

/// Codename-backed permission checks; `view` is implied by `change`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SitePermissions;

impl AuthorizationOracle for SitePermissions {
    fn model_permissions(&self, principal: &Principal, model: &ModelDescriptor) -> PermissionSet {
        let mut perms = PermissionSet::new();
        for action in &model.actions {
            let mut granted = principal.has_perm(&model.codename(action));
            if action == "view" && !granted {
                granted = principal.has_perm(&model.codename("change"));
            }
            perms.set(action, granted);
        }
        perms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn principal(perms: &[&str]) -> Principal {
        Principal {
            username: "u".into(),
            is_active: true,
            is_staff: true,
            is_superuser: false,
            permissions: perms.iter().map(|p| p.to_string()).collect::<BTreeSet<_>>(),
        }
    }

    #[test]
    fn change_implies_view() {
        let model = ModelDescriptor::new("blog", "post", "posts");
        let perms = SitePermissions.model_permissions(&principal(&["blog.change_post"]), &model);
        assert!(perms.allows("change"));
        assert!(perms.allows("view"));
        assert!(!perms.allows("add"));
        assert!(!perms.allows("delete"));
    }

    #[test]
    fn vocabulary_comes_from_the_model() {
        let model = ModelDescriptor::new("blog", "post", "posts").with_actions(&["add", "change", "delete"]);
        let perms = SitePermissions.model_permissions(&principal(&["blog.add_post"]), &model);
        let json = serde_json::to_string(&perms).unwrap();
        assert_eq!(json, r#"{"add":true,"change":false,"delete":false}"#);
    }

    #[test]
    fn permissions_on_other_models_do_not_leak() {
        let model = ModelDescriptor::new("blog", "post", "posts");
        let perms = SitePermissions.model_permissions(&principal(&["blog.add_comment"]), &model);
        assert!(!perms.any_granted());
    }

    #[test]
    fn missing_action_reads_as_denied() {
        let perms = PermissionSet::new().with("view", true);
        assert!(perms.allows("view"));
        assert!(!perms.allows("change"));
        assert!(perms.any_granted());
    }
}
