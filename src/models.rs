use serde::Deserialize;
use std::collections::HashMap;

/// Actions every model admin exposes unless its site entry narrows them.
pub const DEFAULT_ACTIONS: [&str; 4] = ["add", "change", "delete", "view"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub app_label: String,
    pub model_name: String,
    pub verbose_name_plural: String,
    /// Permission vocabulary the model's admin reports on.
    pub actions: Vec<String>,
}

impl ModelDescriptor {
    pub fn new(app_label: &str, model_name: &str, verbose_name_plural: &str) -> Self {
        Self {
            app_label: app_label.to_string(),
            model_name: model_name.to_string(),
            verbose_name_plural: verbose_name_plural.to_string(),
            actions: DEFAULT_ACTIONS.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[cfg(test)]
    pub fn with_actions(mut self, actions: &[&str]) -> Self {
        self.actions = actions.iter().map(|a| a.to_string()).collect();
        self
    }

    /// Registry key, `"<app_label>.<model_name>"`.
    pub fn key(&self) -> String {
        format!("{}.{}", self.app_label, self.model_name)
    }

    /// Permission codename for `action` on this model, e.g. `blog.change_post`.
    pub fn codename(&self, action: &str) -> String {
        format!("{}.{}_{}", self.app_label, action, self.model_name)
    }
}

#[derive(Deserialize)]
pub struct ModelToml {
    pub app_label: String,
    pub model_name: String,
    #[serde(default)]
    pub verbose_name_plural: Option<String>,
    #[serde(default)]
    pub actions: Option<Vec<String>>,
}

impl From<ModelToml> for ModelDescriptor {
    fn from(toml_model: ModelToml) -> Self {
        let verbose_name_plural = toml_model
            .verbose_name_plural
            .unwrap_or_else(|| format!("{}s", toml_model.model_name));
        let actions = toml_model
            .actions
            .unwrap_or_else(|| DEFAULT_ACTIONS.iter().map(|a| a.to_string()).collect());
        Self {
            app_label: toml_model.app_label,
            model_name: toml_model.model_name,
            verbose_name_plural,
            actions,
        }
    }
}

/// Registered models, iterated in registration order.
#[derive(Clone, Default)]
pub struct ModelRegistry {
    models: HashMap<String, ModelDescriptor>,
    order: Vec<String>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self {
            models: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn register(&mut self, model: ModelDescriptor) {
        let key = model.key();
        if !self.order.contains(&key) {
            self.order.push(key.clone());
        }
        self.models.insert(key, model);
    }

    pub fn contains(&self, app_label: &str, model_name: &str) -> bool {
        self.models
            .contains_key(&format!("{}.{}", app_label, model_name))
    }

    pub fn list(&self) -> Vec<&ModelDescriptor> {
        self.order
            .iter()
            .filter_map(|key| self.models.get(key))
            .collect()
    }

    /// Distinct app labels in first-registration order.
    pub fn app_labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for model in self.list() {
            if !labels.contains(&model.app_label.as_str()) {
                labels.push(model.app_label.as_str());
            }
        }
        labels
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
