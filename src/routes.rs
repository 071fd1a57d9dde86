use std::collections::HashMap;
use thiserror::Error;

pub const APP_INDEX: &str = "app_index";
pub const MODEL_CHANGELIST: &str = "model_changelist";
pub const MODEL_ADD: &str = "model_add";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("no route named '{0}'")]
    UnknownRoute(String),
    #[error("route '{name}' takes {expected} arguments, got {got}")]
    ArgumentCount {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("argument '{0}' is not a valid path segment")]
    InvalidArgument(String),
}

pub trait RouteResolver {
    fn resolve(&self, name: &str, args: &[&str]) -> Result<String, ResolutionError>;
}

/// Named URL patterns; each `{}` is filled by the next positional argument.
#[derive(Clone, Debug)]
pub struct RouteTable {
    patterns: HashMap<String, String>,
}

impl Default for RouteTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.insert(APP_INDEX, "/admin/{}/");
        table.insert(MODEL_CHANGELIST, "/admin/{}/{}/");
        table.insert(MODEL_ADD, "/admin/{}/{}/add/");
        table
    }
}

impl RouteTable {
    pub fn empty() -> Self {
        Self {
            patterns: HashMap::new(),
        }
    }

    /// Adds or replaces a pattern. An empty pattern removes the route.
    pub fn insert(&mut self, name: &str, pattern: &str) {
        if pattern.is_empty() {
            self.patterns.remove(name);
        } else {
            self.patterns.insert(name.to_string(), pattern.to_string());
        }
    }
}

impl RouteResolver for RouteTable {
    fn resolve(&self, name: &str, args: &[&str]) -> Result<String, ResolutionError> {
        let pattern = self
            .patterns
            .get(name)
            .ok_or_else(|| ResolutionError::UnknownRoute(name.to_string()))?;

        let pieces: Vec<&str> = pattern.split("{}").collect();
        let expected = pieces.len() - 1;
        if expected != args.len() {
            return Err(ResolutionError::ArgumentCount {
                name: name.to_string(),
                expected,
                got: args.len(),
            });
        }

        let mut url = String::with_capacity(pattern.len() + args.iter().map(|a| a.len()).sum::<usize>());
        url.push_str(pieces[0]);
        for (arg, rest) in args.iter().zip(&pieces[1..]) {
            if arg.is_empty() || arg.contains('/') {
                return Err(ResolutionError::InvalidArgument(arg.to_string()));
            }
            url.push_str(arg);
            url.push_str(rest);
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_builds_admin_urls() {
        let table = RouteTable::default();
        assert_eq!(table.resolve(MODEL_CHANGELIST, &["blog", "post"]).unwrap(), "/admin/blog/post/");
        assert_eq!(table.resolve(MODEL_ADD, &["blog", "post"]).unwrap(), "/admin/blog/post/add/");
        assert_eq!(table.resolve(APP_INDEX, &["blog"]).unwrap(), "/admin/blog/");
    }

    #[test]
    fn resolution_failures() {
        let mut table = RouteTable::default();
        assert_eq!(
            table.resolve("missing", &[]),
            Err(ResolutionError::UnknownRoute("missing".into()))
        );
        assert!(matches!(
            table.resolve(MODEL_ADD, &["blog"]),
            Err(ResolutionError::ArgumentCount { expected: 2, got: 1, .. })
        ));
        assert_eq!(
            table.resolve(APP_INDEX, &["a/b"]),
            Err(ResolutionError::InvalidArgument("a/b".into()))
        );

        table.insert(MODEL_ADD, "");
        assert!(table.resolve(MODEL_ADD, &["blog", "post"]).is_err());
    }
}
