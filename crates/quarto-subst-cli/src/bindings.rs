/*
 * bindings.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Variable bindings gathered from the command line.

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use std::collections::HashMap;
use std::path::Path;

/// What to do with a placeholder that has no binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MissingPolicy {
    /// Fail, naming the first unbound placeholder
    #[default]
    Error,
    /// Substitute empty text
    Empty,
    /// Leave the placeholder in the output as `${name}`
    Keep,
}

/// Name-to-text bindings, with an optional fallback to the process
/// environment.
#[derive(Debug, Default)]
pub struct Bindings {
    values: HashMap<String, String>,
    use_env: bool,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fall back to environment variables for names with no binding.
    pub fn with_env(mut self, use_env: bool) -> Self {
        self.use_env = use_env;
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Add a `KEY=VALUE` definition.
    pub fn define(&mut self, definition: &str) -> Result<()> {
        let Some((key, value)) = definition.split_once('=') else {
            bail!("Invalid definition '{}': expected KEY=VALUE", definition);
        };
        if key.is_empty() {
            bail!("Invalid definition '{}': empty key", definition);
        }
        self.insert(key, value);
        Ok(())
    }

    /// Load a JSON object of bindings.
    ///
    /// Strings are taken as-is; numbers and booleans are written out as JSON
    /// would write them; `null` binds empty text.
    pub fn load_json(&mut self, path: &Path) -> Result<()> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read variables file: {}", path.display()))?;
        self.merge_json(&text)
            .with_context(|| format!("Invalid variables file: {}", path.display()))
    }

    pub fn merge_json(&mut self, text: &str) -> Result<()> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        let serde_json::Value::Object(map) = value else {
            bail!("expected a JSON object at the top level");
        };
        for (key, value) in map {
            let text = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Null => String::new(),
                serde_json::Value::Bool(_) | serde_json::Value::Number(_) => value.to_string(),
                serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                    bail!("value for '{}' must be a string, number, boolean or null", key);
                }
            };
            self.values.insert(key, text);
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned().or_else(|| {
            if self.use_env {
                std::env::var(name).ok()
            } else {
                None
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_define() {
        let mut bindings = Bindings::new();
        bindings.define("name=Ada=Lovelace").unwrap();
        bindings.define("empty=").unwrap();
        assert_eq!(bindings.get("name"), Some("Ada=Lovelace".to_string()));
        assert_eq!(bindings.get("empty"), Some(String::new()));
        assert_eq!(bindings.get("other"), None);
    }

    #[test]
    fn test_define_rejects_malformed() {
        let mut bindings = Bindings::new();
        assert!(bindings.define("novalue").is_err());
        assert!(bindings.define("=x").is_err());
    }

    #[test]
    fn test_later_definition_wins() {
        let mut bindings = Bindings::new();
        bindings.define("x=1").unwrap();
        bindings.define("x=2").unwrap();
        assert_eq!(bindings.get("x"), Some("2".to_string()));
    }

    #[test]
    fn test_merge_json_scalars() {
        let mut bindings = Bindings::new();
        bindings
            .merge_json(r#"{"s": "text", "n": 42, "f": 1.5, "b": true, "z": null}"#)
            .unwrap();
        assert_eq!(bindings.get("s"), Some("text".to_string()));
        assert_eq!(bindings.get("n"), Some("42".to_string()));
        assert_eq!(bindings.get("f"), Some("1.5".to_string()));
        assert_eq!(bindings.get("b"), Some("true".to_string()));
        assert_eq!(bindings.get("z"), Some(String::new()));
    }

    #[test]
    fn test_merge_json_rejects_nested_values() {
        let mut bindings = Bindings::new();
        assert!(bindings.merge_json(r#"{"list": [1, 2]}"#).is_err());
        assert!(bindings.merge_json(r#"["not", "an", "object"]"#).is_err());
    }

    #[test]
    fn test_env_fallback_only_when_enabled() {
        // PATH is set in every test environment we run in.
        let bindings = Bindings::new();
        assert_eq!(bindings.get("PATH"), None);
        let bindings = Bindings::new().with_env(true);
        assert!(bindings.get("PATH").is_some());
    }
}
