use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

lazy_static! {
    static ref IDENTIFIER_RE: Regex = Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap();
}

/// Directive interpreter settings shared by the binder, resolver and audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DirectiveConfig {
    /// Attribute whose value is the action expression
    pub action_attribute: String,
    /// Root namespace token stripped from the front of action paths
    pub root_namespace: String,
}

impl Default for DirectiveConfig {
    fn default() -> Self {
        Self {
            action_attribute: "data-action".to_string(),
            root_namespace: "window".to_string(),
        }
    }
}

impl DirectiveConfig {
    /// Load from JSON; missing keys fall back to the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: DirectiveConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.action_attribute.is_empty()
            || self.action_attribute.chars().any(char::is_whitespace)
        {
            return Err(ConfigError::Invalid(format!(
                "action attribute '{}' is not a valid attribute name",
                self.action_attribute
            )));
        }
        if !IDENTIFIER_RE.is_match(&self.root_namespace) {
            return Err(ConfigError::Invalid(format!(
                "root namespace '{}' is not an identifier",
                self.root_namespace
            )));
        }
        Ok(())
    }
}
