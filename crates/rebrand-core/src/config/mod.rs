//! Registry configuration files.
//!
//! A registry file lists the migratable variables, the marker class that
//! activates each one, and the properties it may be rewritten in:
//!
//! ```yaml
//! postfix: "-s3"
//! variables:
//!   "@width":
//!     className: rebranding-sizes
//!     newVarName: "@width-s3"
//!     props: [width, margin, border]
//!   "@orange":
//!     className: rebranding-colors
//!     props: [color, background, border]
//! ```
//!
//! `newVarName` is optional; without it the variable is renamed by appending
//! `postfix`. `props` may also be given as a mapping of property name to a
//! truthy flag (`{ width: 1, margin: true }`). Entries whose property set ends
//! up empty are skipped with a warning.

mod error;

pub use error::{ConfigError, Result};

use crate::registry::{VariableBinding, VariableRegistry};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Suffix appended to a variable name when no explicit rename is given.
pub const DEFAULT_POSTFIX: &str = "-s3";

fn default_postfix() -> String {
    DEFAULT_POSTFIX.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryConfig {
    #[serde(default = "default_postfix")]
    pub postfix: String,

    #[serde(default)]
    pub variables: IndexMap<String, VariableEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableEntry {
    #[serde(alias = "target_class", alias = "targetClass")]
    pub class_name: String,

    #[serde(default, alias = "renamed_name", alias = "renamedName")]
    pub new_var_name: Option<String>,

    #[serde(alias = "applicable_properties", alias = "applicableProperties")]
    pub props: PropertySpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertySpec {
    List(Vec<String>),
    /// Property name → flag; the property applies unless the flag is
    /// `false`, `0` or `null`.
    Flags(IndexMap<String, serde_json::Value>),
}

impl PropertySpec {
    pub fn properties(&self) -> Vec<String> {
        match self {
            PropertySpec::List(list) => list.clone(),
            PropertySpec::Flags(flags) => flags
                .iter()
                .filter(|(_, flag)| is_truthy(flag))
                .map(|(name, _)| name.clone())
                .collect(),
        }
    }
}

fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(flag) => *flag,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        serde_json::Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Variable names are always stored with their leading `@`.
fn normalize_variable_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.starts_with('@') {
        trimmed.to_string()
    } else {
        format!("@{trimmed}")
    }
}

impl RegistryConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Loads a registry file, picking the format from its extension.
    pub fn load(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&source)?,
            "json" => Self::from_json_str(&source)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };
        tracing::debug!(
            path = %path.display(),
            variables = config.variables.len(),
            "Loaded registry configuration"
        );
        Ok(config)
    }

    pub fn with_postfix(mut self, postfix: impl Into<String>) -> Self {
        self.postfix = postfix.into();
        self
    }

    /// Resolved rename for one entry: the explicit name, or name + postfix.
    pub fn renamed_name(&self, name: &str, entry: &VariableEntry) -> String {
        match &entry.new_var_name {
            Some(explicit) if !explicit.trim().is_empty() => normalize_variable_name(explicit),
            _ => format!("{}{}", normalize_variable_name(name), self.postfix),
        }
    }

    pub fn into_registry(self) -> Result<VariableRegistry> {
        if self.postfix.is_empty()
            && self
                .variables
                .values()
                .any(|entry| entry.new_var_name.is_none())
        {
            return Err(ConfigError::EmptyPostfix);
        }

        let mut registry = VariableRegistry::new();
        for (name, entry) in &self.variables {
            let properties = entry.props.properties();
            if properties.is_empty() {
                // An entry with no enabled properties never matches.
                tracing::warn!(
                    variable = %name,
                    "Registry entry has no enabled properties, skipping"
                );
                continue;
            }
            let binding = VariableBinding::new(
                normalize_variable_name(name),
                entry.class_name.trim(),
                self.renamed_name(name, entry),
                properties,
            );
            registry.insert(binding)?;
        }
        Ok(registry)
    }
}

impl VariableRegistry {
    pub fn from_config(config: RegistryConfig) -> Result<Self> {
        config.into_registry()
    }
}
