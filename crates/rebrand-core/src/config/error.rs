use crate::registry::RegistryError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read registry file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML registry: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON registry: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported registry format '{0}' (expected .yaml, .yml or .json)")]
    UnsupportedFormat(String),

    #[error("rename postfix must not be empty")]
    EmptyPostfix,

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
