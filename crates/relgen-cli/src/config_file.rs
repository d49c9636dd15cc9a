use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use relgen_core::Config;

/// Errors while loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid configuration file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Connection section of `relgen.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Database client identifier; must be one of the supported clients.
    pub client: Option<String>,
    /// Connection string; `DATABASE_URL` or `--conn` take precedence.
    pub url: Option<String>,
}

/// Full contents of `relgen.toml`.
#[derive(Debug, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub connection: ConnectionConfig,
    #[serde(flatten)]
    pub codegen: Config,
}

pub fn load_config(path: &Path) -> Result<FileConfig, ConfigFileError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigFileError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(toml::from_str(&raw)?)
}
