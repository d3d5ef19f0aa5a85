use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Optional TOML configuration file. Every field mirrors a CLI argument
/// and overrides it when present.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    pub data_dir: Option<String>,
    pub port: Option<u16>,
    pub logging_level: Option<String>,
    pub frontend_dir_path: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<FileConfig> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Could not parse config file {}", path.display()))
    }
}
