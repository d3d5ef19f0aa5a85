mod file_config;

pub use file_config::FileConfig;

use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

/// CLI arguments that take part in config resolution.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub data_dir: Option<PathBuf>,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file
    /// config. TOML values override CLI values where present. The data
    /// directory is created if it does not exist yet.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<AppConfig> {
        let file = file_config.unwrap_or_default();

        let data_dir = file
            .data_dir
            .map(PathBuf::from)
            .or_else(|| cli.data_dir.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("data_dir must be specified via --data-dir or in config file")
            })?;

        if !data_dir.exists() {
            std::fs::create_dir_all(&data_dir)?;
        }
        if !data_dir.is_dir() {
            bail!("data_dir is not a directory: {:?}", data_dir);
        }

        let port = file.port.unwrap_or(cli.port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone());

        Ok(AppConfig {
            data_dir,
            port,
            logging_level,
            frontend_dir_path,
        })
    }

    pub fn songs_path(&self) -> PathBuf {
        self.data_dir.join("songs.json")
    }

    pub fn gallery_path(&self) -> PathBuf {
        self.data_dir.join("gallery.json")
    }

    pub fn files_path(&self) -> PathBuf {
        self.data_dir.join("files.json")
    }
}

/// Parses a logging level string via clap's ValueEnum trait.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
