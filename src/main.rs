use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chapelsite_server::config::{AppConfig, CliConfig, FileConfig};
use chapelsite_server::server::{run_server, RequestsLoggingLevel, ServerConfig};
use chapelsite_server::site::{JsonRecordStore, SubmissionLog};
use chapelsite_server::songbook::JsonSongStore;

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    if path_buf.is_absolute() {
        return Ok(path_buf);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(path_buf))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Directory holding the JSON collection files. Created if missing.
    #[clap(long, value_parser = parse_path)]
    pub data_dir: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 4000)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Path to the frontend directory to be statically served.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,

    /// Path to an optional TOML config file, overrides CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };

    let cli_config = CliConfig {
        data_dir: cli_args.data_dir,
        port: cli_args.port,
        logging_level: cli_args.logging_level,
        frontend_dir_path: cli_args.frontend_dir_path,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    info!("Opening collections in {:?}...", config.data_dir);
    let songs = Arc::new(JsonSongStore::open(config.songs_path())?);
    let gallery = Arc::new(JsonRecordStore::open(config.gallery_path())?);
    let shared_files = Arc::new(JsonRecordStore::open(config.files_path())?);
    let submissions = Arc::new(SubmissionLog::new(&config.data_dir));

    let server_config = ServerConfig {
        requests_logging_level: config.logging_level.clone(),
        port: config.port,
        frontend_dir_path: config.frontend_dir_path.clone(),
    };

    info!("Ready to serve at port {}!", config.port);
    run_server(server_config, songs, gallery, shared_files, submissions).await
}
