//! Test server lifecycle management
//!
//! Each test gets an isolated server on a random port with its own
//! temporary data directory.

use super::constants::*;
use super::fixtures::seed_songs;
use chapelsite_server::server::server::make_app;
use chapelsite_server::server::{RequestsLoggingLevel, ServerConfig};
use chapelsite_server::site::{JsonRecordStore, SubmissionLog};
use chapelsite_server::songbook::{JsonSongStore, Song};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Test server instance with an isolated data directory
///
/// When dropped, the server gracefully shuts down and the temp
/// directory is cleaned up.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// Songs seeded into the collection before startup, in creation
    /// order. Empty unless spawned with `spawn_seeded`.
    pub seeded_songs: Vec<Song>,

    // Private fields - keep resources alive until drop
    _temp_data_dir: TempDir,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a test server over an empty data directory.
    pub async fn spawn() -> Self {
        Self::spawn_inner(false).await
    }

    /// Spawns a test server with the fixture songs already stored.
    pub async fn spawn_seeded() -> Self {
        Self::spawn_inner(true).await
    }

    async fn spawn_inner(seed: bool) -> Self {
        let temp_data_dir = TempDir::new().expect("Failed to create temp data dir");

        let seeded_songs = if seed {
            seed_songs(temp_data_dir.path()).expect("Failed to seed songs")
        } else {
            Vec::new()
        };

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            requests_logging_level: RequestsLoggingLevel::None,
            port,
            frontend_dir_path: None,
        };
        let app = make_app(
            config,
            Arc::new(
                JsonSongStore::open(temp_data_dir.path().join("songs.json"))
                    .expect("Failed to open song store"),
            ),
            Arc::new(
                JsonRecordStore::open(temp_data_dir.path().join("gallery.json"))
                    .expect("Failed to open gallery store"),
            ),
            Arc::new(
                JsonRecordStore::open(temp_data_dir.path().join("files.json"))
                    .expect("Failed to open files store"),
            ),
            Arc::new(SubmissionLog::new(temp_data_dir.path())),
        );

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            seeded_songs,
            _temp_data_dir: temp_data_dir,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// The data directory backing this server's collection files.
    pub fn data_dir(&self) -> &Path {
        self._temp_data_dir.path()
    }

    /// Waits for the server to become ready by polling the / endpoint
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => {
                    return;
                }
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
        // TempDir is cleaned up automatically
    }
}
