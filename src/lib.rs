//! Chapelsite Server Library
//!
//! This library exposes the internal modules for testing and the two
//! binaries (the site server and the song book console).

pub mod client;
pub mod collection_file;
pub mod config;
pub mod server;
pub mod site;
pub mod songbook;

// Re-export commonly used types for convenience
pub use server::{run_server, RequestsLoggingLevel, ServerConfig};
pub use songbook::{JsonSongStore, NewSong, Song, SongStore};
