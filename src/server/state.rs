use axum::extract::FromRef;

use crate::site::{JsonRecordStore, SubmissionLog};
use crate::songbook::SongStore;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedSongStore = Arc<dyn SongStore>;
pub type GuardedRecordStore = Arc<JsonRecordStore>;
pub type GuardedSubmissionLog = Arc<SubmissionLog>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub songs: GuardedSongStore,
    pub gallery: GuardedRecordStore,
    pub shared_files: GuardedRecordStore,
    pub submissions: GuardedSubmissionLog,
}

impl FromRef<ServerState> for GuardedSongStore {
    fn from_ref(input: &ServerState) -> Self {
        input.songs.clone()
    }
}

impl FromRef<ServerState> for GuardedSubmissionLog {
    fn from_ref(input: &ServerState) -> Self {
        input.submissions.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
