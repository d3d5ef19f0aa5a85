//! Seed data for end-to-end tests

use super::constants::*;
use anyhow::Result;
use chapelsite_server::songbook::{JsonSongStore, NewSong, Song, SongStore};
use std::path::Path;

/// Seeds the song collection file with three known songs and returns
/// them in creation order.
pub fn seed_songs(data_dir: &Path) -> Result<Vec<Song>> {
    let store = JsonSongStore::open(data_dir.join("songs.json"))?;

    let seeded = vec![
        store.add(NewSong {
            title: GRACE_TITLE.to_owned(),
            language: GRACE_LANGUAGE.to_owned(),
            category: "Worship".to_owned(),
            lyrics: "Amazing grace, how sweet the sound".to_owned(),
        })?,
        store.add(NewSong {
            title: SILENT_TITLE.to_owned(),
            language: GRACE_LANGUAGE.to_owned(),
            category: "Christmas".to_owned(),
            lyrics: "Silent night, holy night, all is calm".to_owned(),
        })?,
        store.add(NewSong {
            title: KANNADA_TITLE.to_owned(),
            language: KANNADA_LANGUAGE.to_owned(),
            category: "Worship".to_owned(),
            lyrics: "ಅದ್ಭುತ ಕೃಪೆ".to_owned(),
        })?,
    ];

    Ok(seeded)
}
