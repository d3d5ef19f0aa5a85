use super::song::{NewSong, Song, SongId, SongQuery};
use super::store::SongStore;
use crate::collection_file::{load_array, save_array, seed_next_id};
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Mutex;

struct Inner {
    songs: Vec<Song>,
    next_id: SongId,
}

/// Song collection backed by a single JSON file. The collection lives in
/// memory under a mutex that spans every full read-modify-write cycle;
/// each mutation rewrites the whole file before returning.
pub struct JsonSongStore {
    file_path: PathBuf,
    inner: Mutex<Inner>,
}

impl JsonSongStore {
    pub fn open(file_path: impl Into<PathBuf>) -> Result<JsonSongStore> {
        let file_path = file_path.into();
        let songs: Vec<Song> = load_array(&file_path)?;
        let next_id = seed_next_id(songs.iter().map(|s| s.id).max());
        Ok(JsonSongStore {
            file_path,
            inner: Mutex::new(Inner { songs, next_id }),
        })
    }

    fn save(&self, songs: &[Song]) -> Result<()> {
        save_array(&self.file_path, songs)
    }
}

impl SongStore for JsonSongStore {
    fn list(&self, query: &SongQuery) -> Vec<Song> {
        self.inner
            .lock()
            .unwrap()
            .songs
            .iter()
            .filter(|song| query.matches(song))
            .cloned()
            .collect()
    }

    fn get(&self, id: SongId) -> Option<Song> {
        self.inner
            .lock()
            .unwrap()
            .songs
            .iter()
            .find(|song| song.id == id)
            .cloned()
    }

    fn add(&self, song: NewSong) -> Result<Song> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id;
        inner.next_id += 1;

        let song = Song {
            id,
            title: song.title,
            language: song.language,
            category: song.category,
            lyrics: song.lyrics,
        };
        inner.songs.push(song.clone());
        self.save(&inner.songs)?;
        Ok(song)
    }

    fn remove(&self, id: SongId) -> Result<bool> {
        let mut inner = self.inner.lock().unwrap();
        let initial_len = inner.songs.len();
        inner.songs.retain(|song| song.id != id);
        if inner.songs.len() == initial_len {
            return Ok(false);
        }
        self.save(&inner.songs)?;
        Ok(true)
    }

    fn count(&self) -> usize {
        self.inner.lock().unwrap().songs.len()
    }
}
