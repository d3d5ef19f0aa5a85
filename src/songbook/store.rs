use super::song::{NewSong, Song, SongId, SongQuery};
use anyhow::Result;

pub trait SongStore: Send + Sync {
    /// Returns the songs matching the query, in storage order.
    fn list(&self, query: &SongQuery) -> Vec<Song>;

    /// Returns the song with the given id.
    /// Returns None if no song matches.
    fn get(&self, id: SongId) -> Option<Song>;

    /// Assigns an id to the song, appends it to the collection and
    /// persists the full collection before returning.
    /// The song is expected to be validated by the caller.
    fn add(&self, song: NewSong) -> Result<Song>;

    /// Removes the song with the given id and persists the reduced
    /// collection. Returns false if no song matched.
    fn remove(&self, id: SongId) -> Result<bool>;

    /// Number of songs currently stored.
    fn count(&self) -> usize;
}
