mod json_store;
mod song;
mod store;

pub use json_store::JsonSongStore;
pub use song::{NewSong, Song, SongId, SongQuery, SongValidationError};
pub use store::SongStore;
