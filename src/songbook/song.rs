use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type SongId = u64;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Song {
    pub id: SongId,
    pub title: String,
    pub language: String,
    pub category: String,
    pub lyrics: String,
}

/// A creation request. All fields are defaulted so that a missing field
/// reaches validation instead of failing deserialization.
#[derive(Clone, Serialize, Deserialize, Debug, Default)]
#[serde(default)]
pub struct NewSong {
    pub title: String,
    pub language: String,
    pub category: String,
    pub lyrics: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum SongValidationError {
    #[error("Title and lyrics are required")]
    MissingTitleOrLyrics,
}

impl NewSong {
    pub fn validate(&self) -> Result<(), SongValidationError> {
        if self.title.is_empty() || self.lyrics.is_empty() {
            return Err(SongValidationError::MissingTitleOrLyrics);
        }
        Ok(())
    }
}

/// Server-side filter: `q` is a case-insensitive substring match against
/// title or lyrics, `language` an exact case-insensitive match. Both are
/// combined with AND; an absent or empty parameter matches everything.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SongQuery {
    pub q: Option<String>,
    pub language: Option<String>,
}

impl SongQuery {
    pub fn matches(&self, song: &Song) -> bool {
        if let Some(q) = self.q.as_deref().filter(|q| !q.is_empty()) {
            let q = q.to_lowercase();
            if !song.title.to_lowercase().contains(&q) && !song.lyrics.to_lowercase().contains(&q)
            {
                return false;
            }
        }
        if let Some(language) = self.language.as_deref().filter(|l| !l.is_empty()) {
            if song.language.to_lowercase() != language.to_lowercase() {
                return false;
            }
        }
        true
    }
}
