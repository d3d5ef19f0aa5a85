//! HTTP client and catalog helpers for the song book.
//!
//! The client never holds authoritative state: every listing is a
//! transient snapshot, refreshed by re-fetching after each mutation.

use crate::songbook::{NewSong, Song, SongId};
use reqwest::StatusCode;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The service answered with a non-success status. The message is
    /// the server-provided `error` when present.
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// The service could not be reached at all.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// A local lyrics file could not be read.
    #[error("Could not read {}: {}", .path.display(), .source)]
    LyricsFile {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

#[derive(Deserialize)]
struct CreatedSongResponse {
    song: Song,
}

pub struct SongBookClient {
    client: reqwest::Client,
    base_url: String,
}

impl SongBookClient {
    pub fn new(base_url: impl Into<String>) -> Result<SongBookClient, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(SongBookClient {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn error_from_response(response: reqwest::Response) -> ClientError {
        let status = response.status();
        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| {
                body.get("error")
                    .and_then(|e| e.as_str())
                    .map(str::to_owned)
            })
            .unwrap_or_else(|| format!("Request failed with status {}", status));
        ClientError::Api { status, message }
    }

    /// GET /api/songs with the optional q/language filters.
    pub async fn list_songs(
        &self,
        q: Option<&str>,
        language: Option<&str>,
    ) -> Result<Vec<Song>, ClientError> {
        let mut request = self.client.get(format!("{}/api/songs", self.base_url));
        if let Some(q) = q {
            request = request.query(&[("q", q)]);
        }
        if let Some(language) = language {
            request = request.query(&[("language", language)]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        Ok(response.json().await?)
    }

    /// GET /api/songs/{id}
    pub async fn get_song(&self, id: SongId) -> Result<Song, ClientError> {
        let response = self
            .client
            .get(format!("{}/api/songs/{}", self.base_url, id))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        Ok(response.json().await?)
    }

    /// POST /api/songs, returns the created record.
    pub async fn add_song(&self, song: &NewSong) -> Result<Song, ClientError> {
        let response = self
            .client
            .post(format!("{}/api/songs", self.base_url))
            .json(song)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        let created: CreatedSongResponse = response.json().await?;
        Ok(created.song)
    }

    /// DELETE /api/songs/{id}
    pub async fn delete_song(&self, id: SongId) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(format!("{}/api/songs/{}", self.base_url, id))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        Ok(())
    }

    /// Creates one song from a plain-text lyrics file: the title is the
    /// file name with the extension stripped, the lyrics the full text.
    pub async fn add_song_from_file(
        &self,
        path: &Path,
        language: &str,
        category: &str,
    ) -> Result<Song, ClientError> {
        let lyrics = std::fs::read_to_string(path).map_err(|source| ClientError::LyricsFile {
            path: path.to_path_buf(),
            source,
        })?;

        let mut title = title_from_file_name(path);
        if title.is_empty() {
            title = derive_title(&lyrics).unwrap_or_default();
        }

        self.add_song(&NewSong {
            title,
            language: language.to_owned(),
            category: category.to_owned(),
            lyrics,
        })
        .await
    }
}

/// Tentative title: the first non-blank line of the lyrics, trimmed.
pub fn derive_title(lyrics: &str) -> Option<String> {
    lyrics
        .lines()
        .find(|line| !line.trim().is_empty())
        .map(|line| line.trim().to_owned())
}

/// File name with the extension stripped, as used for bulk ingestion.
pub fn title_from_file_name(path: &Path) -> String {
    path.file_stem()
        .or_else(|| path.file_name())
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Distinct non-empty languages present in the loaded result set.
pub fn distinct_languages(songs: &[Song]) -> Vec<String> {
    distinct_values(songs.iter().map(|song| song.language.as_str()))
}

/// Distinct non-empty categories present in the loaded result set.
pub fn distinct_categories(songs: &[Song]) -> Vec<String> {
    distinct_values(songs.iter().map(|song| song.category.as_str()))
}

fn distinct_values<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = values
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
        .collect();
    out.sort();
    out.dedup();
    out
}

/// Display order of the catalog: alphabetical by title.
pub fn sort_by_title(songs: &mut [Song]) {
    songs.sort_by_key(|song| song.title.to_lowercase());
}

/// Client-side refinement applied on top of the server-filtered result
/// set: exact matches on language and category, combined with AND.
#[derive(Debug, Default, Clone)]
pub struct CatalogFilter {
    pub language: Option<String>,
    pub category: Option<String>,
}

impl CatalogFilter {
    pub fn apply(&self, songs: &[Song]) -> Vec<Song> {
        songs
            .iter()
            .filter(|song| {
                self.language
                    .as_deref()
                    .map(|language| song.language == language)
                    .unwrap_or(true)
                    && self
                        .category
                        .as_deref()
                        .map(|category| song.category == category)
                        .unwrap_or(true)
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn song(title: &str, language: &str, category: &str) -> Song {
        Song {
            id: 0,
            title: title.to_owned(),
            language: language.to_owned(),
            category: category.to_owned(),
            lyrics: "...".to_owned(),
        }
    }

    #[test]
    fn derive_title_picks_first_non_blank_line() {
        assert_eq!(
            derive_title("\n   \n  Amazing Grace  \nhow sweet"),
            Some("Amazing Grace".to_owned())
        );
        assert_eq!(derive_title("  \n\t\n"), None);
    }

    #[test]
    fn title_from_file_name_strips_one_extension() {
        assert_eq!(title_from_file_name(&PathBuf::from("/tmp/song1.txt")), "song1");
        assert_eq!(
            title_from_file_name(&PathBuf::from("Amazing Grace.v2.txt")),
            "Amazing Grace.v2"
        );
        assert_eq!(title_from_file_name(&PathBuf::from("no_extension")), "no_extension");
    }

    #[test]
    fn distinct_sets_exclude_empties_and_duplicates() {
        let songs = vec![
            song("A", "English", "Worship"),
            song("B", "", "Praise"),
            song("C", "Kannada", ""),
            song("D", "English", "Worship"),
        ];

        assert_eq!(distinct_languages(&songs), vec!["English", "Kannada"]);
        assert_eq!(distinct_categories(&songs), vec!["Praise", "Worship"]);
    }

    #[test]
    fn sort_is_alphabetical_by_title() {
        let mut songs = vec![song("silent night", "", ""), song("Amazing Grace", "", "")];
        sort_by_title(&mut songs);
        assert_eq!(songs[0].title, "Amazing Grace");
        assert_eq!(songs[1].title, "silent night");
    }

    #[test]
    fn catalog_filter_is_exact_and_combined() {
        let songs = vec![
            song("A", "English", "Worship"),
            song("B", "English", "Praise"),
            song("C", "Kannada", "Worship"),
        ];

        let by_language = CatalogFilter {
            language: Some("English".to_owned()),
            category: None,
        };
        assert_eq!(by_language.apply(&songs).len(), 2);

        let both = CatalogFilter {
            language: Some("English".to_owned()),
            category: Some("Worship".to_owned()),
        };
        let filtered = both.apply(&songs);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "A");
    }
}
