//! Flat JSON collection files: one file per entity type, holding a plain
//! array of records. A missing file is an empty collection; a malformed
//! file is an error with no recovery path.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

pub fn load_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut file = File::open(path)
        .with_context(|| format!("Could not open collection file {}", path.display()))?;
    let mut content = String::new();
    file.read_to_string(&mut content)?;

    serde_json::from_str(&content)
        .with_context(|| format!("Malformed collection file {}", path.display()))
}

pub fn save_array<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
    let json_string = serde_json::to_string_pretty(items)?;
    let mut file = File::create(path)
        .with_context(|| format!("Could not write collection file {}", path.display()))?;
    file.write_all(json_string.as_bytes())?;
    Ok(())
}

/// Seeds the id counter of a collection. Starting above the current unix
/// time in milliseconds keeps ids from older data (which used timestamps
/// directly) from being handed out again after a restart.
pub fn seed_next_id(max_existing: Option<u64>) -> u64 {
    let unix_millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    max_existing.map(|m| m + 1).unwrap_or(0).max(unix_millis)
}
