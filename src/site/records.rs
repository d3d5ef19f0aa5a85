use crate::collection_file::{load_array, save_array, seed_next_id};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::sync::Mutex;

/// A stored content record: a service-assigned id plus whatever fields
/// the caller supplied, carried verbatim.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Record {
    pub id: u64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

struct Inner {
    records: Vec<Record>,
    next_id: u64,
}

/// Content collection (gallery images, shared files) backed by a single
/// JSON file, same persistence discipline as the song store.
pub struct JsonRecordStore {
    file_path: PathBuf,
    inner: Mutex<Inner>,
}

impl JsonRecordStore {
    pub fn open(file_path: impl Into<PathBuf>) -> Result<JsonRecordStore> {
        let file_path = file_path.into();
        let records: Vec<Record> = load_array(&file_path)?;
        let next_id = seed_next_id(records.iter().map(|r| r.id).max());
        Ok(JsonRecordStore {
            file_path,
            inner: Mutex::new(Inner { records, next_id }),
        })
    }

    pub fn list(&self) -> Vec<Record> {
        self.inner.lock().unwrap().records.clone()
    }

    pub fn add(&self, fields: Map<String, Value>) -> Result<Record> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id;
        inner.next_id += 1;

        let record = Record { id, fields };
        inner.records.push(record.clone());
        save_array(&self.file_path, &inner.records)?;
        Ok(record)
    }

    /// Returns false if no record matched the id.
    pub fn remove(&self, id: u64) -> Result<bool> {
        let mut inner = self.inner.lock().unwrap();
        let initial_len = inner.records.len();
        inner.records.retain(|record| record.id != id);
        if inner.records.len() == initial_len {
            return Ok(false);
        }
        save_array(&self.file_path, &inner.records)?;
        Ok(true)
    }
}
