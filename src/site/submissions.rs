use crate::collection_file::{load_array, save_array};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::sync::Mutex;

/// The append-only form inboxes of the site.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmissionKind {
    Contact,
    Donation,
    Registration,
    Chat,
}

impl SubmissionKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            SubmissionKind::Contact => "contacts.json",
            SubmissionKind::Donation => "donations.json",
            SubmissionKind::Registration => "registrations.json",
            SubmissionKind::Chat => "chats.json",
        }
    }
}

/// Caller-supplied fields carried verbatim, stamped with the submission
/// time on the way in.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Submission {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    pub date: DateTime<Utc>,
}

pub struct SubmissionLog {
    data_dir: PathBuf,
    guard: Mutex<()>,
}

impl SubmissionLog {
    pub fn new(data_dir: impl Into<PathBuf>) -> SubmissionLog {
        SubmissionLog {
            data_dir: data_dir.into(),
            guard: Mutex::new(()),
        }
    }

    fn path(&self, kind: SubmissionKind) -> PathBuf {
        self.data_dir.join(kind.file_name())
    }

    /// Appends one record, rewriting the kind's collection file.
    pub fn append(&self, kind: SubmissionKind, fields: Map<String, Value>) -> Result<Submission> {
        let _guard = self.guard.lock().unwrap();

        let path = self.path(kind);
        let mut submissions: Vec<Submission> = load_array(&path)?;
        let submission = Submission {
            fields,
            date: Utc::now(),
        };
        submissions.push(submission.clone());
        save_array(&path, &submissions)?;
        Ok(submission)
    }

    pub fn read_all(&self, kind: SubmissionKind) -> Result<Vec<Submission>> {
        let _guard = self.guard.lock().unwrap();
        load_array(&self.path(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn append_stamps_a_date_and_persists() {
        let dir = TempDir::new().unwrap();
        let log = SubmissionLog::new(dir.path());

        log.append(
            SubmissionKind::Contact,
            fields(json!({"name": "Mary", "message": "Hello"})),
        )
        .unwrap();

        let stored = log.read_all(SubmissionKind::Contact).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].fields["name"], "Mary");

        // Other inboxes are untouched.
        assert!(log.read_all(SubmissionKind::Chat).unwrap().is_empty());
    }

    #[test]
    fn each_kind_gets_its_own_file() {
        let dir = TempDir::new().unwrap();
        let log = SubmissionLog::new(dir.path());

        log.append(SubmissionKind::Donation, fields(json!({"amount": 50})))
            .unwrap();
        log.append(SubmissionKind::Chat, fields(json!({"message": "hi"})))
            .unwrap();

        assert!(dir.path().join("donations.json").exists());
        assert!(dir.path().join("chats.json").exists());
        assert!(!dir.path().join("contacts.json").exists());
    }
}
