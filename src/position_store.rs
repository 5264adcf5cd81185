use crate::error::PersistenceError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// What gets written to disk between runs.
///
/// `page` is the only authoritative field. `page` is signed so a damaged
/// record can still be loaded and clamped rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub page: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_read: Option<DateTime<Utc>>,
}

impl PositionRecord {
    pub fn at(page: usize, chapter: usize) -> Self {
        Self {
            page: i64::try_from(page).unwrap_or(i64::MAX),
            chapter: Some(chapter),
            last_read: Some(Utc::now()),
        }
    }
}

/// Where the reading position lives between runs.
pub trait PositionStore {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<PositionRecord>, PersistenceError>;

    fn save(&mut self, record: &PositionRecord) -> Result<(), PersistenceError>;
}

/// Pretty-printed JSON file.
pub struct JsonPositionStore {
    path: PathBuf,
}

impl JsonPositionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PositionStore for JsonPositionStore {
    fn load(&self) -> Result<Option<PositionRecord>, PersistenceError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&mut self, record: &PositionRecord) -> Result<(), PersistenceError> {
        let content = serde_json::to_string_pretty(record)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

/// Keeps the record in memory only; nothing survives the process.
#[derive(Default)]
pub struct EphemeralPositionStore {
    record: Option<PositionRecord>,
}

impl EphemeralPositionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: PositionRecord) -> Self {
        Self {
            record: Some(record),
        }
    }

    pub fn record(&self) -> Option<&PositionRecord> {
        self.record.as_ref()
    }
}

impl PositionStore for EphemeralPositionStore {
    fn load(&self) -> Result<Option<PositionRecord>, PersistenceError> {
        Ok(self.record.clone())
    }

    fn save(&mut self, record: &PositionRecord) -> Result<(), PersistenceError> {
        self.record = Some(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let store = JsonPositionStore::new(dir.path().join("state.json"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonPositionStore::new(dir.path().join("state.json"));

        let record = PositionRecord::at(42, 3);
        store.save(&record).unwrap();

        assert_eq!(store.load().unwrap(), Some(record));
        assert!(store.path().exists());
    }

    #[test]
    fn test_legacy_and_minimal_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        let store = JsonPositionStore::new(&path);

        fs::write(&path, r#"{"page": 7}"#).unwrap();
        let record = store.load().unwrap().unwrap();
        assert_eq!(record.page, 7);
        assert_eq!(record.chapter, None);

        fs::write(&path, r#"{"chapter": 2, "page": -3}"#).unwrap();
        let record = store.load().unwrap().unwrap();
        assert_eq!(record.page, -3);
        assert_eq!(record.chapter, Some(2));
    }

    #[test]
    fn test_corrupt_file_is_a_format_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "not json").unwrap();

        let err = JsonPositionStore::new(&path).load().unwrap_err();
        assert!(matches!(err, PersistenceError::Format(_)));
    }

    #[test]
    fn test_unwritable_location_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonPositionStore::new(dir.path().join("missing").join("state.json"));

        let err = store.save(&PositionRecord::default()).unwrap_err();
        assert!(matches!(err, PersistenceError::Io(_)));
    }

    #[test]
    fn test_ephemeral_store() {
        let mut store = EphemeralPositionStore::new();
        assert_eq!(store.load().unwrap(), None);

        store.save(&PositionRecord::at(1, 0)).unwrap();
        assert_eq!(store.record().map(|r| r.page), Some(1));
    }
}
