use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::record::PatientRecord;

/// Storage key holding the serialized patient list.
pub const PATIENTS_KEY: &str = "patients";

/// One string value per key, single-key overwrite semantics. The portal core
/// only ever talks to storage through this seam.
pub trait KeyValueStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// File-backed store: each key becomes one `<key>.json` file under a storage
/// root directory.
#[derive(Debug)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn open(root: impl Into<PathBuf>) -> Result<FileStorage, StorageError> {
        let root = root.into();
        fs::create_dir_all(root.as_path())?;
        Ok(FileStorage { root })
    }

    pub fn root(&self) -> &Path {
        self.root.as_path()
    }

    fn key_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let safe = sanitize_key(key);
        if safe.is_empty() {
            return Err(StorageError::Unavailable(format!(
                "invalid storage key: {key:?}"
            )));
        }
        Ok(self.root.join(format!("{safe}.json")))
    }
}

impl KeyValueStore for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.key_path(key)?;
        match fs::read_to_string(path.as_path()) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Io(err)),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.key_path(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path.as_path(), value)?;
        Ok(())
    }
}

/// In-memory store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> MemoryStorage {
        MemoryStorage::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

fn sanitize_key(value: &str) -> String {
    let mut out = String::new();
    for ch in value.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
            out.push(ch);
        } else {
            out.push('_');
        }
    }
    out.trim_matches('_').to_string()
}

/// Writes the full sequence under [`PATIENTS_KEY`]. Failures are warned and
/// swallowed; the previously persisted state stays as it was.
pub fn save_patients(store: &mut dyn KeyValueStore, records: &[PatientRecord]) {
    let text = match serde_json::to_string(records) {
        Ok(text) => text,
        Err(err) => {
            log::warn!("could not serialize {} patient record(s): {err}", records.len());
            return;
        }
    };
    if let Err(err) = store.write(PATIENTS_KEY, text.as_str()) {
        log::warn!("could not persist patient records: {err}");
    }
}

/// Reads the persisted sequence. An unset key, unreadable backend, or corrupt
/// value all come back as `None`; the caller treats that as "no persisted
/// state".
pub fn load_patients(store: &dyn KeyValueStore) -> Option<Vec<PatientRecord>> {
    let text = match store.read(PATIENTS_KEY) {
        Ok(Some(text)) => text,
        Ok(None) => return None,
        Err(err) => {
            log::warn!("could not read persisted patient records: {err}");
            return None;
        }
    };
    match serde_json::from_str::<Vec<PatientRecord>>(text.as_str()) {
        Ok(records) => Some(records),
        Err(err) => {
            let err = StorageError::from(err);
            log::warn!("ignoring persisted patient records: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::UNASSIGNED_DOCTOR;

    fn sample(name: &str, doctor: &str) -> PatientRecord {
        PatientRecord {
            name: name.to_string(),
            age: "42".to_string(),
            disease: "Flu".to_string(),
            doctor: doctor.to_string(),
            status: "Stable".to_string(),
            created_at: "2026-08-25".to_string(),
        }
    }

    #[test]
    fn save_then_load_is_structurally_equal() {
        let mut store = MemoryStorage::new();
        let records = vec![
            sample("Jane Doe", "Dr. Patel"),
            sample("John Smith", UNASSIGNED_DOCTOR),
        ];
        save_patients(&mut store, records.as_slice());
        assert_eq!(load_patients(&store), Some(records));
    }

    #[test]
    fn load_without_saved_state_is_none() {
        let store = MemoryStorage::new();
        assert_eq!(load_patients(&store), None);
    }

    #[test]
    fn corrupt_persisted_state_reads_as_absent() {
        let mut store = MemoryStorage::new();
        store.write(PATIENTS_KEY, "{not json").unwrap();
        assert_eq!(load_patients(&store), None);
    }

    #[test]
    fn wrong_shape_reads_as_absent() {
        let mut store = MemoryStorage::new();
        store.write(PATIENTS_KEY, "{\"name\":\"lonely object\"}").unwrap();
        assert_eq!(load_patients(&store), None);
    }

    #[test]
    fn file_storage_round_trips_through_disk() {
        let root = std::env::temp_dir().join(format!(
            "caredesk-storage-test-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(root.as_path());
        let mut store = FileStorage::open(root.as_path()).unwrap();
        assert_eq!(store.read(PATIENTS_KEY).unwrap(), None);
        store.write(PATIENTS_KEY, "[1,2,3]").unwrap();
        assert_eq!(store.read(PATIENTS_KEY).unwrap(), Some("[1,2,3]".to_string()));
        let _ = fs::remove_dir_all(root.as_path());
    }
}
