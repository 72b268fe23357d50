//! The client's key-value string store: the only state that survives a
//! reload. Favorites and display preferences are written through this port.

use std::collections::{BTreeMap, HashMap};
use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::error::DashboardError;

/// String-to-string persistence scoped to one client.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Storage`] when the value cannot be persisted.
    /// On error the previous value must still be in place.
    fn set(&mut self, key: &str, value: &str) -> Result<(), DashboardError>;
}

/// Volatile store, for tests and for sessions that should not touch disk.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-populated with `pairs`.
    #[must_use]
    pub fn with_values<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DashboardError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a single JSON object on disk. Every `set` writes a sibling
/// temp file and renames it over the original, so the file on disk is always
/// either the old or the new state.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing, empty or undecodable file is an
    /// empty store; the undecodable case is logged and the file is replaced
    /// on the next `set`.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Storage`] if the file exists but cannot be
    /// read.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DashboardError> {
        let path = path.as_ref().to_path_buf();
        let values = match std::fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring undecodable state file");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, values })
    }

    fn write_atomically(&self, raw: &str) -> std::io::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(raw.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DashboardError> {
        let mut next = self.values.clone();
        next.insert(key.to_string(), value.to_string());

        let raw = serde_json::to_string_pretty(&next).map_err(|e| DashboardError::Decode {
            context: self.path.display().to_string(),
            source: e,
        })?;
        self.write_atomically(&raw)?;

        self.values = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("tempUnit"), None);
        store.set("tempUnit", "F").expect("set");
        assert_eq!(store.get("tempUnit").as_deref(), Some("F"));
    }

    #[test]
    fn json_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::open(dir.path().join("state.json")).expect("open");
        assert_eq!(store.get("darkMode"), None);
    }

    #[test]
    fn json_file_store_persists_across_opens() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("state.json");

        let mut store = JsonFileStore::open(&path).expect("open");
        store.set("darkMode", "true").expect("set");
        store.set("weatherq_cities", "[\"Dhaka\"]").expect("set");

        let reopened = JsonFileStore::open(&path).expect("reopen");
        assert_eq!(reopened.get("darkMode").as_deref(), Some("true"));
        assert_eq!(reopened.get("weatherq_cities").as_deref(), Some("[\"Dhaka\"]"));
    }

    #[test]
    fn json_file_store_treats_corrupt_file_as_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{\n  \"darkMode\": \"tr").expect("write");

        let mut store = JsonFileStore::open(&path).expect("open");
        assert_eq!(store.get("darkMode"), None);

        store.set("tempUnit", "F").expect("set");
        let reopened = JsonFileStore::open(&path).expect("reopen");
        assert_eq!(reopened.get("tempUnit").as_deref(), Some("F"));
    }

    #[test]
    fn json_file_store_replaces_file_without_leftovers() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("state.json");

        let mut store = JsonFileStore::open(&path).expect("open");
        store.set("darkMode", "true").expect("set");
        store.set("darkMode", "false").expect("set again");

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .expect("read dir")
            .filter_map(Result::ok)
            .map(|e| e.file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("state.json")]);

        let on_disk: BTreeMap<String, String> =
            serde_json::from_str(&std::fs::read_to_string(&path).expect("read")).expect("json");
        assert_eq!(on_disk.get("darkMode").map(String::as_str), Some("false"));
    }

    #[test]
    fn json_file_store_keeps_old_value_when_write_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        // Parent directory does not exist, so the write fails.
        let path = dir.path().join("missing").join("state.json");
        let mut store = JsonFileStore::open(&path).expect("open");

        let err = store.set("tempUnit", "F").unwrap_err();
        assert!(matches!(err, DashboardError::Storage(_)));
        assert_eq!(store.get("tempUnit"), None);
    }
}
