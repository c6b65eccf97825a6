//! Small persisted key-value store for UI flags.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::Context;

/// String key-value pairs stored as a JSON object on disk.
///
/// Every [`set`](PrefStore::set) writes the whole file back. A missing file
/// reads as an empty store.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl PrefStore {
    /// Open the store backed by `path`.
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let values = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)
                    .with_context(|| format!("Invalid state file {}", path.display()))?
            }
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Store `value` under `key` and persist.
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }

    fn save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        debug!("Saved UI state to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = PrefStore::open(dir.path().join("state.json")).unwrap();
        assert_eq!(store.get("sxMode"), None);
    }

    #[test]
    fn test_set_writes_through() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/state.json");

        let mut store = PrefStore::open(&path).unwrap();
        store.set("sxMode", "on").unwrap();
        assert_eq!(store.get("sxMode"), Some("on"));

        let reopened = PrefStore::open(&path).unwrap();
        assert_eq!(reopened.get("sxMode"), Some("on"));
        assert_eq!(reopened, store);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "[1, 2").unwrap();
        let err = PrefStore::open(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid state file"));
    }
}
