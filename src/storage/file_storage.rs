use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use super::DurableStore;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Data directory not found")]
    DataDirNotFound,

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Durable key-value store backed by one JSON file per key.
///
/// Layout under the base directory:
/// ```text
/// wordwise/
/// ├── wordwise-storage.json            # full state snapshot
/// ├── wordwise-custom-words.json       # learner-added words
/// ├── wordwise-word-notes.json         # notes keyed by word
/// └── wordwise-word-last-updated.json  # timestamps keyed by word
/// ```
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("wordwise"))
            .ok_or(StorageError::DataDirNotFound)
    }

    /// Initialize the storage directory
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;
        Ok(())
    }

    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }

    fn key_path(&self, name: &str) -> Result<PathBuf> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');
        if !valid || name.starts_with('.') {
            return Err(StorageError::InvalidKey(name.to_string()));
        }
        Ok(self.base_path.join(format!("{}.json", name)))
    }
}

impl DurableStore for FileStore {
    fn read_key(&self, name: &str) -> Result<Option<String>> {
        let path = self.key_path(name)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn write_key(&self, name: &str, value: &str) -> Result<()> {
        let path = self.key_path(name)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, value)?;
        Ok(())
    }

    fn remove_key(&self, name: &str) -> Result<()> {
        let path = self.key_path(name)?;
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (FileStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("wordwise"));
        store.init().unwrap();
        (store, temp_dir)
    }

    #[test]
    fn test_missing_key_reads_none() {
        let (store, _temp) = create_test_store();
        assert_eq!(store.read_key("wordwise-storage").unwrap(), None);
    }

    #[test]
    fn test_write_then_read() {
        let (store, _temp) = create_test_store();
        store.write_key("wordwise-word-notes", r#"{"run":"verb"}"#).unwrap();

        let value = store.read_key("wordwise-word-notes").unwrap();
        assert_eq!(value.as_deref(), Some(r#"{"run":"verb"}"#));
        assert!(store.base_path().join("wordwise-word-notes.json").exists());
    }

    #[test]
    fn test_remove_key() {
        let (store, _temp) = create_test_store();
        store.write_key("scratch", "1").unwrap();
        store.remove_key("scratch").unwrap();
        assert_eq!(store.read_key("scratch").unwrap(), None);

        // Removing twice is fine
        store.remove_key("scratch").unwrap();
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let (store, _temp) = create_test_store();
        assert!(matches!(
            store.write_key("../escape", "x"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(store.read_key("").is_err());
    }
}
