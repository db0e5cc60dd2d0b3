use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::file_storage::Result;
use super::DurableStore;

/// In-process store used for tests and throwaway sessions
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave the map half-written
    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DurableStore for MemoryStore {
    fn read_key(&self, name: &str) -> Result<Option<String>> {
        Ok(self.entries().get(name).cloned())
    }

    fn write_key(&self, name: &str, value: &str) -> Result<()> {
        self.entries().insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn remove_key(&self, name: &str) -> Result<()> {
        self.entries().remove(name);
        Ok(())
    }
}
