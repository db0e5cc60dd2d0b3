//! Durable key-value persistence
//!
//! Values are opaque strings (JSON produced by the store). Keys are flat,
//! namespaced names such as `wordwise-storage`.

mod file_storage;
mod memory;

pub use file_storage::{FileStore, Result, StorageError};
pub use memory::MemoryStore;

/// A key-value store that survives process restarts
pub trait DurableStore: Send + Sync {
    fn read_key(&self, name: &str) -> Result<Option<String>>;

    fn write_key(&self, name: &str, value: &str) -> Result<()>;

    fn remove_key(&self, name: &str) -> Result<()>;
}

impl<T: DurableStore + ?Sized> DurableStore for std::sync::Arc<T> {
    fn read_key(&self, name: &str) -> Result<Option<String>> {
        (**self).read_key(name)
    }

    fn write_key(&self, name: &str, value: &str) -> Result<()> {
        (**self).write_key(name, value)
    }

    fn remove_key(&self, name: &str) -> Result<()> {
        (**self).remove_key(name)
    }
}
