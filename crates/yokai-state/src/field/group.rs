use std::sync::Arc;

use super::StorageField;
use crate::StorageError;

/// Type erased view of a [`StorageField`].
pub trait StorageEntry: Send + Sync {
    /// The namespace id.
    fn id(&self) -> &str;
    /// The key within the namespace.
    fn key(&self) -> &str;
    /// The stored string form of the current value.
    fn raw_value(&self) -> Result<String, StorageError>;
    /// Stores the initial value again.
    fn reset(&self) -> Result<(), StorageError>;
    /// Deletes the stored value.
    fn remove(&self) -> Result<(), StorageError>;
}

impl<T> StorageEntry for StorageField<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn id(&self) -> &str {
        StorageField::id(self)
    }

    fn key(&self) -> &str {
        StorageField::key(self)
    }

    fn raw_value(&self) -> Result<String, StorageError> {
        StorageField::raw_value(self)
    }

    fn reset(&self) -> Result<(), StorageError> {
        StorageField::reset(self)
    }

    fn remove(&self) -> Result<(), StorageError> {
        StorageField::remove(self)
    }
}

/// The storage fields declared by one module, usually all in the same namespace.
#[derive(Default)]
pub struct StorageGroup {
    id: String,
    entries: Vec<Arc<dyn StorageEntry>>,
}

impl std::fmt::Debug for StorageGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageGroup")
            .field("id", &self.id)
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl StorageGroup {
    /// Creates an empty group.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            entries: Vec::new(),
        }
    }

    /// The group id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Adds `entry` to the group.
    pub fn with(mut self, entry: Arc<dyn StorageEntry>) -> Self {
        self.entries.push(entry);
        self
    }

    /// Adds `entry` to the group.
    pub fn push(&mut self, entry: Arc<dyn StorageEntry>) {
        self.entries.push(entry);
    }

    /// All entries in declaration order.
    pub fn entries(&self) -> &[Arc<dyn StorageEntry>] {
        &self.entries
    }

    /// First entry stored under `key`.
    pub fn get_by_key(&self, key: &str) -> Option<&Arc<dyn StorageEntry>> {
        self.entries.iter().find(|entry| entry.key() == key)
    }

    /// Stores the initial value of every entry again.
    pub fn reset_all(&self) -> Result<(), StorageError> {
        for entry in &self.entries {
            entry.reset()?;
        }
        Ok(())
    }
}
