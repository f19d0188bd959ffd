//! Constructors for the built-in field kinds.

use std::sync::Arc;

use yokai_state::StorageField;

use crate::{FieldKind, SettingField};

impl SettingField<String> {
    /// A single line text field.
    pub fn text(title: impl Into<String>, storage: Arc<StorageField<String>>) -> Self {
        Self::new(title, storage, FieldKind::Text)
    }

    /// A text field holding an http(s) URL. Pair it with
    /// [`rules::url`](crate::validation::rules::url) to check the format.
    pub fn url(title: impl Into<String>, storage: Arc<StorageField<String>>) -> Self {
        Self::new(title, storage, FieldKind::Url)
    }

    /// A masked text field. Usually backed by a secure storage field.
    pub fn password(title: impl Into<String>, storage: Arc<StorageField<String>>) -> Self {
        Self::new(title, storage, FieldKind::Password)
    }

    /// A directory picker.
    pub fn directory(title: impl Into<String>, storage: Arc<StorageField<String>>) -> Self {
        Self::new(title, storage, FieldKind::Directory)
    }
}

impl SettingField<bool> {
    /// A switch.
    pub fn boolean(title: impl Into<String>, storage: Arc<StorageField<bool>>) -> Self {
        Self::new(title, storage, FieldKind::Boolean)
    }
}
