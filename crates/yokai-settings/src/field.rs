use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use yokai_state::{StorageError, StorageField};

use crate::{FieldValue, ToFieldValue};

/// When a field's `on_update` callback runs on [`CategorySettings::save`](crate::CategorySettings::save).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnUpdateBehavior {
    /// On every save, edited or not.
    OnSaved,
    /// Only on saves after the field was edited.
    OnChanged,
}

/// The widget kind a field is presented with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    #[allow(missing_docs)]
    Text,
    #[allow(missing_docs)]
    Url,
    #[allow(missing_docs)]
    Password,
    /// A directory picker. Cannot be disabled.
    Directory,
    #[allow(missing_docs)]
    Boolean,
    /// An action without a stored value.
    Button,
}

impl FieldKind {
    /// Update policy a field of this kind gets unless told otherwise.
    pub fn default_behavior(self) -> OnUpdateBehavior {
        match self {
            FieldKind::Boolean | FieldKind::Button => OnUpdateBehavior::OnSaved,
            FieldKind::Text | FieldKind::Url | FieldKind::Password | FieldKind::Directory => {
                OnUpdateBehavior::OnChanged
            }
        }
    }

    /// Whether fields of this kind can be greyed out.
    pub fn is_disableable(self) -> bool {
        !matches!(self, FieldKind::Directory)
    }
}

/// Capability of a field that can be disabled by the presentation layer or by a
/// [`BoolBindScope`](crate::BoolBindScope).
pub trait Disableable: Send + Sync {
    #[allow(missing_docs)]
    fn is_disabled(&self) -> bool;
    #[allow(missing_docs)]
    fn set_disabled(&self, disabled: bool);
}

/// Shared disabled state of a field.
#[derive(Debug, Default)]
pub struct DisabledFlag(AtomicBool);

impl Disableable for DisabledFlag {
    fn is_disabled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn set_disabled(&self, disabled: bool) {
        self.0.store(disabled, Ordering::Relaxed);
    }
}

/// Object safe view of a setting field, independent of its value type.
///
/// This is what [`CategorySettings`](crate::CategorySettings), validation rules and attention
/// checks work with.
pub trait AnySettingField: Send + Sync {
    /// Title shown next to the field.
    fn title(&self) -> &str;
    /// Key of the backing storage field. Empty for fields without storage.
    fn key(&self) -> &str;
    #[allow(missing_docs)]
    fn kind(&self) -> FieldKind;
    #[allow(missing_docs)]
    fn is_required(&self) -> bool;
    #[allow(missing_docs)]
    fn on_update_behavior(&self) -> OnUpdateBehavior;
    /// True once the user edited the field.
    fn is_updated(&self) -> bool;
    /// The current stored value.
    fn value(&self) -> Result<FieldValue, StorageError>;
    /// Invokes `on_update` with the current stored value.
    fn notify_update(&self) -> Result<(), StorageError>;
    /// The disabled state, if the field supports it.
    fn as_disableable(&self) -> Option<Arc<dyn Disableable>>;

    /// Returns true if the field supports disabling and is currently disabled.
    fn is_disabled(&self) -> bool {
        self.as_disableable().is_some_and(|d| d.is_disabled())
    }

    /// A field needs attention if it is required, not disabled (when `skip_disabled` is set) and
    /// empty.
    ///
    /// A value that cannot be read counts as empty.
    fn needs_attention(&self, skip_disabled: bool) -> bool {
        if skip_disabled && self.is_disabled() {
            return false;
        }
        if !self.is_required() {
            return false;
        }
        self.value()
            .inspect_err(|e| log::error!("Failed to read field '{}': {e}", self.key()))
            .map_or(true, |value| value.is_empty())
    }
}

impl std::fmt::Debug for dyn AnySettingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnySettingField")
            .field("title", &self.title())
            .field("key", &self.key())
            .finish()
    }
}

type Callback<T> = Box<dyn Fn(&T) + Send + Sync>;

/// A presentation independent descriptor pairing a [`StorageField`] with its metadata.
///
/// User edits go through [`edit`](SettingField::edit), which writes the storage field, marks the
/// descriptor as updated and calls the `on_change` listeners. The `on_update` callback runs later,
/// when the owning [`CategorySettings`](crate::CategorySettings) is saved.
pub struct SettingField<T> {
    title: String,
    storage: Arc<StorageField<T>>,
    kind: FieldKind,
    required: bool,
    behavior: OnUpdateBehavior,
    updated: AtomicBool,
    disabled: Option<Arc<DisabledFlag>>,
    on_update: Callback<T>,
    on_change: Vec<Callback<T>>,
}

impl<T> std::fmt::Debug for SettingField<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingField")
            .field("title", &self.title)
            .field("key", &self.storage.key())
            .field("kind", &self.kind)
            .field("required", &self.required)
            .finish()
    }
}

impl<T> SettingField<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Creates a field of `kind` with that kind's default update policy.
    pub fn new(title: impl Into<String>, storage: Arc<StorageField<T>>, kind: FieldKind) -> Self {
        Self {
            title: title.into(),
            storage,
            kind,
            required: false,
            behavior: kind.default_behavior(),
            updated: AtomicBool::new(false),
            disabled: kind.is_disableable().then(Default::default),
            on_update: Box::new(|_| {}),
            on_change: Vec::new(),
        }
    }

    /// Marks the field as required.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Overrides the update policy.
    pub fn with_behavior(mut self, behavior: OnUpdateBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Callback invoked on save, see [`OnUpdateBehavior`].
    pub fn on_update(mut self, f: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_update = Box::new(f);
        self
    }

    /// Listener invoked synchronously after every edit.
    pub fn on_change(mut self, f: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_change.push(Box::new(f));
        self
    }

    /// The backing storage field.
    pub fn storage(&self) -> &Arc<StorageField<T>> {
        &self.storage
    }

    /// Current stored value.
    pub fn get(&self) -> Result<T, StorageError> {
        self.storage.get()
    }

    /// Applies a user edit.
    pub fn edit(&self, value: T) -> Result<(), StorageError> {
        self.storage.set(value.clone())?;
        self.updated.store(true, Ordering::Relaxed);
        for listener in &self.on_change {
            listener(&value);
        }
        Ok(())
    }

    /// Sets the disabled state. Does nothing for kinds that cannot be disabled.
    pub fn set_disabled(&self, disabled: bool) {
        match &self.disabled {
            Some(flag) => flag.set_disabled(disabled),
            None => log::warn!("Field '{}' cannot be disabled", self.storage.key()),
        }
    }
}

impl<T> AnySettingField for SettingField<T>
where
    T: ToFieldValue + Clone + Send + Sync + 'static,
{
    fn title(&self) -> &str {
        &self.title
    }

    fn key(&self) -> &str {
        self.storage.key()
    }

    fn kind(&self) -> FieldKind {
        self.kind
    }

    fn is_required(&self) -> bool {
        self.required
    }

    fn on_update_behavior(&self) -> OnUpdateBehavior {
        self.behavior
    }

    fn is_updated(&self) -> bool {
        self.updated.load(Ordering::Relaxed)
    }

    fn value(&self) -> Result<FieldValue, StorageError> {
        Ok(self.storage.get()?.to_field_value())
    }

    fn notify_update(&self) -> Result<(), StorageError> {
        let value = self.storage.get()?;
        (self.on_update)(&value);
        Ok(())
    }

    fn as_disableable(&self) -> Option<Arc<dyn Disableable>> {
        self.disabled
            .clone()
            .map(|flag| flag as Arc<dyn Disableable>)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use yokai_state::{MemoryPlatformContext, StateContext};

    use super::*;

    fn storage<T>(key: &str, init: T) -> Arc<StorageField<T>>
    where
        T: std::str::FromStr + std::fmt::Display + Clone + Send + Sync + 'static,
        T::Err: std::fmt::Display,
    {
        let state = StateContext::default();
        state.init(Arc::new(MemoryPlatformContext::new())).unwrap();
        Arc::new(StorageField::new(state.plain().clone(), "test", key, init))
    }

    #[test]
    fn test_kind_defaults() {
        let text = SettingField::new("Name", storage("name", String::new()), FieldKind::Text);
        assert_eq!(text.on_update_behavior(), OnUpdateBehavior::OnChanged);
        assert!(text.as_disableable().is_some());

        let flag = SettingField::new("Flag", storage("flag", false), FieldKind::Boolean);
        assert_eq!(flag.on_update_behavior(), OnUpdateBehavior::OnSaved);

        let dir = SettingField::new("Dir", storage("dir", String::new()), FieldKind::Directory);
        assert!(dir.as_disableable().is_none());
        dir.set_disabled(true);
        assert!(!dir.is_disabled());
    }

    #[test]
    fn test_debug_shows_key() {
        let field = SettingField::new("Name", storage("user_name", String::new()), FieldKind::Text);
        let debug = format!("{field:?}");
        assert!(debug.contains("\"user_name\""));
        assert!(debug.contains("Text"));
    }

    #[test]
    fn test_edit_marks_updated_and_notifies_listeners() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        let field = SettingField::new("Name", storage("name", String::new()), FieldKind::Text)
            .on_change(move |v: &String| seen_clone.lock().unwrap().push(v.clone()));

        assert!(!field.is_updated());
        field.edit("yokai".to_string()).unwrap();

        assert!(field.is_updated());
        assert_eq!(field.get().unwrap(), "yokai");
        assert_eq!(*seen.lock().unwrap(), vec!["yokai".to_string()]);
    }

    #[test]
    fn test_notify_update_passes_stored_value() {
        let seen = Arc::new(Mutex::new(None));
        let seen_clone = seen.clone();
        let field = SettingField::new("Threads", storage("threads", 4), FieldKind::Text)
            .on_update(move |v: &i32| *seen_clone.lock().unwrap() = Some(*v));

        field.storage().set(6).unwrap();
        field.notify_update().unwrap();
        assert_eq!(*seen.lock().unwrap(), Some(6));
    }

    #[test]
    fn test_needs_attention() {
        let field =
            SettingField::new("Name", storage("name", String::new()), FieldKind::Text).required(true);
        assert!(field.needs_attention(true));

        field.set_disabled(true);
        assert!(!field.needs_attention(true));
        assert!(field.needs_attention(false));

        field.set_disabled(false);
        field.edit("  ".to_string()).unwrap();
        assert!(field.needs_attention(true));
        field.edit("value".to_string()).unwrap();
        assert!(!field.needs_attention(true));

        let optional = SettingField::new("Opt", storage("opt", 0), FieldKind::Text);
        assert!(!optional.needs_attention(true));
        let zero = SettingField::new("Zero", storage("zero", 0i64), FieldKind::Text).required(true);
        assert!(zero.needs_attention(true));
    }
}
