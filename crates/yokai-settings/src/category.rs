use std::sync::Arc;

use yokai_state::StorageError;

use crate::{
    validation::{rules, Validatable, ValidationRule},
    AnySettingField, FieldValue, OnUpdateBehavior,
};

/// An entry of a [`Category`], e.g. one screen.
pub trait CategoryItem: Send + Sync {
    #[allow(missing_docs)]
    fn id(&self) -> &str;
    #[allow(missing_docs)]
    fn title(&self) -> &str;

    /// The validation capability, if the item has one.
    fn as_validatable(&self) -> Option<&dyn Validatable> {
        None
    }

    /// Setting fields the item depends on.
    fn setting_fields(&self) -> Vec<Arc<dyn AnySettingField>> {
        Vec::new()
    }
}

/// A group of [`CategoryItem`]s.
pub trait Category: Send + Sync {
    #[allow(missing_docs)]
    fn id(&self) -> &str;
    #[allow(missing_docs)]
    fn title(&self) -> &str;
    #[allow(missing_docs)]
    fn items(&self) -> &[Arc<dyn CategoryItem>];

    /// The validation capability, if the category has one.
    fn as_validatable(&self) -> Option<&dyn Validatable> {
        None
    }

    /// Setting fields the category depends on.
    fn setting_fields(&self) -> Vec<Arc<dyn AnySettingField>> {
        Vec::new()
    }
}

/// An ordered group of setting fields that is saved as a whole.
///
/// Validation is optional: settings without rules are not [`Validatable`] through
/// [`as_validatable`](CategorySettings::as_validatable) and always validate successfully.
pub struct CategorySettings {
    id: String,
    title: Option<String>,
    fields: Vec<Arc<dyn AnySettingField>>,
    on_saved: Box<dyn Fn() + Send + Sync>,
    rules: Option<Vec<Arc<dyn ValidationRule>>>,
}

impl std::fmt::Debug for CategorySettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategorySettings")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("fields", &self.fields.len())
            .finish()
    }
}

impl CategorySettings {
    #[allow(missing_docs)]
    pub fn new(id: impl Into<String>, fields: Vec<Arc<dyn AnySettingField>>) -> Self {
        Self {
            id: id.into(),
            title: None,
            fields,
            on_saved: Box::new(|| {}),
            rules: None,
        }
    }

    #[allow(missing_docs)]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Callback invoked by [`save`](CategorySettings::save).
    pub fn on_saved(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_saved = Box::new(f);
        self
    }

    /// Makes the settings validatable, adding `rules` to any rules already set.
    pub fn with_validation(mut self, rules: Vec<Arc<dyn ValidationRule>>) -> Self {
        self.rules.get_or_insert_with(Vec::new).extend(rules);
        self
    }

    #[allow(missing_docs)]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[allow(missing_docs)]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[Arc<dyn AnySettingField>] {
        &self.fields
    }

    /// The validation capability, if rules were set.
    pub fn as_validatable(&self) -> Option<&dyn Validatable> {
        self.rules.as_ref().map(|_| self as &dyn Validatable)
    }

    /// Current value of the first field stored under `key`.
    pub fn get(&self, key: &str) -> Result<Option<FieldValue>, StorageError> {
        self.fields
            .iter()
            .find(|field| field.key() == key)
            .map(|field| field.value())
            .transpose()
    }

    /// Runs the `on_update` callbacks of every edited field and of every
    /// [`OnUpdateBehavior::OnSaved`] field, in declaration order.
    ///
    /// `on_saved` is invoked once per field, not once per call.
    pub fn save(&self) -> Result<(), StorageError> {
        for field in &self.fields {
            if field.is_updated() || field.on_update_behavior() == OnUpdateBehavior::OnSaved {
                field.notify_update()?;
            }
            (self.on_saved)();
        }
        Ok(())
    }

    /// Required rules for the required fields accepted by `predicate`, see
    /// [`rules::all_required_fields_filled`].
    pub fn required_fields_validation(
        &self,
        message_template: &str,
        check_disabled: bool,
        predicate: rules::FieldPredicate,
    ) -> Vec<Arc<dyn ValidationRule>> {
        rules::all_required_fields_filled(self, message_template, check_disabled, predicate)
    }

    /// Required rules that only apply while a field is enabled.
    ///
    /// Fields that cannot be disabled always pass.
    pub fn required_enabled_fields_validation(
        &self,
        message_template: &str,
    ) -> Vec<Arc<dyn ValidationRule>> {
        rules::all_required_fields_filled(self, message_template, false, rules::enabled_fields())
    }
}

impl Validatable for CategorySettings {
    fn validation_rules(&self) -> &[Arc<dyn ValidationRule>] {
        self.rules.as_deref().unwrap_or(&[])
    }
}
