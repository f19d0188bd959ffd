use std::sync::Arc;

use yokai_state::StorageError;

use crate::{AnySettingField, Disableable, FieldKind, FieldValue, OnUpdateBehavior, SettingField};

/// Rules propagating a boolean driver value into the disabled state of other fields.
///
/// Each target records the driver value that disables it; [`process`](BoolBindScope::process) sets
/// every target to `disabled == (rule == driver)`, independently of the others. Binding the same
/// target twice keeps the last rule.
///
/// ```
/// # use std::sync::Arc;
/// # use yokai_settings::{bind, ButtonField, AnySettingField};
/// let login = Arc::new(ButtonField::new("Log in", || {}));
/// let logout = Arc::new(ButtonField::new("Log out", || {}));
///
/// let scope = bind(|scope| {
///     scope.disabled_when(login.as_ref(), true);
///     scope.disabled_when(logout.as_ref(), false);
/// });
///
/// scope.process(true);
/// assert!(login.is_disabled());
/// assert!(!logout.is_disabled());
/// ```
#[derive(Default)]
pub struct BoolBindScope {
    bindings: Vec<(Arc<dyn Disableable>, bool)>,
}

impl std::fmt::Debug for BoolBindScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoolBindScope")
            .field("bindings", &self.bindings.len())
            .finish()
    }
}

/// Builds a [`BoolBindScope`].
pub fn bind(init: impl FnOnce(&mut BoolBindScope)) -> BoolBindScope {
    let mut scope = BoolBindScope::default();
    init(&mut scope);
    scope
}

impl BoolBindScope {
    /// Disables `target` whenever the driver equals `when`.
    ///
    /// Fields that cannot be disabled are skipped.
    pub fn disabled_when(&mut self, target: &dyn AnySettingField, when: bool) {
        match target.as_disableable() {
            Some(disableable) => self.bind_disableable(disableable, when),
            None => log::warn!(
                "Cannot bind field '{}': {:?} fields cannot be disabled",
                target.key(),
                target.kind()
            ),
        }
    }

    /// Disables `target` whenever the driver equals `when`.
    pub fn bind_disableable(&mut self, target: Arc<dyn Disableable>, when: bool) {
        let existing = self
            .bindings
            .iter()
            .position(|(bound, _)| same_target(bound, &target));
        match existing {
            Some(index) => self.bindings[index].1 = when,
            None => self.bindings.push((target, when)),
        }
    }

    /// Number of bound targets.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Applies the driver value to every target.
    pub fn process(&self, driver: bool) {
        for (target, rule) in &self.bindings {
            target.set_disabled(*rule == driver);
        }
    }
}

fn same_target(a: &Arc<dyn Disableable>, b: &Arc<dyn Disableable>) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}

/// A boolean field that drives a [`BoolBindScope`].
///
/// The scope is processed once on construction with the persisted value, so a reloaded session
/// shows the same layout, and again after every edit.
pub struct BindableBooleanField {
    field: SettingField<bool>,
    scope: Arc<BoolBindScope>,
}

impl std::fmt::Debug for BindableBooleanField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindableBooleanField")
            .field("field", &self.field)
            .field("scope", &self.scope)
            .finish()
    }
}

impl BindableBooleanField {
    /// Wraps `field` and applies its current value to `scope`.
    ///
    /// The scope is registered as a change listener of `field`, so edits made through
    /// [`field`](BindableBooleanField::field) propagate too.
    pub fn new(field: SettingField<bool>, scope: BoolBindScope) -> Result<Self, StorageError> {
        let scope = Arc::new(scope);
        scope.process(field.get()?);

        let listener = scope.clone();
        let field = field.on_change(move |value: &bool| listener.process(*value));
        Ok(Self { field, scope })
    }

    /// Applies a user edit and propagates it to the bound fields.
    pub fn edit(&self, value: bool) -> Result<(), StorageError> {
        self.field.edit(value)
    }

    /// The wrapped field.
    pub fn field(&self) -> &SettingField<bool> {
        &self.field
    }

    /// The driven scope.
    pub fn scope(&self) -> &BoolBindScope {
        &self.scope
    }

    /// Current stored value.
    pub fn get(&self) -> Result<bool, StorageError> {
        self.field.get()
    }
}

impl AnySettingField for BindableBooleanField {
    fn title(&self) -> &str {
        self.field.title()
    }

    fn key(&self) -> &str {
        self.field.key()
    }

    fn kind(&self) -> FieldKind {
        self.field.kind()
    }

    fn is_required(&self) -> bool {
        self.field.is_required()
    }

    fn on_update_behavior(&self) -> OnUpdateBehavior {
        self.field.on_update_behavior()
    }

    fn is_updated(&self) -> bool {
        self.field.is_updated()
    }

    fn value(&self) -> Result<FieldValue, StorageError> {
        self.field.value()
    }

    fn notify_update(&self) -> Result<(), StorageError> {
        self.field.notify_update()
    }

    fn as_disableable(&self) -> Option<Arc<dyn Disableable>> {
        self.field.as_disableable()
    }
}
