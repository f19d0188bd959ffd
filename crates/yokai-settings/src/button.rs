use std::sync::Arc;

use yokai_state::StorageError;

use crate::{AnySettingField, DisabledFlag, Disableable, FieldKind, FieldValue, OnUpdateBehavior};

/// An action-only field without storage.
///
/// Its value is [`FieldValue::Unit`] and it is never reported as updated.
pub struct ButtonField {
    title: String,
    button_text: String,
    required: bool,
    behavior: OnUpdateBehavior,
    disabled: Arc<DisabledFlag>,
    on_click: Box<dyn Fn() + Send + Sync>,
    on_update: Box<dyn Fn() + Send + Sync>,
}

impl std::fmt::Debug for ButtonField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ButtonField")
            .field("title", &self.title)
            .field("button_text", &self.button_text)
            .finish()
    }
}

impl ButtonField {
    /// Creates a button labelled `Click`.
    pub fn new(title: impl Into<String>, on_click: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            title: title.into(),
            button_text: "Click".to_string(),
            required: false,
            behavior: FieldKind::Button.default_behavior(),
            disabled: Arc::default(),
            on_click: Box::new(on_click),
            on_update: Box::new(|| {}),
        }
    }

    #[allow(missing_docs)]
    pub fn button_text(mut self, text: impl Into<String>) -> Self {
        self.button_text = text.into();
        self
    }

    #[allow(missing_docs)]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[allow(missing_docs)]
    pub fn with_behavior(mut self, behavior: OnUpdateBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Callback invoked on save.
    pub fn on_update(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_update = Box::new(f);
        self
    }

    /// Label of the button.
    pub fn text(&self) -> &str {
        &self.button_text
    }

    /// Runs the action unless the button is disabled. Returns whether it ran.
    pub fn click(&self) -> bool {
        if self.disabled.is_disabled() {
            return false;
        }
        (self.on_click)();
        true
    }
}

impl AnySettingField for ButtonField {
    fn title(&self) -> &str {
        &self.title
    }

    fn key(&self) -> &str {
        ""
    }

    fn kind(&self) -> FieldKind {
        FieldKind::Button
    }

    fn is_required(&self) -> bool {
        self.required
    }

    fn on_update_behavior(&self) -> OnUpdateBehavior {
        self.behavior
    }

    fn is_updated(&self) -> bool {
        false
    }

    fn value(&self) -> Result<FieldValue, StorageError> {
        Ok(FieldValue::Unit)
    }

    fn notify_update(&self) -> Result<(), StorageError> {
        (self.on_update)();
        Ok(())
    }

    fn as_disableable(&self) -> Option<Arc<dyn Disableable>> {
        Some(self.disabled.clone())
    }
}
