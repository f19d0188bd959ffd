use crate::validation::ValidationResult;

/// Progress of a validation pass as observed by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValidationState {
    /// No validation has run.
    #[default]
    Idle,
    /// A validation pass is running.
    Loading,
    #[allow(missing_docs)]
    Completed(ValidationResult),
}

impl ValidationState {
    #[allow(missing_docs)]
    pub fn is_loading(&self) -> bool {
        matches!(self, ValidationState::Loading)
    }

    /// The result of the last completed pass.
    pub fn result(&self) -> Option<&ValidationResult> {
        match self {
            ValidationState::Completed(result) => Some(result),
            ValidationState::Idle | ValidationState::Loading => None,
        }
    }

    /// True only after a pass that failed.
    pub fn is_blocked(&self) -> bool {
        self.result().is_some_and(|result| !result.is_valid())
    }
}

/// UI event that may start a validation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationTrigger {
    /// The user navigates to another screen.
    ScreenChange,
    /// The navigation drawer is opened or closed.
    DrawerToggle,
    /// The user leaves the settings.
    SettingsExit,
}

/// When validation runs automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValidationMode {
    #[allow(missing_docs)]
    OnScreenChange,
    #[allow(missing_docs)]
    OnDrawerToggle,
    #[allow(missing_docs)]
    OnSettingsExit,
    /// Both on drawer toggles and on leaving the settings.
    #[default]
    OnDrawerAndSettings,
    /// Only when validation is requested explicitly.
    Manual,
}

impl ValidationMode {
    /// Whether `trigger` starts a validation pass in this mode.
    pub fn should_validate(self, trigger: ValidationTrigger) -> bool {
        match self {
            ValidationMode::OnScreenChange => trigger == ValidationTrigger::ScreenChange,
            ValidationMode::OnDrawerToggle => trigger == ValidationTrigger::DrawerToggle,
            ValidationMode::OnSettingsExit => trigger == ValidationTrigger::SettingsExit,
            ValidationMode::OnDrawerAndSettings => matches!(
                trigger,
                ValidationTrigger::DrawerToggle | ValidationTrigger::SettingsExit
            ),
            ValidationMode::Manual => false,
        }
    }
}
