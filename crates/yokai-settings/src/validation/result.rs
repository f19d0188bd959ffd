/// A failed rule as reported to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    #[allow(missing_docs)]
    pub message: String,
    /// Key of the field the failing rule belongs to.
    pub field_id: Option<String>,
}

impl ValidationFailure {
    #[allow(missing_docs)]
    pub fn new(message: impl Into<String>, field_id: Option<String>) -> Self {
        Self {
            message: message.into(),
            field_id,
        }
    }
}

/// Outcome of validating a set of rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    #[allow(missing_docs)]
    Success,
    /// The failures in evaluation order.
    Failure(Vec<ValidationFailure>),
}

impl ValidationResult {
    #[allow(missing_docs)]
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Success)
    }

    /// The failures, empty on success.
    pub fn failures(&self) -> &[ValidationFailure] {
        match self {
            ValidationResult::Success => &[],
            ValidationResult::Failure(failures) => failures,
        }
    }

    /// Every failure message.
    pub fn messages(&self) -> Vec<&str> {
        self.failures()
            .iter()
            .map(|failure| failure.message.as_str())
            .collect()
    }

    /// Failure messages of the field stored under `field_id`.
    pub fn messages_for_field(&self, field_id: &str) -> Vec<&str> {
        self.failures()
            .iter()
            .filter(|failure| failure.field_id.as_deref() == Some(field_id))
            .map(|failure| failure.message.as_str())
            .collect()
    }
}
