use std::fmt;

/// Evaluation order of a rule. Lower runs first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValidationPriority(pub u32);

impl ValidationPriority {
    /// Completeness checks. Their failures hide every other failure.
    pub const REQUIRED: Self = Self(0);
    /// Everything else.
    pub const CUSTOM: Self = Self(100);
}

impl Default for ValidationPriority {
    fn default() -> Self {
        Self::CUSTOM
    }
}

/// Outcome of evaluating a single rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    #[allow(missing_docs)]
    pub is_valid: bool,
    #[allow(missing_docs)]
    pub error_message: Option<String>,
}

impl RuleOutcome {
    #[allow(missing_docs)]
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error_message: None,
        }
    }

    #[allow(missing_docs)]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error_message: Some(message.into()),
        }
    }
}

/// A side effect free check over one field or a group of fields.
pub trait ValidationRule: Send + Sync {
    /// Message reported when the rule fails.
    fn message(&self) -> &str;

    /// Key of the field the rule belongs to.
    fn field_id(&self) -> Option<&str> {
        None
    }

    #[allow(missing_docs)]
    fn priority(&self) -> ValidationPriority {
        ValidationPriority::CUSTOM
    }

    /// Evaluates the rule against the current field values.
    fn validate(&self) -> RuleOutcome;
}

type Predicate = Box<dyn Fn() -> bool + Send + Sync>;

/// A [`ValidationRule`] backed by a predicate.
///
/// All helpers in [`rules`](crate::validation::rules) produce one of these.
pub struct CustomValidationRule {
    message: String,
    field_id: Option<String>,
    priority: ValidationPriority,
    predicate: Predicate,
}

impl fmt::Debug for CustomValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomValidationRule")
            .field("message", &self.message)
            .field("field_id", &self.field_id)
            .field("priority", &self.priority)
            .finish()
    }
}

impl CustomValidationRule {
    /// A rule of [`ValidationPriority::CUSTOM`] not tied to a field.
    pub fn new(
        message: impl Into<String>,
        predicate: impl Fn() -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            field_id: None,
            priority: ValidationPriority::CUSTOM,
            predicate: Box::new(predicate),
        }
    }

    /// Ties the rule to the field stored under `key`.
    pub fn for_field(mut self, key: impl Into<String>) -> Self {
        self.field_id = Some(key.into());
        self
    }

    #[allow(missing_docs)]
    pub fn with_priority(mut self, priority: ValidationPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Replaces the failure message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl ValidationRule for CustomValidationRule {
    fn message(&self) -> &str {
        &self.message
    }

    fn field_id(&self) -> Option<&str> {
        self.field_id.as_deref()
    }

    fn priority(&self) -> ValidationPriority {
        self.priority
    }

    fn validate(&self) -> RuleOutcome {
        if (self.predicate)() {
            RuleOutcome::valid()
        } else {
            RuleOutcome::invalid(&self.message)
        }
    }
}
