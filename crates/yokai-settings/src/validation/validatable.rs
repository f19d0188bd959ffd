use std::{collections::HashSet, sync::Arc};

use crate::{
    validation::{ValidationFailure, ValidationPriority, ValidationResult, ValidationRule},
    SettingsError,
};

/// Evaluates `rules` and aggregates their outcome.
///
/// Rules run in ascending priority, declaration order breaking ties, and all of them are
/// evaluated. If any failure belongs to a field that has a [`ValidationPriority::REQUIRED`]
/// rule, only the failures of such fields are returned, otherwise every failure is. Rules
/// without a field count as one field.
pub fn validate_rules(rules: &[Arc<dyn ValidationRule>]) -> ValidationResult {
    let mut sorted: Vec<&Arc<dyn ValidationRule>> = rules.iter().collect();
    sorted.sort_by_key(|rule| rule.priority());

    let mut failures = Vec::new();
    for rule in &sorted {
        let outcome = rule.validate();
        if !outcome.is_valid {
            failures.push(ValidationFailure::new(
                rule.message(),
                rule.field_id().map(str::to_owned),
            ));
        }
    }

    let required_fields: HashSet<Option<&str>> = sorted
        .iter()
        .filter(|rule| rule.priority() == ValidationPriority::REQUIRED)
        .map(|rule| rule.field_id())
        .collect();
    let required_failures: Vec<ValidationFailure> = failures
        .iter()
        .filter(|failure| required_fields.contains(&failure.field_id.as_deref()))
        .cloned()
        .collect();

    log::debug!(
        "Validated {} rules: {} failed, {} of them on required fields",
        rules.len(),
        failures.len(),
        required_failures.len()
    );

    if !required_failures.is_empty() {
        ValidationResult::Failure(required_failures)
    } else if !failures.is_empty() {
        ValidationResult::Failure(failures)
    } else {
        ValidationResult::Success
    }
}

/// Something with a set of validation rules.
pub trait Validatable: Send + Sync {
    /// The rules, in declaration order.
    fn validation_rules(&self) -> &[Arc<dyn ValidationRule>];

    /// Evaluates the rules, see [`validate_rules`].
    fn validate(&self) -> ValidationResult {
        validate_rules(self.validation_rules())
    }

    /// True while validation fails.
    fn is_blocked(&self) -> bool {
        !self.validate().is_valid()
    }
}

/// Validation off the calling task.
///
/// Runs exactly the algorithm of [`Validatable::validate`] on tokio's blocking pool. A pass runs
/// to completion once started; wrap the future in `tokio::time::timeout` to stop waiting for it.
#[async_trait::async_trait]
pub trait AsyncValidatable: Validatable {
    #[allow(missing_docs)]
    async fn validate_async(&self) -> Result<ValidationResult, SettingsError> {
        let rules = self.validation_rules().to_vec();
        let result = tokio::task::spawn_blocking(move || validate_rules(&rules)).await?;
        Ok(result)
    }
}

impl<T: Validatable + ?Sized> AsyncValidatable for T {}
