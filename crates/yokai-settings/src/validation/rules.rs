//! Ready made rules over setting fields.
//!
//! Every helper returns a [`CustomValidationRule`] tied to the field's key, so the message can be
//! replaced with [`CustomValidationRule::with_message`].

use std::{fmt::Display, sync::Arc};

use crate::{
    validation::{CustomValidationRule, ValidationPriority, ValidationRule},
    AnySettingField, CategorySettings, SettingField, ToFieldValue,
};

/// Default message template of the required field rules.
pub const REQUIRED_MESSAGE_TEMPLATE: &str = "Field '{fieldTitle}' is required";

/// Predicate over a field, used to pick the fields a rule set covers.
pub type FieldPredicate = Arc<dyn Fn(&dyn AnySettingField) -> bool + Send + Sync>;

fn current_value<T>(field: &SettingField<T>) -> Option<T>
where
    T: ToFieldValue + Clone + Send + Sync + 'static,
{
    field
        .get()
        .inspect_err(|e| log::error!("Failed to read field '{}': {e}", field.key()))
        .ok()
}

fn is_filled(field: &dyn AnySettingField) -> bool {
    field
        .value()
        .inspect_err(|e| log::error!("Failed to read field '{}': {e}", field.key()))
        .is_ok_and(|value| value.is_filled())
}

/// The field must be filled in, if it is required.
///
/// Blank text, numeric zero and empty lists count as missing.
pub fn required(field: Arc<dyn AnySettingField>) -> CustomValidationRule {
    let message = REQUIRED_MESSAGE_TEMPLATE.replace("{fieldTitle}", field.title());
    let key = field.key().to_owned();

    CustomValidationRule::new(message, move || !field.is_required() || is_filled(field.as_ref()))
        .for_field(key)
        .with_priority(ValidationPriority::REQUIRED)
}

/// The field's value must satisfy `predicate`. The value is `None` if it cannot be read.
pub fn custom<T>(
    field: Arc<SettingField<T>>,
    message: impl Into<String>,
    predicate: impl Fn(Option<&T>) -> bool + Send + Sync + 'static,
) -> CustomValidationRule
where
    T: ToFieldValue + Clone + Send + Sync + 'static,
{
    let key = field.key().to_owned();
    CustomValidationRule::new(message, move || predicate(current_value(&field).as_ref()))
        .for_field(key)
}

/// Checks a value that may be absent. Absence is only accepted when the field is optional.
fn check_present<T>(
    field: &SettingField<T>,
    value: Option<T>,
    check: impl FnOnce(T) -> bool,
) -> bool
where
    T: ToFieldValue + Clone + Send + Sync + 'static,
{
    match value {
        Some(value) => check(value),
        None => !field.is_required(),
    }
}

/// Text must have at least `min` characters.
pub fn min_length(field: Arc<SettingField<String>>, min: usize) -> CustomValidationRule {
    let message = format!(
        "Field '{}' must contain at least {min} characters",
        field.title()
    );
    let key = field.key().to_owned();
    CustomValidationRule::new(message, move || {
        check_present(&field, current_value(&field), |v| v.chars().count() >= min)
    })
    .for_field(key)
}

/// Text must have at most `max` characters.
pub fn max_length(field: Arc<SettingField<String>>, max: usize) -> CustomValidationRule {
    let message = format!(
        "Field '{}' must contain at most {max} characters",
        field.title()
    );
    let key = field.key().to_owned();
    CustomValidationRule::new(message, move || {
        check_present(&field, current_value(&field), |v| v.chars().count() <= max)
    })
    .for_field(key)
}

/// Value must lie within `min..=max`.
pub fn range<T>(field: Arc<SettingField<T>>, min: T, max: T) -> CustomValidationRule
where
    T: ToFieldValue + PartialOrd + Display + Clone + Send + Sync + 'static,
{
    let message = format!(
        "Value of field '{}' must be between {min} and {max}",
        field.title()
    );
    let key = field.key().to_owned();
    CustomValidationRule::new(message, move || {
        check_present(&field, current_value(&field), |v| v >= min && v <= max)
    })
    .for_field(key)
}

/// Like [`range`] for fields that may hold no value.
pub fn range_optional<T>(field: Arc<SettingField<Option<T>>>, min: T, max: T) -> CustomValidationRule
where
    T: ToFieldValue + PartialOrd + Display + Clone + Send + Sync + 'static,
{
    let message = format!(
        "Value of field '{}' must be between {min} and {max}",
        field.title()
    );
    let key = field.key().to_owned();
    CustomValidationRule::new(message, move || {
        match current_value(&field).flatten() {
            Some(v) => v >= min && v <= max,
            None => !field.is_required(),
        }
    })
    .for_field(key)
}

/// Text must be blank or an absolute `http`/`https` URL with a host.
pub fn url(field: Arc<SettingField<String>>) -> CustomValidationRule {
    let message = format!("Field '{}' must contain a valid link", field.title());
    let key = field.key().to_owned();
    CustomValidationRule::new(message, move || {
        check_present(&field, current_value(&field), |v| is_valid_url(&v))
    })
    .for_field(key)
}

fn is_valid_url(value: &str) -> bool {
    if value.trim().is_empty() {
        return true;
    }
    match url::Url::parse(value) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.has_host(),
        Err(_) => false,
    }
}

/// One required rule per required field of `settings` for which `predicate` holds.
///
/// `message_template` may contain `{fieldTitle}`. With `check_disabled` unset the predicate is
/// evaluated again on every validation and fields it rejects at that point pass.
pub fn all_required_fields_filled(
    settings: &CategorySettings,
    message_template: &str,
    check_disabled: bool,
    predicate: FieldPredicate,
) -> Vec<Arc<dyn ValidationRule>> {
    let mut rules: Vec<Arc<dyn ValidationRule>> = Vec::new();
    for field in settings.fields() {
        if !field.is_required() || (check_disabled && !predicate(&**field)) {
            continue;
        }

        let message = message_template.replace("{fieldTitle}", field.title());
        let key = field.key().to_owned();
        let field = field.clone();
        let predicate = predicate.clone();

        let rule = CustomValidationRule::new(message, move || {
            if !check_disabled && !predicate(&*field) {
                return true;
            }
            is_filled(&*field)
        })
        .for_field(key)
        .with_priority(ValidationPriority::REQUIRED);
        rules.push(Arc::new(rule));
    }
    rules
}

/// Accepts every field.
pub fn any_field() -> FieldPredicate {
    Arc::new(|_: &dyn AnySettingField| true)
}

/// Accepts fields that can be disabled and currently are not.
pub fn enabled_fields() -> FieldPredicate {
    Arc::new(|field: &dyn AnySettingField| {
        field
            .as_disableable()
            .is_some_and(|disableable| !disableable.is_disabled())
    })
}

#[cfg(test)]
mod tests {
    use yokai_state::{MemoryPlatformContext, StateContext, StorageField};

    use super::*;
    use crate::validation::RuleOutcome;

    struct Fixture(StateContext);

    impl Fixture {
        fn new() -> Self {
            let state = StateContext::default();
            state.init(Arc::new(MemoryPlatformContext::new())).unwrap();
            Self(state)
        }

        fn text(&self, key: &str, init: &str) -> Arc<SettingField<String>> {
            Arc::new(SettingField::text(
                key.to_uppercase(),
                Arc::new(StorageField::new(
                    self.0.plain().clone(),
                    "rules",
                    key,
                    init.to_string(),
                )),
            ))
        }

        fn int(&self, key: &str, init: i32) -> Arc<SettingField<i32>> {
            Arc::new(SettingField::new(
                key,
                Arc::new(StorageField::new(self.0.plain().clone(), "rules", key, init)),
                crate::FieldKind::Text,
            ))
        }
    }

    #[test]
    fn test_required() {
        let fixture = Fixture::new();
        let name = Arc::new(
            SettingField::text(
                "Name",
                Arc::new(StorageField::new(
                    fixture.0.plain().clone(),
                    "rules",
                    "name",
                    String::new(),
                )),
            )
            .required(true),
        );
        let rule = required(name.clone());

        assert_eq!(rule.field_id(), Some("name"));
        assert_eq!(rule.priority(), ValidationPriority::REQUIRED);
        assert_eq!(rule.message(), "Field 'Name' is required");
        assert!(!rule.validate().is_valid);

        name.edit("Yokai".to_string()).unwrap();
        assert_eq!(rule.validate(), RuleOutcome::valid());
    }

    #[test]
    fn test_required_ignores_optional_fields() {
        let fixture = Fixture::new();
        let rule = required(fixture.text("name", ""));
        assert!(rule.validate().is_valid);
    }

    #[test]
    fn test_lengths() {
        let fixture = Fixture::new();
        let field = fixture.text("name", "ab");
        let min = min_length(field.clone(), 3);
        let max = max_length(field.clone(), 4);

        assert!(!min.validate().is_valid);
        assert!(max.validate().is_valid);
        assert_eq!(min.message(), "Field 'NAME' must contain at least 3 characters");

        field.edit("абвгд".to_string()).unwrap();
        assert!(min.validate().is_valid);
        assert!(!max.validate().is_valid);
    }

    #[test]
    fn test_range() {
        let fixture = Fixture::new();
        let threads = fixture.int("threads", 0);
        let rule = range(threads.clone(), 1, 16);

        assert!(!rule.validate().is_valid);
        threads.edit(16).unwrap();
        assert!(rule.validate().is_valid);
        threads.edit(17).unwrap();
        assert!(!rule.validate().is_valid);
        assert_eq!(
            rule.message(),
            "Value of field 'threads' must be between 1 and 16"
        );
    }

    #[test]
    fn test_range_optional() {
        let fixture = Fixture::new();
        let storage = |key: &str| {
            Arc::new(StorageField::json(
                fixture.0.plain().clone(),
                "rules",
                key,
                None::<i32>,
            ))
        };

        let optional = Arc::new(SettingField::new("Limit", storage("limit"), crate::FieldKind::Text));
        let rule = range_optional(optional.clone(), 1, 10);
        assert!(rule.validate().is_valid);
        optional.edit(Some(11)).unwrap();
        assert!(!rule.validate().is_valid);

        let mandatory = Arc::new(
            SettingField::new("Port", storage("port"), crate::FieldKind::Text).required(true),
        );
        let rule = range_optional(mandatory.clone(), 1, 10);
        assert!(!rule.validate().is_valid);
        mandatory.edit(Some(5)).unwrap();
        assert!(rule.validate().is_valid);
    }

    #[test]
    fn test_url() {
        let fixture = Fixture::new();
        let field = fixture.text("server", "");
        let rule = url(field.clone());

        assert!(rule.validate().is_valid);
        for valid in ["https://example.com", "http://localhost:8080/path?q=1"] {
            field.edit(valid.to_string()).unwrap();
            assert!(rule.validate().is_valid, "{valid}");
        }
        for invalid in ["example.com", "ftp://example.com", "https://", "not a url"] {
            field.edit(invalid.to_string()).unwrap();
            assert!(!rule.validate().is_valid, "{invalid}");
        }
    }

    #[test]
    fn test_custom() {
        let fixture = Fixture::new();
        let field = fixture.text("name", "admin");
        let rule = custom(field.clone(), "reserved", |v: Option<&String>| {
            v.is_some_and(|v| v != "admin")
        });

        assert_eq!(rule.validate(), RuleOutcome::invalid("reserved"));
        field.edit("user".to_string()).unwrap();
        assert!(rule.validate().is_valid);
        assert_eq!(rule.priority(), ValidationPriority::CUSTOM);
    }
}
