use std::sync::Arc;

use crate::{
    validation::{
        extensions::{
            validate_category, validate_category_async, validate_category_item,
            validate_category_item_async,
        },
        Validatable, ValidationResult,
    },
    AnySettingField, Category, CategoryItem, SettingsError,
};

/// Title of notices that report missing data.
pub const DEFAULT_NOTICE_TITLE: &str = "Data required";
/// Message of notices listing fields that need attention.
pub const DEFAULT_REQUIRED_FIELDS_MESSAGE: &str = "Fill in the following fields";

/// What a [`ValidationNotice`] was built from.
#[derive(Debug, Clone)]
pub enum NoticeDetails {
    /// A failed validation pass.
    Validation(ValidationResult),
    /// Required fields that were empty when the notice was built.
    RequiredFields {
        #[allow(missing_docs)]
        fields: Vec<Arc<dyn AnySettingField>>,
        #[allow(missing_docs)]
        skip_disabled: bool,
    },
}

/// A blocking, non dismissible message for the presentation layer.
#[derive(Debug, Clone)]
pub struct ValidationNotice {
    title: String,
    message: String,
    details: NoticeDetails,
}

impl ValidationNotice {
    #[allow(missing_docs)]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[allow(missing_docs)]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Notices block until resolved and cannot be dismissed.
    pub fn is_dismissible(&self) -> bool {
        false
    }

    #[allow(missing_docs)]
    pub fn details(&self) -> &NoticeDetails {
        &self.details
    }

    /// Titles of the fields still needing attention.
    pub fn pending_fields(&self) -> Vec<&str> {
        match &self.details {
            NoticeDetails::Validation(_) => Vec::new(),
            NoticeDetails::RequiredFields {
                fields,
                skip_disabled,
            } => fields
                .iter()
                .filter(|field| field.needs_attention(*skip_disabled))
                .map(|field| field.title())
                .collect(),
        }
    }

    /// Recomputes whether the notice can be closed.
    ///
    /// A notice built from a validation result is resolved only by validating again.
    pub fn is_resolved(&self) -> bool {
        match &self.details {
            NoticeDetails::Validation(result) => result.is_valid(),
            NoticeDetails::RequiredFields {
                fields,
                skip_disabled,
            } => !fields
                .iter()
                .any(|field| field.needs_attention(*skip_disabled)),
        }
    }
}

fn failure_notice(result: ValidationResult, title: &str) -> Option<ValidationNotice> {
    if result.is_valid() {
        return None;
    }
    Some(ValidationNotice {
        title: title.to_owned(),
        message: result.messages().join("\n"),
        details: NoticeDetails::Validation(result),
    })
}

/// Validates every entry and collects all failures into one notice.
///
/// Returns `None` if everything is valid.
pub fn check_validation(
    validatables: &[&dyn Validatable],
    title: &str,
) -> Option<ValidationNotice> {
    let failures: Vec<_> = validatables
        .iter()
        .flat_map(|validatable| validatable.validate().failures().to_vec())
        .collect();

    if failures.is_empty() {
        None
    } else {
        failure_notice(ValidationResult::Failure(failures), title)
    }
}

/// Reports the category's failures if it has any, otherwise the item's.
pub fn check_category_item_validation(
    category: &dyn Category,
    item: &dyn CategoryItem,
    title: &str,
) -> Option<ValidationNotice> {
    failure_notice(validate_category(category), title)
        .or_else(|| failure_notice(validate_category_item(item), title))
}

/// Like [`check_category_item_validation`], validating on the blocking pool.
pub async fn check_category_item_validation_async(
    category: &dyn Category,
    item: &dyn CategoryItem,
    title: &str,
) -> Result<Option<ValidationNotice>, SettingsError> {
    if let Some(notice) = failure_notice(validate_category_async(category).await?, title) {
        return Ok(Some(notice));
    }
    Ok(failure_notice(validate_category_item_async(item).await?, title))
}

/// A notice listing the fields that need attention, or `None` if there are none.
pub fn check_required_fields(
    fields: &[Arc<dyn AnySettingField>],
    skip_disabled: bool,
    title: &str,
    message: &str,
) -> Option<ValidationNotice> {
    let pending: Vec<_> = fields
        .iter()
        .filter(|field| field.needs_attention(skip_disabled))
        .cloned()
        .collect();

    if pending.is_empty() {
        return None;
    }
    log::debug!("{} required fields need attention", pending.len());

    Some(ValidationNotice {
        title: title.to_owned(),
        message: message.to_owned(),
        details: NoticeDetails::RequiredFields {
            fields: pending,
            skip_disabled,
        },
    })
}

#[cfg(test)]
mod tests {
    use yokai_state::{MemoryPlatformContext, StateContext, StorageField};

    use super::*;
    use crate::{
        validation::{CustomValidationRule, ValidationRule},
        CategorySettings, SettingField,
    };

    fn state() -> StateContext {
        let state = StateContext::default();
        state.init(Arc::new(MemoryPlatformContext::new())).unwrap();
        state
    }

    fn settings(id: &str, message: &str, valid: bool) -> CategorySettings {
        let rule: Arc<dyn ValidationRule> =
            Arc::new(CustomValidationRule::new(message, move || valid));
        CategorySettings::new(id, Vec::new()).with_validation(vec![rule])
    }

    struct Screen(CategorySettings);

    impl CategoryItem for Screen {
        fn id(&self) -> &str {
            "screen"
        }

        fn title(&self) -> &str {
            "Screen"
        }

        fn as_validatable(&self) -> Option<&dyn Validatable> {
            self.0.as_validatable()
        }
    }

    struct Section {
        settings: CategorySettings,
        items: Vec<Arc<dyn CategoryItem>>,
    }

    impl Category for Section {
        fn id(&self) -> &str {
            "section"
        }

        fn title(&self) -> &str {
            "Section"
        }

        fn items(&self) -> &[Arc<dyn CategoryItem>] {
            &self.items
        }

        fn as_validatable(&self) -> Option<&dyn Validatable> {
            self.settings.as_validatable()
        }
    }

    #[test]
    fn test_check_validation_joins_messages() {
        let a = settings("a", "first", false);
        let b = settings("b", "second", true);
        let c = settings("c", "third", false);

        let notice = check_validation(&[&a, &b, &c], DEFAULT_NOTICE_TITLE).unwrap();
        assert_eq!(notice.title(), "Data required");
        assert_eq!(notice.message(), "first\nthird");
        assert!(!notice.is_dismissible());
        assert!(!notice.is_resolved());

        assert!(check_validation(&[&b], DEFAULT_NOTICE_TITLE).is_none());
    }

    #[test]
    fn test_category_failure_is_reported_first() {
        let item = Screen(settings("item", "item failed", false));
        let section = Section {
            settings: settings("section", "section failed", false),
            items: Vec::new(),
        };

        let notice = check_category_item_validation(&section, &item, "Check").unwrap();
        assert_eq!(notice.message(), "section failed");

        let section = Section {
            settings: settings("section", "section failed", true),
            items: Vec::new(),
        };
        let notice = check_category_item_validation(&section, &item, "Check").unwrap();
        assert_eq!(notice.message(), "item failed");

        let item = Screen(CategorySettings::new("plain", Vec::new()));
        assert!(check_category_item_validation(&section, &item, "Check").is_none());
    }

    #[tokio::test]
    async fn test_category_item_validation_async() {
        let item = Screen(settings("item", "item failed", false));
        let section = Section {
            settings: settings("section", "section failed", true),
            items: Vec::new(),
        };

        let notice = check_category_item_validation_async(&section, &item, "Check")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(notice.message(), "item failed");
    }

    #[test]
    fn test_required_fields_notice_resolves() {
        let state = state();
        let name = Arc::new(
            SettingField::text(
                "Name",
                Arc::new(StorageField::new(
                    state.plain().clone(),
                    "notice",
                    "name",
                    String::new(),
                )),
            )
            .required(true),
        );
        let fields: Vec<Arc<dyn AnySettingField>> = vec![name.clone()];

        let notice = check_required_fields(
            &fields,
            true,
            DEFAULT_NOTICE_TITLE,
            DEFAULT_REQUIRED_FIELDS_MESSAGE,
        )
        .unwrap();
        assert_eq!(notice.message(), "Fill in the following fields");
        assert_eq!(notice.pending_fields(), vec!["Name"]);
        assert!(!notice.is_resolved());

        name.edit("Yokai".to_string()).unwrap();
        assert!(notice.is_resolved());
        assert!(notice.pending_fields().is_empty());
        assert!(check_required_fields(&fields, true, "t", "m").is_none());
    }

    #[test]
    fn test_required_fields_skip_disabled() {
        let state = state();
        let name = Arc::new(
            SettingField::text(
                "Name",
                Arc::new(StorageField::new(
                    state.plain().clone(),
                    "notice",
                    "name",
                    String::new(),
                )),
            )
            .required(true),
        );
        name.set_disabled(true);
        let fields: Vec<Arc<dyn AnySettingField>> = vec![name];

        assert!(check_required_fields(&fields, true, "t", "m").is_none());
        assert!(check_required_fields(&fields, false, "t", "m").is_some());
    }
}
