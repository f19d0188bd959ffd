//! Validation of categories and their items, which are only optionally validatable.

use crate::{
    validation::{AsyncValidatable, Validatable, ValidationResult},
    Category, CategoryItem, SettingsError,
};

fn validate_optional(validatable: Option<&dyn Validatable>) -> ValidationResult {
    validatable.map_or(ValidationResult::Success, |v| v.validate())
}

async fn validate_optional_async(
    validatable: Option<&dyn Validatable>,
) -> Result<ValidationResult, SettingsError> {
    match validatable {
        Some(validatable) => validatable.validate_async().await,
        None => Ok(ValidationResult::Success),
    }
}

/// Validates `category`, succeeding if it is not validatable.
pub fn validate_category(category: &dyn Category) -> ValidationResult {
    validate_optional(category.as_validatable())
}

#[allow(missing_docs)]
pub fn is_category_blocked(category: &dyn Category) -> bool {
    !validate_category(category).is_valid()
}

/// Validates `item`, succeeding if it is not validatable.
pub fn validate_category_item(item: &dyn CategoryItem) -> ValidationResult {
    validate_optional(item.as_validatable())
}

#[allow(missing_docs)]
pub fn is_category_item_blocked(item: &dyn CategoryItem) -> bool {
    !validate_category_item(item).is_valid()
}

#[allow(missing_docs)]
pub async fn validate_category_async(
    category: &dyn Category,
) -> Result<ValidationResult, SettingsError> {
    validate_optional_async(category.as_validatable()).await
}

#[allow(missing_docs)]
pub async fn validate_category_item_async(
    item: &dyn CategoryItem,
) -> Result<ValidationResult, SettingsError> {
    validate_optional_async(item.as_validatable()).await
}
