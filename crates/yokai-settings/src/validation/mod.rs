//! Rule based validation of setting fields.
//!
//! Rules are evaluated in ascending [`ValidationPriority`]. When a field with a
//! [`ValidationPriority::REQUIRED`] rule fails, only the failures of such fields are reported so
//! the user first fills in what is missing.

mod extensions;
mod notice;
mod result;
mod rule;
pub mod rules;
mod state;
mod validatable;

pub use extensions::{
    is_category_blocked, is_category_item_blocked, validate_category, validate_category_async,
    validate_category_item, validate_category_item_async,
};
pub use notice::{
    check_category_item_validation, check_category_item_validation_async, check_required_fields,
    check_validation, NoticeDetails, ValidationNotice, DEFAULT_NOTICE_TITLE,
    DEFAULT_REQUIRED_FIELDS_MESSAGE,
};
pub use result::{ValidationFailure, ValidationResult};
pub use rule::{CustomValidationRule, RuleOutcome, ValidationPriority, ValidationRule};
pub use state::{ValidationMode, ValidationState, ValidationTrigger};
pub use validatable::{validate_rules, AsyncValidatable, Validatable};
