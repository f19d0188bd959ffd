#![doc = include_str!("../README.md")]

mod bindable;
mod button;
mod category;
mod defaults;
mod error;
mod field;
pub mod validation;
mod value;

pub use bindable::{bind, BindableBooleanField, BoolBindScope};
pub use button::ButtonField;
pub use category::{Category, CategoryItem, CategorySettings};
pub use error::SettingsError;
pub use field::{
    AnySettingField, Disableable, DisabledFlag, FieldKind, OnUpdateBehavior, SettingField,
};
pub use value::{FieldValue, ToFieldValue};
