/// The value of a setting field as seen by validation and attention checks.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// No value.
    Null,
    /// Value of an action-only field.
    Unit,
    #[allow(missing_docs)]
    Bool(bool),
    #[allow(missing_docs)]
    Int(i32),
    #[allow(missing_docs)]
    Long(i64),
    #[allow(missing_docs)]
    Float(f32),
    #[allow(missing_docs)]
    Text(String),
    /// A collection of values.
    List(Vec<FieldValue>),
    /// Any other structured value. Never considered empty.
    Other,
}

impl FieldValue {
    /// Null, blank text and numeric zero are empty. Everything else, including empty lists, is not.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(text) => text.trim().is_empty(),
            FieldValue::Int(v) => *v == 0,
            FieldValue::Long(v) => *v == 0,
            FieldValue::Float(v) => *v == 0.0,
            FieldValue::Unit | FieldValue::Bool(_) | FieldValue::List(_) | FieldValue::Other => {
                false
            }
        }
    }

    /// Whether a required field holding this value is filled in.
    ///
    /// Same as `!is_empty()`, except that empty lists are missing too.
    pub fn is_filled(&self) -> bool {
        match self {
            FieldValue::List(items) => !items.is_empty(),
            other => !other.is_empty(),
        }
    }
}

/// Conversion of a field's value into a [`FieldValue`].
pub trait ToFieldValue {
    #[allow(missing_docs)]
    fn to_field_value(&self) -> FieldValue;
}

macro_rules! impl_to_field_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl ToFieldValue for $ty {
                fn to_field_value(&self) -> FieldValue {
                    FieldValue::$variant(self.to_owned())
                }
            }
        )*
    };
}

impl_to_field_value! {
    bool => Bool,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    String => Text,
}

impl ToFieldValue for () {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Unit
    }
}

impl<T: ToFieldValue> ToFieldValue for Option<T> {
    fn to_field_value(&self) -> FieldValue {
        self.as_ref()
            .map_or(FieldValue::Null, ToFieldValue::to_field_value)
    }
}

impl<T: ToFieldValue> ToFieldValue for Vec<T> {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::List(self.iter().map(ToFieldValue::to_field_value).collect())
    }
}
