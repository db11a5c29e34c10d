//! Traits which, typically, may be imported without concern: `use cliopts::prelude::*`.
use crate::model::Value;

/// Behaviour for extracting a typed T out of a coerced [`Value`].
// Needs to be imported in order to implement a custom `FromValue`.
pub trait FromValue: Sized {
    /// Extract `Self`, or `None` if the value holds a different type.
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Long(l) => Some(*l),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Double(d) => Some(*d),
            Value::Long(l) => Some(*l as f64),
            _ => None,
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Str(s) | Value::Keyword(s) | Value::Symbol(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl<T> FromValue for Vec<T>
where
    T: FromValue,
{
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Vector(values) => values.iter().map(T::from_value).collect(),
            _ => None,
        }
    }
}

impl<T> FromValue for Option<T>
where
    T: FromValue,
{
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Nil => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}
