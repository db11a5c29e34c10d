use thiserror::Error;

use crate::model::{CoerceType, Value};

/// Why a raw token could not be coerced.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoerceFailure {
    /// The explicit input does not have the shape of the target type.
    #[error("cannot transform input \"{token}\" to {to}")]
    Input {
        /// The raw token.
        token: String,
        /// The target type.
        to: CoerceType,
    },
    /// The option was given without a value, which only boolean-like types accept.
    #[error("cannot transform (implicit) true to {to}")]
    Implicit {
        /// The target type.
        to: CoerceType,
    },
}

/// Infer a [`Value`] from the shape of `token`.
///
/// ### Example
/// ```
/// # use cliopts_builder as cliopts;
/// use cliopts::{auto_coerce, Value};
///
/// assert_eq!(auto_coerce("true"), Value::Bool(true));
/// assert_eq!(auto_coerce("-12"), Value::Long(-12));
/// assert_eq!(auto_coerce("1.5"), Value::Double(1.5));
/// assert_eq!(auto_coerce(":fast"), Value::Keyword("fast".to_string()));
/// assert_eq!(auto_coerce("dude"), Value::Str("dude".to_string()));
/// ```
pub fn auto_coerce(token: &str) -> Value {
    match token {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "nil" => Value::Nil,
        _ => {
            if let Some(number) = number(token) {
                number
            } else if let Some(keyword) = keyword(token) {
                Value::Keyword(keyword.to_string())
            } else {
                Value::Str(token.to_string())
            }
        }
    }
}

/// Coerce `token` into the type `to`.
///
/// ### Example
/// ```
/// # use cliopts_builder as cliopts;
/// use cliopts::{coerce, CoerceType, Value};
///
/// assert_eq!(coerce("1", CoerceType::String).unwrap(), Value::Str("1".to_string()));
/// assert_eq!(
///     coerce("dude", CoerceType::Long).unwrap_err().to_string(),
///     "cannot transform input \"dude\" to long",
/// );
/// ```
pub fn coerce(token: &str, to: CoerceType) -> Result<Value, CoerceFailure> {
    let invalid = || CoerceFailure::Input {
        token: token.to_string(),
        to,
    };

    match to {
        CoerceType::Auto => Ok(auto_coerce(token)),
        CoerceType::Boolean => match token {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(invalid()),
        },
        CoerceType::Long => token.parse::<i64>().map(Value::Long).map_err(|_| invalid()),
        CoerceType::Double => double(token).ok_or_else(invalid),
        CoerceType::Number => number(token).ok_or_else(invalid),
        CoerceType::String => Ok(Value::Str(token.to_string())),
        CoerceType::Keyword => match token.strip_prefix(':').unwrap_or(token) {
            "" => Err(invalid()),
            name => Ok(Value::Keyword(name.to_string())),
        },
        CoerceType::Symbol => Ok(Value::Symbol(token.to_string())),
    }
}

/// The value of an option given without any token.
pub(crate) fn implicit(to: CoerceType) -> Result<Value, CoerceFailure> {
    match to {
        CoerceType::Auto | CoerceType::Boolean => Ok(Value::Bool(true)),
        _ => Err(CoerceFailure::Implicit { to }),
    }
}

fn number(token: &str) -> Option<Value> {
    if !starts_numeric(token) {
        return None;
    }

    if let Ok(long) = token.parse::<i64>() {
        Some(Value::Long(long))
    } else {
        double(token)
    }
}

// Rejects magnitudes that overflow to infinity (ex: `1e400`).
fn double(token: &str) -> Option<Value> {
    if !starts_numeric(token) {
        return None;
    }

    token
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite())
        .map(Value::Double)
}

// Rejects the `inf`/`NaN` spellings that `f64::from_str` would otherwise accept.
fn starts_numeric(token: &str) -> bool {
    token
        .strip_prefix('-')
        .unwrap_or(token)
        .starts_with(|c: char| c.is_ascii_digit())
}

fn keyword(token: &str) -> Option<&str> {
    match token.strip_prefix(':') {
        Some(name) if !name.is_empty() => Some(name),
        _ => None,
    }
}
