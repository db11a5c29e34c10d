use std::collections::BTreeMap;
use std::str::FromStr;

use crate::parser::ConfigError;
use crate::prelude::FromValue;

/// A coerced command line value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The literal `nil`.
    Nil,
    /// `true` or `false`.
    Bool(bool),
    /// A signed 64 bit integer.
    Long(i64),
    /// A 64 bit float.
    Double(f64),
    /// An uninterpreted string.
    Str(String),
    /// A keyword, stored without its leading `:`.
    Keyword(String),
    /// A symbol.
    Symbol(String),
    /// The accumulated values of a [`Coerce::Collection`] option.
    Vector(Vec<Value>),
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Long(l) => write!(f, "{l}"),
            Value::Double(d) => write!(f, "{d:?}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Keyword(k) => write!(f, ":{k}"),
            Value::Symbol(s) => write!(f, "{s}"),
            Value::Vector(values) => write!(
                f,
                "[{}]",
                values
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<String>>()
                    .join(" ")
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Long(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl<T> From<Vec<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Vec<T>) -> Self {
        Value::Vector(value.into_iter().map(Into::into).collect())
    }
}

/// The parsed options, keyed by canonical option name.
pub type Opts = BTreeMap<String, Value>;

/// The result of [`parse_args`](crate::parse_args): options plus the remaining positional arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parsed {
    /// Options by canonical name.
    pub opts: Opts,
    /// Positional arguments, in order.
    pub args: Vec<String>,
}

impl Parsed {
    /// Get the option `name` as type `T`.
    /// Returns `None` when the option is absent or holds a different type.
    ///
    /// ### Example
    /// ```
    /// # use cliopts_builder as cliopts;
    /// use cliopts::{parse_args, ParseConfig};
    ///
    /// let parsed = parse_args(&["--port", "8080", "serve"], &ParseConfig::new()).unwrap();
    ///
    /// assert_eq!(parsed.get::<i64>("port"), Some(8080));
    /// assert_eq!(parsed.get::<String>("port"), None);
    /// assert_eq!(parsed.args, vec!["serve".to_string()]);
    /// ```
    pub fn get<T: FromValue>(&self, name: &str) -> Option<T> {
        self.opts.get(name).and_then(T::from_value)
    }
}

/// The target type of a coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoerceType {
    /// Infer the type from the shape of the input (booleans, `nil`, numbers, keywords, else string).
    Auto,
    /// Only `true` or `false`.
    Boolean,
    /// A signed 64 bit integer.
    Long,
    /// A 64 bit float.
    Double,
    /// A long if possible, otherwise a double.
    Number,
    /// The input as is.
    String,
    /// A keyword; a leading `:` is optional.
    Keyword,
    /// A symbol.
    Symbol,
}

impl std::fmt::Display for CoerceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CoerceType::Auto => "auto",
            CoerceType::Boolean => "boolean",
            CoerceType::Long => "long",
            CoerceType::Double => "double",
            CoerceType::Number => "number",
            CoerceType::String => "string",
            CoerceType::Keyword => "keyword",
            CoerceType::Symbol => "symbol",
        };
        write!(f, "{name}")
    }
}

impl FromStr for CoerceType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches(':') {
            "" | "auto" => Ok(CoerceType::Auto),
            "boolean" | "bool" => Ok(CoerceType::Boolean),
            "long" | "int" => Ok(CoerceType::Long),
            "double" => Ok(CoerceType::Double),
            "number" => Ok(CoerceType::Number),
            "string" => Ok(CoerceType::String),
            "keyword" => Ok(CoerceType::Keyword),
            "symbol" => Ok(CoerceType::Symbol),
            other => Err(ConfigError(format!("Unknown coerce type '{other}'."))),
        }
    }
}

/// How the values of an option are coerced and stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coerce {
    /// A single value; repeating the option overwrites it.
    Scalar(CoerceType),
    /// Zero or more values, accumulated into a [`Value::Vector`].
    Collection(CoerceType),
}

impl Coerce {
    /// The element type of this coercion.
    pub fn element(&self) -> CoerceType {
        match self {
            Coerce::Scalar(t) | Coerce::Collection(t) => *t,
        }
    }

    /// Whether this coercion accumulates values.
    pub fn is_collection(&self) -> bool {
        matches!(self, Coerce::Collection(_))
    }
}

impl Default for Coerce {
    fn default() -> Self {
        Coerce::Scalar(CoerceType::Auto)
    }
}

impl From<CoerceType> for Coerce {
    fn from(value: CoerceType) -> Self {
        Coerce::Scalar(value)
    }
}

impl std::fmt::Display for Coerce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Coerce::Scalar(t) => write!(f, "{t}"),
            Coerce::Collection(CoerceType::Auto) => write!(f, "[]"),
            Coerce::Collection(t) => write!(f, "[{t}]"),
        }
    }
}

/// Parses `"long"`, `"string"`, ... as [`Coerce::Scalar`] and `"[string]"` or `"[]"` as [`Coerce::Collection`].
impl FromStr for Coerce {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        match s.strip_prefix('[') {
            Some(inner) => match inner.strip_suffix(']') {
                Some(inner) => Ok(Coerce::Collection(CoerceType::from_str(
                    inner.trim().trim_matches('"'),
                )?)),
                None => Err(ConfigError(format!("Unterminated collection coerce '{s}'."))),
            },
            None => Ok(Coerce::Scalar(CoerceType::from_str(s)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("string", Coerce::Scalar(CoerceType::String))]
    #[case("long", Coerce::Scalar(CoerceType::Long))]
    #[case("int", Coerce::Scalar(CoerceType::Long))]
    #[case(":keyword", Coerce::Scalar(CoerceType::Keyword))]
    #[case("bool", Coerce::Scalar(CoerceType::Boolean))]
    #[case("[string]", Coerce::Collection(CoerceType::String))]
    #[case("[\"string\"]", Coerce::Collection(CoerceType::String))]
    #[case("[]", Coerce::Collection(CoerceType::Auto))]
    #[case(" [ double ] ", Coerce::Collection(CoerceType::Double))]
    fn coerce_from_str(#[case] input: &str, #[case] expected: Coerce) {
        assert_eq!(Coerce::from_str(input).unwrap(), expected);
    }

    #[rstest]
    #[case("strin")]
    #[case("[string")]
    #[case("[[long]]")]
    fn coerce_from_str_invalid(#[case] input: &str) {
        let error = Coerce::from_str(input).unwrap_err();
        assert!(error.to_string().starts_with("Config error: "));
    }

    #[rstest]
    #[case(Value::Nil, "nil")]
    #[case(Value::Bool(false), "false")]
    #[case(Value::Long(-3), "-3")]
    #[case(Value::Double(1.0), "1.0")]
    #[case(Value::Keyword("k".to_string()), ":k")]
    #[case(Value::from(vec![1i64, 2]), "[1 2]")]
    #[case(Value::Vector(vec![]), "[]")]
    fn value_display(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
    }

    #[test]
    fn coerce_display_inverts_from_str() {
        for coerce in [
            Coerce::Scalar(CoerceType::Long),
            Coerce::Collection(CoerceType::Auto),
            Coerce::Collection(CoerceType::Symbol),
        ] {
            assert_eq!(Coerce::from_str(&coerce.to_string()).unwrap(), coerce);
        }
    }

    #[test]
    fn parsed_get() {
        let parsed = Parsed {
            opts: Opts::from([
                ("a".to_string(), Value::Bool(true)),
                ("b".to_string(), Value::from(vec!["x", "y"])),
            ]),
            args: vec![],
        };

        assert_eq!(parsed.get::<bool>("a"), Some(true));
        assert_eq!(
            parsed.get::<Vec<String>>("b"),
            Some(vec!["x".to_string(), "y".to_string()])
        );
        assert_eq!(parsed.get::<bool>("c"), None);
    }
}
