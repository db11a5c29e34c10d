use thiserror::Error;

use crate::api::{coerce, implicit, CoerceFailure, ParseConfig, Spec};
use crate::constant::ERROR_TYPE;
use crate::matcher::{MatchTokens, Matches};
use crate::model::{Coerce, Opts, Parsed, Value};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// An invalid configuration.
#[derive(Debug, Error)]
#[error("Config error: {0}")]
pub struct ConfigError(pub(crate) String);

/// The category of a [`CliError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cause {
    /// An option outside of the [`Restrict`](crate::Restrict)ed set.
    Restrict,
    /// A required option is absent.
    Require,
    /// A [`Validator`](crate::Validator) rejected the option's value.
    Validate,
    /// The input could not be coerced to the option's type.
    Coerce,
    /// No dispatch command matches the input.
    NoMatch,
    /// The input ended before a dispatch command was reached.
    InputExhausted,
}

impl std::fmt::Display for Cause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Cause::Restrict => "restrict",
            Cause::Require => "require",
            Cause::Validate => "validate",
            Cause::Coerce => "coerce",
            Cause::NoMatch => "no-match",
            Cause::InputExhausted => "input-exhausted",
        };
        write!(f, "{name}")
    }
}

/// A parse failure.
///
/// Equality is structural: two errors are equal when every field is, regardless of how they were built.
///
/// ### Example
/// ```
/// # use cliopts_builder as cliopts;
/// use cliopts::{parse_opts, Cause, CliError, CoerceType, ParseConfig};
///
/// let config = ParseConfig::new().coerce("b", CoerceType::Long);
/// let error = parse_opts(&["-b", "dude"], &config).unwrap_err();
///
/// assert_eq!(
///     error,
///     CliError {
///         cause: Cause::Coerce,
///         msg: "Coerce failure: cannot transform input \"dude\" to long".to_string(),
///         option: Some("b".to_string()),
///         value: Some("dude".to_string()),
///         spec: None,
///     }
/// );
/// assert_eq!(error.error_type(), "cliopts/parse");
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{msg}")]
pub struct CliError {
    /// The failure category.
    pub cause: Cause,
    /// The human readable message.
    pub msg: String,
    /// The (canonical) option the failure concerns.
    pub option: Option<String>,
    /// The raw input the failure concerns.
    pub value: Option<String>,
    /// The [`Spec`] in effect, if any.
    pub spec: Option<Spec>,
}

impl CliError {
    /// The `type` tag of the error: always [`ERROR_TYPE`].
    pub fn error_type(&self) -> &'static str {
        ERROR_TYPE
    }

    pub(crate) fn coerce(
        option: &str,
        value: Option<&str>,
        failure: CoerceFailure,
        spec: Option<Spec>,
    ) -> Self {
        Self {
            cause: Cause::Coerce,
            msg: format!("Coerce failure: {failure}"),
            option: Some(option.to_string()),
            value: value.map(String::from),
            spec,
        }
    }

    pub(crate) fn restrict(option: &str, value: Option<&str>, spec: Option<Spec>) -> Self {
        Self {
            cause: Cause::Restrict,
            msg: format!("Unknown option: :{option}"),
            option: Some(option.to_string()),
            value: value.map(String::from),
            spec,
        }
    }

    pub(crate) fn require(option: &str, spec: Option<Spec>) -> Self {
        Self {
            cause: Cause::Require,
            msg: format!("Required option: :{option}"),
            option: Some(option.to_string()),
            value: None,
            spec,
        }
    }

    pub(crate) fn validate(option: &str, value: &Value, msg: String, spec: Option<Spec>) -> Self {
        Self {
            cause: Cause::Validate,
            msg,
            option: Some(option.to_string()),
            value: Some(value.to_string()),
            spec,
        }
    }

    pub(crate) fn no_match(wrong_input: &str, available: &[String]) -> Self {
        let msg = if available.is_empty() {
            format!("No matching command: {wrong_input}")
        } else {
            format!(
                "No matching command: {wrong_input} (available: {})",
                available.join(", ")
            )
        };

        Self {
            cause: Cause::NoMatch,
            msg,
            option: None,
            value: Some(wrong_input.to_string()),
            spec: None,
        }
    }

    pub(crate) fn input_exhausted(available: &[String]) -> Self {
        let msg = if available.is_empty() {
            "Input exhausted".to_string()
        } else {
            format!("Input exhausted (available: {})", available.join(", "))
        };

        Self {
            cause: Cause::InputExhausted,
            msg,
            option: None,
            value: None,
            spec: None,
        }
    }
}

/// Turn the matched tokens into coerced, defaulted and checked options.
pub(crate) fn capture(matches: Matches, config: &ParseConfig) -> Result<Parsed, CliError> {
    let Matches {
        options,
        arguments,
        rest,
    } = matches;
    let spec = config.spec_ref();
    let mut opts = Opts::default();

    // 1. Coerce the matched options.
    for MatchTokens {
        name,
        values,
        negated,
    } in options
    {
        if !config.allows(&name) {
            config.raise(CliError::restrict(
                &name,
                values.first().map(String::as_str),
                spec.cloned(),
            ))?;
            continue;
        }

        let to = config.coerce_for(&name);

        if negated {
            store(&mut opts, &name, to, Value::Bool(false));
            continue;
        }

        if values.is_empty() {
            match implicit(to.element()) {
                Ok(value) => store(&mut opts, &name, to, value),
                Err(failure) => {
                    config.raise(CliError::coerce(&name, None, failure, spec.cloned()))?
                }
            }
        }

        for raw in &values {
            match coerce(raw, to.element()) {
                Ok(value) => store(&mut opts, &name, to, value),
                Err(failure) => config.raise(CliError::coerce(
                    &name,
                    Some(raw.as_str()),
                    failure,
                    spec.cloned(),
                ))?,
            }
        }
    }

    // 2. Assign positional arguments to options, in order.
    let mut args = Vec::default();
    let mut names = config.positional_names().iter();
    let mut absorbing: Option<(&str, Coerce)> = None;

    for raw in arguments {
        let target = match absorbing {
            Some(target) => Some(target),
            None => match names.next() {
                Some(name) => {
                    let to = config.coerce_for(name);

                    // A collection absorbs every remaining positional argument.
                    if to.is_collection() {
                        absorbing.replace((name.as_str(), to));
                    }

                    Some((name.as_str(), to))
                }
                None => None,
            },
        };

        match target {
            Some((name, _)) if !config.allows(name) => {
                config.raise(CliError::restrict(name, Some(raw.as_str()), spec.cloned()))?
            }
            Some((name, to)) => match coerce(&raw, to.element()) {
                Ok(value) => store(&mut opts, name, to, value),
                Err(failure) => config.raise(CliError::coerce(
                    name,
                    Some(raw.as_str()),
                    failure,
                    spec.cloned(),
                ))?,
            },
            None => args.push(raw),
        }
    }

    args.extend(rest);

    // 3. Fill in defaults for the absent options.
    for (name, value) in config.defaults() {
        opts.entry(name).or_insert(value);
    }

    // 4. Check presence.
    for name in config.required() {
        if !opts.contains_key(name) {
            config.raise(CliError::require(name, spec.cloned()))?;
        }
    }

    // 5. Check values.
    let mut invalid = Vec::default();

    for (name, validator) in config.validators() {
        if let Some(value) = opts.get(name) {
            if !validator.check(value) {
                invalid.push(CliError::validate(
                    name,
                    value,
                    validator.message(name, value),
                    spec.cloned(),
                ));
            }
        }
    }

    for error in invalid {
        if let Some(option) = &error.option {
            opts.remove(option);
        }

        config.raise(error)?;
    }

    #[cfg(feature = "tracing_debug")]
    {
        debug!("Captured opts={opts:?}, args={args:?}.");
    }

    Ok(Parsed { opts, args })
}

fn store(opts: &mut Opts, name: &str, to: Coerce, value: Value) {
    match to {
        Coerce::Scalar(_) => {
            opts.insert(name.to_string(), value);
        }
        Coerce::Collection(_) => {
            let entry = opts
                .entry(name.to_string())
                .or_insert_with(|| Value::Vector(Vec::default()));

            match entry {
                Value::Vector(values) => values.push(value),
                other => {
                    let previous = std::mem::replace(other, Value::Nil);
                    *other = Value::Vector(vec![previous, value]);
                }
            }
        }
    }
}
